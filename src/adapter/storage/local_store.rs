//! Local Store
//!
//! キーごとに1ファイル、値はJSONテキストとして保存するフォールバックストア

use std::fs;
use std::path::PathBuf;

use log::debug;
use serde_json::Value;

use super::{KeyValueStore, StorageScope};
use crate::domain::repositories::state_repository::StorageError;

pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for LocalStore {
    fn scope(&self) -> StorageScope {
        StorageScope::Local
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let path = self.key_path(key);
        let io_error = |source| StorageError::Io {
            path: path.display().to_string(),
            source,
        };

        // Create parent directory if it doesn't exist
        fs::create_dir_all(&self.dir).map_err(io_error)?;

        let json = serde_json::to_string(value)?;
        fs::write(&path, json).map_err(io_error)?;

        debug!("Wrote `{}` to {}", key, path.display());
        Ok(())
    }
}
