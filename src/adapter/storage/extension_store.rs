//! Extension-Scoped Store
//!
//! 1つのJSONドキュメントにキーごとの値を持つストア。書き込み時は他のキーを保持する

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use super::{KeyValueStore, StorageScope};
use crate::domain::repositories::state_repository::StorageError;

pub struct ExtensionStore {
    path: PathBuf,
}

impl ExtensionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ドキュメントを置くディレクトリ（拡張機能のプロファイル）が存在するか
    ///
    /// 相対パスでディレクトリ部分が無い場合はカレントディレクトリを見る
    pub fn is_available(path: &Path) -> bool {
        match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new(".").is_dir(),
            Some(parent) => parent.is_dir(),
            None => false,
        }
    }

    fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(self.corrupt("document root is not an object")),
            Err(e) => Err(self.corrupt(&e.to_string())),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn corrupt(&self, reason: &str) -> StorageError {
        StorageError::Corrupt {
            key: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl KeyValueStore for ExtensionStore {
    fn scope(&self) -> StorageScope {
        StorageScope::Extension
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let mut document = self.read_document()?;
        Ok(document.remove(key).filter(|value| !value.is_null()))
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        if !Self::is_available(&self.path) {
            return Err(StorageError::Unavailable(format!(
                "extension storage directory for {} does not exist",
                self.path.display()
            )));
        }

        let mut document = self.read_document()?;
        document.insert(key.to_string(), value.clone());

        let json = serde_json::to_string_pretty(&Value::Object(document))?;
        fs::write(&self.path, json).map_err(|source| self.io_error(source))?;

        debug!("Wrote `{}` to {}", key, self.path.display());
        Ok(())
    }
}
