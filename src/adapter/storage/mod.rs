//! Key-Value Storage Backends
//!
//! 状態スナップショットを保存するキー・バリューストア
//!
//! - **ExtensionStore**: 拡張機能スコープのストア。1つのJSONドキュメントに
//!   キーごとの構造化値を持つ
//! - **LocalStore**: フォールバック。キーごとのファイルにJSONテキストを保存する
//!
//! どちらを使うかは `detect_store` が実行時に判定する。
//! バックエンドの種類による分岐はこのモジュールの外に出さない。

pub mod extension_store;
pub mod local_store;

use std::path::Path;
use std::sync::Arc;

use log::info;
use serde_json::Value;

use crate::adapter::config::{expand_path, Config};
use crate::domain::repositories::state_repository::StorageError;

pub use extension_store::ExtensionStore;
pub use local_store::LocalStore;

/// 状態スナップショットを保存するキー
pub const STORAGE_KEY: &str = "stargazer_data";

/// 保存先の耐久スコープ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    Extension,
    Local,
}

/// キー・バリューストア
///
/// 同期APIで、呼び出し側が `spawn_blocking` で包む
pub trait KeyValueStore: Send + Sync {
    fn scope(&self) -> StorageScope;

    /// キーの値を取得。未保存なら `None`
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// キーの値を丸ごと置き換える
    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError>;
}

/// 利用可能なストアを判定する
///
/// 拡張機能ストアのパスが設定されていて、その親ディレクトリが存在する場合は
/// 拡張機能ストア、それ以外はローカルストアを使う
pub fn detect_store(config: &Config) -> Arc<dyn KeyValueStore> {
    if let Some(path) = config.extension_storage_path.as_deref() {
        let path = expand_path(path);
        if ExtensionStore::is_available(Path::new(&path)) {
            info!("Using extension storage at {}", path);
            return Arc::new(ExtensionStore::new(path));
        }
        info!(
            "Extension storage {} not available, falling back to local storage",
            path
        );
    }

    let dir = expand_path(&config.storage_dir);
    info!("Using local storage in {}", dir);
    Arc::new(LocalStore::new(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_prefers_extension_store() {
        let temp_dir = TempDir::new().unwrap();
        let extension_path = temp_dir.path().join("storage.json");
        let config = Config {
            storage_dir: temp_dir.path().join("local").to_string_lossy().to_string(),
            extension_storage_path: Some(extension_path.to_string_lossy().to_string()),
            ..Config::default()
        };

        assert_eq!(detect_store(&config).scope(), StorageScope::Extension);
    }

    #[test]
    fn test_detect_falls_back_to_local_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            storage_dir: temp_dir.path().to_string_lossy().to_string(),
            extension_storage_path: Some("/nonexistent/profile/storage.json".to_string()),
            ..Config::default()
        };

        assert_eq!(detect_store(&config).scope(), StorageScope::Local);
    }

    #[test]
    fn test_detect_without_extension_path() {
        let config = Config::default();
        assert_eq!(detect_store(&config).scope(), StorageScope::Local);
    }
}
