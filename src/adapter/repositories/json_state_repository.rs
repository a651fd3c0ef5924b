//! JSON State Repository Implementation
//!
//! StateRepositoryのJSON実装（状態スナップショットをキー・バリューストアに永続化）

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;
use tokio::task::JoinError;

use crate::adapter::config::Config;
use crate::adapter::storage::{detect_store, KeyValueStore, StorageScope, STORAGE_KEY};
use crate::domain::entities::star_state::StarState;
use crate::domain::repositories::state_repository::{StateRepository, StorageError};

/// キー・バリューストアベースの状態リポジトリ
pub struct JsonStateRepository {
    store: Arc<dyn KeyValueStore>,
}

impl JsonStateRepository {
    /// 新しいリポジトリを作成
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 設定から利用可能なストアを判定して作成
    pub fn detect(config: &Config) -> Self {
        Self::new(detect_store(config))
    }

    pub fn scope(&self) -> StorageScope {
        self.store.scope()
    }

    /// ストアから状態を読み込む（同期処理）
    fn load_sync(store: &dyn KeyValueStore) -> Result<StarState, StorageError> {
        let Some(value) = store.get(STORAGE_KEY)? else {
            info!("No existing state found, starting from defaults");
            return Ok(StarState::seed(Utc::now()));
        };

        let state: StarState = serde_json::from_value(value).map_err(|e| StorageError::Corrupt {
            key: STORAGE_KEY.to_string(),
            reason: e.to_string(),
        })?;

        info!(
            "Loaded state: {} categories, {} repos",
            state.categories.len(),
            state.repos.len()
        );

        Ok(state)
    }

    /// ストアに状態を保存する（同期処理）
    fn save_sync(store: &dyn KeyValueStore, state: &StarState) -> Result<(), StorageError> {
        let value = serde_json::to_value(state)?;
        store.set(STORAGE_KEY, &value)?;

        info!(
            "Saved state: {} categories, {} repos",
            state.categories.len(),
            state.repos.len()
        );

        Ok(())
    }
}

fn join_error(e: JoinError) -> StorageError {
    StorageError::Unavailable(format!("Failed to spawn blocking task: {}", e))
}

#[async_trait]
impl StateRepository for JsonStateRepository {
    async fn load(&self) -> Result<StarState, StorageError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || Self::load_sync(store.as_ref()))
            .await
            .map_err(join_error)?
    }

    async fn save(&self, state: &StarState) -> Result<(), StorageError> {
        let store = Arc::clone(&self.store);
        let state = state.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(store.as_ref(), &state))
            .await
            .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::storage::{ExtensionStore, LocalStore};
    use crate::domain::entities::category::Category;
    use crate::domain::entities::repo::RepoDraft;
    use std::fs;
    use tempfile::TempDir;

    fn sample_state() -> StarState {
        let mut state = StarState::seed(Utc::now());
        let category = Category::new("cat_db", "Database", "#ffa657");
        let repo = RepoDraft::captured("acme", "widget", "", "https://github.com/acme/widget")
            .finalize(category.id.clone(), Utc::now());
        state.upsert_repo(repo, Some(category));
        state
    }

    #[test]
    fn test_load_empty_store_returns_seed() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path());

        let state = JsonStateRepository::load_sync(&store).unwrap();

        assert_eq!(state.categories.len(), 4);
        assert_eq!(state.repos.len(), 2);
        assert_eq!(state.categories, StarState::seed(Utc::now()).categories);
    }

    #[test]
    fn test_load_valid_state() {
        let temp_dir = TempDir::new().unwrap();
        let json = r##"{
            "categories": [{"id": "cat_tools", "name": "Tools", "color": "#7ee787"}],
            "repos": [{
                "id": "acme/widget",
                "name": "widget",
                "owner": "acme",
                "description": "",
                "url": "#",
                "language": null,
                "stars": 0,
                "categoryId": "cat_tools",
                "starredAt": "2024-12-25T10:00:00.000Z"
            }]
        }"##;
        fs::write(temp_dir.path().join("stargazer_data.json"), json).unwrap();
        let store = LocalStore::new(temp_dir.path());

        let state = JsonStateRepository::load_sync(&store).unwrap();

        assert_eq!(state.categories.len(), 1);
        assert_eq!(state.repos[0].id, "acme/widget");
        assert_eq!(state.repos[0].language, None);
        assert_eq!(state.repos[0].starred_at, "2024-12-25T10:00:00.000Z");
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("stargazer_data.json"),
            r#"{"categories": "nope"}"#,
        )
        .unwrap();
        let store = LocalStore::new(temp_dir.path());

        let result = JsonStateRepository::load_sync(&store);

        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_round_trip_local_store() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonStateRepository::new(Arc::new(LocalStore::new(temp_dir.path())));
        let state = sample_state();

        repository.save(&state).await.unwrap();
        let loaded = repository.load().await.unwrap();

        assert_eq!(loaded, state);
        assert_eq!(repository.scope(), StorageScope::Local);
    }

    #[tokio::test]
    async fn test_round_trip_extension_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExtensionStore::new(temp_dir.path().join("storage.json"));
        let repository = JsonStateRepository::new(Arc::new(store));
        let state = sample_state();

        repository.save(&state).await.unwrap();
        let loaded = repository.load().await.unwrap();

        assert_eq!(loaded, state);
        assert_eq!(repository.scope(), StorageScope::Extension);
    }

    #[tokio::test]
    async fn test_save_of_loaded_state_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonStateRepository::new(Arc::new(LocalStore::new(temp_dir.path())));

        let first = repository.load().await.unwrap();
        repository.save(&first).await.unwrap();
        let second = repository.load().await.unwrap();

        assert_eq!(second, first);
    }
}
