//! # State Repository Trait
//!
//! 状態スナップショットの永続化を抽象化

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::star_state::StarState;

/// 永続化エラー
///
/// 読み込み・保存の失敗は握りつぶさずに呼び出し元へ返す
#[derive(Debug, Error)]
pub enum StorageError {
    /// バックエンドに到達できない
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// ファイルの読み書きに失敗
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 保存済みの値が解釈できない
    #[error("stored value under `{key}` is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// 状態のシリアライズに失敗
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 状態リポジトリ
///
/// 状態スナップショット全体を単位として読み書きする。部分更新はしない
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// 状態を読み込む
    ///
    /// # Returns
    ///
    /// 保存済みの状態。まだ何も保存されていなければ初期状態（`StarState::seed`）
    ///
    /// # Errors
    ///
    /// バックエンドに到達できない、または保存値が壊れている場合
    async fn load(&self) -> Result<StarState, StorageError>;

    /// 状態を保存する
    ///
    /// # Arguments
    ///
    /// * `state` - 保存するスナップショット
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合
    async fn save(&self, state: &StarState) -> Result<(), StorageError>;
}
