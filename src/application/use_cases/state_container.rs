//! # State Container
//!
//! カテゴリとリポジトリの正となるインメモリ状態を保持する
//!
//! 変更は必ず明示的な操作を通して行い、確定した変更ごとに状態全体を
//! 永続化キューへ積む。メモリ上の変更が先で、保存は後から非同期に行う。
//! 保存に失敗してもメモリ上の変更は巻き戻さない。

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};

use crate::application::errors::ValidationError;
use crate::domain::entities::category::{is_hex_color, Category};
use crate::domain::entities::repo::Repo;
use crate::domain::entities::star_state::{StarState, UpsertOutcome};
use crate::domain::repositories::state_repository::{StateRepository, StorageError};

enum PersistCommand {
    Save(StarState),
    Flush(oneshot::Sender<Result<(), StorageError>>),
}

/// 保存を直列化する書き込みキュー
///
/// ワーカータスクは1つだけで、スナップショットは積まれた順に保存される
struct PersistQueue {
    tx: mpsc::UnboundedSender<PersistCommand>,
}

impl PersistQueue {
    fn spawn<S: StateRepository + ?Sized + 'static>(repository: Arc<S>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<PersistCommand>();

        tokio::spawn(async move {
            let mut first_error: Option<StorageError> = None;

            while let Some(cmd) = rx.recv().await {
                match cmd {
                    PersistCommand::Save(state) => {
                        if let Err(e) = repository.save(&state).await {
                            warn!("Failed to persist state: {}", e);
                            first_error.get_or_insert(e);
                        }
                    }
                    PersistCommand::Flush(reply) => {
                        let result = match first_error.take() {
                            Some(e) => Err(e),
                            None => Ok(()),
                        };
                        let _ = reply.send(result);
                    }
                }
            }

            debug!("Persist queue closed");
        });

        Self { tx }
    }

    fn enqueue(&self, state: StarState) {
        if self.tx.send(PersistCommand::Save(state)).is_err() {
            warn!("Persist queue is closed, state change was not saved");
        }
    }

    async fn flush(&self) -> Result<(), StorageError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PersistCommand::Flush(reply_tx))
            .map_err(|_| StorageError::Unavailable("persist queue is closed".to_string()))?;

        reply_rx
            .await
            .map_err(|_| StorageError::Unavailable("persist worker stopped".to_string()))?
    }
}

/// 状態コンテナ
///
/// 状態の唯一の変更者。tokioランタイム上で作成すること
pub struct StateContainer {
    state: StarState,
    revision: u64,
    queue: PersistQueue,
}

impl StateContainer {
    /// リポジトリから状態を読み込んでコンテナを作成
    ///
    /// # Errors
    ///
    /// 読み込みに失敗した場合は `StorageError` を返す（初期状態で上書きしない）
    pub async fn load<S: StateRepository + ?Sized + 'static>(
        repository: Arc<S>,
    ) -> Result<Self, StorageError> {
        let state = repository.load().await?;
        Ok(Self::with_state(state, repository))
    }

    /// 既知の状態からコンテナを作成
    pub fn with_state<S: StateRepository + ?Sized + 'static>(
        state: StarState,
        repository: Arc<S>,
    ) -> Self {
        Self {
            state,
            revision: 0,
            queue: PersistQueue::spawn(repository),
        }
    }

    pub fn state(&self) -> &StarState {
        &self.state
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn repos(&self) -> &[Repo] {
        &self.state.repos
    }

    /// 変更ごとに増える版数（絞り込み結果のメモ化キー）
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// カテゴリを追加
    ///
    /// # Errors
    ///
    /// 名前が空、カラーが不正、またはIDが重複している場合
    pub fn add_category(&mut self, category: Category) -> Result<(), ValidationError> {
        if category.name.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        if !is_hex_color(&category.color) {
            return Err(ValidationError::InvalidColor(category.color));
        }
        if self.state.category(&category.id).is_some() {
            return Err(ValidationError::DuplicateCategory(category.id));
        }

        self.state.push_category(category);
        self.settle();
        Ok(())
    }

    /// リポジトリを追加または置き換え
    ///
    /// # Arguments
    ///
    /// * `repo` - 確定済みのリポジトリ
    /// * `new_category` - 同時に作成するカテゴリ（呼び出し側で新規IDを払い出し済み）
    pub fn upsert_repo(&mut self, repo: Repo, new_category: Option<Category>) -> UpsertOutcome {
        let outcome = self.state.upsert_repo(repo, new_category);
        self.settle();
        outcome
    }

    /// リポジトリを削除
    ///
    /// 破壊的操作のため、呼び出し側でユーザーの確認を取ってから呼ぶこと。
    /// 存在しないIDの場合は何もしない（保存も行わない）
    pub fn delete_repo(&mut self, id: &str) -> bool {
        let removed = self.state.delete_repo(id);
        if removed {
            self.settle();
        }
        removed
    }

    /// それまでに積まれた保存がすべて終わるまで待つ
    ///
    /// # Errors
    ///
    /// 前回のflush以降に失敗した保存があれば、最初のエラーを返す
    pub async fn flush(&self) -> Result<(), StorageError> {
        self.queue.flush().await
    }

    fn settle(&mut self) {
        self.revision += 1;
        self.queue.enqueue(self.state.clone());
    }
}
