//! # Categorize Repo Use Case
//!
//! リポジトリにカテゴリを割り当てるダイアログのワークフロー
//!
//! ## 状態遷移
//!
//! ```text
//! Closed -> Open(draft) -> {SelectingExisting, CreatingNew} -> Submitted -> Closed
//! ```
//!
//! キャンセルはどの状態からでも `Closed` に戻る。AI提案は開いている間だけ
//! 要求でき、ダイアログを閉じる・開き直すと世代が進むため、古い応答は破棄される。

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::application::errors::ValidationError;
use crate::application::use_cases::state_container::StateContainer;
use crate::domain::entities::category::{is_hex_color, Category, DEFAULT_CATEGORY_COLOR};
use crate::domain::entities::repo::{Repo, RepoDraft};
use crate::domain::repositories::category_suggester::{CategorySuggester, Suggestion};

/// ダイアログのサブ状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    SelectingExisting,
    CreatingNew,
}

/// 開いているダイアログの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSession {
    pub draft: RepoDraft,
    pub mode: DialogMode,
    pub selected_category_id: Option<String>,
    pub new_category_name: String,
    pub new_category_color: String,
    /// 直近のAI提案の理由
    pub reasoning: Option<String>,
    /// AI提案の応答待ち
    pub thinking: bool,
}

impl DialogSession {
    fn new(draft: RepoDraft) -> Self {
        let selected_category_id = draft.category_id.clone().filter(|id| !id.is_empty());
        Self {
            draft,
            mode: DialogMode::SelectingExisting,
            selected_category_id,
            new_category_name: String::new(),
            new_category_color: DEFAULT_CATEGORY_COLOR.to_string(),
            reasoning: None,
            thinking: false,
        }
    }
}

/// 発行済みのAI提案要求
///
/// 発行時の世代を保持し、応答適用時に照合する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionTicket {
    generation: u64,
    pub name: String,
    pub description: String,
}

/// AI提案を適用した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// 既存カテゴリに一致したので選択した
    SelectedExisting(String),
    /// 新規カテゴリとしてフォームに入力した
    PrefilledNew,
    /// 提案が得られなかった（状態は変更なし）
    NoSuggestion,
    /// ダイアログが閉じられた・開き直されたため破棄した
    Discarded,
    /// 要求できない（閉じている、応答待ち、名前か説明が無い）
    Unavailable,
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub repo: Repo,
    pub new_category: Option<Category>,
}

/// 分類ダイアログ
#[derive(Debug, Default)]
pub struct CategorizeDialog {
    session: Option<DialogSession>,
    generation: u64,
}

impl CategorizeDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存リポジトリまたは下書きでダイアログを開く
    ///
    /// 下書きにカテゴリがあれば選択済みにする
    pub fn open(&mut self, draft: RepoDraft) {
        self.generation += 1;
        self.session = Some(DialogSession::new(draft));
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DialogSession> {
        self.session.as_ref()
    }

    /// 既存カテゴリを選択（`SelectingExisting` に切り替える）
    pub fn select_category(&mut self, category_id: &str) -> Result<(), ValidationError> {
        let session = self.session_mut()?;
        session.mode = DialogMode::SelectingExisting;
        session.selected_category_id = Some(category_id.to_string());
        Ok(())
    }

    /// 新規作成と既存選択を切り替える
    pub fn set_creating_new(&mut self, creating: bool) -> Result<(), ValidationError> {
        let session = self.session_mut()?;
        session.mode = if creating {
            DialogMode::CreatingNew
        } else {
            DialogMode::SelectingExisting
        };
        Ok(())
    }

    pub fn set_new_category_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.session_mut()?.new_category_name = name.to_string();
        Ok(())
    }

    pub fn set_new_category_color(&mut self, color: &str) -> Result<(), ValidationError> {
        self.session_mut()?.new_category_color = color.to_string();
        Ok(())
    }

    /// AI提案の要求を開始する
    ///
    /// # Returns
    ///
    /// 要求できない場合は `None`（閉じている、応答待ち、名前か説明が無い）
    pub fn begin_suggestion(&mut self) -> Option<SuggestionTicket> {
        let generation = self.generation;
        let session = self.session.as_mut()?;
        if session.thinking || !session.draft.can_suggest() {
            return None;
        }

        session.thinking = true;
        Some(SuggestionTicket {
            generation,
            name: session.draft.name.clone().unwrap_or_default(),
            description: session.draft.description.clone().unwrap_or_default(),
        })
    }

    /// AI提案の応答を適用する
    ///
    /// 要求後にダイアログが閉じられた、または開き直された場合は破棄する
    ///
    /// # Arguments
    ///
    /// * `ticket` - `begin_suggestion` が返した要求
    /// * `suggestion` - 提案クライアントの応答
    /// * `categories` - 現在のカテゴリ一覧（名前の照合に使う）
    pub fn apply_suggestion(
        &mut self,
        ticket: SuggestionTicket,
        suggestion: Option<Suggestion>,
        categories: &[Category],
    ) -> SuggestionOutcome {
        if ticket.generation != self.generation {
            debug!("Discarding stale suggestion for {}", ticket.name);
            return SuggestionOutcome::Discarded;
        }
        let Some(session) = self.session.as_mut() else {
            debug!("Discarding suggestion for closed dialog: {}", ticket.name);
            return SuggestionOutcome::Discarded;
        };

        session.thinking = false;
        let Some(suggestion) = suggestion else {
            return SuggestionOutcome::NoSuggestion;
        };

        session.reasoning = Some(suggestion.reasoning);

        match categories
            .iter()
            .find(|c| c.name_matches(&suggestion.category_name))
        {
            Some(existing) => {
                session.mode = DialogMode::SelectingExisting;
                session.selected_category_id = Some(existing.id.clone());
                SuggestionOutcome::SelectedExisting(existing.id.clone())
            }
            None => {
                session.mode = DialogMode::CreatingNew;
                session.new_category_name = suggestion.category_name;
                session.new_category_color = if is_hex_color(&suggestion.color_hex) {
                    suggestion.color_hex
                } else {
                    DEFAULT_CATEGORY_COLOR.to_string()
                };
                SuggestionOutcome::PrefilledNew
            }
        }
    }

    /// 提案クライアントに問い合わせて結果を適用する
    pub async fn request_suggestion<C: CategorySuggester + ?Sized>(
        &mut self,
        suggester: &C,
        categories: &[Category],
    ) -> SuggestionOutcome {
        if !suggester.is_enabled() {
            return SuggestionOutcome::Unavailable;
        }
        let Some(ticket) = self.begin_suggestion() else {
            return SuggestionOutcome::Unavailable;
        };

        let suggestion = suggester.suggest(&ticket.name, &ticket.description).await;
        self.apply_suggestion(ticket, suggestion, categories)
    }

    /// 入力内容を確定してダイアログを閉じる
    ///
    /// # Errors
    ///
    /// 検証に失敗した場合はダイアログを開いたまま `ValidationError` を返す
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<Submission, ValidationError> {
        let session = self.session.as_ref().ok_or(ValidationError::DialogClosed)?;

        let (category_id, new_category) = match session.mode {
            DialogMode::CreatingNew => {
                let name = session.new_category_name.trim();
                if name.is_empty() {
                    return Err(ValidationError::EmptyCategoryName);
                }
                if !is_hex_color(&session.new_category_color) {
                    return Err(ValidationError::InvalidColor(
                        session.new_category_color.clone(),
                    ));
                }
                let category = Category::mint(name, session.new_category_color.clone());
                (category.id.clone(), Some(category))
            }
            DialogMode::SelectingExisting => (
                session.selected_category_id.clone().unwrap_or_default(),
                None,
            ),
        };

        let repo = session.draft.finalize(category_id, now);
        self.close();

        Ok(Submission { repo, new_category })
    }

    /// 送信して状態コンテナに反映する
    ///
    /// 永続化の完了は待たずにダイアログを閉じる
    pub fn commit(&mut self, container: &mut StateContainer) -> Result<Repo, ValidationError> {
        let Submission { repo, new_category } = self.submit(Utc::now())?;

        if let Some(category) = &new_category {
            info!("Creating category {} ({})", category.name, category.id);
        }
        let outcome = container.upsert_repo(repo.clone(), new_category);
        info!("Saved {} ({:?})", repo.id, outcome);

        Ok(repo)
    }

    /// 入力を破棄して閉じる
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if self.session.take().is_some() {
            self.generation += 1;
        }
    }

    fn session_mut(&mut self) -> Result<&mut DialogSession, ValidationError> {
        self.session.as_mut().ok_or(ValidationError::DialogClosed)
    }
}
