//! # Application Errors
//!
//! ユースケース共通の入力検証エラー

use thiserror::Error;

/// 入力検証エラー
///
/// 送信をブロックし、ダイアログは開いたままになる
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("category name must not be empty")]
    EmptyCategoryName,

    #[error("invalid color `{0}`, expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("category id `{0}` already exists")]
    DuplicateCategory(String),

    #[error("categorize dialog is not open")]
    DialogClosed,
}
