//! # Category Suggester Trait
//!
//! 外部サービスによるカテゴリ提案を抽象化

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

/// カテゴリ提案
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// 提案されたカテゴリ名（15文字程度を想定、強制はしない）
    pub category_name: String,
    /// 16進カラー
    pub color_hex: String,
    /// 短い理由（10語程度を想定）
    pub reasoning: String,
}

/// カテゴリ提案クライアント
///
/// 失敗は呼び出し元に返さず、すべて `None` として扱う
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategorySuggester: Send + Sync {
    /// 資格情報が設定されていて提案を要求できるか
    fn is_enabled(&self) -> bool;

    /// リポジトリ名と説明からカテゴリを提案する
    ///
    /// # Returns
    ///
    /// 提案。無効化されている場合や通信・解析に失敗した場合は `None`
    async fn suggest(&self, name: &str, description: &str) -> Option<Suggestion>;
}
