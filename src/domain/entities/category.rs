//! # Category Entity
//!
//! リポジトリを分類するためのカテゴリ

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 新規カテゴリ作成時のデフォルトカラー
pub const DEFAULT_CATEGORY_COLOR: &str = "#58a6ff";

/// カテゴリ
///
/// 作成後は変更されない。IDはカテゴリリスト内で一意
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    /// 不透明な一意識別子（例: `cat_tools`）
    pub id: String,
    /// 表示名
    pub name: String,
    /// 16進カラー（例: `#7ee787`）
    pub color: String,
}

impl Category {
    /// 既知のIDでカテゴリを作成
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// 新しいIDを払い出してカテゴリを作成
    ///
    /// IDは `cat_` プレフィックス付きで、呼び出しごとに一意
    pub fn mint(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::new(format!("cat_{}", Uuid::new_v4().simple()), name, color)
    }

    /// 名前が大文字小文字を区別せずに一致するか
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// `#rgb` または `#rrggbb` 形式の16進カラーかどうか
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
