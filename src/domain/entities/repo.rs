//! # Repo Entity
//!
//! スター付きリポジトリとその下書き

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// スター付きリポジトリ
///
/// `category_id` は弱参照で、存在しないカテゴリを指していてもよい
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repo {
    /// 通常は `owner/name`
    pub id: String,
    pub name: String,
    pub owner: String,
    pub description: String,
    pub url: String,
    pub language: Option<String>,
    pub stars: u64,
    pub category_id: String,
    /// ISO 8601 タイムスタンプ
    pub starred_at: String,
}

impl Repo {
    /// `owner/name` 形式の表示名
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// 分類ダイアログに渡す下書き
///
/// 全フィールドが任意。確定時に欠けている値はデフォルトで埋められる
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub language: Option<String>,
    pub stars: Option<u64>,
    pub category_id: Option<String>,
    pub starred_at: Option<String>,
}

impl RepoDraft {
    /// ホストページから取得した情報で下書きを作成（スター数は0）
    pub fn captured(owner: &str, name: &str, description: &str, url: &str) -> Self {
        Self {
            id: Some(format!("{owner}/{name}")),
            name: Some(name.to_string()),
            owner: Some(owner.to_string()),
            description: Some(description.to_string()),
            url: Some(url.to_string()),
            stars: Some(0),
            ..Self::default()
        }
    }

    /// 下書きを確定してリポジトリを作成
    ///
    /// 空文字列は未設定として扱う
    ///
    /// # Arguments
    ///
    /// * `category_id` - 割り当てるカテゴリID
    /// * `now` - `starred_at` が無い場合に使う現在時刻
    pub fn finalize(&self, category_id: String, now: DateTime<Utc>) -> Repo {
        let owner = non_empty(&self.owner).unwrap_or("unknown").to_string();
        let name = non_empty(&self.name).unwrap_or("unknown").to_string();
        let id = non_empty(&self.id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{owner}/{name}"));

        Repo {
            id,
            name,
            owner,
            description: self.description.clone().unwrap_or_default(),
            url: non_empty(&self.url).unwrap_or("#").to_string(),
            language: non_empty(&self.language).map(str::to_string),
            stars: self.stars.unwrap_or(0),
            category_id,
            starred_at: non_empty(&self.starred_at)
                .map(str::to_string)
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// AI提案を要求できるだけの情報（名前と説明）があるか
    pub fn can_suggest(&self) -> bool {
        non_empty(&self.name).is_some() && non_empty(&self.description).is_some()
    }
}

impl From<Repo> for RepoDraft {
    fn from(repo: Repo) -> Self {
        Self {
            id: Some(repo.id),
            name: Some(repo.name),
            owner: Some(repo.owner),
            description: Some(repo.description),
            url: Some(repo.url),
            language: repo.language,
            stars: Some(repo.stars),
            category_id: Some(repo.category_id),
            starred_at: Some(repo.starred_at),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 25, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_finalize_fills_defaults() {
        let draft = RepoDraft::default();

        let repo = draft.finalize("cat_tools".to_string(), fixed_now());

        assert_eq!(repo.id, "unknown/unknown");
        assert_eq!(repo.owner, "unknown");
        assert_eq!(repo.name, "unknown");
        assert_eq!(repo.description, "");
        assert_eq!(repo.url, "#");
        assert_eq!(repo.stars, 0);
        assert_eq!(repo.language, None);
        assert_eq!(repo.category_id, "cat_tools");
        assert_eq!(repo.starred_at, "2024-12-25T10:00:00.000Z");
    }

    #[test]
    fn test_finalize_derives_id_from_owner_and_name() {
        let draft = RepoDraft {
            owner: Some("acme".to_string()),
            name: Some("widget".to_string()),
            ..RepoDraft::default()
        };

        let repo = draft.finalize(String::new(), fixed_now());

        assert_eq!(repo.id, "acme/widget");
        assert_eq!(repo.full_name(), "acme/widget");
    }

    #[test]
    fn test_finalize_keeps_existing_fields() {
        let draft = RepoDraft {
            id: Some("facebook/react".to_string()),
            name: Some("react".to_string()),
            owner: Some("facebook".to_string()),
            description: Some("UI library".to_string()),
            url: Some("https://github.com/facebook/react".to_string()),
            language: Some("JavaScript".to_string()),
            stars: Some(205000),
            category_id: Some("cat_ui".to_string()),
            starred_at: Some("2024-01-01T00:00:00.000Z".to_string()),
        };

        let repo = draft.finalize("cat_tools".to_string(), fixed_now());

        assert_eq!(repo.id, "facebook/react");
        assert_eq!(repo.language.as_deref(), Some("JavaScript"));
        assert_eq!(repo.stars, 205000);
        assert_eq!(repo.category_id, "cat_tools");
        assert_eq!(repo.starred_at, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_captured_draft() {
        let draft = RepoDraft::captured(
            "rust-lang",
            "rust",
            "Empowering everyone",
            "https://github.com/rust-lang/rust",
        );

        assert_eq!(draft.id.as_deref(), Some("rust-lang/rust"));
        assert_eq!(draft.stars, Some(0));
        assert_eq!(draft.category_id, None);
        assert!(draft.can_suggest());
    }

    #[test]
    fn test_can_suggest_requires_description() {
        let draft = RepoDraft::captured("acme", "widget", "", "#");
        assert!(!draft.can_suggest());
    }

    #[test]
    fn test_repo_round_trips_through_draft() {
        let repo = RepoDraft::captured("acme", "widget", "desc", "https://example.com")
            .finalize("cat_x".to_string(), fixed_now());

        let again = RepoDraft::from(repo.clone()).finalize("cat_x".to_string(), Utc::now());

        assert_eq!(again, repo);
    }

    #[test]
    fn test_serialized_field_names() {
        let repo = RepoDraft::default().finalize("cat_ui".to_string(), fixed_now());
        let json = serde_json::to_value(&repo).unwrap();

        assert_eq!(json["categoryId"], "cat_ui");
        assert_eq!(json["starredAt"], "2024-12-25T10:00:00.000Z");
        assert!(json["language"].is_null());
    }
}
