//! # StarState Entity
//!
//! カテゴリとリポジトリの状態スナップショット

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::repo::Repo;

/// `upsert_repo` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 先頭に追加された
    Inserted,
    /// 同じIDのリポジトリを位置を保ったまま置き換えた
    Replaced,
}

/// 状態スナップショット
///
/// 永続化・読み込みは常にこの単位で行う
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StarState {
    pub categories: Vec<Category>,
    pub repos: Vec<Repo>,
}

impl StarState {
    pub fn new(categories: Vec<Category>, repos: Vec<Repo>) -> Self {
        Self { categories, repos }
    }

    /// 初回起動時の初期状態（カテゴリ4件、リポジトリ2件）
    pub fn seed(now: DateTime<Utc>) -> Self {
        let starred_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        let categories = vec![
            Category::new("cat_tools", "Tools", "#7ee787"),
            Category::new("cat_ui", "UI/UX", "#db61a2"),
            Category::new("cat_learning", "Learning", "#d2a8ff"),
            Category::new("cat_backend", "Backend", "#ffa657"),
        ];

        let repos = vec![
            Repo {
                id: "facebook/react".to_string(),
                name: "react".to_string(),
                owner: "facebook".to_string(),
                description: "A declarative, efficient, and flexible JavaScript library for building user interfaces.".to_string(),
                url: "https://github.com/facebook/react".to_string(),
                language: Some("JavaScript".to_string()),
                stars: 205000,
                category_id: "cat_ui".to_string(),
                starred_at: starred_at.clone(),
            },
            Repo {
                id: "microsoft/typescript".to_string(),
                name: "TypeScript".to_string(),
                owner: "microsoft".to_string(),
                description: "TypeScript is a superset of JavaScript that compiles to clean JavaScript output.".to_string(),
                url: "https://github.com/microsoft/typescript".to_string(),
                language: Some("TypeScript".to_string()),
                stars: 95000,
                category_id: "cat_tools".to_string(),
                starred_at,
            },
        ];

        Self { categories, repos }
    }

    /// IDでカテゴリを解決（見つからなければ未分類扱い）
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// 名前（大文字小文字無視）でカテゴリを検索
    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name_matches(name))
    }

    pub fn repo(&self, id: &str) -> Option<&Repo> {
        self.repos.iter().find(|r| r.id == id)
    }

    /// カテゴリに属するリポジトリ数
    pub fn count_in_category(&self, category_id: &str) -> usize {
        self.repos
            .iter()
            .filter(|r| r.category_id == category_id)
            .count()
    }

    /// カテゴリを末尾に追加
    pub fn push_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// リポジトリを追加または置き換え
    ///
    /// `new_category` があれば先にカテゴリリストの末尾へ追加する。
    /// 同じIDが存在すれば位置を保って置き換え、無ければ先頭に追加する
    pub fn upsert_repo(&mut self, repo: Repo, new_category: Option<Category>) -> UpsertOutcome {
        if let Some(category) = new_category {
            self.categories.push(category);
        }

        match self.repos.iter_mut().find(|r| r.id == repo.id) {
            Some(existing) => {
                *existing = repo;
                UpsertOutcome::Replaced
            }
            None => {
                self.repos.insert(0, repo);
                UpsertOutcome::Inserted
            }
        }
    }

    /// リポジトリを削除
    ///
    /// # Returns
    ///
    /// 削除した場合に `true`、存在しなかった場合は `false`
    pub fn delete_repo(&mut self, id: &str) -> bool {
        let before = self.repos.len();
        self.repos.retain(|r| r.id != id);
        self.repos.len() != before
    }
}
