//! # Repo Card DTO
//!
//! 一覧表示用のリポジトリとカテゴリの組

use crate::domain::entities::category::Category;
use crate::domain::entities::repo::Repo;
use crate::domain::entities::star_state::StarState;

/// 未解決カテゴリの表示名
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// カテゴリバッジ
///
/// カテゴリIDが解決できない場合は未分類として扱う（エラーにしない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryBadge {
    Resolved(Category),
    Uncategorized,
}

impl CategoryBadge {
    pub fn label(&self) -> &str {
        match self {
            Self::Resolved(category) => &category.name,
            Self::Uncategorized => UNCATEGORIZED_LABEL,
        }
    }
}

/// 一覧表示用カード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCard {
    pub repo: Repo,
    pub badge: CategoryBadge,
}

impl RepoCard {
    /// 状態からカテゴリを解決してカードを作成
    pub fn resolve(repo: &Repo, state: &StarState) -> Self {
        let badge = state
            .category(&repo.category_id)
            .cloned()
            .map_or(CategoryBadge::Uncategorized, CategoryBadge::Resolved);

        Self {
            repo: repo.clone(),
            badge,
        }
    }
}

/// サイドバーのカテゴリ行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub repo_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_resolve_known_category() {
        let state = StarState::seed(Utc::now());

        let card = RepoCard::resolve(&state.repos[0], &state);

        assert_eq!(card.badge.label(), "UI/UX");
    }

    #[test]
    fn test_dangling_category_is_uncategorized() {
        let state = StarState::seed(Utc::now());
        let mut repo = state.repos[0].clone();
        repo.category_id = "cat_deleted".to_string();

        let card = RepoCard::resolve(&repo, &state);

        assert_eq!(card.badge, CategoryBadge::Uncategorized);
        assert_eq!(card.badge.label(), UNCATEGORIZED_LABEL);
    }

    #[test]
    fn test_empty_category_is_uncategorized() {
        let state = StarState::seed(Utc::now());
        let mut repo = state.repos[1].clone();
        repo.category_id = String::new();

        let card = RepoCard::resolve(&repo, &state);
        assert_eq!(card.badge, CategoryBadge::Uncategorized);
    }
}
