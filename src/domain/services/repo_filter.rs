//! # Repo Filter Service
//!
//! カテゴリと検索語によるリポジトリの絞り込み

use std::fmt;

use crate::domain::entities::repo::Repo;

/// カテゴリフィルタ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// 全リポジトリ
    #[default]
    All,
    /// 指定カテゴリIDのリポジトリのみ
    Category(String),
}

impl CategoryFilter {
    /// 文字列からフィルタを作成します。`"all"` は全件を表します。
    ///
    /// # 例
    ///
    /// ```
    /// use stargazer::domain::services::repo_filter::CategoryFilter;
    ///
    /// assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    /// assert_eq!(
    ///     CategoryFilter::parse("cat_tools"),
    ///     CategoryFilter::Category("cat_tools".to_string())
    /// );
    /// ```
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    pub fn matches(&self, repo: &Repo) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => repo.category_id == *id,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(id) => f.write_str(id),
        }
    }
}

/// 絞り込みサービス
///
/// 入力のみに依存する純粋関数。出力は入力の相対順序を保つ
pub struct RepoFilterService;

impl RepoFilterService {
    /// 検索語とカテゴリの両方に一致するリポジトリを返す
    ///
    /// # Arguments
    ///
    /// * `repos` - 対象リポジトリ
    /// * `query` - 検索語（大文字小文字無視の部分一致）
    /// * `filter` - カテゴリフィルタ
    pub fn filter<'a>(repos: &'a [Repo], query: &str, filter: &CategoryFilter) -> Vec<&'a Repo> {
        let needle = query.to_lowercase();

        repos
            .iter()
            .filter(|repo| Self::matches_lowered(repo, &needle) && filter.matches(repo))
            .collect()
    }

    /// 検索語が名前・オーナー・説明のいずれかに含まれるか
    pub fn matches_query(repo: &Repo, query: &str) -> bool {
        Self::matches_lowered(repo, &query.to_lowercase())
    }

    fn matches_lowered(repo: &Repo, needle: &str) -> bool {
        repo.name.to_lowercase().contains(needle)
            || repo.owner.to_lowercase().contains(needle)
            || (!repo.description.is_empty() && repo.description.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::repo::RepoDraft;
    use chrono::Utc;

    fn repo(owner: &str, name: &str, description: &str, category_id: &str) -> Repo {
        RepoDraft::captured(owner, name, description, "#")
            .finalize(category_id.to_string(), Utc::now())
    }

    fn sample() -> Vec<Repo> {
        vec![
            repo("facebook", "react", "A JavaScript UI library", "cat_ui"),
            repo("microsoft", "TypeScript", "Typed JavaScript", "cat_tools"),
            repo("tokio-rs", "tokio", "", "cat_backend"),
            repo("vercel", "next.js", "The React Framework", "cat_ui"),
        ]
    }

    fn ids(repos: &[&Repo]) -> Vec<String> {
        repos.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_all_returns_everything() {
        let repos = sample();

        let result = RepoFilterService::filter(&repos, "", &CategoryFilter::All);

        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_query_matches_name_owner_and_description() {
        let repos = sample();

        let by_name = RepoFilterService::filter(&repos, "TYPESCRIPT", &CategoryFilter::All);
        assert_eq!(ids(&by_name), vec!["microsoft/TypeScript"]);

        let by_owner = RepoFilterService::filter(&repos, "tokio-", &CategoryFilter::All);
        assert_eq!(ids(&by_owner), vec!["tokio-rs/tokio"]);

        let by_description = RepoFilterService::filter(&repos, "react", &CategoryFilter::All);
        assert_eq!(
            ids(&by_description),
            vec!["facebook/react", "vercel/next.js"]
        );
    }

    #[test]
    fn test_empty_description_never_matches() {
        let repos = vec![repo("acme", "widget", "", "cat_tools")];

        assert!(!RepoFilterService::matches_query(&repos[0], "library"));
        assert!(RepoFilterService::matches_query(&repos[0], "WID"));
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let repos = sample();
        let filter = CategoryFilter::Category("cat_ui".to_string());

        let result = RepoFilterService::filter(&repos, "", &filter);

        assert_eq!(ids(&result), vec!["facebook/react", "vercel/next.js"]);
    }

    #[test]
    fn test_query_and_category_are_conjunctive() {
        let repos = sample();
        let filter = CategoryFilter::Category("cat_tools".to_string());

        let result = RepoFilterService::filter(&repos, "javascript", &filter);

        assert_eq!(ids(&result), vec!["microsoft/TypeScript"]);
    }

    #[test]
    fn test_unknown_category_yields_nothing() {
        let repos = sample();
        let filter = CategoryFilter::parse("cat_missing");

        assert!(RepoFilterService::filter(&repos, "", &filter).is_empty());
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(CategoryFilter::All.to_string(), "all");
        assert_eq!(CategoryFilter::parse("cat_ui").to_string(), "cat_ui");
    }
}
