//! # Browse Repos Use Case
//!
//! ダッシュボードの絞り込み表示
//!
//! 検索語・カテゴリフィルタ・状態の版数が変わったときだけ再計算する

use crate::application::dto::repo_card::{CategorySummary, RepoCard};
use crate::domain::entities::repo::Repo;
use crate::domain::entities::star_state::StarState;
use crate::domain::services::repo_filter::{CategoryFilter, RepoFilterService};

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoKey {
    revision: u64,
    query: String,
    filter: CategoryFilter,
}

/// 絞り込み表示ユースケース
#[derive(Debug, Default)]
pub struct BrowseReposUseCase {
    query: String,
    filter: CategoryFilter,
    memo: Option<(MemoKey, Vec<Repo>)>,
}

impl BrowseReposUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(query: &str, filter: CategoryFilter) -> Self {
        Self {
            query: query.to_string(),
            filter,
            memo: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// 現在の条件に一致するリポジトリ
    ///
    /// # Arguments
    ///
    /// * `state` - 状態スナップショット
    /// * `revision` - 状態の版数（`StateContainer::revision`）
    pub fn visible(&mut self, state: &StarState, revision: u64) -> &[Repo] {
        let key = MemoKey {
            revision,
            query: self.query.clone(),
            filter: self.filter.clone(),
        };

        let stale = match &self.memo {
            Some((cached, _)) => *cached != key,
            None => true,
        };
        if stale {
            let repos = RepoFilterService::filter(&state.repos, &key.query, &key.filter)
                .into_iter()
                .cloned()
                .collect();
            self.memo = Some((key, repos));
        }

        self.memo
            .as_ref()
            .map(|(_, repos)| repos.as_slice())
            .unwrap_or_default()
    }

    /// 表示用カード（カテゴリ解決済み）
    pub fn cards(&mut self, state: &StarState, revision: u64) -> Vec<RepoCard> {
        self.visible(state, revision)
            .iter()
            .map(|repo| RepoCard::resolve(repo, state))
            .collect()
    }

    /// サイドバーのカテゴリ一覧とリポジトリ数（カテゴリの並び順）
    pub fn category_summaries(state: &StarState) -> Vec<CategorySummary> {
        state
            .categories
            .iter()
            .map(|category| CategorySummary {
                category: category.clone(),
                repo_count: state.count_in_category(&category.id),
            })
            .collect()
    }
}
