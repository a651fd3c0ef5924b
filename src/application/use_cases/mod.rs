//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **StateContainer**: 状態の保持と変更ごとの永続化
//! - **BrowseReposUseCase**: 検索語とカテゴリによる絞り込み表示
//! - **CategorizeDialog**: カテゴリ割り当てダイアログのワークフロー

pub mod browse_repos;
pub mod categorize_repo;
pub mod state_container;
