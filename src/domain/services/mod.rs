//! # Domain Services
//!
//! エンティティに属さないビジネスルール
//!
//! - **RepoFilterService**: 検索語とカテゴリによる絞り込み

pub mod repo_filter;
