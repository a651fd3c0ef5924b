//! # Domain Repositories
//!
//! 外部境界のtrait定義
//!
//! - **StateRepository**: 状態スナップショットの読み書き（ストア実装はAdapter層）
//! - **CategorySuggester**: カテゴリ提案（Gemini実装はAdapter層）

pub mod category_suggester;
pub mod state_repository;
