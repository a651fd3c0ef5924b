//! # Domain Layer
//!
//! カテゴリ・リポジトリ・状態スナップショットと、その上の純粋なルール
//!
//! ストレージ、HTTP、端末入出力には依存しない。
//! 外部との境界は `repositories` のtraitとして定義し、実装はAdapter層に置く。
//!
//! - **entities**: Category, Repo / RepoDraft, StarState
//! - **repositories**: StateRepository, CategorySuggester
//! - **services**: 検索語とカテゴリによる絞り込み

pub mod entities;
pub mod repositories;
pub mod services;
