//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Category**: ユーザー定義のカテゴリ
//! - **Repo**: スター付きリポジトリ（と下書きの RepoDraft）
//! - **StarState**: カテゴリとリポジトリの状態スナップショット

pub mod category;
pub mod repo;
pub mod star_state;
