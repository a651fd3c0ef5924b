//! # Stargazer
//!
//! スターしたGitHubリポジトリをカテゴリ分けして検索するツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: エンティティ、絞り込みルール、リポジトリトレイト（外部依存なし）
//! - **Application層**: 状態コンテナ、分類ダイアログ、絞り込み表示（ユースケース）
//! - **Adapter層**: 外部システムとの統合（ストレージ、Gemini, 設定ファイル等）
//! - **Driver層**: CLI、依存性注入
//!
//! 詳細は `DESIGN.md` を参照してください。

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
