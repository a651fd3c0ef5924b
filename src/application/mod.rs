//! # Application Layer
//!
//! スター管理のユースケース
//!
//! 状態の変更は `StateContainer` だけが行い、ダイアログや一覧表示は
//! コンテナ経由で状態を読み書きする。永続化やAI提案はtrait越しに受け取る。
//!
//! - **dto**: 一覧表示用のカードとカテゴリ集計
//! - **errors**: 入力検証エラー
//! - **use_cases**: 状態コンテナ、分類ダイアログ、絞り込み表示

pub mod dto;
pub mod errors;
pub mod use_cases;
