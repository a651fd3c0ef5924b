//! # Driver Layer (Presentation)
//!
//! CLIの入口と依存性の組み立て
//!
//! `StargazerWorkflow::new` が設定からストアと提案クライアントを選び、
//! コマンドごとにユースケースを呼び出す。削除の確認もここで行う。
//!
//! - **cli**: サブコマンドと分類フラグ
//! - **workflow**: コマンドの実行と書き込み完了待ち

pub mod cli;
pub mod workflow;

pub use cli::Args;
pub use workflow::StargazerWorkflow;
