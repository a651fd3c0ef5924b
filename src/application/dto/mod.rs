//! # DTO
//!
//! 表示層へ渡すデータ

pub mod repo_card;
