//! Gemini Adapter Modules
//!
//! Gemini API によるカテゴリ提案

pub mod client;
pub mod models;

pub use client::GeminiSuggester;
