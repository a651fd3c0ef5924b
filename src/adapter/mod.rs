//! Adapter Layer
//!
//! 外部システム（キー・バリューストア, Gemini API, ホストページ）との統合

pub mod capture;
pub mod config;
pub mod gemini;
pub mod repositories;
pub mod storage;
