//! Configuration
//!
//! 設定ファイル（JSON）の読み込み

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SUGGESTION_TIMEOUT_SECS: u64 = 30;

/// Environment variables checked for the Gemini credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// ローカルストア（キーごとのファイル）を置くディレクトリ
    pub storage_dir: String,
    /// 拡張機能スコープのストア（単一JSONドキュメント）のパス
    pub extension_storage_path: Option<String>,

    // Suggestion service
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    pub suggestion_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: "~/.stargazer".to_string(),
            extension_storage_path: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            suggestion_timeout_secs: DEFAULT_SUGGESTION_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// 設定を読み込む。ファイルが無ければデフォルト設定を使う
    pub fn load(path: &str) -> Result<Self> {
        let expanded = expand_path(path);
        if !Path::new(&expanded).exists() {
            info!("No config file at {}, using defaults", expanded);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded)
            .with_context(|| format!("Failed to read config file: {}", expanded))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", expanded))?;
        Ok(config)
    }

    /// Gemini の資格情報を解決する（設定値、環境変数の順）
    ///
    /// 起動時に一度だけ呼び、クライアント作成時に渡す
    pub fn resolve_api_key(&self) -> Option<String> {
        self.gemini_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|key| !key.trim().is_empty())
            })
    }
}

/// Expands a leading tilde to the home directory.
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}
