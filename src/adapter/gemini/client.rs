//! Gemini Suggestion Client
//!
//! CategorySuggesterのGemini実装
//!
//! Failures never reach the caller: every error is logged and turned into `None`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Request};
use thiserror::Error;

use super::models::{suggestion_request, GenerateContentResponse};
use crate::adapter::config::Config;
use crate::domain::repositories::category_suggester::{CategorySuggester, Suggestion};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,

    #[error("invalid suggestion payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gemini-backed category suggester.
///
/// Created once at startup with its credential already resolved.
pub struct GeminiSuggester {
    http: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiSuggester {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model: model.into(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.resolve_api_key(),
            config.gemini_model.clone(),
            config.gemini_endpoint.clone(),
            Duration::from_secs(config.suggestion_timeout_secs),
        )
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(
        &self,
        api_key: &str,
        name: &str,
        description: &str,
    ) -> Result<Request, reqwest::Error> {
        self.http
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&suggestion_request(name, description))
            .timeout(self.timeout)
            .build()
    }

    async fn request(
        &self,
        api_key: &str,
        name: &str,
        description: &str,
    ) -> Result<Suggestion, SuggestionError> {
        let request = self.build_request(api_key, name, description)?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body.text().ok_or(SuggestionError::EmptyResponse)?;
        parse_suggestion(&text)
    }
}

/// Parse the JSON text returned in the candidate parts.
pub fn parse_suggestion(text: &str) -> Result<Suggestion, SuggestionError> {
    Ok(serde_json::from_str(text.trim())?)
}

#[async_trait]
impl CategorySuggester for GeminiSuggester {
    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn suggest(&self, name: &str, description: &str) -> Option<Suggestion> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Gemini API key not found.");
            return None;
        };

        match self.request(api_key, name, description).await {
            Ok(suggestion) => {
                debug!(
                    "Gemini suggested {} ({}) for {}",
                    suggestion.category_name, suggestion.color_hex, name
                );
                Some(suggestion)
            }
            Err(e) => {
                warn!("Gemini AI error: {}", e);
                None
            }
        }
    }
}
