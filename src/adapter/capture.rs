//! Star Capture
//!
//! ホストページで「Star」されたリポジトリを下書きに変換する
//!
//! The DOM observation itself lives outside this crate; it hands over the
//! repository URL and whatever description it could scrape.

use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use crate::domain::entities::repo::RepoDraft;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("invalid repository url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// ホストページから取得した情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarCapture {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl StarCapture {
    /// リポジトリURL（`https://github.com/<owner>/<name>`）から作成
    pub fn from_url(raw: &str, description: &str) -> Result<Self, CaptureError> {
        let invalid = |reason: &str| CaptureError::InvalidUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
        let mut segments = parsed
            .path_segments()
            .ok_or_else(|| invalid("url has no path"))?
            .filter(|s| !s.is_empty());

        let owner = segments.next().ok_or_else(|| invalid("missing owner"))?;
        let name = segments.next().ok_or_else(|| invalid("missing name"))?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            description: description.trim().to_string(),
            url: raw.to_string(),
        })
    }

    /// 下書きに変換（IDは `owner/name`、スター数は0）
    pub fn into_draft(self) -> RepoDraft {
        RepoDraft::captured(&self.owner, &self.name, &self.description, &self.url)
    }
}

/// ダッシュボードの「Simulate Star」用の下書き
pub fn simulated_star(now: DateTime<Utc>) -> RepoDraft {
    let millis = now.timestamp_millis();
    let millis_u64 = millis.unsigned_abs();

    RepoDraft {
        id: Some(format!("simulated/repo-{millis}")),
        owner: Some("simulated".to_string()),
        name: Some(format!("awesome-project-{}", millis_u64 % 100)),
        description: Some(
            "An amazing project that does incredible things with AI and React.".to_string(),
        ),
        stars: Some(millis_u64 % 5000 + 100),
        language: Some("TypeScript".to_string()),
        url: Some("#".to_string()),
        ..RepoDraft::default()
    }
}
