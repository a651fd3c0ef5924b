//! Gemini generateContent wire models

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Prompt asking for a short category, a color and a reason.
pub fn build_prompt(repo_name: &str, description: &str) -> String {
    format!(
        "Analyze this GitHub repository.\n\
         Name: {repo_name}\n\
         Description: {description}\n\
         \n\
         Suggest a single, short category name (max 15 chars) that best fits this repo \
         (e.g., \"Frontend\", \"Database\", \"DevOps\", \"AI\").\n\
         Also suggest a hex color code that fits the \"vibe\" of the category or repo language.\n\
         Provide a short reasoning (max 10 words)."
    )
}

pub fn suggestion_request(repo_name: &str, description: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(build_prompt(repo_name, description)),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: json!({
                "type": "OBJECT",
                "properties": {
                    "categoryName": { "type": "STRING" },
                    "colorHex": { "type": "STRING" },
                    "reasoning": { "type": "STRING" }
                },
                "required": ["categoryName", "colorHex", "reasoning"]
            }),
        },
    }
}
