//! Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ProviderConfig;
use crate::constants::{DEFAULT_GEMINI_API_PATH, MAX_OUTPUT_TOKENS, SYSTEM_INSTRUCTION, TEMPERATURE};
use crate::domain::types::ProviderId;
use crate::infrastructure::model::traits::ProviderAdapter;
use crate::infrastructure::model::types::{ProviderError, non_empty};

/// Gemini client for Google AI
#[derive(Clone)]
pub struct GeminiClient {
    base: HttpClientBase,
}

impl GeminiClient {
    pub fn from_config(config: &ProviderConfig, http: Client) -> Self {
        Self {
            base: HttpClientBase::new(config, http),
        }
    }

    fn build_model_url(&self) -> String {
        let base = self.base.endpoint.trim_end_matches('/');
        format!(
            "{base}/{DEFAULT_GEMINI_API_PATH}/{}:generateContent",
            self.base.model
        )
    }
}

#[async_trait]
impl ProviderAdapter for GeminiClient {
    fn id(&self) -> ProviderId {
        self.base.id
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.base.require_api_key()?;
        let url = self.build_model_url();

        let payload = json!({
            "system_instruction": {
                "parts": [{"text": SYSTEM_INSTRUCTION}]
            },
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS
            }
        });

        info!(
            provider = self.base.id.as_str(),
            model = self.base.model.as_str(),
            "Sending request to Gemini"
        );

        let response: GeminiResponse = self
            .base
            .post_with_headers(&url, &[("x-goog-api-key", api_key)], &payload)
            .await?;
        debug!("Received response from Gemini");

        extract_text(response)
    }
}

/// Text parts of the first candidate, joined by newline.
fn extract_text(response: GeminiResponse) -> Result<String, ProviderError> {
    let text = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("\n")
        });
    non_empty(text, ProviderError::EmptyResponse)
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
