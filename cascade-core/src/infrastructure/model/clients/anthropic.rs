//! Anthropic messages adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ProviderConfig;
use crate::constants::{ANTHROPIC_VERSION, MAX_OUTPUT_TOKENS, SYSTEM_INSTRUCTION, TEMPERATURE};
use crate::domain::types::ProviderId;
use crate::infrastructure::model::traits::ProviderAdapter;
use crate::infrastructure::model::types::{ProviderError, non_empty};

const MESSAGES_PATH: &str = "/v1/messages";

#[derive(Clone)]
pub struct AnthropicClient {
    base: HttpClientBase,
}

impl AnthropicClient {
    pub fn from_config(config: &ProviderConfig, http: Client) -> Self {
        Self {
            base: HttpClientBase::new(config, http),
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicClient {
    fn id(&self) -> ProviderId {
        self.base.id
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.base.require_api_key()?;
        let url = self.base.build_url(MESSAGES_PATH);

        let payload = AnthropicRequest {
            model: &self.base.model,
            system: SYSTEM_INSTRUCTION,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            messages: [AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        info!(
            provider = self.base.id.as_str(),
            model = self.base.model.as_str(),
            "Sending request to Anthropic"
        );

        let response: AnthropicResponse = self
            .base
            .post_with_headers(
                &url,
                &[("x-api-key", api_key), ("anthropic-version", ANTHROPIC_VERSION)],
                &payload,
            )
            .await?;
        debug!("Received response from Anthropic");

        extract_text(response)
    }
}

/// Text blocks joined by newline; tool-use and other block kinds are skipped.
fn extract_text(response: AnthropicResponse) -> Result<String, ProviderError> {
    let segments: Vec<String> = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();
    let text = (!segments.is_empty()).then(|| segments.join("\n"));
    non_empty(text, ProviderError::EmptyResponse)
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    system: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: [AnthropicMessage<'a>; 1],
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}
