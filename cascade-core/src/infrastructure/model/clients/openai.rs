//! OpenAI chat completions adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ProviderConfig;
use crate::constants::{MAX_OUTPUT_TOKENS, SYSTEM_INSTRUCTION, TEMPERATURE};
use crate::domain::types::ProviderId;
use crate::infrastructure::model::traits::ProviderAdapter;
use crate::infrastructure::model::types::{ProviderError, non_empty};

const CHAT_PATH: &str = "/v1/chat/completions";

/// OpenAI client
#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
}

impl OpenAIClient {
    pub fn from_config(config: &ProviderConfig, http: Client) -> Self {
        Self {
            base: HttpClientBase::new(config, http),
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAIClient {
    fn id(&self) -> ProviderId {
        self.base.id
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.base.require_api_key()?;
        let url = self.base.build_url(CHAT_PATH);

        let payload = OpenAIRequest {
            model: &self.base.model,
            messages: [
                OpenAIMessageIn {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                OpenAIMessageIn {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        info!(
            provider = self.base.id.as_str(),
            model = self.base.model.as_str(),
            "Sending request to OpenAI"
        );

        let response: OpenAIResponse = self.base.post_with_bearer(&url, &payload).await?;
        debug!("Received response from OpenAI");

        extract_text(response)
    }
}

fn extract_text(response: OpenAIResponse) -> Result<String, ProviderError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content);
    non_empty(content, ProviderError::EmptyResponse)
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: [OpenAIMessageIn<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct OpenAIMessageIn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}
