//! Hugging Face inference adapter (text-generation task)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ProviderConfig;
use crate::constants::{MAX_OUTPUT_TOKENS, SYSTEM_INSTRUCTION, TEMPERATURE};
use crate::domain::types::ProviderId;
use crate::infrastructure::model::traits::ProviderAdapter;
use crate::infrastructure::model::types::{ProviderError, non_empty};

#[derive(Clone)]
pub struct HuggingFaceClient {
    base: HttpClientBase,
}

impl HuggingFaceClient {
    pub fn from_config(config: &ProviderConfig, http: Client) -> Self {
        Self {
            base: HttpClientBase::new(config, http),
        }
    }
}

#[async_trait]
impl ProviderAdapter for HuggingFaceClient {
    fn id(&self) -> ProviderId {
        self.base.id
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.base.require_api_key()?;
        let url = self.base.build_url(&format!("models/{}", self.base.model));

        // Text-generation models take a single input string.
        let payload = json!({
            "inputs": format!("{SYSTEM_INSTRUCTION}\n\n{prompt}"),
            "parameters": {
                "temperature": TEMPERATURE,
                "max_new_tokens": MAX_OUTPUT_TOKENS,
                "return_full_text": false
            }
        });

        info!(
            provider = self.base.id.as_str(),
            model = self.base.model.as_str(),
            "Sending request to Hugging Face"
        );

        let response: HuggingFaceResponse = self.base.post_with_bearer(&url, &payload).await?;
        debug!("Received response from Hugging Face");

        extract_text(response)
    }
}

fn extract_text(response: HuggingFaceResponse) -> Result<String, ProviderError> {
    let text = match response {
        HuggingFaceResponse::Batch(items) => items.into_iter().next().and_then(|g| g.generated_text),
        HuggingFaceResponse::Single(item) => item.generated_text,
    };
    non_empty(text, ProviderError::EmptyResponse)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HuggingFaceResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

#[derive(Deserialize)]
struct Generation {
    generated_text: Option<String>,
}
