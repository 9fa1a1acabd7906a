//! Provider factory - creates adapters from config

use super::clients::{AnthropicClient, GeminiClient, HuggingFaceClient, OpenAIClient, ReplicateClient};
use super::polling::PollingPolicy;
use super::traits::ProviderAdapter;
use crate::config::{AppConfig, ProviderConfig};
use crate::domain::types::ProviderId;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Factory for creating provider adapters from configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Shared HTTP client with a per-request timeout.
    pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
        Client::builder().timeout(timeout).build()
    }

    /// Creates the adapter for `config.id`.
    pub fn create(
        config: &ProviderConfig,
        http: Client,
        polling: PollingPolicy,
    ) -> Arc<dyn ProviderAdapter> {
        match config.id {
            ProviderId::OpenAi => Arc::new(OpenAIClient::from_config(config, http)),
            ProviderId::Gemini => Arc::new(GeminiClient::from_config(config, http)),
            ProviderId::Anthropic => Arc::new(AnthropicClient::from_config(config, http)),
            ProviderId::HuggingFace => Arc::new(HuggingFaceClient::from_config(config, http)),
            ProviderId::Replicate => Arc::new(ReplicateClient::from_config(config, http, polling)),
        }
    }

    /// Every adapter, in priority order.
    pub fn create_all(config: &AppConfig) -> Result<Vec<Arc<dyn ProviderAdapter>>, reqwest::Error> {
        let http = Self::http_client(config.request_timeout)?;
        let adapters = config
            .providers
            .iter()
            .map(|provider| {
                debug!(
                    provider = provider.id.as_str(),
                    endpoint = provider.endpoint.as_str(),
                    model = provider.model.as_str(),
                    configured = provider.credential().is_some(),
                    "Registering provider adapter"
                );
                Self::create(provider, http.clone(), config.polling)
            })
            .collect();
        Ok(adapters)
    }
}
