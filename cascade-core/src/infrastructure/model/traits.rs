//! Adapter trait

use super::types::ProviderError;
use crate::domain::types::{ProviderId, ProviderOutcome};
use async_trait::async_trait;
use tracing::{info, warn};

/// Uniform contract every provider adapter satisfies.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter talks to
    fn id(&self) -> ProviderId;

    /// Produce non-empty text for `prompt`, or say why not.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Run one attempt. Never fails: errors become [`ProviderOutcome::Failure`].
    async fn attempt(&self, prompt: &str) -> ProviderOutcome {
        let provider = self.id();
        match self.generate(prompt).await {
            Ok(text) => {
                info!(provider = provider.as_str(), chars = text.len(), "Provider attempt succeeded");
                ProviderOutcome::Success { provider, text }
            }
            Err(error) => {
                warn!(provider = provider.as_str(), %error, "Provider attempt failed");
                ProviderOutcome::Failure {
                    provider,
                    reason: error.to_string(),
                }
            }
        }
    }
}
