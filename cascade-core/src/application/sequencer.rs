//! Fallback sequencer
//!
//! Tries adapters one at a time in registry order and stops at the first
//! success. Attempts never overlap: a later provider is only called once the
//! previous one has definitely failed.

use crate::config::AppConfig;
use crate::domain::types::{
    AggregateResult, AttemptFailure, GenerationRequest, ProviderId, ProviderOutcome,
};
use crate::infrastructure::model::{ProviderAdapter, ProviderFactory};
use serde::Serialize;
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Registry entry as reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProviderStatus {
    pub provider: ProviderId,
    pub configured: bool,
}

pub struct FallbackSequencer {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    statuses: Vec<ProviderStatus>,
}

impl FallbackSequencer {
    /// Sequencer over `adapters`, tried in the given order.
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        let statuses = adapters
            .iter()
            .map(|adapter| ProviderStatus {
                provider: adapter.id(),
                configured: true,
            })
            .collect();
        Self { adapters, statuses }
    }

    /// Sequencer over every configured provider in priority order.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let adapters = ProviderFactory::create_all(config)?;
        let statuses = config
            .providers
            .iter()
            .map(|provider| ProviderStatus {
                provider: provider.id,
                configured: provider.credential().is_some(),
            })
            .collect();
        Ok(Self { adapters, statuses })
    }

    pub fn order(&self) -> Vec<ProviderId> {
        self.adapters.iter().map(|adapter| adapter.id()).collect()
    }

    pub fn statuses(&self) -> &[ProviderStatus] {
        &self.statuses
    }

    pub async fn run(&self, request: &GenerationRequest) -> AggregateResult {
        let run_id = Uuid::new_v4();
        let span = info_span!("orchestration", %run_id);
        self.run_chain(request.prompt()).instrument(span).await
    }

    async fn run_chain(&self, prompt: &str) -> AggregateResult {
        let mut attempts = Vec::with_capacity(self.adapters.len());

        for adapter in &self.adapters {
            match adapter.attempt(prompt).await {
                ProviderOutcome::Success { provider, text } => {
                    info!(
                        provider = provider.as_str(),
                        failed_before = attempts.len(),
                        "Generation succeeded"
                    );
                    return AggregateResult::Success { provider, text };
                }
                ProviderOutcome::Failure { provider, reason } => {
                    attempts.push(AttemptFailure { provider, reason });
                }
            }
        }

        warn!(attempts = attempts.len(), "All providers failed");
        AggregateResult::AllFailed { attempts }
    }
}
