//! Domain types shared by adapters, the sequencer and the HTTP boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Identifier of an external generation provider.
///
/// The set is closed; [`ProviderId::PRIORITY`] is the order in which the
/// sequencer tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    Anthropic,
    #[serde(rename = "huggingface")]
    HuggingFace,
    Replicate,
}

impl ProviderId {
    pub const PRIORITY: [ProviderId; 5] = [
        ProviderId::OpenAi,
        ProviderId::Gemini,
        ProviderId::Anthropic,
        ProviderId::HuggingFace,
        ProviderId::Replicate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Gemini => "gemini",
            ProviderId::Anthropic => "anthropic",
            ProviderId::HuggingFace => "huggingface",
            ProviderId::Replicate => "replicate",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection raised when an inbound prompt is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing 'prompt' string in body")]
pub struct ValidationError;

/// A validated prompt. Construction is the only place validation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Result<Self, ValidationError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ValidationError);
        }
        Ok(Self { prompt })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Result of a single adapter attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success { provider: ProviderId, text: String },
    Failure { provider: ProviderId, reason: String },
}

/// One failed attempt in the diagnostic trail of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttemptFailure {
    pub provider: ProviderId,
    #[serde(rename = "error")]
    pub reason: String,
}

/// Outcome of a whole orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateResult {
    Success { provider: ProviderId, text: String },
    AllFailed { attempts: Vec<AttemptFailure> },
}
