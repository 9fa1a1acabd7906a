//! Provider error taxonomy
//!
//! Every variant renders as the `reason` of a failed attempt, so the display
//! strings are part of the outbound contract.

use super::polling::JobStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("credential not configured: {env_var}")]
    ConfigurationMissing { env_var: String },
    #[error("HTTP {status}")]
    Http { status: u16 },
    #[error("network error: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },
    #[error("empty response")]
    EmptyResponse,
    #[error("missing status URL")]
    MissingStatusUrl,
    #[error("empty output")]
    EmptyOutput,
    #[error("timeout")]
    Timeout,
    #[error("{status}")]
    JobEnded { status: JobStatus },
}

impl ProviderError {
    pub fn configuration_missing(env_var: impl Into<String>) -> Self {
        Self::ConfigurationMissing {
            env_var: env_var.into(),
        }
    }

    /// Wraps a transport error. The URL is dropped so query-string secrets
    /// never reach a diagnostic.
    pub fn network(source: reqwest::Error) -> Self {
        Self::Network {
            source: source.without_url(),
        }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}

/// Accept `text` only if it carries something other than whitespace.
/// The text itself is returned untouched.
pub fn non_empty(text: Option<String>, empty: ProviderError) -> Result<String, ProviderError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(empty),
    }
}
