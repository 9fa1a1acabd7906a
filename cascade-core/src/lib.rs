//! cascade: turns a free-text prompt into an analysis by trying a fixed chain
//! of text-generation providers until one answers.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{FallbackSequencer, ProviderStatus};
pub use config::{AppConfig, ConfigError, ProviderConfig, ProvidersConfig};
pub use domain::types::{
    AggregateResult, AttemptFailure, GenerationRequest, ProviderId, ProviderOutcome,
    ValidationError,
};
pub use infrastructure::model::{ProviderAdapter, ProviderError, ProviderFactory};
pub use infrastructure::{model, server};
