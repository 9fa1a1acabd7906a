use super::error::ConfigError;
use super::provider::ProvidersConfig;
use crate::constants::{DEFAULT_BIND, DEFAULT_REQUEST_TIMEOUT};
use crate::infrastructure::model::PollingPolicy;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Application configuration loaded from cascade.toml
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    /// Upper bound on each individual provider HTTP call
    pub request_timeout: Duration,
    pub polling: PollingPolicy,
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND
                .parse()
                .unwrap_or(SocketAddr::from((Ipv4Addr::LOCALHOST, 8080))),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            polling: PollingPolicy::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration text, resolving credentials through `lookup`.
    pub fn from_toml_str<F>(content: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        super::loader::parse_config(content, Path::new("<inline>"), lookup)
    }
}
