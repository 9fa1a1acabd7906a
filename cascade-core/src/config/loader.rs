use super::AppConfig;
use super::error::ConfigError;
use super::provider::{ProvidersConfig, RawProviders};
use crate::constants::{CONFIG_PATH, ENV_PATH};
use crate::infrastructure::model::PollingPolicy;
use dotenvy::from_filename;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    bind: Option<String>,
    request_timeout_secs: Option<u64>,
    #[serde(default)]
    polling: RawPolling,
    #[serde(default)]
    providers: RawProviders,
}

#[derive(Debug, Deserialize, Default)]
struct RawPolling {
    max_polls: Option<u32>,
    interval_ms: Option<u64>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Read a credential from the named environment variable.
pub fn resolve_api_key(env_var: &str) -> Option<String> {
    let name = env_var.trim();
    if name.is_empty() {
        return None;
    }
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => None,
        Err(err) => {
            debug!(env_var = name, %err, "Credential environment variable is not set");
            None
        }
    }
}

/// Load and validate configuration from a file path.
///
/// A missing file at the default location yields the built-in defaults; a
/// missing file at an explicit path is an error.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    debug!(path = %config_path.display(), "Reading configuration file");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            if path.is_some() {
                return Err(ConfigError::NotFound {
                    path: config_path.to_path_buf(),
                });
            }
            info!(path = %config_path.display(), "No configuration file, using defaults");
            String::new()
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            });
        }
    };

    parse_config(&content, config_path, resolve_api_key)
}

pub(super) fn parse_config<F>(content: &str, path: &Path, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_and_build(parsed, lookup)
}

fn validate_and_build<F>(parsed: RawConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::default();

    if let Some(bind) = parsed.bind {
        config.bind = bind
            .parse()
            .map_err(|source| ConfigError::InvalidBind { value: bind, source })?;
    }

    if let Some(secs) = parsed.request_timeout_secs {
        if secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        config.request_timeout = Duration::from_secs(secs);
    }

    let defaults = PollingPolicy::default();
    let max_polls = parsed.polling.max_polls.unwrap_or(defaults.max_polls);
    if max_polls == 0 {
        return Err(ConfigError::InvalidPollBudget);
    }
    config.polling = PollingPolicy {
        max_polls,
        interval: parsed
            .polling
            .interval_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.interval),
    };

    config.providers = ProvidersConfig::resolve(parsed.providers, lookup);
    for provider in config.providers.iter() {
        if provider.credential().is_none() {
            info!(
                provider = provider.id.as_str(),
                env_var = provider.api_key_env.as_str(),
                "Provider has no credential and will be skipped"
            );
        }
    }

    Ok(config)
}
