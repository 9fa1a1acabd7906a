//! # Provider Configuration
//!
//! Per-provider settings for the five generation backends. Every provider is
//! always present in the registry; only its credential is optional.
//!
//! | Provider | Default credential variable | Mode |
//! |----------|-----------------------------|------|
//! | `openai` | `OPENAI_API_KEY` | sync |
//! | `gemini` | `GEMINI_API_KEY` | sync |
//! | `anthropic` | `ANTHROPIC_API_KEY` | sync |
//! | `huggingface` | `HUGGINGFACE_API_TOKEN` | sync |
//! | `replicate` | `REPLICATE_API_TOKEN` | async job |

use crate::constants::*;
use crate::domain::types::ProviderId;
use serde::Deserialize;

/// Resolved configuration for one provider.
///
/// # Example
///
/// ```toml
/// [providers.gemini]
/// api_key_env = "GEMINI_API_KEY"
/// model = "gemini-1.5-pro"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub id: ProviderId,
    /// Base URL of the provider API
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Credential, if one was configured
    pub api_key: Option<String>,
    /// Name of the environment variable the credential is read from
    pub api_key_env: String,
}

impl ProviderConfig {
    /// Built-in settings for `id`, without a credential.
    pub fn defaults(id: ProviderId) -> Self {
        let (endpoint, model, key_env) = match id {
            ProviderId::OpenAi => (
                DEFAULT_OPENAI_ENDPOINT,
                DEFAULT_OPENAI_MODEL,
                DEFAULT_OPENAI_KEY_ENV,
            ),
            ProviderId::Gemini => (
                DEFAULT_GEMINI_ENDPOINT,
                DEFAULT_GEMINI_MODEL,
                DEFAULT_GEMINI_KEY_ENV,
            ),
            ProviderId::Anthropic => (
                DEFAULT_ANTHROPIC_ENDPOINT,
                DEFAULT_ANTHROPIC_MODEL,
                DEFAULT_ANTHROPIC_KEY_ENV,
            ),
            ProviderId::HuggingFace => (
                DEFAULT_HUGGINGFACE_ENDPOINT,
                DEFAULT_HUGGINGFACE_MODEL,
                DEFAULT_HUGGINGFACE_KEY_ENV,
            ),
            ProviderId::Replicate => (
                DEFAULT_REPLICATE_ENDPOINT,
                DEFAULT_REPLICATE_MODEL,
                DEFAULT_REPLICATE_KEY_ENV,
            ),
        };
        Self {
            id,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key: None,
            api_key_env: key_env.to_string(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Credential with blank values treated as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Apply raw file settings over the defaults, resolving the credential
    /// through `lookup` (an environment reader in production).
    pub(super) fn resolve<F>(id: ProviderId, raw: RawProviderConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::defaults(id);
        if let Some(endpoint) = raw.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(model) = raw.model {
            config.model = model;
        }
        if let Some(env) = raw.api_key_env.filter(|v| !v.trim().is_empty()) {
            config.api_key_env = env.trim().to_string();
        }
        config.api_key = raw.api_key.or_else(|| lookup(&config.api_key_env));
        config
    }
}

/// Settings for every provider, one slot per [`ProviderId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub huggingface: ProviderConfig,
    pub replicate: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: ProviderConfig::defaults(ProviderId::OpenAi),
            gemini: ProviderConfig::defaults(ProviderId::Gemini),
            anthropic: ProviderConfig::defaults(ProviderId::Anthropic),
            huggingface: ProviderConfig::defaults(ProviderId::HuggingFace),
            replicate: ProviderConfig::defaults(ProviderId::Replicate),
        }
    }
}

impl ProvidersConfig {
    pub fn get(&self, id: ProviderId) -> &ProviderConfig {
        match id {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Gemini => &self.gemini,
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::HuggingFace => &self.huggingface,
            ProviderId::Replicate => &self.replicate,
        }
    }

    /// Providers in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
        ProviderId::PRIORITY.into_iter().map(|id| self.get(id))
    }

    pub(super) fn resolve<F>(raw: RawProviders, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let RawProviders {
            openai,
            gemini,
            anthropic,
            huggingface,
            replicate,
        } = raw;
        Self {
            openai: ProviderConfig::resolve(ProviderId::OpenAi, openai, &lookup),
            gemini: ProviderConfig::resolve(ProviderId::Gemini, gemini, &lookup),
            anthropic: ProviderConfig::resolve(ProviderId::Anthropic, anthropic, &lookup),
            huggingface: ProviderConfig::resolve(ProviderId::HuggingFace, huggingface, &lookup),
            replicate: ProviderConfig::resolve(ProviderId::Replicate, replicate, &lookup),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawProviderConfig {
    #[serde(default)]
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_key_env: Option<String>,
    #[serde(default)]
    pub(super) endpoint: Option<String>,
    #[serde(default)]
    pub(super) model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawProviders {
    #[serde(default)]
    pub(super) openai: RawProviderConfig,
    #[serde(default)]
    pub(super) gemini: RawProviderConfig,
    #[serde(default)]
    pub(super) anthropic: RawProviderConfig,
    #[serde(default)]
    pub(super) huggingface: RawProviderConfig,
    #[serde(default)]
    pub(super) replicate: RawProviderConfig,
}
