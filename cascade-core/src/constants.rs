//! Application constants
//!
//! Single source of truth for paths, provider defaults and protocol limits.

use std::time::Duration;

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/cascade.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Instruction sent alongside every prompt.
pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert analyst. Produce a concise, actionable analysis of the user's input.";

/// Low sampling temperature for deterministic-leaning output.
pub const TEMPERATURE: f64 = 0.2;

pub const MAX_OUTPUT_TOKENS: u32 = 1024;

pub const DEFAULT_MAX_POLLS: u32 = 30;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_ANTHROPIC_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_HUGGINGFACE_ENDPOINT: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
pub const DEFAULT_HUGGINGFACE_KEY_ENV: &str = "HUGGINGFACE_API_TOKEN";

pub const DEFAULT_REPLICATE_ENDPOINT: &str = "https://api.replicate.com";
pub const DEFAULT_REPLICATE_MODEL: &str = "meta/meta-llama-3-8b-instruct";
pub const DEFAULT_REPLICATE_KEY_ENV: &str = "REPLICATE_API_TOKEN";
