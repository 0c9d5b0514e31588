//! Generator configuration resolved from the environment and CLI flags.

use std::env;
use std::fmt;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Environment variable to override the API base URL.
pub const BASE_URL_ENV_VAR: &str = "QUILL_BASE_URL";

/// Environment variable to override the model.
pub const MODEL_ENV_VAR: &str = "QUILL_MODEL";

/// Environment variable to override the request timeout (seconds).
pub const TIMEOUT_ENV_VAR: &str = "QUILL_TIMEOUT";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Commit messages and branch names are one line; keep completions short.
pub const DEFAULT_MAX_TOKENS: u32 = 100;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Settings for the chat-completions client.
#[derive(Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl GeneratorConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var(API_KEY_ENV_VAR),
            base_url: non_empty_var(BASE_URL_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_empty_var(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: get_timeout(),
        }
    }

    /// Apply a `--model` override from the command line.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }

    /// Reject settings that cannot produce a working request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        Ok(())
    }

    /// The chat-completions endpoint for this configuration.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Keeps the API key out of debug logs.
impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get the configured request timeout.
///
/// Logs a warning and uses the default when `QUILL_TIMEOUT` is set to
/// something that is not a number of seconds.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
