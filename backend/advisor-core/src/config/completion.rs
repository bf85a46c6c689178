use crate::error::config::ConfigError;
use crate::{DEFAULT_API_KEY_ENV, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT, GROQ_API_BASE_URL};

use common::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

const MIN_TEMPERATURE: f64 = 0.0;
const MAX_TEMPERATURE: f64 = 2.0;

// ============================================
// COMPLETION ENDPOINT SETTINGS
// ============================================

/// Settings for the hosted chat-completion endpoint.
///
/// Model and token limit differences between deployments live here rather
/// than in code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Name of the environment variable holding the bearer credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Whole-request timeout. Unset means the transport default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: default_system_prompt(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_base_url() -> String {
    GROQ_API_BASE_URL.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_tokens() -> u32 {
    512
}
fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}
fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl CompletionConfig {
    /// Parse `base_url`, adding a trailing `/` so relative joins keep the
    /// full path (`.../openai/v1/` + `models`).
    pub fn endpoint_base(&self) -> Result<Url, ConfigError> {
        let raw = self.base_url.trim();
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };

        let url = Url::parse(&normalized).map_err(|e| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid base_url '{}': {}", self.base_url, e),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Unsupported base_url scheme '{other}' (expected http or https)"),
            }),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate completion settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_base()?;

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "model cannot be empty".to_string(),
            });
        }

        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid temperature: {} (must be {}-{})",
                    self.temperature, MIN_TEMPERATURE, MAX_TEMPERATURE
                ),
            });
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "max_tokens must be at least 1".to_string(),
            });
        }

        if self.api_key_env.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "api_key_env cannot be empty".to_string(),
            });
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "timeout_secs must be at least 1 when set".to_string(),
            });
        }

        Ok(())
    }
}
