//! Assessment backend configuration.

use url::Url;

/// Configuration for the chat-completion service.
///
/// Custom `Debug` implementation redacts the `api_key` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct AssessConfig {
    /// Base URL of the completion API.
    /// Default: <https://api.openai.com>
    pub api_url: Url,
    /// Bearer token for authentication.
    pub api_key: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AssessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AssessConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VOUCH_ASSESS_API_URL` (default: `https://api.openai.com`)
    /// - `VOUCH_ASSESS_API_KEY` (required)
    /// - `VOUCH_ASSESS_MODEL` (default: `gpt-4o`)
    /// - `VOUCH_ASSESS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            std::env::var("VOUCH_ASSESS_API_KEY").map_err(|_| ConfigError::MissingKey)?;

        Ok(Self {
            api_url: env_url("VOUCH_ASSESS_API_URL", "https://api.openai.com")?,
            api_key,
            model: std::env::var("VOUCH_ASSESS_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            timeout_secs: std::env::var("VOUCH_ASSESS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("VOUCH_ASSESS_API_KEY environment variable is required")]
    MissingKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
