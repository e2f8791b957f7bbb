//! cheqd Studio client configuration.

use url::Url;

/// Configuration for connecting to cheqd Studio.
///
/// Custom `Debug` implementation redacts the `api_key` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct CheqdConfig {
    /// Base URL of the cheqd Studio API.
    pub api_url: Url,
    /// API key sent as the `x-api-key` header.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CheqdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheqdConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CheqdConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CHEQD_API_URL` (required, must be an http(s) URL)
    /// - `CHEQD_API_KEY` (required)
    /// - `CHEQD_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("CHEQD_API_URL").map_err(|_| ConfigError::MissingUrl)?;
        let api_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl(raw_url.clone(), e.to_string()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(
                raw_url,
                "expected an http(s) URL".to_string(),
            ));
        }
        let api_key = std::env::var("CHEQD_API_KEY").map_err(|_| ConfigError::MissingKey)?;

        Ok(Self {
            api_url,
            api_key,
            timeout_secs: std::env::var("CHEQD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CHEQD_API_URL environment variable is missing")]
    MissingUrl,
    #[error("CHEQD_API_KEY environment variable is missing")]
    MissingKey,
    #[error("invalid CHEQD_API_URL {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let cfg = CheqdConfig {
            api_url: Url::parse("https://studio-api.cheqd.net").unwrap(),
            api_key: "caas-secret".to_string(),
            timeout_secs: 30,
        };
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("caas-secret"));
    }
}
