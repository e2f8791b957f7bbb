//! Assessment client error types.

/// Errors from assessment calls.
#[derive(Debug, thiserror::Error)]
pub enum AssessError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Completion API returned a non-2xx status.
    #[error("completion API {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The completion text never passed validation within the retry
    /// budget. Carries the last validation message.
    #[error("invalid completion after {attempts} attempts: {last_error}")]
    InvalidResponse { attempts: u32, last_error: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
