//! cheqd Studio client error types.

/// Errors from cheqd Studio calls.
///
/// Transport failures are converted here — raw `reqwest` errors never
/// cross the crate boundary unwrapped.
#[derive(Debug, thiserror::Error)]
pub enum CheqdError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// cheqd Studio returned a non-2xx status.
    #[error("cheqd Studio {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The response body did not have the expected shape.
    #[error("malformed response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
