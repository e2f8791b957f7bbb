//! Structured validation errors for domain-primitive construction.

use thiserror::Error;

/// Errors raised when a domain primitive fails format validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The string is not a well-formed did:cheqd identifier.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// The string is not a `0x`-prefixed hex seed of 1-64 digits.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// The string is not a recognised cheqd network name.
    #[error("invalid network: {0} (expected \"testnet\" or \"mainnet\")")]
    InvalidNetwork(String),

    /// A URL-typed field did not parse as an absolute URL.
    #[error("{field} is not a valid URL: {reason}")]
    InvalidUrl {
        /// The field that was rejected.
        field: &'static str,
        /// Parser diagnostic.
        reason: String,
    },

    /// A required field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    Empty {
        /// The field that was rejected.
        field: &'static str,
    },

    /// A bounded-length field exceeded its limit.
    #[error("{field} exceeds {max} characters")]
    TooLong {
        /// The field that was rejected.
        field: &'static str,
        /// The maximum permitted length.
        max: usize,
    },
}
