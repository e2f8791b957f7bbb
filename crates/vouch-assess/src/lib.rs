//! # vouch-assess — AI Assessment Client
//!
//! Wraps a chat-completion service behind validate-with-retry semantics:
//! a request is issued, the assistant text extracted, and a
//! caller-supplied validator decides whether the raw output is usable.
//! Failed validations are retried (same messages) up to a bounded number
//! of total attempts; exhaustion surfaces the LAST validation message,
//! never a best-effort value.
//!
//! Each attempt is a real network call — retries are not free, so the
//! bound is part of the contract, not a tuning knob.
//!
//! The domain entry point is [`Grader::assess`], which turns a free-text
//! quiz answer into an integer score in `0..=100`.

pub mod client;
pub mod config;
pub mod error;
pub mod grader;

pub use client::{ChatMessage, Completion, HttpCompletion};
pub use config::{AssessConfig, ConfigError};
pub use error::AssessError;
pub use grader::{Grader, SCORING_MAX_RETRIES};

/// Issue a completion and validate the raw text, retrying on validation
/// failure up to `max_retries` total attempts.
///
/// `validate` returns `None` to accept the raw text or `Some(message)`
/// to reject it. On exhaustion the operation fails with
/// [`AssessError::InvalidResponse`] carrying the last rejection message.
pub async fn complete_with_validation<C, V>(
    client: &C,
    messages: &[ChatMessage],
    validate: V,
    max_retries: u32,
) -> Result<String, AssessError>
where
    C: Completion,
    V: Fn(&str) -> Option<String>,
{
    let attempts = max_retries.max(1);
    let mut last_error = String::from("validation failed");

    for attempt in 1..=attempts {
        let raw = client.complete(messages).await?;
        let raw = raw.trim();

        match validate(raw) {
            None => return Ok(raw.to_string()),
            Some(message) => {
                tracing::warn!(attempt, attempts, %message, "completion failed validation");
                last_error = message;
            }
        }
    }

    Err(AssessError::InvalidResponse {
        attempts,
        last_error,
    })
}
