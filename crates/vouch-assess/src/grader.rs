//! # Strict Quiz Grader
//!
//! Turns a free-text quiz answer into an integer score in `0..=100`.
//! The validator requires the raw completion to reduce, after stripping
//! every non-digit character, to an integer in range; the score is
//! parsed only after validation accepts.

use crate::client::{ChatMessage, Completion};
use crate::error::AssessError;

/// Total scoring attempts before the operation fails.
pub const SCORING_MAX_RETRIES: u32 = 3;

/// The skill-quiz grader, generic over the completion backend.
#[derive(Debug, Clone)]
pub struct Grader<C> {
    client: C,
}

impl<C: Completion> Grader<C> {
    /// Create a grader over a completion backend.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Assess `answer` for the quiz `quiz_title`, returning a score in
    /// `0..=100`.
    ///
    /// Fails with [`AssessError::InvalidResponse`] when the backend
    /// never produces a parseable score within the retry budget.
    pub async fn assess(&self, answer: &str, quiz_title: &str) -> Result<u8, AssessError> {
        let messages = strict_grader_messages(quiz_title, answer);
        let raw = crate::complete_with_validation(
            &self.client,
            &messages,
            validate_score_response,
            SCORING_MAX_RETRIES,
        )
        .await?;

        // Validation guarantees the digits parse in range.
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        let score: u8 = digits.parse().map_err(|_| AssessError::InvalidResponse {
            attempts: SCORING_MAX_RETRIES,
            last_error: format!("validated response failed to parse: {raw}"),
        })?;
        Ok(score)
    }
}

/// The strict-grader conversation for one answer.
fn strict_grader_messages(quiz_title: &str, answer: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a strict technical examiner. Grade the candidate's answer \
             from 0 to 100. Respond with the integer score only — no words, no \
             punctuation, no explanation.",
        ),
        ChatMessage::user(format!("Quiz topic: {quiz_title}\n\nAnswer:\n{answer}")),
    ]
}

/// Accept only text that reduces to an integer in `[0, 100]` after
/// stripping non-digit characters.
fn validate_score_response(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Some(format!("no digits in response: {raw:?}"));
    }
    match digits.parse::<u32>() {
        Ok(score) if score <= 100 => None,
        Ok(score) => Some(format!("score {score} out of range 0-100")),
        Err(_) => Some(format!("unparseable score in response: {raw:?}")),
    }
}
