//! Skill quizzes and immutable scored attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vouch_core::{AttemptId, CandidateId, QuizId, Seed};

/// Minimum score, inclusive, that passes a skill quiz.
pub const PASS_THRESHOLD: u8 = 70;

/// A single open-ended quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Stable question identifier within the quiz.
    pub id: u32,
    /// The question text shown to the candidate.
    pub prompt: String,
}

/// A skill quiz: a titled pool of questions from which one is selected
/// deterministically per attempt seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillQuiz {
    /// Unique quiz identifier.
    pub id: QuizId,
    /// Quiz title, also the skill name attested on a pass.
    pub title: String,
    /// Short description shown before starting.
    pub description: String,
    /// Question pool. Never empty.
    pub questions: Vec<QuizQuestion>,
}

/// A scored quiz attempt. Attempts are append-only: once recorded they
/// are never edited, re-scored, or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// Unique attempt identifier.
    pub id: AttemptId,
    /// The quiz attempted.
    pub quiz_id: QuizId,
    /// The candidate who answered.
    pub candidate_id: CandidateId,
    /// Grader score in 0..=100.
    pub score: u8,
    /// The seed that selected the question for this attempt.
    pub seed: Seed,
    /// JWT of the Skill Pass credential, if one was issued.
    pub vc_jwt: Option<String>,
    /// When the attempt was scored.
    pub created_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// Record a scored attempt. Scores above 100 are a grader-contract
    /// violation and are clamped.
    pub fn new(quiz_id: QuizId, candidate_id: CandidateId, score: u8, seed: Seed) -> Self {
        Self {
            id: AttemptId::new(),
            quiz_id,
            candidate_id,
            score: score.min(100),
            seed,
            vc_jwt: None,
            created_at: Utc::now(),
        }
    }

    /// Whether this attempt meets the pass threshold.
    pub fn passed(&self) -> bool {
        self.score >= PASS_THRESHOLD
    }
}
