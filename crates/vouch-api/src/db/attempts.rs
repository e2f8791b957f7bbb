//! Quiz attempt persistence. Insert and load only — attempts are
//! append-only.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use vouch_core::{AttemptId, CandidateId, QuizId, Seed};
use vouch_state::QuizAttempt;

/// Insert a scored attempt.
pub async fn insert(pool: &PgPool, attempt: &QuizAttempt) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO quiz_attempts (id, quiz_id, candidate_id, score, seed, vc_jwt, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(attempt.id.as_uuid())
    .bind(attempt.quiz_id.as_uuid())
    .bind(attempt.candidate_id.as_uuid())
    .bind(i16::from(attempt.score))
    .bind(attempt.seed.as_str())
    .bind(&attempt.vc_jwt)
    .bind(attempt.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all attempts on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<QuizAttempt>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AttemptRow>(
        "SELECT id, quiz_id, candidate_id, score, seed, vc_jwt, created_at
         FROM quiz_attempts ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    let mut attempts = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_attempt() {
            Some(attempt) => attempts.push(attempt),
            None => {
                tracing::error!("skipping quiz attempt row with invalid seed");
            }
        }
    }
    Ok(attempts)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct AttemptRow {
    id: Uuid,
    quiz_id: Uuid,
    candidate_id: Uuid,
    score: i16,
    seed: String,
    vc_jwt: Option<String>,
    created_at: DateTime<Utc>,
}

impl AttemptRow {
    fn into_attempt(self) -> Option<QuizAttempt> {
        let seed = match Seed::new(self.seed) {
            Ok(seed) => seed,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable seed in database");
                return None;
            }
        };
        Some(QuizAttempt {
            id: AttemptId::from_uuid(self.id),
            quiz_id: QuizId::from_uuid(self.quiz_id),
            candidate_id: CandidateId::from_uuid(self.candidate_id),
            score: self.score.clamp(0, 100) as u8,
            seed,
            vc_jwt: self.vc_jwt,
            created_at: self.created_at,
        })
    }
}
