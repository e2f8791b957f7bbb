//! # Skill Quiz Endpoints
//!
//! - `GET /v1/quizzes` — quiz catalogue.
//! - `GET /v1/quizzes/:id/question?seed=0x…` — deterministic question
//!   selection for a seed.
//! - `POST /v1/quizzes/:id/attempts` — score an answer; issue a Skill
//!   Pass credential on a pass.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use vouch_core::{CandidateId, QuizId, Seed};
use vouch_state::{QuizAttempt, SkillQuiz};

use crate::error::AppError;
use crate::orchestration;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Summary view of a quiz in the catalogue.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuizView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Size of the question pool.
    pub question_count: usize,
}

impl From<SkillQuiz> for QuizView {
    fn from(q: SkillQuiz) -> Self {
        Self {
            id: *q.id.as_uuid(),
            title: q.title,
            description: q.description,
            question_count: q.questions.len(),
        }
    }
}

/// Query string for question selection.
#[derive(Debug, Deserialize)]
pub struct QuestionParams {
    /// Attempt seed, `0x` plus 1-64 hex digits. Omit to have the
    /// server generate a fresh one.
    pub seed: Option<String>,
}

/// The question selected for a seed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionResponse {
    pub quiz_id: Uuid,
    /// The seed the selection was derived from. Echoed (or generated)
    /// so the client submits the same one with the answer.
    pub seed: String,
    pub question_id: u32,
    pub prompt: String,
}

/// Request body for a quiz attempt.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitAttemptRequest {
    /// The answering candidate.
    pub candidate_id: Uuid,
    /// The seed used for question selection.
    pub seed: String,
    /// Free-text answer.
    pub answer: String,
}

/// Result of a scored attempt.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttemptResponse {
    pub attempt_id: Uuid,
    pub quiz_id: Uuid,
    pub score: u8,
    pub passed: bool,
    /// Human-readable outcome, including issuance status on a pass.
    pub message: String,
    /// JWT of the Skill Pass credential, when one was issued.
    pub vc_jwt: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn attempt_response(attempt: QuizAttempt, passed: bool, message: String) -> AttemptResponse {
    AttemptResponse {
        attempt_id: *attempt.id.as_uuid(),
        quiz_id: *attempt.quiz_id.as_uuid(),
        score: attempt.score,
        passed,
        message,
        vc_jwt: attempt.vc_jwt,
        created_at: attempt.created_at,
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the quiz router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/quizzes", get(list_quizzes))
        .route("/v1/quizzes/:id/question", get(get_question))
        .route("/v1/quizzes/:id/attempts", post(submit_attempt))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/quizzes — list the quiz catalogue.
#[utoipa::path(
    get,
    path = "/v1/quizzes",
    responses(
        (status = 200, description = "Quiz catalogue", body = Vec<QuizView>),
    ),
    tag = "quizzes"
)]
pub async fn list_quizzes(State(state): State<AppState>) -> Json<Vec<QuizView>> {
    let mut quizzes: Vec<QuizView> = state.quizzes.list().into_iter().map(Into::into).collect();
    quizzes.sort_by(|a, b| a.title.cmp(&b.title));
    Json(quizzes)
}

/// GET /v1/quizzes/:id/question — select the question for a seed.
///
/// The same quiz and seed always select the same question; a missing
/// seed is answered with a freshly generated one.
#[utoipa::path(
    get,
    path = "/v1/quizzes/{id}/question",
    params(
        ("id" = Uuid, Path, description = "Quiz ID"),
        ("seed" = Option<String>, Query, description = "Attempt seed (0x + 1-64 hex digits)"),
    ),
    responses(
        (status = 200, description = "Selected question", body = QuestionResponse),
        (status = 404, description = "Quiz not found", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed seed", body = crate::error::ErrorBody),
    ),
    tag = "quizzes"
)]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<QuestionParams>,
) -> Result<Json<QuestionResponse>, AppError> {
    let quiz = state
        .quizzes
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("quiz {id} not found")))?;

    let seed = match params.seed {
        Some(s) => Seed::new(s)?,
        None => Seed::generate(),
    };

    let question = vouch_quiz::first_question(&quiz.questions, &seed)
        .ok_or_else(|| AppError::Internal(format!("quiz {id} has an empty question pool")))?;

    Ok(Json(QuestionResponse {
        quiz_id: id,
        seed: seed.as_str().to_string(),
        question_id: question.id,
        prompt: question.prompt,
    }))
}

/// POST /v1/quizzes/:id/attempts — score an answer.
#[utoipa::path(
    post,
    path = "/v1/quizzes/{id}/attempts",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    request_body = SubmitAttemptRequest,
    responses(
        (status = 201, description = "Attempt scored", body = AttemptResponse),
        (status = 404, description = "Quiz or candidate not found", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed seed or missing team DID", body = crate::error::ErrorBody),
        (status = 502, description = "Grader failure", body = crate::error::ErrorBody),
        (status = 503, description = "Assessor not configured", body = crate::error::ErrorBody),
    ),
    tag = "quizzes"
)]
pub async fn submit_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitAttemptRequest>,
) -> Result<(axum::http::StatusCode, Json<AttemptResponse>), AppError> {
    let outcome = orchestration::submit_quiz_answer(
        &state,
        QuizId::from_uuid(id),
        CandidateId::from_uuid(req.candidate_id),
        &req.seed,
        &req.answer,
    )
    .await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(attempt_response(outcome.attempt, outcome.passed, outcome.message)),
    ))
}
