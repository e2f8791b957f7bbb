//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single spec served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vouch API — Credential Lifecycle Engine",
        version = "0.2.0",
        description = "Axum API services for the Vouch Stack: candidate credential lifecycle, skill quiz attempts with AI grading, and DID/VC anchoring via cheqd Studio.",
        license(name = "BUSL-1.1")
    ),
    paths(
        // Credentials
        crate::routes::credentials::create_credential,
        crate::routes::credentials::get_credential,
        crate::routes::credentials::submit_credential,
        crate::routes::credentials::approve_credential,
        crate::routes::credentials::reject_credential,
        crate::routes::credentials::unverify_credential,
        crate::routes::credentials::verify_credential,
        // Quizzes
        crate::routes::quiz::list_quizzes,
        crate::routes::quiz::get_question,
        crate::routes::quiz::submit_attempt,
        // Identity
        crate::routes::identity::create_team_did,
        crate::routes::identity::resolve_did,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Credential DTOs
        crate::routes::credentials::CreateCredentialRequest,
        crate::routes::credentials::SubmitCredentialRequest,
        crate::routes::credentials::IssuerDecisionRequest,
        crate::routes::credentials::VerifyCredentialRequest,
        crate::routes::credentials::VerificationResponse,
        crate::routes::credentials::CredentialView,
        // Quiz DTOs
        crate::routes::quiz::QuizView,
        crate::routes::quiz::QuestionResponse,
        crate::routes::quiz::SubmitAttemptRequest,
        crate::routes::quiz::AttemptResponse,
        // Identity DTOs
        crate::routes::identity::CreateDidRequest,
        crate::routes::identity::CreateDidResponse,
        crate::routes::identity::ResolveDidResponse,
    )),
    tags(
        (name = "credentials", description = "Candidate credential lifecycle"),
        (name = "quizzes", description = "Skill quizzes and graded attempts"),
        (name = "identity", description = "DID creation and resolution"),
    )
)]
pub struct ApiDoc;

/// Router serving the assembled spec.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_spec))
}

async fn serve_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
