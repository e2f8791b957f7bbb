//! # Credential Lifecycle Endpoints
//!
//! - `POST /v1/credentials` — create (optionally submitting at once).
//! - `GET /v1/credentials/:id` — fetch a single record.
//! - `POST /v1/credentials/:id/submit` — submit to an issuer.
//! - `POST /v1/credentials/:id/approve` — anchor and verify.
//! - `POST /v1/credentials/:id/reject` — decline.
//! - `POST /v1/credentials/:id/unverify` — walk back a verification.
//! - `POST /v1/credentials/verify` — verify a presented document.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use vouch_cheqd::CredentialInput;
use vouch_core::{CandidateId, CredentialId, IssuerId};
use vouch_state::{CredentialCategory, CredentialDraft, CredentialRecord};

use crate::error::AppError;
use crate::orchestration;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request body for credential creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCredentialRequest {
    /// The owning candidate.
    pub candidate_id: Uuid,
    /// Display title.
    pub title: String,
    /// Category from the closed set.
    #[schema(value_type = String)]
    pub category: CredentialCategory,
    /// Free-form type string, at most 50 characters.
    pub credential_type: String,
    /// Absolute URL of the supporting evidence.
    pub file_url: String,
    /// Issuer to submit to at creation. Omit to keep the record
    /// unverified.
    pub issuer_id: Option<Uuid>,
}

/// Request body for submitting a credential to an issuer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitCredentialRequest {
    /// The owning candidate (ownership check).
    pub candidate_id: Uuid,
    /// The issuer to review the credential.
    pub issuer_id: Uuid,
}

/// Request body for issuer decisions (approve, reject, unverify).
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssuerDecisionRequest {
    /// Account administering the deciding issuer.
    pub issuer_owner: String,
}

/// Request body for credential verification.
///
/// Accepts either raw text (a JWT, or a pasted JSON document) or an
/// already-parsed JSON document.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyCredentialRequest {
    /// Raw credential text.
    pub credential: Option<String>,
    /// Parsed credential document.
    #[schema(value_type = Object)]
    pub credential_json: Option<serde_json::Value>,
}

/// Response from the verification endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerificationResponse {
    /// Whether the credential verified. `false` covers "invalid" as
    /// well as "could not verify", including an unconfigured anchor.
    pub verified: bool,
}

/// API view of a credential record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CredentialView {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub title: String,
    #[schema(value_type = String)]
    pub category: CredentialCategory,
    pub credential_type: String,
    pub file_url: String,
    pub issuer_id: Option<Uuid>,
    /// Lifecycle status (UNVERIFIED, PENDING, VERIFIED, REJECTED).
    pub status: String,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub vc_jwt: Option<String>,
    #[schema(value_type = Object)]
    pub vc_json: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CredentialRecord> for CredentialView {
    fn from(r: CredentialRecord) -> Self {
        Self {
            id: *r.id.as_uuid(),
            candidate_id: *r.candidate_id.as_uuid(),
            title: r.title,
            category: r.category,
            credential_type: r.credential_type,
            file_url: r.file_url,
            issuer_id: r.issuer_id.map(|i| *i.as_uuid()),
            status: r.status.as_str().to_string(),
            verified: r.verified,
            verified_at: r.verified_at,
            vc_jwt: r.vc_jwt,
            vc_json: r.vc_json,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the credentials router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/credentials", post(create_credential))
        .route("/v1/credentials/verify", post(verify_credential))
        .route("/v1/credentials/:id", get(get_credential))
        .route("/v1/credentials/:id/submit", post(submit_credential))
        .route("/v1/credentials/:id/approve", post(approve_credential))
        .route("/v1/credentials/:id/reject", post(reject_credential))
        .route("/v1/credentials/:id/unverify", post(unverify_credential))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/credentials — create a credential record.
#[utoipa::path(
    post,
    path = "/v1/credentials",
    request_body = CreateCredentialRequest,
    responses(
        (status = 201, description = "Credential created", body = CredentialView),
        (status = 404, description = "Candidate or issuer not found", body = crate::error::ErrorBody),
        (status = 422, description = "Validation or precondition failure", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn create_credential(
    State(state): State<AppState>,
    Json(req): Json<CreateCredentialRequest>,
) -> Result<(axum::http::StatusCode, Json<CredentialView>), AppError> {
    let draft = CredentialDraft {
        title: req.title,
        category: req.category,
        credential_type: req.credential_type,
        file_url: req.file_url,
    };
    let record = orchestration::create_credential(
        &state,
        CandidateId::from_uuid(req.candidate_id),
        draft,
        req.issuer_id.map(IssuerId::from_uuid),
    )
    .await?;
    Ok((axum::http::StatusCode::CREATED, Json(record.into())))
}

/// GET /v1/credentials/:id — fetch a credential record.
#[utoipa::path(
    get,
    path = "/v1/credentials/{id}",
    params(("id" = Uuid, Path, description = "Credential ID")),
    responses(
        (status = 200, description = "Credential record", body = CredentialView),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn get_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CredentialView>, AppError> {
    let record = state
        .credentials
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("credential {id} not found")))?;
    Ok(Json(record.into()))
}

/// POST /v1/credentials/:id/submit — submit for issuer review.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/submit",
    params(("id" = Uuid, Path, description = "Credential ID")),
    request_body = SubmitCredentialRequest,
    responses(
        (status = 200, description = "Credential now pending review", body = CredentialView),
        (status = 403, description = "Not the owning candidate", body = crate::error::ErrorBody),
        (status = 422, description = "Not submittable from its current status, issuer inactive, or team DID missing", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn submit_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitCredentialRequest>,
) -> Result<Json<CredentialView>, AppError> {
    let record = orchestration::submit_for_review(
        &state,
        CredentialId::from_uuid(id),
        CandidateId::from_uuid(req.candidate_id),
        IssuerId::from_uuid(req.issuer_id),
    )
    .await?;
    Ok(Json(record.into()))
}

/// POST /v1/credentials/:id/approve — anchor and mark verified.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/approve",
    params(("id" = Uuid, Path, description = "Credential ID")),
    request_body = IssuerDecisionRequest,
    responses(
        (status = 200, description = "Credential verified and anchored", body = CredentialView),
        (status = 403, description = "Credential not assigned to this issuer", body = crate::error::ErrorBody),
        (status = 409, description = "Lost a concurrent update", body = crate::error::ErrorBody),
        (status = 422, description = "Already verified, or issuer or subject DID missing", body = crate::error::ErrorBody),
        (status = 502, description = "Anchoring gateway failure", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn approve_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<IssuerDecisionRequest>,
) -> Result<Json<CredentialView>, AppError> {
    let record =
        orchestration::approve(&state, CredentialId::from_uuid(id), &req.issuer_owner).await?;
    Ok(Json(record.into()))
}

/// POST /v1/credentials/:id/reject — decline a credential.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/reject",
    params(("id" = Uuid, Path, description = "Credential ID")),
    request_body = IssuerDecisionRequest,
    responses(
        (status = 200, description = "Credential rejected", body = CredentialView),
        (status = 403, description = "Credential not assigned to this issuer", body = crate::error::ErrorBody),
        (status = 422, description = "Already rejected", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn reject_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<IssuerDecisionRequest>,
) -> Result<Json<CredentialView>, AppError> {
    let record =
        orchestration::reject(&state, CredentialId::from_uuid(id), &req.issuer_owner).await?;
    Ok(Json(record.into()))
}

/// POST /v1/credentials/:id/unverify — walk back a verification.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/unverify",
    params(("id" = Uuid, Path, description = "Credential ID")),
    request_body = IssuerDecisionRequest,
    responses(
        (status = 200, description = "Credential back to unverified", body = CredentialView),
        (status = 403, description = "Credential not assigned to this issuer", body = crate::error::ErrorBody),
        (status = 422, description = "Not currently verified", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn unverify_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<IssuerDecisionRequest>,
) -> Result<Json<CredentialView>, AppError> {
    let record =
        orchestration::unverify(&state, CredentialId::from_uuid(id), &req.issuer_owner).await?;
    Ok(Json(record.into()))
}

/// POST /v1/credentials/verify — verify a presented credential.
///
/// Accepts a JWT, a pasted JSON document, or a parsed document; the
/// proof token is extracted the same way in all three cases.
#[utoipa::path(
    post,
    path = "/v1/credentials/verify",
    request_body = VerifyCredentialRequest,
    responses(
        (status = 200, description = "Verification outcome", body = VerificationResponse),
        (status = 400, description = "No credential supplied", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn verify_credential(
    State(state): State<AppState>,
    Json(req): Json<VerifyCredentialRequest>,
) -> Result<Json<VerificationResponse>, AppError> {
    let input = match (req.credential_json, req.credential) {
        (Some(json), _) => CredentialInput::Json(json),
        (None, Some(text)) => CredentialInput::Text(text),
        (None, None) => {
            return Err(AppError::BadRequest(
                "supply credential or credential_json".to_string(),
            ))
        }
    };
    let verified = orchestration::verify_credential(&state, &input).await?;
    Ok(Json(VerificationResponse { verified }))
}
