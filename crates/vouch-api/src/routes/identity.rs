//! # Identity Endpoints
//!
//! - `POST /v1/teams/:id/did` — create a DID for a team.
//! - `GET /v1/dids/:did` — resolve a DID to its document.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use vouch_core::{Did, DidNetwork};

use crate::error::AppError;
use crate::orchestration;
use crate::state::AppState;

/// Request body for team DID creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDidRequest {
    /// Target network ("testnet" or "mainnet"). Defaults to testnet.
    pub network: Option<String>,
}

/// Response from DID creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDidResponse {
    pub team_id: Uuid,
    pub did: String,
}

/// Response from DID resolution.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolveDidResponse {
    pub did: String,
    /// Whether the DID resolved to a document.
    pub found: bool,
    /// The DID document, when found.
    #[schema(value_type = Object)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<serde_json::Value>,
}

/// Build the identity router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/teams/:id/did", post(create_team_did))
        .route("/v1/dids/:did", get(resolve_did))
}

/// POST /v1/teams/:id/did — create an identifier for a team.
///
/// A team holds at most one DID; creation never overwrites.
#[utoipa::path(
    post,
    path = "/v1/teams/{id}/did",
    params(("id" = Uuid, Path, description = "Team ID")),
    request_body = CreateDidRequest,
    responses(
        (status = 201, description = "DID created", body = CreateDidResponse),
        (status = 404, description = "Team not found", body = crate::error::ErrorBody),
        (status = 409, description = "Team already holds a DID", body = crate::error::ErrorBody),
        (status = 422, description = "Unknown network", body = crate::error::ErrorBody),
        (status = 502, description = "Gateway failure", body = crate::error::ErrorBody),
        (status = 503, description = "Trust anchor not configured", body = crate::error::ErrorBody),
    ),
    tag = "identity"
)]
pub async fn create_team_did(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateDidRequest>,
) -> Result<(axum::http::StatusCode, Json<CreateDidResponse>), AppError> {
    let network = match req.network.as_deref() {
        Some(name) => name
            .parse::<DidNetwork>()
            .map_err(AppError::from)?,
        None => DidNetwork::default(),
    };

    let did = orchestration::create_team_did(&state, id, network).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(CreateDidResponse {
            team_id: id,
            did: did.to_string(),
        }),
    ))
}

/// GET /v1/dids/:did — resolve a DID.
///
/// An unknown DID is a successful response with `found: false`, not a
/// 404 — the lookup succeeded, the identifier simply isn't registered.
#[utoipa::path(
    get,
    path = "/v1/dids/{did}",
    params(("did" = String, Path, description = "did:cheqd identifier")),
    responses(
        (status = 200, description = "Resolution outcome", body = ResolveDidResponse),
        (status = 422, description = "Malformed DID", body = crate::error::ErrorBody),
        (status = 503, description = "Trust anchor not configured", body = crate::error::ErrorBody),
    ),
    tag = "identity"
)]
pub async fn resolve_did(
    State(state): State<AppState>,
    Path(did): Path<String>,
) -> Result<Json<ResolveDidResponse>, AppError> {
    let did = Did::new(did)?;
    let resolution = orchestration::resolve_did(&state, &did).await?;
    Ok(Json(ResolveDidResponse {
        did: did.to_string(),
        found: resolution.found,
        document: resolution.document,
    }))
}
