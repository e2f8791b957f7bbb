//! # vouch-api — Axum API Services for the Vouch Stack
//!
//! The orchestration layer above the domain crates. It wires candidate
//! credential lifecycle management, skill quiz attempts with AI
//! grading, and DID/credential anchoring via cheqd Studio into one
//! HTTP surface.
//!
//! ## API Surface
//!
//! | Prefix               | Module                   | Domain                    |
//! |----------------------|--------------------------|---------------------------|
//! | `/v1/credentials/*`  | [`routes::credentials`]  | Credential lifecycle      |
//! | `/v1/quizzes/*`      | [`routes::quiz`]         | Skill quizzes + attempts  |
//! | `/v1/teams/*/did`    | [`routes::identity`]     | Team DIDs                 |
//! | `/v1/dids/*`         | [`routes::identity`]     | DID resolution            |
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod db;
pub mod error;
pub mod openapi;
pub mod orchestration;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes (`/health/*`) are mounted outside the traced API
/// router so probe traffic stays out of the request logs.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::credentials::router())
        .merge(routes::quiz::router())
        .merge(routes::identity::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
