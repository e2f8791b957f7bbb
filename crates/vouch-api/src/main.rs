//! # vouch-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Vouch Stack API.
//! Binds to a configurable port (default 8080).

use std::sync::Arc;

use vouch_api::state::{AppConfig, AppState};
use vouch_core::Did;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let config = AppConfig { port };

    // Database pool (optional — absent means in-memory only).
    let db = vouch_api::db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    // Trust anchor client from environment.
    let trust_anchor: Option<Arc<dyn vouch_api::orchestration::TrustAnchor>> =
        match vouch_cheqd::CheqdConfig::from_env() {
            Ok(cheqd_config) => {
                tracing::info!("cheqd Studio client configured");
                Some(Arc::new(vouch_cheqd::CheqdClient::new(cheqd_config)?))
            }
            Err(e) => {
                tracing::warn!(
                    "cheqd Studio not configured: {e}. Anchoring endpoints will return 503."
                );
                None
            }
        };

    // Answer assessor from environment.
    let assessor: Option<Arc<dyn vouch_api::orchestration::Assessor>> =
        match vouch_assess::AssessConfig::from_env() {
            Ok(assess_config) => {
                tracing::info!("answer assessor configured");
                let completion = vouch_assess::HttpCompletion::new(assess_config)?;
                Some(Arc::new(vouch_assess::Grader::new(completion)))
            }
            Err(e) => {
                tracing::warn!("assessor not configured: {e}. Quiz attempts will return 503.");
                None
            }
        };

    // The DID issuing Skill Pass credentials.
    let platform_did = match std::env::var("VOUCH_PLATFORM_DID") {
        Ok(raw) => Some(Did::new(raw)?),
        Err(_) => {
            tracing::warn!(
                "VOUCH_PLATFORM_DID not set. Skill Pass issuance will report failure."
            );
            None
        }
    };

    let state = AppState::with_config(config, trust_anchor, assessor, platform_did, db);

    // Hydrate in-memory stores from the database (if connected).
    state.hydrate_from_db().await.map_err(|e| {
        tracing::error!("Database hydration failed: {e}");
        e
    })?;

    let app = vouch_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Vouch API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
