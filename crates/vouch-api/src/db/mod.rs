//! # Database Persistence Layer
//!
//! Optional Postgres mirror of the in-memory stores. When
//! `DATABASE_URL` is set, credentials, quiz attempts, and team DIDs
//! are persisted and hydrated back into memory on boot. When absent,
//! the API runs in-memory only (development and testing).
//!
//! Status flips are conditional updates (`WHERE id AND status =
//! expected`) so a concurrent writer can never overwrite a decision the
//! row no longer reflects.

pub mod attempts;
pub mod credentials;
pub mod teams;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration
/// fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 State will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
