//! Credential persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `credentials`
//! table. Status flips are conditioned on the expected prior status.

use sqlx::PgPool;
use uuid::Uuid;

use chrono::{DateTime, Utc};
use vouch_core::{CandidateId, CredentialId, IssuerId};
use vouch_state::{CredentialCategory, CredentialRecord, CredentialStatus};

/// Insert a new credential record.
pub async fn insert(pool: &PgPool, record: &CredentialRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO credentials (id, candidate_id, title, category, credential_type,
         file_url, issuer_id, status, verified, verified_at, vc_jwt, vc_json,
         created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
    )
    .bind(record.id.as_uuid())
    .bind(record.candidate_id.as_uuid())
    .bind(&record.title)
    .bind(record.category.as_str())
    .bind(&record.credential_type)
    .bind(&record.file_url)
    .bind(record.issuer_id.as_ref().map(|i| *i.as_uuid()))
    .bind(record.status.as_str())
    .bind(record.verified)
    .bind(record.verified_at)
    .bind(&record.vc_jwt)
    .bind(&record.vc_json)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Conditionally update a credential's row to match `record`, only if
/// the row still holds `expected` status. Returns whether a row was
/// updated.
pub async fn update_status(
    pool: &PgPool,
    record: &CredentialRecord,
    expected: CredentialStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE credentials
         SET status = $1, issuer_id = $2, verified = $3, verified_at = $4,
             vc_jwt = $5, vc_json = $6, updated_at = $7
         WHERE id = $8 AND status = $9",
    )
    .bind(record.status.as_str())
    .bind(record.issuer_id.as_ref().map(|i| *i.as_uuid()))
    .bind(record.verified)
    .bind(record.verified_at)
    .bind(&record.vc_jwt)
    .bind(&record.vc_json)
    .bind(record.updated_at)
    .bind(record.id.as_uuid())
    .bind(expected.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all credential rows into records on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<CredentialRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, candidate_id, title, category, credential_type, file_url,
         issuer_id, status, verified, verified_at, vc_jwt, vc_json,
         created_at, updated_at
         FROM credentials ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_record() {
            Some(record) => records.push(record),
            None => {
                tracing::error!("skipping credential row with invalid status or category");
            }
        }
    }
    Ok(records)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    candidate_id: Uuid,
    title: String,
    category: String,
    credential_type: String,
    file_url: String,
    issuer_id: Option<Uuid>,
    status: String,
    verified: bool,
    verified_at: Option<DateTime<Utc>>,
    vc_jwt: Option<String>,
    vc_json: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_record(self) -> Option<CredentialRecord> {
        let status = match CredentialStatus::parse(&self.status) {
            Some(s) => s,
            None => {
                tracing::warn!(status = %self.status, "unknown credential status in database");
                return None;
            }
        };
        let category = match CredentialCategory::parse(&self.category) {
            Some(c) => c,
            None => {
                tracing::warn!(category = %self.category, "unknown credential category in database");
                return None;
            }
        };
        Some(CredentialRecord {
            id: CredentialId::from_uuid(self.id),
            candidate_id: CandidateId::from_uuid(self.candidate_id),
            title: self.title,
            category,
            credential_type: self.credential_type,
            file_url: self.file_url,
            issuer_id: self.issuer_id.map(IssuerId::from_uuid),
            status,
            verified: self.verified,
            verified_at: self.verified_at,
            vc_jwt: self.vc_jwt,
            vc_json: self.vc_json,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
