//! Team persistence. The DID column is write-once: the conditional
//! update refuses to overwrite an existing value.

use sqlx::PgPool;
use uuid::Uuid;

use vouch_core::{Did, TeamId};
use vouch_state::Team;

/// Set a team's DID, only if none is recorded. Returns whether a row
/// was updated.
pub async fn set_did(pool: &PgPool, team_id: Uuid, did: &Did) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE teams SET did = $1 WHERE id = $2 AND did IS NULL")
        .bind(did.as_str())
        .bind(team_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Load all teams on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TeamRow>("SELECT id, name, did FROM teams ORDER BY name")
        .fetch_all(pool)
        .await?;

    let mut teams = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_team() {
            Some(team) => teams.push(team),
            None => {
                tracing::error!("skipping team row with invalid DID");
            }
        }
    }
    Ok(teams)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    did: Option<String>,
}

impl TeamRow {
    fn into_team(self) -> Option<Team> {
        let did = match self.did {
            None => None,
            Some(raw) => match Did::new(raw) {
                Ok(did) => Some(did),
                Err(e) => {
                    tracing::warn!(error = %e, "unparseable DID in database");
                    return None;
                }
            },
        };
        Some(Team {
            id: TeamId::from_uuid(self.id),
            name: self.name,
            did,
        })
    }
}
