//! Participant records: candidates, issuers, and teams.

use serde::{Deserialize, Serialize};

use vouch_core::{CandidateId, Did, IssuerId, TeamId};

use crate::status::IssuerStatus;

/// A candidate seeking credential verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique candidate identifier.
    pub id: CandidateId,
    /// The team whose DID anchors this candidate's credentials.
    pub team_id: TeamId,
    /// Name embedded in issued credentials as `candidateName`.
    pub display_name: String,
}

/// An organization entitled to review and countersign credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issuer {
    /// Unique issuer identifier.
    pub id: IssuerId,
    /// Account that administers this issuer.
    pub owner: String,
    /// Organization display name.
    pub name: String,
    /// The issuer's signing DID. Approval requires one.
    pub did: Option<Did>,
    /// Review standing; only ACTIVE issuers act.
    pub status: IssuerStatus,
}

impl Issuer {
    /// Whether this issuer may receive submissions and decide them.
    pub fn is_active(&self) -> bool {
        match self.status {
            IssuerStatus::Active => true,
            IssuerStatus::Pending => false,
        }
    }
}

/// A team holding zero or one decentralized identifier.
///
/// The DID is write-once through the orchestration layer: creation
/// never silently overwrites an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique team identifier.
    pub id: TeamId,
    /// Team display name.
    pub name: String,
    /// The team's DID, once created.
    pub did: Option<Did>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_issuer_is_not_active() {
        let issuer = Issuer {
            id: IssuerId::new(),
            owner: "ops@example.org".to_string(),
            name: "Example University".to_string(),
            did: None,
            status: IssuerStatus::Pending,
        };
        assert!(!issuer.is_active());
    }
}
