//! Credential records and guarded status transitions.
//!
//! Guards and effects are split: `can_*` functions answer whether a
//! transition is permitted from the current status, and `mark_*`
//! functions apply the effect. The orchestration layer calls the guard,
//! performs any external work (gateway issuance), then re-checks via
//! compare-and-swap before applying the effect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vouch_core::{CandidateId, CredentialId, IssuerId, ValidationError};

use crate::status::{CredentialCategory, CredentialStatus};

/// Maximum length of the free-form `credential_type` field.
pub const MAX_TYPE_LEN: usize = 50;

/// Invalid status transition attempted.
///
/// Carries structured context for diagnostics; guards never panic and
/// never mutate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid credential transition from {from} to {to}: {reason}")]
pub struct TransitionError {
    /// Current status.
    pub from: CredentialStatus,
    /// Attempted target status.
    pub to: CredentialStatus,
    /// Human-readable reason for the rejection.
    pub reason: String,
}

impl TransitionError {
    fn new(from: CredentialStatus, to: CredentialStatus, reason: impl Into<String>) -> Self {
        Self {
            from,
            to,
            reason: reason.into(),
        }
    }
}

/// Input for creating a credential record.
///
/// Validated on construction; a draft that exists is well-formed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialDraft {
    /// Display title, e.g. "BSc Computer Science".
    pub title: String,
    /// Closed category set.
    pub category: CredentialCategory,
    /// Free-form type string, at most [`MAX_TYPE_LEN`] characters.
    pub credential_type: String,
    /// Where the supporting evidence lives, as an absolute URL.
    pub file_url: String,
}

impl CredentialDraft {
    /// Validate field constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if self.credential_type.chars().count() > MAX_TYPE_LEN {
            return Err(ValidationError::TooLong {
                field: "credential_type",
                max: MAX_TYPE_LEN,
            });
        }
        if self.file_url.trim().is_empty() {
            return Err(ValidationError::Empty { field: "file_url" });
        }
        url::Url::parse(&self.file_url).map_err(|e| ValidationError::InvalidUrl {
            field: "file_url",
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// A candidate-owned credential moving through the verification
/// lifecycle.
///
/// Invariants maintained by the constructor and transition functions:
/// - `issuer_id` is `Some` exactly when the status is PENDING, VERIFIED
///   or REJECTED.
/// - `verified` is `true` exactly when the status is VERIFIED.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Unique credential identifier.
    pub id: CredentialId,
    /// The owning candidate.
    pub candidate_id: CandidateId,
    /// Display title.
    pub title: String,
    /// Category from the closed set.
    pub category: CredentialCategory,
    /// Free-form type string (≤ 50 chars).
    pub credential_type: String,
    /// Where the supporting evidence lives.
    pub file_url: String,
    /// The issuer reviewing or having reviewed this credential.
    pub issuer_id: Option<IssuerId>,
    /// Current lifecycle status.
    pub status: CredentialStatus,
    /// Convenience flag mirroring `status == Verified`.
    pub verified: bool,
    /// When the last approve/reject decision was taken.
    pub verified_at: Option<DateTime<Utc>>,
    /// Compact JWT of the anchored verifiable credential, once issued.
    pub vc_jwt: Option<String>,
    /// Full signed credential document, once issued.
    pub vc_json: Option<serde_json::Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Create a new record from a validated draft.
    ///
    /// With an issuer attached the record starts in PENDING (submitted
    /// at creation); without one it starts UNVERIFIED.
    pub fn new(
        candidate_id: CandidateId,
        draft: CredentialDraft,
        issuer_id: Option<IssuerId>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        let now = Utc::now();
        let status = match issuer_id {
            Some(_) => CredentialStatus::Pending,
            None => CredentialStatus::Unverified,
        };
        Ok(Self {
            id: CredentialId::new(),
            candidate_id,
            title: draft.title,
            category: draft.category,
            credential_type: draft.credential_type,
            file_url: draft.file_url,
            issuer_id,
            status,
            verified: false,
            verified_at: None,
            vc_jwt: None,
            vc_json: None,
            created_at: now,
            updated_at: now,
        })
    }

    // ── Guards ───────────────────────────────────────────────────────

    /// Whether the record may be submitted for review.
    ///
    /// Only UNVERIFIED records submit. REJECTED records must first be
    /// returned to UNVERIFIED by the owning candidate (re-submission is
    /// a fresh submit after editing, not a direct REJECTED → PENDING
    /// hop).
    pub fn can_submit(&self) -> Result<(), TransitionError> {
        match self.status {
            CredentialStatus::Unverified => Ok(()),
            CredentialStatus::Pending => Err(TransitionError::new(
                self.status,
                CredentialStatus::Pending,
                "already awaiting review",
            )),
            CredentialStatus::Verified => Err(TransitionError::new(
                self.status,
                CredentialStatus::Pending,
                "already verified",
            )),
            CredentialStatus::Rejected => Err(TransitionError::new(
                self.status,
                CredentialStatus::Pending,
                "rejected credentials must be reset before re-submission",
            )),
        }
    }

    /// Whether the record may be approved.
    ///
    /// Approval is permitted from any status except VERIFIED: issuers
    /// may approve directly from UNVERIFIED or reverse an earlier
    /// rejection. Approving twice would anchor a duplicate document.
    pub fn can_approve(&self) -> Result<(), TransitionError> {
        match self.status {
            CredentialStatus::Unverified
            | CredentialStatus::Pending
            | CredentialStatus::Rejected => Ok(()),
            CredentialStatus::Verified => Err(TransitionError::new(
                self.status,
                CredentialStatus::Verified,
                "already verified; a second approval would issue a duplicate credential",
            )),
        }
    }

    /// Whether the record may be rejected.
    ///
    /// Any non-rejected status may be rejected.
    pub fn can_reject(&self) -> Result<(), TransitionError> {
        match self.status {
            CredentialStatus::Unverified
            | CredentialStatus::Pending
            | CredentialStatus::Verified => Ok(()),
            CredentialStatus::Rejected => Err(TransitionError::new(
                self.status,
                CredentialStatus::Rejected,
                "already rejected",
            )),
        }
    }

    /// Whether the record may be unverified.
    ///
    /// Only VERIFIED records can be walked back.
    pub fn can_unverify(&self) -> Result<(), TransitionError> {
        match self.status {
            CredentialStatus::Verified => Ok(()),
            CredentialStatus::Unverified
            | CredentialStatus::Pending
            | CredentialStatus::Rejected => Err(TransitionError::new(
                self.status,
                CredentialStatus::Unverified,
                "only verified credentials can be unverified",
            )),
        }
    }

    // ── Effects ──────────────────────────────────────────────────────

    /// Submit for review: attach the issuer and move to PENDING.
    pub fn mark_pending(&mut self, issuer_id: IssuerId) {
        self.issuer_id = Some(issuer_id);
        self.status = CredentialStatus::Pending;
        self.verified = false;
        self.touch();
    }

    /// Record an approval: store the anchored document and move to
    /// VERIFIED.
    pub fn mark_verified(
        &mut self,
        issuer_id: IssuerId,
        now: DateTime<Utc>,
        vc_jwt: String,
        vc_json: serde_json::Value,
    ) {
        self.issuer_id = Some(issuer_id);
        self.status = CredentialStatus::Verified;
        self.verified = true;
        self.verified_at = Some(now);
        self.vc_jwt = Some(vc_jwt);
        self.vc_json = Some(vc_json);
        self.touch();
    }

    /// Record a rejection.
    pub fn mark_rejected(&mut self, issuer_id: IssuerId, now: DateTime<Utc>) {
        self.issuer_id = Some(issuer_id);
        self.status = CredentialStatus::Rejected;
        self.verified = false;
        self.verified_at = Some(now);
        self.touch();
    }

    /// Walk a verified credential back to UNVERIFIED.
    ///
    /// The anchored document fields are cleared locally; the on-ledger
    /// credential itself is not revoked here.
    pub fn mark_unverified(&mut self) {
        self.issuer_id = None;
        self.status = CredentialStatus::Unverified;
        self.verified = false;
        self.verified_at = None;
        self.vc_jwt = None;
        self.vc_json = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
