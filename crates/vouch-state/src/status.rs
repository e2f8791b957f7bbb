//! Status and category enumerations.

use serde::{Deserialize, Serialize};

/// Verification status of a candidate credential.
///
/// Wire form is SCREAMING_SNAKE for parity with stored rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialStatus {
    /// Created by the candidate, not yet submitted to an issuer.
    Unverified,
    /// Submitted to an issuer, awaiting review.
    Pending,
    /// Approved by an issuer; a signed credential is anchored.
    Verified,
    /// Declined by an issuer. Re-submission is permitted.
    Rejected,
}

impl CredentialStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "UNVERIFIED",
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parse the canonical string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "UNVERIFIED" => Some(Self::Unverified),
            "PENDING" => Some(Self::Pending),
            "VERIFIED" => Some(Self::Verified),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether an issuer reference must be attached in this status.
    ///
    /// Invariant: `issuer_id` is set if and only if the status is one of
    /// PENDING, VERIFIED, REJECTED.
    pub fn requires_issuer(&self) -> bool {
        match self {
            Self::Pending | Self::Verified | Self::Rejected => true,
            Self::Unverified => false,
        }
    }
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Review standing of an issuer organization.
///
/// Only ACTIVE issuers may receive submissions or approve/reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssuerStatus {
    /// Awaiting platform activation.
    Pending,
    /// Entitled to review and countersign credentials.
    Active,
}

impl IssuerStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
        }
    }

    /// Parse the canonical string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "ACTIVE" => Some(Self::Active),
            _ => None,
        }
    }
}

impl std::fmt::Display for IssuerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Closed set of credential categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialCategory {
    Education,
    Experience,
    Project,
    Award,
    Certification,
    Other,
}

impl CredentialCategory {
    /// The canonical string name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Education => "EDUCATION",
            Self::Experience => "EXPERIENCE",
            Self::Project => "PROJECT",
            Self::Award => "AWARD",
            Self::Certification => "CERTIFICATION",
            Self::Other => "OTHER",
        }
    }

    /// Parse the canonical string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EDUCATION" => Some(Self::Education),
            "EXPERIENCE" => Some(Self::Experience),
            "PROJECT" => Some(Self::Project),
            "AWARD" => Some(Self::Award),
            "CERTIFICATION" => Some(Self::Certification),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for CredentialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
