//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the Vouch Stack.
//! Each identifier is a distinct type — you cannot pass a [`CandidateId`]
//! where an [`IssuerId`] is expected.
//!
//! ## Validation
//!
//! [`Did`] validates the did:cheqd format at construction time. UUID-based
//! identifiers ([`CandidateId`], [`CredentialId`], [`IssuerId`], [`TeamId`],
//! [`QuizId`], [`AttemptId`]) are always valid by construction.
//!
//! ## DID Format Contract
//!
//! `did:cheqd:<testnet|mainnet>:<32+ alphanumeric/hyphen chars>` — the
//! shape returned by cheqd Studio for uuid-format identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Helper macro implementing the common surface of a UUID-backed
/// identifier newtype: random construction, conversion, Display, FromStr.
macro_rules! uuid_id {
    ($(#[$doc:meta])* $ty:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $ty(Uuid);

        impl $ty {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $ty {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::from_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// A unique identifier for a candidate profile.
    CandidateId
);
uuid_id!(
    /// A unique identifier for a candidate credential record.
    CredentialId
);
uuid_id!(
    /// A unique identifier for an issuer organization.
    IssuerId
);
uuid_id!(
    /// A unique identifier for a team. Teams hold at most one DID.
    TeamId
);
uuid_id!(
    /// A unique identifier for a skill quiz.
    QuizId
);
uuid_id!(
    /// A unique identifier for a scored quiz attempt.
    AttemptId
);

/// The cheqd network a DID is anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DidNetwork {
    /// cheqd testnet (default for this platform).
    Testnet,
    /// cheqd mainnet.
    Mainnet,
}

impl DidNetwork {
    /// The wire name sent to cheqd Studio.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }
}

impl Default for DidNetwork {
    fn default() -> Self {
        Self::Testnet
    }
}

impl std::fmt::Display for DidNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DidNetwork {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testnet" => Ok(Self::Testnet),
            "mainnet" => Ok(Self::Mainnet),
            other => Err(ValidationError::InvalidNetwork(other.to_string())),
        }
    }
}

/// A decentralized identifier anchored on the cheqd network.
///
/// Validated at construction against the contract
/// `did:cheqd:<testnet|mainnet>:<32+ alphanumeric/hyphen chars>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Did(String);

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Route through `new()` so invalid values are rejected at
        // deserialization time, not silently accepted.
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match `did:cheqd:<network>:<identifier>`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let rest = s
            .strip_prefix("did:cheqd:")
            .ok_or_else(|| ValidationError::InvalidDid(s.to_string()))?;

        let (network, identifier) = rest
            .split_once(':')
            .ok_or_else(|| ValidationError::InvalidDid(s.to_string()))?;

        if network.parse::<DidNetwork>().is_err() {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }

        // cheqd uuid-format identifiers are at least 32 chars of
        // alphanumerics and hyphens.
        if identifier.len() < 32
            || !identifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }

        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The network segment of this DID.
    pub fn network(&self) -> DidNetwork {
        let rest = &self.0["did:cheqd:".len()..];
        let (network, _) = rest.split_once(':').expect("validated at construction");
        network.parse().expect("validated at construction")
    }

    /// The method-specific identifier (everything after the network).
    pub fn method_specific_id(&self) -> &str {
        let rest = &self.0["did:cheqd:".len()..];
        let (_, id) = rest.split_once(':').expect("validated at construction");
        id
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
