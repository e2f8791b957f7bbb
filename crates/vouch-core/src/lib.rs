//! # vouch-core — Foundational Types for the Vouch Stack
//!
//! Domain-primitive newtypes shared by every crate in the workspace:
//! UUID-based identifiers, the [`Did`] string newtype with did:cheqd
//! format validation, and the [`Seed`] newtype that drives deterministic
//! quiz ordering.
//!
//! ## Validation
//!
//! String-based types ([`Did`], [`Seed`]) validate format at construction
//! time and at deserialization time. UUID-based identifiers are always
//! valid by construction.

pub mod error;
pub mod identity;
pub mod seed;

pub use error::ValidationError;
pub use identity::{AttemptId, CandidateId, CredentialId, Did, DidNetwork, IssuerId, QuizId, TeamId};
pub use seed::Seed;
