//! # API Route Modules
//!
//! - `credentials` — credential lifecycle: create, submit, approve,
//!   reject, unverify, and verification of presented documents.
//! - `quiz` — skill quiz catalogue, deterministic question selection,
//!   and scored attempts.
//! - `identity` — team DID creation and DID resolution.

pub mod credentials;
pub mod identity;
pub mod quiz;
