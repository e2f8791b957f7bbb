//! # vouch-cheqd — Typed cheqd Studio Client
//!
//! The only authorized path between the Vouch Stack and the
//! trust-anchoring network. Four stateless operations against cheqd
//! Studio, all form-encoded with an `x-api-key` header:
//!
//! - [`CheqdClient::create_did`] — anchor a fresh did:cheqd identifier
//! - [`CheqdClient::issue_credential`] — issue a VC-JWT credential
//! - [`CheqdClient::verify_credential`] — verify a presented credential
//! - [`CheqdClient::resolve_did`] — look up a DID document
//!
//! ## Error Boundary
//!
//! Issuance and DID creation surface structured [`CheqdError`]s.
//! Verification and resolution deliberately swallow failures:
//! "absence of proof means not verified / not found" is the external
//! contract. Each swallowed cause is logged at `warn` so operators can
//! tell configuration gaps from genuine verification failures.

pub mod client;
pub mod config;
pub mod credential;
pub mod error;

pub use client::{CheqdClient, Resolution};
pub use config::{CheqdConfig, ConfigError};
pub use credential::{CredentialInput, Proof, SignedCredential};
pub use error::CheqdError;
