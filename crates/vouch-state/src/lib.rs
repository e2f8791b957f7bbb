//! # vouch-state — Credential Lifecycle State Machine
//!
//! Pure domain records and transition logic. Nothing here performs I/O:
//! the orchestration layer decides WHEN a transition happens; this crate
//! decides WHETHER it may, and applies the effect.
//!
//! ## Status Machine
//!
//! ```text
//! UNVERIFIED → PENDING → VERIFIED
//!                 ↓          ↓ (unverify)
//!              REJECTED   UNVERIFIED
//! ```
//!
//! No state is terminal — `REJECTED` and `UNVERIFIED` both permit a
//! future re-submission. Every guard is a pure function returning a
//! structured [`TransitionError`]; unmodeled transitions are rejected,
//! and enum matches carry no wildcard arm so a new status variant is a
//! compile error everywhere it matters.

pub mod credential;
pub mod quiz;
pub mod records;
pub mod status;

pub use credential::{CredentialDraft, CredentialRecord, TransitionError};
pub use quiz::{QuizAttempt, QuizQuestion, SkillQuiz, PASS_THRESHOLD};
pub use records::{Candidate, Issuer, Team};
pub use status::{CredentialCategory, CredentialStatus, IssuerStatus};
