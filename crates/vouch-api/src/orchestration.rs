//! # Credential Lifecycle Orchestration
//!
//! The operations behind the HTTP surface. Each write operation
//! composes guard checks from `vouch-state`, external gateway calls,
//! and a compare-and-swap status flip:
//!
//! 1. **Read and guard** — load the record, check ownership and the
//!    transition guard against the status read.
//! 2. **Gateway call** — anchoring happens before any local mutation,
//!    so a failed gateway call leaves state untouched.
//! 3. **CAS flip** — the status change is applied under a single write
//!    lock, conditioned on the status still being the one read in step
//!    one. A lost race is a 409, never a partial state.
//!
//! The worst outcome of a lost race is an orphaned (unreferenced)
//! signed document at the anchor — logged, and harmless compared to a
//! double-issued one.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use vouch_assess::{AssessError, Completion, Grader};
use vouch_cheqd::{CheqdClient, CheqdError, CredentialInput, Resolution, SignedCredential};
use vouch_core::{CandidateId, CredentialId, Did, DidNetwork, QuizId, Seed};
use vouch_state::{
    Candidate, CredentialDraft, CredentialRecord, CredentialStatus, Issuer, QuizAttempt, Team,
    PASS_THRESHOLD,
};

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// External service traits
// ---------------------------------------------------------------------------

/// Anchoring gateway: DID creation/resolution and credential
/// issuance/verification.
///
/// Dyn-safe so integration tests can substitute a scripted fake for the
/// live cheqd Studio client.
#[axum::async_trait]
pub trait TrustAnchor: Send + Sync {
    /// Create a DID on the given network.
    async fn create_did(&self, network: DidNetwork) -> Result<Did, CheqdError>;

    /// Issue a signed credential.
    async fn issue_credential(
        &self,
        issuer_did: &Did,
        subject_did: &Did,
        attributes: &BTreeMap<String, serde_json::Value>,
        credential_name: &str,
    ) -> Result<SignedCredential, CheqdError>;

    /// Verify a presented credential. `false` covers both "invalid" and
    /// "could not verify".
    async fn verify_credential(&self, input: &CredentialInput) -> bool;

    /// Resolve a DID to its document.
    async fn resolve_did(&self, did: &Did) -> Resolution;
}

#[axum::async_trait]
impl TrustAnchor for CheqdClient {
    async fn create_did(&self, network: DidNetwork) -> Result<Did, CheqdError> {
        CheqdClient::create_did(self, network).await
    }

    async fn issue_credential(
        &self,
        issuer_did: &Did,
        subject_did: &Did,
        attributes: &BTreeMap<String, serde_json::Value>,
        credential_name: &str,
    ) -> Result<SignedCredential, CheqdError> {
        CheqdClient::issue_credential(self, issuer_did, subject_did, attributes, credential_name, None)
            .await
    }

    async fn verify_credential(&self, input: &CredentialInput) -> bool {
        CheqdClient::verify_credential(self, input).await
    }

    async fn resolve_did(&self, did: &Did) -> Resolution {
        CheqdClient::resolve_did(self, did).await
    }
}

/// Free-text answer grader returning a score in 0..=100.
#[axum::async_trait]
pub trait Assessor: Send + Sync {
    async fn assess(&self, answer: &str, quiz_title: &str) -> Result<u8, AssessError>;
}

#[axum::async_trait]
impl<C: Completion + 'static> Assessor for Grader<C> {
    async fn assess(&self, answer: &str, quiz_title: &str) -> Result<u8, AssessError> {
        Grader::assess(self, answer, quiz_title).await
    }
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Result of a scored quiz attempt, as shown to the candidate.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub attempt: QuizAttempt,
    pub passed: bool,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

fn get_candidate(state: &AppState, id: CandidateId) -> Result<Candidate, AppError> {
    state
        .candidates
        .get(id.as_uuid())
        .ok_or_else(|| AppError::NotFound(format!("candidate {id} not found")))
}

fn get_credential(state: &AppState, id: CredentialId) -> Result<CredentialRecord, AppError> {
    state
        .credentials
        .get(id.as_uuid())
        .ok_or_else(|| AppError::NotFound(format!("credential {id} not found")))
}

fn get_team(state: &AppState, candidate: &Candidate) -> Result<Team, AppError> {
    state
        .teams
        .get(candidate.team_id.as_uuid())
        .ok_or_else(|| AppError::NotFound(format!("team {} not found", candidate.team_id)))
}

/// The candidate's team DID, required before any anchoring operation.
fn subject_did(state: &AppState, candidate: &Candidate) -> Result<Did, AppError> {
    get_team(state, candidate)?.did.ok_or_else(|| {
        AppError::Precondition("create your team DID before this operation".to_string())
    })
}

/// Find the issuer administered by `owner`.
fn issuer_for_owner(state: &AppState, owner: &str) -> Result<Issuer, AppError> {
    state
        .issuers
        .find(|i| i.owner == owner)
        .ok_or_else(|| AppError::Forbidden(format!("no issuer administered by {owner}")))
}

fn active_issuer(issuer: &Issuer) -> Result<(), AppError> {
    if issuer.is_active() {
        Ok(())
    } else {
        Err(AppError::Precondition(format!(
            "issuer {} is not active",
            issuer.name
        )))
    }
}

fn trust_anchor(state: &AppState) -> Result<&dyn TrustAnchor, AppError> {
    state
        .trust_anchor
        .as_deref()
        .ok_or_else(|| AppError::NotConfigured("trust anchor gateway".to_string()))
}

// ---------------------------------------------------------------------------
// Credential lifecycle operations
// ---------------------------------------------------------------------------

/// Create a credential record.
///
/// With an issuer attached the record is submitted immediately (starts
/// PENDING), which requires an active issuer and a team DID. Without
/// one it starts UNVERIFIED and those preconditions are deferred to
/// submission time.
pub async fn create_credential(
    state: &AppState,
    candidate_id: CandidateId,
    draft: CredentialDraft,
    issuer_id: Option<vouch_core::IssuerId>,
) -> Result<CredentialRecord, AppError> {
    let candidate = get_candidate(state, candidate_id)?;

    if let Some(issuer_id) = issuer_id {
        let issuer = state
            .issuers
            .get(issuer_id.as_uuid())
            .ok_or_else(|| AppError::NotFound(format!("issuer {issuer_id} not found")))?;
        active_issuer(&issuer)?;
        subject_did(state, &candidate)?;
    }

    let record = CredentialRecord::new(candidate_id, draft, issuer_id)?;
    state.credentials.insert(*record.id.as_uuid(), record.clone());

    if let Some(pool) = &state.db {
        crate::db::credentials::insert(pool, &record)
            .await
            .map_err(|e| AppError::Internal(format!("persist credential: {e}")))?;
    }

    tracing::info!(credential = %record.id, status = %record.status, "credential created");
    Ok(record)
}

/// Submit an UNVERIFIED credential to an issuer for review.
pub async fn submit_for_review(
    state: &AppState,
    credential_id: CredentialId,
    candidate_id: CandidateId,
    issuer_id: vouch_core::IssuerId,
) -> Result<CredentialRecord, AppError> {
    let candidate = get_candidate(state, candidate_id)?;
    let record = get_credential(state, credential_id)?;
    if record.candidate_id != candidate_id {
        return Err(AppError::Forbidden(
            "credential belongs to another candidate".to_string(),
        ));
    }

    let issuer = state
        .issuers
        .get(issuer_id.as_uuid())
        .ok_or_else(|| AppError::NotFound(format!("issuer {issuer_id} not found")))?;
    active_issuer(&issuer)?;
    subject_did(state, &candidate)?;

    let updated = state
        .credentials
        .try_update(credential_id.as_uuid(), |rec| {
            rec.can_submit()?;
            rec.mark_pending(issuer.id);
            Ok::<_, AppError>(rec.clone())
        })
        .ok_or_else(|| AppError::NotFound(format!("credential {credential_id} not found")))??;

    if let Some(pool) = &state.db {
        mirror_status(pool, &updated, CredentialStatus::Unverified).await;
    }

    tracing::info!(credential = %credential_id, issuer = %issuer.id, "submitted for review");
    Ok(updated)
}

/// Approve a credential: anchor a signed document, then flip to
/// VERIFIED.
///
/// The gateway call happens before the flip; the flip is conditioned on
/// the status still being the one read before the call. A failed call
/// changes nothing; a lost race is a 409 and the anchored document is
/// orphaned (logged), never double-referenced.
pub async fn approve(
    state: &AppState,
    credential_id: CredentialId,
    issuer_owner: &str,
) -> Result<CredentialRecord, AppError> {
    let issuer = issuer_for_owner(state, issuer_owner)?;
    active_issuer(&issuer)?;
    let issuer_did = issuer.did.clone().ok_or_else(|| {
        AppError::Precondition(format!("issuer {} holds no DID", issuer.name))
    })?;

    let record = get_credential(state, credential_id)?;
    if record.issuer_id != Some(issuer.id) {
        return Err(AppError::Forbidden(
            "credential is not assigned to this issuer".to_string(),
        ));
    }
    record.can_approve()?;
    let read_status = record.status;

    let candidate = get_candidate(state, record.candidate_id)?;
    let subject = subject_did(state, &candidate)?;

    let mut attributes = BTreeMap::new();
    attributes.insert("title".to_string(), serde_json::json!(record.title));
    attributes.insert(
        "type".to_string(),
        serde_json::json!(record.credential_type),
    );
    attributes.insert(
        "candidateName".to_string(),
        serde_json::json!(candidate.display_name),
    );

    let anchor = trust_anchor(state)?;
    let signed = anchor
        .issue_credential(&issuer_did, &subject, &attributes, "PlatformCredential")
        .await?;
    let jwt = signed.jwt().to_string();
    let doc = signed.to_value();

    let now = Utc::now();
    let flip = state.credentials.try_update(credential_id.as_uuid(), |rec| {
        if rec.status != read_status {
            return Err(AppError::Conflict(format!(
                "credential changed from {read_status} to {} during approval",
                rec.status
            )));
        }
        rec.mark_verified(issuer.id, now, jwt.clone(), doc.clone());
        Ok(rec.clone())
    });

    let updated = match flip {
        Some(Ok(updated)) => updated,
        Some(Err(e)) => {
            tracing::warn!(
                credential = %credential_id,
                "approval lost a concurrent race; anchored document is orphaned"
            );
            return Err(e);
        }
        None => return Err(AppError::NotFound(format!("credential {credential_id} not found"))),
    };

    if let Some(pool) = &state.db {
        mirror_status(pool, &updated, read_status).await;
    }

    tracing::info!(credential = %credential_id, "credential verified and anchored");
    Ok(updated)
}

/// Reject a credential under review.
pub async fn reject(
    state: &AppState,
    credential_id: CredentialId,
    issuer_owner: &str,
) -> Result<CredentialRecord, AppError> {
    let issuer = issuer_for_owner(state, issuer_owner)?;
    let record = get_credential(state, credential_id)?;
    if record.issuer_id != Some(issuer.id) {
        return Err(AppError::Forbidden(
            "credential is not assigned to this issuer".to_string(),
        ));
    }

    let now = Utc::now();
    let read_status = record.status;
    let updated = state
        .credentials
        .try_update(credential_id.as_uuid(), |rec| {
            rec.can_reject()?;
            rec.mark_rejected(issuer.id, now);
            Ok::<_, AppError>(rec.clone())
        })
        .ok_or_else(|| AppError::NotFound(format!("credential {credential_id} not found")))??;

    if let Some(pool) = &state.db {
        mirror_status(pool, &updated, read_status).await;
    }

    tracing::info!(credential = %credential_id, "credential rejected");
    Ok(updated)
}

/// Walk a VERIFIED credential back to UNVERIFIED.
///
/// Local flag only: the anchored credential is not revoked at the
/// trust anchor.
pub async fn unverify(
    state: &AppState,
    credential_id: CredentialId,
    issuer_owner: &str,
) -> Result<CredentialRecord, AppError> {
    let issuer = issuer_for_owner(state, issuer_owner)?;
    let record = get_credential(state, credential_id)?;
    if record.issuer_id != Some(issuer.id) {
        return Err(AppError::Forbidden(
            "credential is not assigned to this issuer".to_string(),
        ));
    }

    let updated = state
        .credentials
        .try_update(credential_id.as_uuid(), |rec| {
            rec.can_unverify()?;
            rec.mark_unverified();
            Ok::<_, AppError>(rec.clone())
        })
        .ok_or_else(|| AppError::NotFound(format!("credential {credential_id} not found")))??;

    if let Some(pool) = &state.db {
        mirror_status(pool, &updated, CredentialStatus::Verified).await;
    }

    tracing::info!(credential = %credential_id, "credential unverified");
    Ok(updated)
}

/// Verify a presented credential through the trust anchor.
///
/// Without a configured anchor nothing can be proven, and many callers
/// only inspect the boolean: the answer is `false`, not an error.
pub async fn verify_credential(
    state: &AppState,
    input: &CredentialInput,
) -> Result<bool, AppError> {
    let Some(anchor) = state.trust_anchor.as_deref() else {
        tracing::warn!("trust anchor not configured; reporting credential as unverified");
        return Ok(false);
    };
    Ok(anchor.verify_credential(input).await)
}

/// Resolve a DID through the trust anchor.
pub async fn resolve_did(state: &AppState, did: &Did) -> Result<Resolution, AppError> {
    let anchor = trust_anchor(state)?;
    Ok(anchor.resolve_did(did).await)
}

// ---------------------------------------------------------------------------
// Quiz attempts
// ---------------------------------------------------------------------------

/// Score a quiz answer and, on a pass, issue a Skill Pass credential.
///
/// The seed is validated before anything else — a malformed seed never
/// reaches the grader. The attempt and its score stand even when
/// issuance fails; the failure is reported in the result message.
pub async fn submit_quiz_answer(
    state: &AppState,
    quiz_id: QuizId,
    candidate_id: CandidateId,
    seed: &str,
    answer: &str,
) -> Result<AttemptOutcome, AppError> {
    let seed = Seed::new(seed)?;

    let candidate = get_candidate(state, candidate_id)?;
    let subject = subject_did(state, &candidate)?;

    let quiz = state
        .quizzes
        .get(quiz_id.as_uuid())
        .ok_or_else(|| AppError::NotFound(format!("quiz {quiz_id} not found")))?;

    let assessor = state
        .assessor
        .as_deref()
        .ok_or_else(|| AppError::NotConfigured("answer assessor".to_string()))?;

    let score = assessor.assess(answer, &quiz.title).await?;
    let passed = score >= PASS_THRESHOLD;

    let mut attempt = QuizAttempt::new(quiz_id, candidate_id, score, seed);
    let mut message = format!(
        "You scored {score}. {}",
        if passed { "You passed!" } else { "You failed." }
    );

    if passed {
        match issue_skill_pass(state, &quiz.title, score, &candidate, &subject).await {
            Ok(signed) => {
                attempt.vc_jwt = Some(signed.jwt().to_string());
                message.push_str(" Your Skill Pass credential has been issued!");
            }
            Err(e) => {
                tracing::error!(error = %e, quiz = %quiz_id, "skill pass issuance failed");
                message.push_str(" However, issuing your credential failed. Please try again later.");
            }
        }
    }

    state.attempts.insert(*attempt.id.as_uuid(), attempt.clone());
    if let Some(pool) = &state.db {
        if let Err(e) = crate::db::attempts::insert(pool, &attempt).await {
            tracing::error!(error = %e, attempt = %attempt.id, "persist attempt failed");
        }
    }

    tracing::info!(attempt = %attempt.id, score, passed, "quiz attempt scored");
    Ok(AttemptOutcome {
        attempt,
        passed,
        message,
    })
}

async fn issue_skill_pass(
    state: &AppState,
    quiz_title: &str,
    score: u8,
    candidate: &Candidate,
    subject: &Did,
) -> Result<SignedCredential, AppError> {
    let platform_did = state
        .platform_did
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("platform issuer DID".to_string()))?;
    let anchor = trust_anchor(state)?;

    let mut attributes = BTreeMap::new();
    attributes.insert("skillQuiz".to_string(), serde_json::json!(quiz_title));
    attributes.insert("score".to_string(), serde_json::json!(score));
    attributes.insert(
        "candidateName".to_string(),
        serde_json::json!(candidate.display_name),
    );

    let signed = anchor
        .issue_credential(platform_did, subject, &attributes, "SkillPass")
        .await?;
    Ok(signed)
}

// ---------------------------------------------------------------------------
// Team DIDs
// ---------------------------------------------------------------------------

/// Create a DID for a team that does not yet hold one.
///
/// Creation never silently overwrites: the gateway is only called when
/// the team's DID slot is empty when read, and the write is conditioned
/// on it still being empty.
pub async fn create_team_did(
    state: &AppState,
    team_id: Uuid,
    network: DidNetwork,
) -> Result<Did, AppError> {
    let team = state
        .teams
        .get(&team_id)
        .ok_or_else(|| AppError::NotFound(format!("team {team_id} not found")))?;
    if team.did.is_some() {
        return Err(AppError::Conflict("team already holds a DID".to_string()));
    }

    let anchor = trust_anchor(state)?;
    let did = anchor.create_did(network).await?;

    let stored = state.teams.try_update(&team_id, |t| {
        if t.did.is_some() {
            return Err(AppError::Conflict("team already holds a DID".to_string()));
        }
        t.did = Some(did.clone());
        Ok(())
    });
    match stored {
        Some(Ok(())) => {}
        Some(Err(e)) => {
            tracing::warn!(team = %team_id, "DID creation lost a concurrent race; new DID is orphaned");
            return Err(e);
        }
        None => return Err(AppError::NotFound(format!("team {team_id} not found"))),
    }

    if let Some(pool) = &state.db {
        if let Err(e) = crate::db::teams::set_did(pool, team_id, &did).await {
            tracing::error!(error = %e, team = %team_id, "persist team DID failed");
        }
    }

    tracing::info!(team = %team_id, did = %did, "team DID created");
    Ok(did)
}

// ---------------------------------------------------------------------------

/// Mirror a status flip to Postgres, conditioned on the expected prior
/// status. A miss is logged, not fatal — the in-memory store is the
/// canonical copy within a process lifetime.
async fn mirror_status(
    pool: &sqlx::PgPool,
    record: &CredentialRecord,
    expected: CredentialStatus,
) {
    match crate::db::credentials::update_status(pool, record, expected).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(
                credential = %record.id,
                expected = %expected,
                "database row did not match expected status during mirror"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, credential = %record.id, "mirror status failed");
        }
    }
}
