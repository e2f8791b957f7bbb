//! # Integration Tests for vouch-api
//!
//! Exercises the credential lifecycle, quiz attempts, and identity
//! endpoints through the full router, with scripted fakes standing in
//! for the cheqd gateway and the answer grader.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use vouch_api::orchestration::{Assessor, TrustAnchor};
use vouch_api::state::{AppConfig, AppState};
use vouch_assess::AssessError;
use vouch_cheqd::{CheqdError, CredentialInput, Resolution, SignedCredential};
use vouch_core::{CandidateId, Did, DidNetwork, IssuerId, TeamId};
use vouch_state::{Candidate, Issuer, IssuerStatus, Team};

const JWT: &str = "eyJhbGciOiJFZERTQSJ9.eyJzdWIiOiJ0ZXN0In0.c2ln";

fn test_did() -> Did {
    Did::new(format!("did:cheqd:testnet:{}", Uuid::new_v4().simple())).unwrap()
}

// -- Fakes --------------------------------------------------------------------

#[derive(Debug, Clone)]
struct IssueCall {
    issuer: String,
    subject: String,
    credential_name: String,
    attributes: BTreeMap<String, serde_json::Value>,
}

/// Scripted trust anchor recording every call.
struct FakeAnchor {
    issued: Mutex<Vec<IssueCall>>,
    verified_tokens: Mutex<Vec<String>>,
    fail_issuance: bool,
}

impl FakeAnchor {
    fn new() -> Self {
        Self {
            issued: Mutex::new(Vec::new()),
            verified_tokens: Mutex::new(Vec::new()),
            fail_issuance: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_issuance: true,
            ..Self::new()
        }
    }
}

#[axum::async_trait]
impl TrustAnchor for FakeAnchor {
    async fn create_did(&self, _network: DidNetwork) -> Result<Did, CheqdError> {
        Ok(test_did())
    }

    async fn issue_credential(
        &self,
        issuer_did: &Did,
        subject_did: &Did,
        attributes: &BTreeMap<String, serde_json::Value>,
        credential_name: &str,
    ) -> Result<SignedCredential, CheqdError> {
        if self.fail_issuance {
            return Err(CheqdError::Api {
                endpoint: "https://studio.test/credential/issue".to_string(),
                status: 500,
                body: "scripted failure".to_string(),
            });
        }
        self.issued.lock().push(IssueCall {
            issuer: issuer_did.to_string(),
            subject: subject_did.to_string(),
            credential_name: credential_name.to_string(),
            attributes: attributes.clone(),
        });
        let doc = serde_json::json!({
            "type": ["VerifiableCredential", credential_name],
            "issuer": {"id": issuer_did.as_str()},
            "proof": {"type": "JwtProof2020", "jwt": JWT}
        });
        Ok(serde_json::from_value(doc).unwrap())
    }

    async fn verify_credential(&self, input: &CredentialInput) -> bool {
        self.verified_tokens.lock().push(input.to_wire());
        true
    }

    async fn resolve_did(&self, _did: &Did) -> Resolution {
        Resolution {
            found: false,
            document: None,
        }
    }
}

/// Grader that always returns a fixed score, counting invocations.
struct FakeAssessor {
    score: u8,
    calls: Mutex<u32>,
}

impl FakeAssessor {
    fn scoring(score: u8) -> Self {
        Self {
            score,
            calls: Mutex::new(0),
        }
    }
}

#[axum::async_trait]
impl Assessor for FakeAssessor {
    async fn assess(&self, _answer: &str, _quiz_title: &str) -> Result<u8, AssessError> {
        *self.calls.lock() += 1;
        Ok(self.score)
    }
}

// -- Test environment ---------------------------------------------------------

struct TestEnv {
    state: AppState,
    anchor: Arc<FakeAnchor>,
    assessor: Arc<FakeAssessor>,
    candidate_id: Uuid,
    team_id: Uuid,
    issuer_id: Uuid,
}

/// Seed a candidate, a team (with or without a DID), and an active
/// issuer (with a DID) owned by `reviewer@example.org`.
fn test_env(team_has_did: bool, anchor: FakeAnchor, assessor: FakeAssessor) -> TestEnv {
    let anchor = Arc::new(anchor);
    let assessor = Arc::new(assessor);
    let state = AppState::with_config(
        AppConfig::default(),
        Some(anchor.clone()),
        Some(assessor.clone()),
        Some(test_did()),
        None,
    );

    let team = Team {
        id: TeamId::new(),
        name: "Acme Candidates".to_string(),
        did: team_has_did.then(test_did),
    };
    let candidate = Candidate {
        id: CandidateId::new(),
        team_id: team.id,
        display_name: "Jordan Rivera".to_string(),
    };
    let issuer = Issuer {
        id: IssuerId::new(),
        owner: "reviewer@example.org".to_string(),
        name: "Example University".to_string(),
        did: Some(test_did()),
        status: IssuerStatus::Active,
    };

    let team_id = *team.id.as_uuid();
    let candidate_id = *candidate.id.as_uuid();
    let issuer_id = *issuer.id.as_uuid();
    state.teams.insert(team_id, team);
    state.candidates.insert(candidate_id, candidate);
    state.issuers.insert(issuer_id, issuer);

    TestEnv {
        state,
        anchor,
        assessor,
        candidate_id,
        team_id,
        issuer_id,
    }
}

fn app(env: &TestEnv) -> axum::Router {
    vouch_api::app(env.state.clone())
}

async fn send_json(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn create_body(env: &TestEnv) -> serde_json::Value {
    serde_json::json!({
        "candidate_id": env.candidate_id,
        "title": "BSc Computer Science",
        "category": "EDUCATION",
        "credential_type": "degree",
        "file_url": "https://files.example.org/evidence/degree.pdf",
    })
}

// -- Health probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_probe() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let response = app(&env)
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Credential lifecycle -----------------------------------------------------

#[tokio::test]
async fn create_credential_starts_unverified() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (status, body) = send_json(app(&env), "POST", "/v1/credentials", create_body(&env)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "UNVERIFIED");
    assert_eq!(body["verified"], false);
    assert!(body["issuer_id"].is_null());
}

#[tokio::test]
async fn create_with_issuer_requires_team_did() {
    let env = test_env(false, FakeAnchor::new(), FakeAssessor::scoring(0));
    let mut body = create_body(&env);
    body["issuer_id"] = serde_json::json!(env.issuer_id);
    let (status, err) = send_json(app(&env), "POST", "/v1/credentials", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "PRECONDITION_FAILED");
}

#[tokio::test]
async fn overlong_type_is_rejected() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let mut body = create_body(&env);
    body["credential_type"] = serde_json::json!("x".repeat(51));
    let (status, err) = send_json(app(&env), "POST", "/v1/credentials", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_file_url_is_rejected() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let mut body = create_body(&env);
    body["file_url"] = serde_json::json!("evidence/degree.pdf");
    let (status, err) = send_json(app(&env), "POST", "/v1/credentials", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_file_url_is_rejected() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let mut body = create_body(&env);
    body.as_object_mut().unwrap().remove("file_url");
    let (status, _) = send_json(app(&env), "POST", "/v1/credentials", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn submit_without_team_did_leaves_status_unchanged() {
    let env = test_env(false, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (status, created) =
        send_json(app(&env), "POST", "/v1/credentials", create_body(&env)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, err) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/submit"),
        serde_json::json!({"candidate_id": env.candidate_id, "issuer_id": env.issuer_id}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "PRECONDITION_FAILED");

    let (_, fetched) = get(app(&env), &format!("/v1/credentials/{id}")).await;
    assert_eq!(fetched["status"], "UNVERIFIED");
}

#[tokio::test]
async fn submit_by_non_owner_is_forbidden() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (_, created) = send_json(app(&env), "POST", "/v1/credentials", create_body(&env)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let other = Candidate {
        id: CandidateId::new(),
        team_id: TeamId::from_uuid(env.team_id),
        display_name: "Sam Doe".to_string(),
    };
    let other_id = *other.id.as_uuid();
    env.state.candidates.insert(other_id, other);

    let (status, err) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/submit"),
        serde_json::json!({"candidate_id": other_id, "issuer_id": env.issuer_id}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn approve_anchors_and_verifies() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (_, created) = send_json(app(&env), "POST", "/v1/credentials", create_body(&env)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/submit"),
        serde_json::json!({"candidate_id": env.candidate_id, "issuer_id": env.issuer_id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, approved) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/approve"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "VERIFIED");
    assert_eq!(approved["verified"], true);
    assert_eq!(approved["vc_jwt"], JWT);
    assert!(approved["verified_at"].is_string());

    let issued = env.anchor.issued.lock();
    assert_eq!(issued.len(), 1);
    let call = &issued[0];
    assert_eq!(call.credential_name, "PlatformCredential");
    assert_eq!(call.attributes["title"], "BSc Computer Science");
    assert_eq!(call.attributes["type"], "degree");
    assert_eq!(call.attributes["candidateName"], "Jordan Rivera");
}

#[tokio::test]
async fn approving_twice_issues_exactly_once() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (_, created) = send_json(app(&env), "POST", "/v1/credentials", create_body(&env)).await;
    let id = created["id"].as_str().unwrap().to_string();

    send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/submit"),
        serde_json::json!({"candidate_id": env.candidate_id, "issuer_id": env.issuer_id}),
    )
    .await;
    let (status, _) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/approve"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A second approval is refused at the guard, before the gateway.
    let (status, err) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/approve"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "PRECONDITION_FAILED");
    assert_eq!(env.anchor.issued.lock().len(), 1);
}

#[tokio::test]
async fn approve_without_issuer_did_is_precondition_failure() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    // Strip the issuer's DID.
    env.state.issuers.try_update::<_, ()>(&env.issuer_id, |i| {
        i.did = None;
        Ok(())
    });

    let (_, created) = send_json(app(&env), "POST", "/v1/credentials", create_body(&env)).await;
    let id = created["id"].as_str().unwrap().to_string();
    send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/submit"),
        serde_json::json!({"candidate_id": env.candidate_id, "issuer_id": env.issuer_id}),
    )
    .await;

    let (status, err) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/approve"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "PRECONDITION_FAILED");
    assert!(env.anchor.issued.lock().is_empty());
}

#[tokio::test]
async fn gateway_failure_leaves_credential_pending() {
    let env = test_env(true, FakeAnchor::failing(), FakeAssessor::scoring(0));
    let (_, created) = send_json(app(&env), "POST", "/v1/credentials", create_body(&env)).await;
    let id = created["id"].as_str().unwrap().to_string();
    send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/submit"),
        serde_json::json!({"candidate_id": env.candidate_id, "issuer_id": env.issuer_id}),
    )
    .await;

    let (status, _) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/approve"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, fetched) = get(app(&env), &format!("/v1/credentials/{id}")).await;
    assert_eq!(fetched["status"], "PENDING");
    assert_eq!(fetched["verified"], false);
    assert!(fetched["vc_jwt"].is_null());
}

#[tokio::test]
async fn reject_then_unverify_transitions() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (_, created) = send_json(app(&env), "POST", "/v1/credentials", create_body(&env)).await;
    let id = created["id"].as_str().unwrap().to_string();
    send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/submit"),
        serde_json::json!({"candidate_id": env.candidate_id, "issuer_id": env.issuer_id}),
    )
    .await;

    let (status, rejected) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/reject"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "REJECTED");

    // Rejected records cannot be unverified.
    let (status, err) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/unverify"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "PRECONDITION_FAILED");

    // Approve (rejection reversal), then unverify succeeds.
    let (status, _) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/approve"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, unverified) = send_json(
        app(&env),
        "POST",
        &format!("/v1/credentials/{id}/unverify"),
        serde_json::json!({"issuer_owner": "reviewer@example.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unverified["status"], "UNVERIFIED");
    assert!(unverified["vc_jwt"].is_null());
    assert!(unverified["verified_at"].is_null());
}

// -- Verification -------------------------------------------------------------

#[tokio::test]
async fn verify_extracts_same_token_from_jwt_and_document() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));

    let (status, body) = send_json(
        app(&env),
        "POST",
        "/v1/credentials/verify",
        serde_json::json!({"credential": JWT}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"], true);

    let (status, _) = send_json(
        app(&env),
        "POST",
        "/v1/credentials/verify",
        serde_json::json!({"credential_json": {"proof": {"jwt": JWT}}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let tokens = env.anchor.verified_tokens.lock();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], tokens[1]);
    assert_eq!(tokens[0], JWT);
}

#[tokio::test]
async fn verify_without_anchor_reports_unverified() {
    let app = vouch_api::app(AppState::new());
    let (status, body) = send_json(
        app,
        "POST",
        "/v1/credentials/verify",
        serde_json::json!({"credential": JWT}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"], false);
}

#[tokio::test]
async fn verify_without_credential_is_bad_request() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (status, _) =
        send_json(app(&env), "POST", "/v1/credentials/verify", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// -- Quizzes ------------------------------------------------------------------

fn quiz_id(env: &TestEnv, title: &str) -> Uuid {
    *env.state
        .quizzes
        .find(|q| q.title == title)
        .unwrap()
        .id
        .as_uuid()
}

#[tokio::test]
async fn quiz_catalogue_lists_builtins() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (status, body) = get(app(&env), "/v1/quizzes").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["HTML Basics", "JavaScript Fundamentals", "SQL Essentials"]
    );
}

#[tokio::test]
async fn question_selection_is_deterministic() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let id = quiz_id(&env, "HTML Basics");
    let uri = format!("/v1/quizzes/{id}/question?seed=0x00000001");
    let (status, first) = get(app(&env), &uri).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = get(app(&env), &uri).await;
    assert_eq!(first["question_id"], second["question_id"]);
    assert_eq!(first["prompt"], second["prompt"]);
    assert_eq!(first["seed"], "0x00000001");
}

#[tokio::test]
async fn question_without_seed_generates_one() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let id = quiz_id(&env, "HTML Basics");
    let (status, body) = get(app(&env), &format!("/v1/quizzes/{id}/question")).await;
    assert_eq!(status, StatusCode::OK);
    let seed = body["seed"].as_str().unwrap();
    assert!(seed.starts_with("0x"));
    assert_eq!(seed.len(), 66);
}

#[tokio::test]
async fn malformed_seed_is_rejected_before_scoring() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(82));
    let id = quiz_id(&env, "HTML Basics");
    let (status, err) = send_json(
        app(&env),
        "POST",
        &format!("/v1/quizzes/{id}/attempts"),
        serde_json::json!({
            "candidate_id": env.candidate_id,
            "seed": "whatever",
            "answer": "an answer"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(*env.assessor.calls.lock(), 0);
}

#[tokio::test]
async fn passing_attempt_issues_skill_pass() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(82));
    let id = quiz_id(&env, "HTML Basics");
    let (status, body) = send_json(
        app(&env),
        "POST",
        &format!("/v1/quizzes/{id}/attempts"),
        serde_json::json!({
            "candidate_id": env.candidate_id,
            "seed": "0x00000001",
            "answer": "Block elements start on a new line; inline elements flow."
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 82);
    assert_eq!(body["passed"], true);
    assert_eq!(
        body["message"],
        "You scored 82. You passed! Your Skill Pass credential has been issued!"
    );
    assert_eq!(body["vc_jwt"], JWT);

    let issued = env.anchor.issued.lock();
    assert_eq!(issued.len(), 1);
    let call = &issued[0];
    assert_eq!(call.credential_name, "SkillPass");
    assert_eq!(call.attributes["skillQuiz"], "HTML Basics");
    assert_eq!(call.attributes["score"], 82);
    assert_eq!(call.attributes["candidateName"], "Jordan Rivera");
    // Issued to the candidate's team DID by the platform issuer.
    let team = env.state.teams.get(&env.team_id).unwrap();
    assert_eq!(call.subject, team.did.unwrap().to_string());
    assert_eq!(
        call.issuer,
        env.state.platform_did.as_ref().unwrap().to_string()
    );
}

#[tokio::test]
async fn failing_attempt_never_calls_gateway() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(40));
    let id = quiz_id(&env, "HTML Basics");
    let (status, body) = send_json(
        app(&env),
        "POST",
        &format!("/v1/quizzes/{id}/attempts"),
        serde_json::json!({
            "candidate_id": env.candidate_id,
            "seed": "0x00000001",
            "answer": "no idea"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 40);
    assert_eq!(body["passed"], false);
    assert_eq!(body["message"], "You scored 40. You failed.");
    assert!(body["vc_jwt"].is_null());
    assert!(env.anchor.issued.lock().is_empty());
}

#[tokio::test]
async fn issuance_failure_reports_but_attempt_stands() {
    let env = test_env(true, FakeAnchor::failing(), FakeAssessor::scoring(90));
    let id = quiz_id(&env, "SQL Essentials");
    let (status, body) = send_json(
        app(&env),
        "POST",
        &format!("/v1/quizzes/{id}/attempts"),
        serde_json::json!({
            "candidate_id": env.candidate_id,
            "seed": "0x00000001",
            "answer": "An INNER JOIN keeps matching rows only."
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 90);
    assert_eq!(body["passed"], true);
    assert_eq!(
        body["message"],
        "You scored 90. You passed! However, issuing your credential failed. Please try again later."
    );
    assert!(body["vc_jwt"].is_null());
    assert_eq!(env.state.attempts.len(), 1);
}

#[tokio::test]
async fn attempt_without_team_did_is_precondition_failure() {
    let env = test_env(false, FakeAnchor::new(), FakeAssessor::scoring(82));
    let id = quiz_id(&env, "HTML Basics");
    let (status, err) = send_json(
        app(&env),
        "POST",
        &format!("/v1/quizzes/{id}/attempts"),
        serde_json::json!({
            "candidate_id": env.candidate_id,
            "seed": "0x00000001",
            "answer": "an answer"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"]["code"], "PRECONDITION_FAILED");
    assert_eq!(*env.assessor.calls.lock(), 0);
}

// -- Identity -----------------------------------------------------------------

#[tokio::test]
async fn team_did_creation_is_write_once() {
    let env = test_env(false, FakeAnchor::new(), FakeAssessor::scoring(0));
    let uri = format!("/v1/teams/{}/did", env.team_id);

    let (status, body) = send_json(app(&env), "POST", &uri, serde_json::json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["did"].as_str().unwrap().starts_with("did:cheqd:testnet:"));

    let (status, err) = send_json(app(&env), "POST", &uri, serde_json::json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn unknown_network_is_rejected() {
    let env = test_env(false, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (status, _) = send_json(
        app(&env),
        "POST",
        &format!("/v1/teams/{}/did", env.team_id),
        serde_json::json!({"network": "devnet"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn resolving_unknown_did_reports_not_found_flag() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let did = test_did();
    let (status, body) = get(app(&env), &format!("/v1/dids/{did}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], false);
}

// -- Unconfigured services ----------------------------------------------------

#[tokio::test]
async fn anchoring_endpoints_return_503_without_trust_anchor() {
    let state = AppState::new();
    let team = Team {
        id: TeamId::new(),
        name: "Solo".to_string(),
        did: None,
    };
    let team_id = *team.id.as_uuid();
    state.teams.insert(team_id, team);
    let app = vouch_api::app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/teams/{team_id}/did"))
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn openapi_spec_is_served() {
    let env = test_env(true, FakeAnchor::new(), FakeAssessor::scoring(0));
    let (status, body) = get(app(&env), "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/v1/credentials"].is_object());
}
