//! The cheqd Studio HTTP client.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vouch_core::{Did, DidNetwork};

use crate::config::CheqdConfig;
use crate::credential::{CredentialInput, SignedCredential};
use crate::error::CheqdError;

/// Fixed service descriptor registered on every created DID.
const DID_SERVICE_DESCRIPTOR: &str =
    r#"[{"idFragment":"service-1","type":"LinkedDomains","serviceEndpoint":["https://example.com"]}]"#;

/// JSON-LD context sent with DID creation.
const DID_CONTEXT: &str = r#"["https://www.w3.org/ns/did/v1"]"#;

/// Result of resolving a DID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// Whether the DID resolved to a document.
    pub found: bool,
    /// The DID document, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CreateDidResponse {
    did: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    verified: bool,
}

/// Typed client for cheqd Studio.
///
/// Explicitly constructed from [`CheqdConfig`] and injected wherever the
/// trust network is needed — no module-level singletons. Cloning is
/// cheap (shared connection pool).
#[derive(Debug, Clone)]
pub struct CheqdClient {
    http: reqwest::Client,
    base_url: String,
}

impl CheqdClient {
    /// Create a new client from configuration.
    pub fn new(config: CheqdConfig) -> Result<Self, CheqdError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    "x-api-key",
                    reqwest::header::HeaderValue::from_str(&config.api_key)
                        .map_err(|_| CheqdError::Config(crate::config::ConfigError::MissingKey))?,
                );
                headers
            })
            .build()
            .map_err(|e| CheqdError::Http {
                endpoint: "client_init".to_string(),
                source: e,
            })?;

        let base_url = config.api_url.as_str().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Anchor a new did:cheqd identifier on `network`.
    ///
    /// # Errors
    ///
    /// [`CheqdError::Api`] on a non-2xx response;
    /// [`CheqdError::InvalidResponse`] when the response lacks a
    /// well-formed `did` field.
    pub async fn create_did(&self, network: DidNetwork) -> Result<Did, CheqdError> {
        let endpoint = format!("{}/did/create", self.base_url);
        let form = [
            ("network", network.as_str()),
            ("identifierFormatType", "uuid"),
            ("verificationMethodType", "Ed25519VerificationKey2018"),
            ("service", DID_SERVICE_DESCRIPTOR),
            ("@context", DID_CONTEXT),
        ];

        let resp = self
            .http
            .post(&endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| CheqdError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let resp = check_status(resp, &endpoint).await?;

        let body: CreateDidResponse =
            resp.json().await.map_err(|e| CheqdError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let raw = body.did.ok_or_else(|| CheqdError::InvalidResponse {
            endpoint: endpoint.clone(),
            reason: "no 'did' field in create response".to_string(),
        })?;

        Did::new(raw).map_err(|e| CheqdError::InvalidResponse {
            endpoint,
            reason: e.to_string(),
        })
    }

    /// Issue a VC-JWT credential from `issuer_did` about `subject_did`.
    ///
    /// `attributes` is the flat claim map (quiz title, score, candidate
    /// name, …). `credential_name` becomes the credential type;
    /// `status_list_name`, when given, attaches a revocation status list.
    ///
    /// No retry at this layer — retry policy belongs to the caller.
    pub async fn issue_credential(
        &self,
        issuer_did: &Did,
        subject_did: &Did,
        attributes: &BTreeMap<String, serde_json::Value>,
        credential_name: &str,
        status_list_name: Option<&str>,
    ) -> Result<SignedCredential, CheqdError> {
        let endpoint = format!("{}/credential/issue", self.base_url);

        let attributes_json =
            serde_json::to_string(attributes).map_err(|e| CheqdError::InvalidResponse {
                endpoint: endpoint.clone(),
                reason: format!("attributes not serializable: {e}"),
            })?;
        let type_json = serde_json::to_string(&[credential_name]).map_err(|e| {
            CheqdError::InvalidResponse {
                endpoint: endpoint.clone(),
                reason: format!("credential type not serializable: {e}"),
            }
        })?;

        let mut form: Vec<(&str, String)> = vec![
            ("issuerDid", issuer_did.as_str().to_string()),
            ("subjectDid", subject_did.as_str().to_string()),
            ("attributes", attributes_json),
            ("format", "VC-JWT".to_string()),
            ("type", type_json),
        ];
        if let Some(status_list) = status_list_name {
            form.push((
                "credentialStatus",
                serde_json::json!({
                    "statusPurpose": "revocation",
                    "statusListName": status_list,
                })
                .to_string(),
            ));
        }

        let resp = self
            .http
            .post(&endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| CheqdError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let resp = check_status(resp, &endpoint).await?;

        let body: serde_json::Value =
            resp.json().await.map_err(|e| CheqdError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        serde_json::from_value(body).map_err(|e| CheqdError::InvalidResponse {
            endpoint,
            reason: format!("credential document missing proof.jwt: {e}"),
        })
    }

    /// Verify a presented credential.
    ///
    /// Returns `false` — never an error — when the call cannot be made
    /// or fails: absence of proof means not verified. The distinct
    /// causes are logged at `warn` for operability.
    pub async fn verify_credential(&self, input: &CredentialInput) -> bool {
        let endpoint = format!("{}/credential/verify?verifyStatus=false", self.base_url);
        let credential = input.to_wire();
        let form = [("credential", credential.as_str()), ("policies", "{}")];

        let resp = match self.http.post(&endpoint).form(&form).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(%endpoint, error = %e, "credential verification transport failure");
                return false;
            }
        };

        if !resp.status().is_success() {
            tracing::warn!(
                %endpoint,
                status = resp.status().as_u16(),
                "credential verification rejected"
            );
            return false;
        }

        match resp.json::<VerifyResponse>().await {
            Ok(body) => body.verified,
            Err(e) => {
                tracing::warn!(%endpoint, error = %e, "unparseable verification response");
                false
            }
        }
    }

    /// Resolve a DID to its document.
    ///
    /// A 404 yields `found=false`; any other failure (non-2xx,
    /// transport, unparseable body) also yields `found=false` —
    /// resolution errors are swallowed at this boundary, not surfaced.
    pub async fn resolve_did(&self, did: &Did) -> Resolution {
        let endpoint = format!("{}/did/search/{}", self.base_url, did.as_str());

        let resp = match self
            .http
            .get(&endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(%endpoint, error = %e, "DID resolution transport failure");
                return Resolution {
                    found: false,
                    document: None,
                };
            }
        };

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Resolution {
                found: false,
                document: None,
            };
        }
        if !resp.status().is_success() {
            tracing::warn!(%endpoint, status = resp.status().as_u16(), "DID resolution failed");
            return Resolution {
                found: false,
                document: None,
            };
        }

        match resp.json::<serde_json::Value>().await {
            Ok(document) => Resolution {
                found: true,
                document: Some(document),
            },
            Err(e) => {
                tracing::warn!(%endpoint, error = %e, "unparseable DID document");
                Resolution {
                    found: false,
                    document: None,
                }
            }
        }
    }
}

/// Map a non-2xx response to [`CheqdError::Api`] with body excerpt.
async fn check_status(
    resp: reqwest::Response,
    endpoint: &str,
) -> Result<reqwest::Response, CheqdError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(CheqdError::Api {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}
