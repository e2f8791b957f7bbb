//! Signed credential document types and verification-input handling.
//!
//! cheqd Studio returns a W3C credential document whose `proof.jwt`
//! field carries the compact VC-JWT. The document is parsed into
//! [`SignedCredential`] at the gateway boundary — a typed,
//! explicitly-validated step, never a partially-shaped value used
//! directly.

use serde::{Deserialize, Serialize};

/// The proof block of a signed credential document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proof {
    /// Proof type, e.g. `JwtProof2020`.
    #[serde(rename = "type", default)]
    pub proof_type: Option<String>,
    /// The compact VC-JWT token.
    pub jwt: String,
}

/// A signed credential document as returned by `/credential/issue`.
///
/// Everything beyond the proof is retained verbatim in `document` so
/// callers can store and re-present the full credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedCredential {
    /// The proof carrying the VC-JWT.
    pub proof: Proof,
    /// All remaining top-level fields of the document.
    #[serde(flatten)]
    pub document: serde_json::Map<String, serde_json::Value>,
}

impl SignedCredential {
    /// The compact VC-JWT token.
    pub fn jwt(&self) -> &str {
        &self.proof.jwt
    }

    /// The full document as a JSON value (proof included).
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Input accepted by credential verification.
///
/// Mirrors what candidates actually paste into a verify form: a bare
/// compact JWT, a full credential document, or a JSON string of either.
#[derive(Debug, Clone)]
pub enum CredentialInput {
    /// A raw string — bare JWT, or JSON text.
    Text(String),
    /// An already-parsed JSON document.
    Json(serde_json::Value),
}

impl CredentialInput {
    /// Reduce the input to the exact `credential` value submitted to the
    /// verification endpoint.
    ///
    /// - a document with a top-level `proof.jwt` string → that token;
    /// - other JSON (or JSON-looking text) → the serialized document;
    /// - anything else → the trimmed raw string (assumed compact JWT).
    pub fn to_wire(&self) -> String {
        match self {
            Self::Json(value) => match extract_jwt(value) {
                Some(jwt) => jwt.to_string(),
                None => value.to_string(),
            },
            Self::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.starts_with('{') && trimmed.ends_with('}') {
                    match serde_json::from_str::<serde_json::Value>(trimmed) {
                        Ok(parsed) => match extract_jwt(&parsed) {
                            Some(jwt) => jwt.to_string(),
                            None => parsed.to_string(),
                        },
                        // Not valid JSON after all — assume raw JWT.
                        Err(_) => trimmed.to_string(),
                    }
                } else {
                    trimmed.to_string()
                }
            }
        }
    }
}

fn extract_jwt(value: &serde_json::Value) -> Option<&str> {
    value.get("proof")?.get("jwt")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOKEN: &str = "eyJhbGciOiJFZERTQSJ9.eyJzdWIiOiJ4In0.c2ln";

    #[test]
    fn parses_issue_response_document() {
        let raw = json!({
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "type": ["VerifiableCredential", "SkillPass"],
            "issuer": {"id": "did:cheqd:testnet:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"},
            "proof": {"type": "JwtProof2020", "jwt": TOKEN}
        });
        let cred: SignedCredential = serde_json::from_value(raw).unwrap();
        assert_eq!(cred.jwt(), TOKEN);
        assert!(cred.document.contains_key("issuer"));
        // Round trip retains the proof.
        let back = cred.to_value();
        assert_eq!(back["proof"]["jwt"], TOKEN);
    }

    #[test]
    fn missing_jwt_fails_parse() {
        let raw = json!({"proof": {"type": "JwtProof2020"}});
        assert!(serde_json::from_value::<SignedCredential>(raw).is_err());
    }

    #[test]
    fn bare_token_and_proof_document_submit_identical_values() {
        let from_string = CredentialInput::Text(TOKEN.to_string()).to_wire();
        let from_doc =
            CredentialInput::Json(json!({"proof": {"jwt": TOKEN}})).to_wire();
        let from_json_text =
            CredentialInput::Text(format!("{{\"proof\":{{\"jwt\":\"{TOKEN}\"}}}}")).to_wire();
        assert_eq!(from_string, TOKEN);
        assert_eq!(from_doc, TOKEN);
        assert_eq!(from_json_text, TOKEN);
    }

    #[test]
    fn document_without_proof_is_serialized_whole() {
        let wire = CredentialInput::Json(json!({"credentialSubject": {"id": "x"}})).to_wire();
        assert_eq!(wire, r#"{"credentialSubject":{"id":"x"}}"#);
    }

    #[test]
    fn json_looking_garbage_falls_back_to_raw() {
        let wire = CredentialInput::Text("{not json}".to_string()).to_wire();
        assert_eq!(wire, "{not json}");
    }
}
