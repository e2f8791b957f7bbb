//! Chat-completion transport.
//!
//! [`Completion`] abstracts the wire call so graders can be exercised
//! with scripted backends in tests; [`HttpCompletion`] is the production
//! implementation against an OpenAI-compatible endpoint.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::AssessConfig;
use crate::error::AssessError;

/// One message in the completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system` or `user`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A backend able to turn a conversation into assistant text.
///
/// Implementations must produce `Send` futures so callers can await
/// them from spawned tasks.
pub trait Completion: Send + Sync {
    /// Issue one completion request and extract the assistant text.
    fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> impl Future<Output = Result<String, AssessError>> + Send;
}

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Production completion backend over HTTP.
///
/// Explicitly constructed and injected — never a module-level singleton —
/// so the process owner controls its lifecycle and tests substitute
/// fakes via [`Completion`].
#[derive(Debug, Clone)]
pub struct HttpCompletion {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpCompletion {
    /// Create a backend from configuration.
    pub fn new(config: AssessConfig) -> Result<Self, AssessError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.api_key
                    ))
                    .map_err(|_| AssessError::Config(crate::config::ConfigError::MissingKey))?,
                );
                headers
            })
            .build()
            .map_err(|e| AssessError::Http {
                endpoint: "client_init".to_string(),
                source: e,
            })?;

        let endpoint = format!(
            "{}/v1/chat/completions",
            config.api_url.as_str().trim_end_matches('/')
        );

        Ok(Self {
            http,
            endpoint,
            model: config.model,
        })
    }
}

impl Completion for HttpCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AssessError> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssessError::Http {
                endpoint: self.endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AssessError::Api {
                endpoint: self.endpoint.clone(),
                status,
                body,
            });
        }

        let parsed: CompletionResponse =
            resp.json().await.map_err(|e| AssessError::Http {
                endpoint: self.endpoint.clone(),
                source: e,
            })?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}
