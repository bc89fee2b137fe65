use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::services::auth::client::{TokenValidator, ValidationError, ValidationResult};

// A hung authority must not pin a request worker; the middleware performs
// exactly one round trip per call, so this bounds the whole auth step.
const VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-backed token validator.
///
/// Talks to the auth service's validate endpoint:
/// `POST {base}/api/v1/token/validate` with `{"token": "..."}`.
/// 2xx means accepted; anything else is a rejection whose body carries the
/// reason.
#[derive(Clone, Debug)]
pub struct HttpTokenValidator {
    http: reqwest::Client,
    validate_url: String,
}

impl HttpTokenValidator {
    // Create a validator from a base URL like `http://0.0.0.0:50051`.
    pub fn new(base_url: &str) -> Result<Self, ValidationError> {
        let http = reqwest::Client::builder()
            .timeout(VALIDATE_TIMEOUT)
            .build()
            .map_err(|e| ValidationError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            validate_url: format!(
                "{}/api/v1/token/validate",
                base_url.trim_end_matches('/')
            ),
        })
    }
}

#[derive(Serialize)]
struct ValidateRequest<'a> {
    token: &'a str,
}

// The auth service replies with the common error envelope
// `{"error": {"code": "...", "message": "..."}}` on rejection.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Extract the rejection reason from a non-2xx reply.
///
/// Prefers the envelope's message, falls back to the raw body, and only
/// synthesizes a status-based message when the body is empty.
fn rejection_detail(status: u16, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("auth service rejected the token (status {status})")
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl TokenValidator for HttpTokenValidator {
    fn backend_name(&self) -> &'static str {
        "auth-http"
    }

    async fn validate_token(&self, token: &str) -> ValidationResult {
        let resp = self
            .http
            .post(&self.validate_url)
            .json(&ValidateRequest { token })
            .send()
            .await
            .map_err(|e| ValidationError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(ValidationError::Rejected {
            detail: rejection_detail(status.as_u16(), &body),
        })
    }
}
