//! Token validation interface used by the auth middleware.
use async_trait::async_trait;
use thiserror::Error;

/// Result type for a single validation round trip.
pub type ValidationResult = Result<(), ValidationError>;

/// Validation-layer errors (explicit rejection vs. transport failure).
///
/// Note:
/// - We keep this independent from `AppError` so the middleware can surface
///   the remote detail verbatim instead of reinterpreting it.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The authority looked at the credential and said no. `detail` is the
    /// remote error message, unmodified.
    #[error("{detail}")]
    Rejected { detail: String },
    /// The round trip itself failed (connect, timeout, bad gateway).
    #[error("auth service unreachable: {0}")]
    Transport(String),
}

/// A minimal token validation interface.
///
/// This is intentionally small and string-based:
/// - The middleware only needs accept/reject for an opaque credential.
/// - The credential is never inspected locally; an empty string is a valid
///   input and goes to the authority like any other value.
///
/// One call per inbound request. Outcomes are never cached or shared
/// across calls.
#[async_trait]
pub trait TokenValidator: Send + Sync + 'static {
    // Returns the validator backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Send the credential to the authority. Ok(()) means the call may
    // proceed to the handler; Err carries the rejection or the transport
    // failure.
    async fn validate_token(&self, token: &str) -> ValidationResult;
}
