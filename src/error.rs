/*
 * Responsibility
 * - App-wide AppError definition
 * - IntoResponse (HTTP status / JSON error body)
 * - Convert repo / validation / vessel errors into one shape for callers
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::ValidationError;
use crate::services::vessel::VesselError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Request arrived without any auth metadata. The handler is never run.
    #[error("no auth metadata found in request")]
    MissingAuthMetadata,
    /// The remote authority rejected the token, or the validation round
    /// trip failed. Carried through unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error(transparent)]
    Vessel(#[from] VesselError),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::MissingAuthMetadata => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTH_METADATA",
                "no auth metadata found in request".into(),
            ),
            // The rejection detail is the authority's own message, verbatim.
            AppError::Validation(ValidationError::Rejected { detail }) => {
                (StatusCode::UNAUTHORIZED, "TOKEN_REJECTED", detail)
            }
            AppError::Validation(e @ ValidationError::Transport(_)) => {
                (StatusCode::BAD_GATEWAY, "AUTH_UNAVAILABLE", e.to_string())
            }
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{resource} not found."),
            ),
            AppError::Vessel(VesselError::NoneAvailable) => (
                StatusCode::CONFLICT,
                "NO_VESSEL_AVAILABLE",
                VesselError::NoneAvailable.to_string(),
            ),
            AppError::Vessel(e) => (
                StatusCode::BAD_GATEWAY,
                "VESSEL_SERVICE_ERROR",
                e.to_string(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Db(_) => AppError::Internal,
        }
    }
}
