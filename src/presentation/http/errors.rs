//! HTTP error handling and response conversion.
//!
//! Handler errors are mapped to status codes and user-safe JSON bodies.
//! Moderation conflicts carry a stable machine-readable `code` alongside the
//! message so the admin tooling can branch without string matching.

use crate::application::review_submission::use_case::ReviewError;
use crate::domain::{moderation::format::FormatError, submission::errors::DomainError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// Request validation failed (400).
    BadRequest(String),

    /// Missing or wrong admin token (401).
    Unauthorized,

    /// Moderation state conflict (409), with a stable code such as
    /// `ALREADY_REVIEWED` or `DUPLICATE_AT_APPROVAL`.
    Conflict {
        code: &'static str,
        message: String,
    },

    /// Content failed the formatting rules at approval (422).
    InvalidContent(Vec<FormatError>),

    /// Database operation failed (500).
    Database(String),

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Conflict { code, message } => write!(f, "Conflict ({}): {}", code, message),
            Self::InvalidContent(errors) => {
                write!(f, "Invalid content: {} rule violation(s)", errors.len())
            }
            Self::Database(msg) => write!(f, "Database error: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::InvalidContent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            Self::NotFound(_) => json!({ "error": "Resource not found" }),
            Self::BadRequest(msg) => json!({ "error": msg }),
            Self::Unauthorized => json!({ "error": "Unauthorized" }),
            Self::Conflict { code, message } => json!({ "error": message, "code": code }),
            Self::InvalidContent(errors) => json!({
                "error": "Content failed validation",
                "code": "INVALID_CONTENT",
                "violations": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            }),
            Self::Database(_) => json!({ "error": "Database operation failed" }),
            Self::Internal(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::NOT_FOUND
            | StatusCode::CONFLICT
            | StatusCode::UNPROCESSABLE_ENTITY => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(self.body())).into_response()
    }
}

// === Domain Error Conversion ===

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
            DomainError::InfrastructureError(msg) => {
                tracing::error!(infrastructure_error = %msg);
                AppError::Database(msg)
            }
        }
    }
}

// === Review Error Conversion ===

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound => AppError::NotFound("Submission not found".into()),
            ReviewError::AlreadyReviewed => AppError::Conflict {
                code: "ALREADY_REVIEWED",
                message: "Submission was already reviewed".into(),
            },
            ReviewError::DuplicateAtApproval => AppError::Conflict {
                code: "DUPLICATE_AT_APPROVAL",
                message: "An equivalent joke is already live".into(),
            },
            ReviewError::InvalidContent(errors) => AppError::InvalidContent(errors),
            ReviewError::Domain(e) => e.into(),
        }
    }
}
