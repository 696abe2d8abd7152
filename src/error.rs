//! Service error types with HTTP status code mapping.
//!
//! [`WinestaError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RecordId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid year: must be between 1900 and 2027",
///     "details": "year"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`WinestaError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details, e.g. the offending form field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category             | HTTP Status                  |
/// |-----------|----------------------|------------------------------|
/// | 1000–1999 | Validation           | 400 Bad Request              |
/// | 2000–2999 | Not Found / Conflict | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server               | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum WinestaError {
    /// Record with the given ID was not found in its collection.
    #[error("{kind} not found: {id}")]
    RecordNotFound {
        /// Collection kind, e.g. `"wine"`.
        kind: &'static str,
        /// Missing identifier.
        id: RecordId,
    },

    /// A record with the same ID is already stored.
    #[error("{kind} {id} already exists")]
    DuplicateRecord {
        /// Collection kind, e.g. `"wine"`.
        kind: &'static str,
        /// Conflicting identifier.
        id: RecordId,
    },

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A single form field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field as it appears in the JSON body.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WinestaError {
    /// Shorthand for [`WinestaError::InvalidField`].
    #[must_use]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidField { .. } => 1002,
            Self::RecordNotFound { .. } => 2001,
            Self::DuplicateRecord { .. } => 2002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidField { .. } => StatusCode::BAD_REQUEST,
            Self::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateRecord { .. } => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::InvalidField { field, .. } => Some((*field).to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for WinestaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
