//! Request extractors that reject with the shared error body.
//!
//! Axum's stock `Json`, `Path` and `Query` answer a bad request with plain
//! text. These wrappers route the rejection through [`WinestaError`] so a
//! malformed body, path or query string gets `{"error": {...}}` with code
//! 1001 like every other failure.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;

use crate::error::WinestaError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(WinestaError))]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(WinestaError))]
pub struct ApiPath<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(WinestaError))]
pub struct ApiQuery<T>(pub T);

/// Axum reports a few rejections (e.g. a route without the expected path
/// params) as 500; those stay internal errors.
fn rejected(status: StatusCode, text: String) -> WinestaError {
    if status.is_server_error() {
        WinestaError::Internal(text)
    } else {
        WinestaError::InvalidRequest(text)
    }
}

impl From<JsonRejection> for WinestaError {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for WinestaError {
    fn from(rejection: PathRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for WinestaError {
    fn from(rejection: QueryRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_rejections_are_invalid_requests() {
        let err = rejected(StatusCode::UNPROCESSABLE_ENTITY, "missing field `year`".into());
        assert_eq!(err.error_code(), 1001);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn server_rejections_stay_internal() {
        let err = rejected(StatusCode::INTERNAL_SERVER_ERROR, "no path params".into());
        assert_eq!(err.error_code(), 3000);
    }
}
