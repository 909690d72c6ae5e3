//! Mapping of core errors onto HTTP responses.
//!
//! Every error leaves the router as `{ "error": code, "message": text }`.

use api_shared::ErrorRes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bloodlink_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "invalid_input",
            ApiError::NotFound(_) => "not_found",
            ApiError::DuplicateEmail(_) => "duplicate_email",
            ApiError::Internal => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorRes {
            error: self.code().into(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(_) | CoreError::Text(_) | CoreError::Uuid(_) => {
                ApiError::BadRequest(err.to_string())
            }
            CoreError::DuplicateEmail(_) => ApiError::DuplicateEmail(err.to_string()),
            CoreError::DonorNotFound(_) | CoreError::RequestNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            other => {
                tracing::error!("storage error: {:?}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodlink_core::TextError;

    #[test]
    fn test_core_errors_map_to_status_codes() {
        let cases = [
            (
                ApiError::from(CoreError::InvalidInput("bad".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(CoreError::Text(TextError::Empty)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(CoreError::DuplicateEmail("a@example.com".into())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(CoreError::DonorNotFound("abc".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(CoreError::RequestNotFound("abc".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(CoreError::LockPoisoned),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err:?}");
        }
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err = ApiError::from(CoreError::LockPoisoned);
        assert_eq!(err.code(), "internal_error");
        assert_eq!(err.to_string(), "internal server error");
    }
}
