//! HTTP error mapping.
//!
//! | Kind | Status |
//! |------|--------|
//! | validation_error, invalid_status, bad_request | 400 |
//! | duplicate_email, duplicate_employee_code | 400 |
//! | not_found | 404 |
//! | internal_error | 500 (details logged, not returned) |

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use roster_core::{EmployeeServiceError, RepoError};
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] EmployeeServiceError),

    /// Malformed JSON body or path parameter.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err {
                EmployeeServiceError::NotFound(_)
                | EmployeeServiceError::EmployeeCodeNotFound(_) => StatusCode::NOT_FOUND,
                EmployeeServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Service(err) => err.code(),
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(
                "event=http_error module=api status=error error_code={} error={}",
                self.kind(),
                self
            );
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: self.kind(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Service(EmployeeServiceError::from(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use roster_core::{EmployeeServiceError, EmployeeValidationError, RepoError};

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let cases = [
            (
                EmployeeServiceError::Validation(EmployeeValidationError::MissingField("role")),
                StatusCode::BAD_REQUEST,
            ),
            (
                EmployeeServiceError::InvalidStatus("BOGUS".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                EmployeeServiceError::DuplicateEmail("a@b.com".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                EmployeeServiceError::DuplicateEmployeeCode("EMP1".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (EmployeeServiceError::NotFound(1), StatusCode::NOT_FOUND),
            (
                EmployeeServiceError::Store(RepoError::InvalidData("bad row".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn repo_not_found_becomes_404() {
        let err = ApiError::from(RepoError::NotFound(3));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Employee not found with id: 3");
    }
}
