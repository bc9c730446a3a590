use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_valid::ValidRejection;
use common::ValidationFailure;
use model::StoreError;
use thiserror::Error;

use crate::schemas::ErrorResponse;

/// Errors a request handler can end with
#[derive(Debug, Error)]
pub enum ApiError {
    /// The payload violates one or more field constraints
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The body is not JSON, or not sent as JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// Query parameters did not parse or broke a constraint
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    /// The store could not serve the request
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// A validated record could not be turned into document fields
    #[error("Failed to encode record: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidBody(rejection) => rejection.status(),
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Storage(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(StoreError::Database(_)) | Self::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::Storage(StoreError::Unavailable(_)) => "STORAGE_UNAVAILABLE",
            Self::Storage(StoreError::Database(_)) => "STORAGE_ERROR",
            Self::Encoding(_) => "ENCODING_ERROR",
        }
    }
}

impl From<ValidRejection<QueryRejection>> for ApiError {
    fn from(rejection: ValidRejection<QueryRejection>) -> Self {
        match rejection {
            ValidRejection::Valid(errors) => Self::InvalidQuery(errors.to_string()),
            ValidRejection::Inner(rejection) => Self::InvalidQuery(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code().to_string();
        let detail = self.to_string();
        let violations = match self {
            Self::Validation(failure) => failure.into_violations(),
            _ => Vec::new(),
        };

        (
            status,
            Json(ErrorResponse {
                detail,
                code,
                violations,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::FieldViolation;
    use sea_orm::DbErr;

    #[test]
    fn test_status_codes() {
        let validation = ApiError::from(ValidationFailure::new(vec![FieldViolation::new(
            "amount",
            "range",
            "must be greater than 0",
        )]));
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(validation.code(), "VALIDATION_ERROR");

        let unavailable = ApiError::from(StoreError::Unavailable("DATABASE_URL is not set".into()));
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let failed = ApiError::from(StoreError::Database(DbErr::Custom("disk I/O error".into())));
        assert_eq!(failed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failed.code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_query_rejection_is_a_bad_request() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("limit", validator::ValidationError::new("range"));

        let rejected = ApiError::from(ValidRejection::<QueryRejection>::Valid(errors));
        assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(rejected.code(), "INVALID_QUERY");
        assert!(rejected.to_string().contains("limit"));
    }

    #[test]
    fn test_storage_error_text_is_carried() {
        let failed = ApiError::from(StoreError::Database(DbErr::Custom("disk I/O error".into())));
        assert!(failed.to_string().contains("disk I/O error"));
    }
}
