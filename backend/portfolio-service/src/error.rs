/// Error types for the portfolio service
///
/// Every failure renders the shared `ErrorResponse` envelope. Internal and
/// database details are logged, never echoed.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use crypto_core::JwtError;
use error_types::{error_codes, error_types as kinds, ErrorResponse};
use s3_utils::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    fn kind_and_code(&self) -> (&'static str, &'static str) {
        match self {
            AppError::BadRequest(_) => (kinds::VALIDATION_ERROR, error_codes::INVALID_REQUEST),
            AppError::Unauthorized(_) => {
                (kinds::AUTHENTICATION_ERROR, error_codes::INVALID_CREDENTIALS)
            }
            AppError::Forbidden(_) => (kinds::AUTHORIZATION_ERROR, error_codes::ADMIN_REQUIRED),
            AppError::NotFound(_) => (kinds::NOT_FOUND_ERROR, error_codes::RESOURCE_NOT_FOUND),
            AppError::Conflict(_) => (kinds::CONFLICT_ERROR, error_codes::RESOURCE_CONFLICT),
            AppError::Internal(_) => (kinds::SERVER_ERROR, error_codes::INTERNAL_SERVER_ERROR),
            AppError::Database(_) => (kinds::SERVER_ERROR, error_codes::DATABASE_ERROR),
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) | AppError::Database(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error_type, code) = self.kind_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let response = ErrorResponse::new(
            status.canonical_reason().unwrap_or("Error"),
            &self.public_message(),
            status.as_u16(),
            error_type,
            code,
        );

        HttpResponse::build(status).json(response)
    }
}

/// Postgres unique-violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict("Resource already exists".to_string())
            }
            _ => {
                tracing::error!(error = %err, "database error");
                AppError::Database(err.to_string())
            }
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("Object {key} not found")),
            other => AppError::Internal(format!("object store: {other}")),
        }
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Signing(msg) => AppError::Internal(format!("token signing: {msg}")),
            JwtError::EmptySecret => AppError::Internal("JWT secret is not configured".to_string()),
            _ => AppError::Unauthorized("Invalid or expired token".to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(format!("Validation failed: {err}"))
    }
}
