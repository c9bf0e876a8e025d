//! Error handling - every failure leaves the server as an envelope.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error, http::StatusCode};
use blogdesk_core::DomainError;
use blogdesk_core::ports::AuthError;
use blogdesk_shared::{ApiResponse, ErrorKind};
use std::fmt;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application-level error type that converts to envelope responses.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// Well-formed request naming an id that can't exist.
    MalformedId(String),
    Unauthorized(String),
    Forbidden,
    Configuration(String),
    Upload(String),
    Internal(String),
}

impl AppError {
    fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::ValidationError,
            AppError::NotFound(_) | AppError::MalformedId(_) => ErrorKind::NotFound,
            AppError::Unauthorized(_) => ErrorKind::Unauthorized,
            AppError::Forbidden => ErrorKind::Forbidden,
            AppError::Configuration(_) => ErrorKind::ConfigurationError,
            AppError::Upload(_) => ErrorKind::UploadError,
            AppError::Internal(_) => ErrorKind::InternalError,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::MalformedId(msg)
            | AppError::Unauthorized(msg)
            | AppError::Configuration(msg)
            | AppError::Upload(msg) => write!(f, "{}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedId(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Configuration(_) | AppError::Upload(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                INTERNAL_MESSAGE.to_string()
            }
            AppError::Configuration(detail) => {
                tracing::error!("Configuration error: {}", detail);
                detail.clone()
            }
            AppError::Upload(detail) => {
                tracing::error!("Upload failed: {}", detail);
                detail.clone()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ApiResponse::error(self.kind(), message))
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::Validation(_) => AppError::Validation(message),
            DomainError::NotFound { .. } => AppError::NotFound(message),
            DomainError::MalformedId { .. } => AppError::MalformedId(message),
            DomainError::Configuration(_) => AppError::Configuration(message),
            DomainError::Upload(_) => AppError::Upload(message),
            DomainError::Internal(detail) => AppError::Internal(detail),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => AppError::Forbidden,
            AuthError::NotConfigured => AppError::Configuration(err.to_string()),
            AuthError::HashingError(detail) => AppError::Internal(detail),
            AuthError::TokenExpired => {
                AppError::Unauthorized("Session expired. Please log in again.".to_string())
            }
            AuthError::MissingAuth => AppError::Unauthorized(
                "Please provide a valid Bearer token in the Authorization header.".to_string(),
            ),
            AuthError::InvalidCredentials | AuthError::InvalidToken(_) => {
                AppError::Unauthorized(err.to_string())
            }
        }
    }
}

/// Route JSON body extraction failures into the envelope.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(format!("Invalid request body: {}", err)).into()
}

/// Route query-string extraction failures into the envelope.
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(format!("Invalid query string: {}", err)).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
