use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::errors::ValidationError;
use crate::presentation::response::ApiResponse;

/// Message sent to clients for every 5xx
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Application error types that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Authorization failed: {message}")]
    Authorization { message: String },

    #[error("Validation failed: {source}")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Session store error: {message}")]
    SessionStore { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Discriminant of [`AppError`], used wherever callers branch on the kind of
/// failure rather than on its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    Authorization,
    Validation,
    NotFound,
    InvalidPassword,
    Conflict,
    BadRequest,
    MethodNotAllowed,
    Database,
    SessionStore,
    Internal,
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Authentication { message: message.into() }
    }

    pub fn forbidden() -> Self {
        Self::Authorization { message: "forbidden".to_string() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Authentication { .. } => ErrorKind::Authentication,
            AppError::Authorization { .. } => ErrorKind::Authorization,
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::InvalidPassword => ErrorKind::InvalidPassword,
            AppError::Conflict { .. } => ErrorKind::Conflict,
            AppError::BadRequest { .. } => ErrorKind::BadRequest,
            AppError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            AppError::Database { .. } => ErrorKind::Database,
            AppError::SessionStore { .. } => ErrorKind::SessionStore,
            AppError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication { .. } | AppError::InvalidPassword => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Authorization { .. } => StatusCode::FORBIDDEN,
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Database { .. }
            | AppError::SessionStore { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type for logging
    pub fn error_type(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Authentication => "authentication",
            ErrorKind::Authorization => "authorization",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidPassword => "invalid_password",
            ErrorKind::Conflict => "conflict",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::MethodNotAllowed => "method_not_allowed",
            ErrorKind::Database => "database",
            ErrorKind::SessionStore => "session_store",
            ErrorKind::Internal => "internal",
        }
    }

    /// Check if this error should be logged as an error (vs warning)
    pub fn should_log_as_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Text placed in the envelope's `message`.
    ///
    /// Validation messages pass through verbatim; server-side failures
    /// collapse to a fixed string so internals stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Authentication { message }
            | AppError::Authorization { message }
            | AppError::Conflict { message }
            | AppError::BadRequest { message } => message.clone(),
            AppError::Validation { source } => source.to_string(),
            AppError::NotFound { .. } => "not found".to_string(),
            AppError::InvalidPassword => "invalid mail or password".to_string(),
            AppError::MethodNotAllowed => "Method Not Allowed".to_string(),
            AppError::Database { .. } | AppError::SessionStore { .. } | AppError::Internal { .. } => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.should_log_as_error() {
            error!(error_type = self.error_type(), "Application error: {}", self);
        } else {
            warn!(error_type = self.error_type(), "Application warning: {}", self);
        }

        ApiResponse::error(status, self.public_message()).into_response()
    }
}

/// Convert common errors to `AppError`
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("row"),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict { message: "already exists".to_string() }
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::bad_request("referenced record does not exist")
            }
            _ => AppError::Database { message: err.to_string() },
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::SessionStore { message: err.to_string() }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal { message: format!("JSON encoding failed: {err}") }
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        warn!("Rejected request body: {}", err.body_text());
        AppError::bad_request("bad request")
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        warn!("Rejected query string: {}", err.body_text());
        AppError::bad_request("bad request")
    }
}

impl From<PathRejection> for AppError {
    fn from(err: PathRejection) -> Self {
        warn!("Rejected path parameters: {}", err.body_text());
        AppError::bad_request("bad request")
    }
}
