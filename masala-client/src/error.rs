//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a structured error
    #[error("API error {}: {}", .0.code, .0.message)]
    Api(AppError),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local input validation failed; nothing was sent
    #[error("Validation error: {0}")]
    Validation(AppError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Error code to show alongside the message
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Api(e) | Self::Validation(e) => e.code,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Whether the failure belongs in a transient notification (and the
    /// operation may simply be retried), as opposed to an inline message
    /// next to the offending input.
    ///
    /// Local validation is always inline. Backend rejections follow the
    /// category of their error code, so an order or payment refusal is
    /// shown next to the form while auth, table and system errors toast.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Api(e) => !e.code.category().is_user_facing(),
            _ => true,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Validation(err)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_not_transient() {
        let err: ClientError = AppError::new(ErrorCode::PaymentInsufficientAmount).into();
        assert!(!err.is_transient());
        assert_eq!(err.code(), ErrorCode::PaymentInsufficientAmount);
    }

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api(AppError::new(ErrorCode::TableOccupied));
        assert!(err.is_transient());
        assert_eq!(err.to_string(), "API error 7002: Table is occupied");
    }

    #[test]
    fn test_backend_rejection_follows_category() {
        let paid = ClientError::Api(AppError::new(ErrorCode::OrderAlreadyPaid));
        assert!(!paid.is_transient());

        let short = ClientError::Api(AppError::new(ErrorCode::PaymentInsufficientAmount));
        assert!(!short.is_transient());

        let db = ClientError::Api(AppError::new(ErrorCode::DatabaseError));
        assert!(db.is_transient());
        assert!(ClientError::Unauthorized.is_transient());
    }

    #[test]
    fn test_codes() {
        assert_eq!(ClientError::Unauthorized.code(), ErrorCode::NotAuthenticated);
        assert_eq!(
            ClientError::Config("bad".into()).code(),
            ErrorCode::ConfigError
        );
        assert_eq!(
            ClientError::InvalidResponse("x".into()).code(),
            ErrorCode::InvalidFormat
        );
    }
}
