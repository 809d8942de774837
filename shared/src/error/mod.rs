//! Unified error system for the Masala POS
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response envelope
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiResponse, ErrorCode};
//!
//! let json = r#"{"code": 5002, "message": "Amount paid is less than amount due"}"#;
//! let response: ApiResponse<()> = serde_json::from_str(json).unwrap();
//!
//! let err = response.into_result().unwrap_err();
//! assert_eq!(err.code, ErrorCode::PaymentInsufficientAmount);
//! assert!(err.code.category().is_user_facing());
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
