//! Shared types for the Masala POS
//!
//! Wire types used by the backend and its clients: models, order and payment
//! payloads, the unified error system and real-time message types.

pub mod client;
pub mod error;
pub mod lenient;
pub mod message;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use message::{BusMessage, EventType};
