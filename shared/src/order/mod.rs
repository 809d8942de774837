//! Order Module
//!
//! Wire payloads for the ordering flow:
//! - KOT submission: open an order or append items to a running one
//! - Payment collection against an order

pub mod payment;
pub mod types;

// Re-exports
pub use payment::{PaymentAck, PaymentInput, PaymentMethod};
pub use types::*;
