//! Order submission payloads

use crate::models::SpiceLevel;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Items
// ============================================================================

/// One line of a KOT as sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Menu item ID
    pub menu_item_id: String,
    /// Quantity (always >= 1)
    pub quantity: u32,
    /// Unit price
    pub unit_price: f64,
    /// unit_price * quantity, rounded to 2 decimals
    pub line_total: f64,
    /// Spice preference (None for non-spicy dishes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<SpiceLevel>,
    /// Kitchen instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Computed amounts attached to every order payload
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderAmounts {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

// ============================================================================
// Payloads
// ============================================================================

/// Open a new order on a table (first KOT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: String,
    pub items: Vec<OrderItemInput>,
    #[serde(flatten)]
    pub amounts: OrderAmounts,
}

/// Append items to the running order of a table (follow-up KOT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItemsPayload {
    pub order_id: String,
    pub table_id: String,
    pub items: Vec<OrderItemInput>,
    #[serde(flatten)]
    pub amounts: OrderAmounts,
}

/// Backend acknowledgement for order creation / item addition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: String,
    /// Kitchen ticket number assigned by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kot_number: Option<String>,
}
