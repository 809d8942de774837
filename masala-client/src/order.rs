//! KOT (kitchen order ticket) composition
//!
//! Turns a cart into the backend payload for either opening a new order or
//! appending to the table's running order, plus the ticket the kitchen sees.

use crate::cart::{Cart, CartLine};
use crate::money::to_f64;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::SpiceLevel;
use shared::order::{AddItemsPayload, OrderAmounts, OrderCreate, OrderItemInput};

/// One line on the kitchen ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KotLine {
    pub name: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<SpiceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl From<&CartLine> for KotLine {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            spice_level: line.spice_level,
            instructions: line.instructions.clone(),
        }
    }
}

/// Newly added items as the kitchen sees them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenTicket {
    pub table_number: String,
    /// Running order the items belong to, once known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Backend-assigned ticket number, once known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kot_number: Option<String>,
    pub lines: Vec<KotLine>,
    /// Creation time (unix millis)
    pub created_at: i64,
}

impl KitchenTicket {
    pub fn from_cart(cart: &Cart, table_number: impl Into<String>) -> Self {
        Self {
            table_number: table_number.into(),
            order_id: None,
            kot_number: None,
            lines: cart.lines().iter().map(KotLine::from).collect(),
            created_at: shared::util::now_millis(),
        }
    }

    /// Total number of portions on the ticket
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Payload to send for a KOT
#[derive(Debug, Clone, PartialEq)]
pub enum OrderSubmission {
    /// No running order yet: open one
    Create(OrderCreate),
    /// Append to the running order
    AddItems(AddItemsPayload),
}

impl OrderSubmission {
    pub fn table_id(&self) -> &str {
        match self {
            Self::Create(p) => &p.table_id,
            Self::AddItems(p) => &p.table_id,
        }
    }

    pub fn items(&self) -> &[OrderItemInput] {
        match self {
            Self::Create(p) => &p.items,
            Self::AddItems(p) => &p.items,
        }
    }

    pub fn amounts(&self) -> OrderAmounts {
        match self {
            Self::Create(p) => p.amounts,
            Self::AddItems(p) => p.amounts,
        }
    }
}

/// Wire items for every cart line
pub fn build_order_items(cart: &Cart) -> Vec<OrderItemInput> {
    cart.lines()
        .iter()
        .map(|line| OrderItemInput {
            menu_item_id: line.item_id.clone(),
            quantity: line.quantity,
            unit_price: to_f64(line.unit_price),
            line_total: to_f64(line.line_total()),
            spice_level: line.spice_level,
            instructions: line.instructions.clone(),
        })
        .collect()
}

/// Cart amounts rounded for the wire
pub fn order_amounts(cart: &Cart) -> OrderAmounts {
    OrderAmounts {
        subtotal: to_f64(cart.subtotal()),
        tax: to_f64(cart.tax()),
        total: to_f64(cart.total()),
    }
}

/// Build the KOT payload for `cart`.
///
/// # Errors
/// - `OrderEmpty` if the cart has no lines
/// - `RequiredField` if the cart is not bound to a table
pub fn prepare_submission(
    cart: &Cart,
    running_order_id: Option<&str>,
) -> Result<OrderSubmission, AppError> {
    if cart.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    let table_id = cart
        .table_id()
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::RequiredField, "Cart is not bound to a table")
                .with_detail("field", "table_id")
        })?
        .to_string();

    let items = build_order_items(cart);
    let amounts = order_amounts(cart);

    Ok(match running_order_id {
        Some(order_id) => OrderSubmission::AddItems(AddItemsPayload {
            order_id: order_id.to_string(),
            table_id,
            items,
            amounts,
        }),
        None => OrderSubmission::Create(OrderCreate {
            table_id,
            items,
            amounts,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MenuItem;

    fn item(id: &str, price: f64, spicy: bool) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Dish {id}"),
            price,
            category: None,
            is_available: true,
            is_spicy: spicy,
            default_spice_level: None,
        }
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::for_table("T4");
        cart.add(&item("A", 100.0, false));
        cart.add(&item("A", 100.0, false));
        cart.add(&item("B", 250.0, true));
        cart.update_instructions("B", "less oil");
        cart
    }

    #[test]
    fn test_create_when_no_running_order() {
        let submission = prepare_submission(&sample_cart(), None).unwrap();
        let OrderSubmission::Create(payload) = submission else {
            panic!("expected create");
        };
        assert_eq!(payload.table_id, "T4");
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[0].line_total, 200.0);
        assert_eq!(payload.items[1].spice_level, Some(SpiceLevel::Medium));
        assert_eq!(payload.items[1].instructions.as_deref(), Some("less oil"));
        assert_eq!(
            payload.amounts,
            OrderAmounts {
                subtotal: 450.0,
                tax: 22.5,
                total: 472.5
            }
        );
    }

    #[test]
    fn test_add_items_with_running_order() {
        let submission = prepare_submission(&sample_cart(), Some("o-17")).unwrap();
        assert_eq!(submission.table_id(), "T4");
        assert_eq!(submission.items().len(), 2);
        match submission {
            OrderSubmission::AddItems(payload) => assert_eq!(payload.order_id, "o-17"),
            other => panic!("expected add items, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = prepare_submission(&Cart::for_table("T1"), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_unbound_cart_rejected() {
        let mut cart = Cart::new();
        cart.add(&item("A", 10.0, false));
        let err = prepare_submission(&cart, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_kitchen_ticket() {
        let ticket = KitchenTicket::from_cart(&sample_cart(), "4");
        assert_eq!(ticket.table_number, "4");
        assert_eq!(ticket.lines.len(), 2);
        assert_eq!(ticket.item_count(), 3);
        assert!(ticket.created_at > 0);
    }
}
