//! Cart engine (购物车)
//!
//! In-memory cart for one order-taking session at one table. Lines are kept
//! in the order items were first added, with at most one line per menu item.

use crate::money::{self, DEFAULT_TAX_RATE};
use rust_decimal::Decimal;
use shared::models::{MenuItem, SpiceLevel};

/// Maximum quantity a single line may hold
pub const MAX_QUANTITY: u32 = 9999;

/// One menu item selected for the current order
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub unit_price: Decimal,
    /// Always >= 1 while the line exists
    pub quantity: u32,
    pub instructions: Option<String>,
    /// `None` for non-spicy dishes
    pub spice_level: Option<SpiceLevel>,
}

impl CartLine {
    fn from_item(item: &MenuItem) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: money::to_decimal(item.price),
            quantity: 1,
            instructions: None,
            spice_level: item.initial_spice_level(),
        }
    }

    /// unit price × quantity
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Ordered collection of cart lines for one table
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    table_id: Option<String>,
    lines: Vec<CartLine>,
    discount: Decimal,
    tax_rate: Decimal,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Empty cart with no table and the default tax rate
    pub fn new() -> Self {
        Self {
            table_id: None,
            lines: Vec::new(),
            discount: Decimal::ZERO,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }

    /// Empty cart bound to a table
    pub fn for_table(table_id: impl Into<String>) -> Self {
        Self {
            table_id: Some(table_id.into()),
            ..Self::new()
        }
    }

    /// Override the tax rate used by [`Cart::tax`] and [`Cart::total`]
    pub fn with_tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn table_id(&self) -> Option<&str> {
        self.table_id.as_deref()
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    fn line_mut(&mut self, item_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.item_id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // ========== Mutations ==========

    /// Add one unit of `item`.
    ///
    /// An existing line is incremented; otherwise a new line starts at
    /// quantity 1 with the item's default spice level.
    pub fn add(&mut self, item: &MenuItem) {
        if let Some(line) = self.line_mut(&item.id) {
            if line.quantity >= MAX_QUANTITY {
                tracing::warn!(item_id = %item.id, max = MAX_QUANTITY, "Cart line at maximum quantity; add ignored");
                return;
            }
            line.quantity += 1;
            tracing::debug!(item_id = %item.id, quantity = line.quantity, "Cart line incremented");
            return;
        }
        self.lines.push(CartLine::from_item(item));
        tracing::debug!(item_id = %item.id, name = %item.name, "Cart line added");
    }

    /// Replace the quantity of a line. `quantity <= 0` removes it.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(item_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(MAX_QUANTITY).min(MAX_QUANTITY);
        if let Some(line) = self.line_mut(item_id) {
            line.quantity = quantity;
            tracing::debug!(item_id, quantity, "Cart quantity updated");
        }
    }

    /// Replace the spice preference of a line in place
    pub fn update_spice_preference(&mut self, item_id: &str, level: SpiceLevel) {
        if let Some(line) = self.line_mut(item_id) {
            line.spice_level = Some(level);
            tracing::debug!(item_id, spice = %level, "Cart spice updated");
        }
    }

    /// Replace the free-text instructions of a line. Blank text clears them.
    pub fn update_instructions(&mut self, item_id: &str, text: &str) {
        if let Some(line) = self.line_mut(item_id) {
            let text = text.trim();
            line.instructions = (!text.is_empty()).then(|| text.to_string());
        }
    }

    pub fn remove(&mut self, item_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        if self.lines.len() != before {
            tracing::debug!(item_id, "Cart line removed");
        }
    }

    /// Empty all lines and forget the table
    pub fn clear(&mut self) {
        self.lines.clear();
        self.table_id = None;
        self.discount = Decimal::ZERO;
    }

    /// Flat discount subtracted from the total. Negative values become zero.
    pub fn set_discount(&mut self, discount: Decimal) {
        self.discount = discount.max(Decimal::ZERO);
    }

    // ========== Arithmetic ==========

    /// Σ unit price × quantity
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Tax at the cart's rate
    pub fn tax(&self) -> Decimal {
        self.tax_at(self.tax_rate)
    }

    /// Tax at an explicit rate
    pub fn tax_at(&self, rate: Decimal) -> Decimal {
        money::tax_for(self.subtotal(), rate)
    }

    /// subtotal + tax − discount
    pub fn total(&self) -> Decimal {
        money::total_for(self.subtotal(), self.tax(), self.discount)
    }

    /// Σ quantity, for the cart badge
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::round_money;

    fn dish(id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Dish {id}"),
            price,
            category: None,
            is_available: true,
            is_spicy: false,
            default_spice_level: None,
        }
    }

    fn spicy(id: &str, price: f64, level: Option<SpiceLevel>) -> MenuItem {
        MenuItem {
            is_spicy: true,
            default_spice_level: level,
            ..dish(id, price)
        }
    }

    #[test]
    fn test_two_line_scenario() {
        let mut cart = Cart::for_table("T1");
        let a = dish("A", 100.0);
        cart.add(&a);
        cart.add(&a);
        cart.add(&dish("B", 250.0));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(round_money(cart.subtotal()), Decimal::new(45000, 2));
        assert_eq!(round_money(cart.tax()), Decimal::new(2250, 2));
        assert_eq!(round_money(cart.total()), Decimal::new(47250, 2));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_twice_single_line() {
        let mut cart = Cart::new();
        let item = dish("paneer", 220.0);
        cart.add(&item);
        cart.add(&item);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line("paneer").unwrap().quantity, 2);
    }

    #[test]
    fn test_new_line_defaults() {
        let mut cart = Cart::new();
        cart.add(&spicy("vindaloo", 310.0, Some(SpiceLevel::Hot)));
        cart.add(&spicy("curry", 250.0, None));
        cart.add(&dish("lassi", 90.0));

        let vindaloo = cart.line("vindaloo").unwrap();
        assert_eq!(vindaloo.quantity, 1);
        assert_eq!(vindaloo.instructions, None);
        assert_eq!(vindaloo.spice_level, Some(SpiceLevel::Hot));
        assert_eq!(cart.line("curry").unwrap().spice_level, Some(SpiceLevel::Medium));
        assert_eq!(cart.line("lassi").unwrap().spice_level, None);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(&dish("A", 100.0));
        cart.add(&dish("B", 50.0));

        cart.update_quantity("A", 4);
        assert_eq!(cart.line("A").unwrap().quantity, 4);

        cart.update_quantity("A", 0);
        assert!(cart.line("A").is_none());

        cart.update_quantity("B", -3);
        assert!(cart.is_empty());

        // absent id
        cart.update_quantity("missing", 5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamped() {
        let mut cart = Cart::new();
        cart.add(&dish("A", 1.0));
        cart.update_quantity("A", i64::MAX);
        assert_eq!(cart.line("A").unwrap().quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_add_at_cap_is_ignored() {
        let mut cart = Cart::new();
        let a = dish("A", 2.0);
        cart.add(&a);
        cart.update_quantity("A", i64::from(MAX_QUANTITY));
        let before = cart.subtotal();

        cart.add(&a);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), MAX_QUANTITY);
        assert_eq!(cart.subtotal(), before);
    }

    #[test]
    fn test_spice_update_keeps_order() {
        let mut cart = Cart::new();
        cart.add(&spicy("A", 100.0, None));
        cart.add(&spicy("B", 100.0, None));
        cart.add(&spicy("C", 100.0, None));

        cart.update_spice_preference("B", SpiceLevel::ExtraHot);
        cart.update_spice_preference("missing", SpiceLevel::Mild);

        let ids: Vec<_> = cart.lines().iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
        assert_eq!(cart.line("B").unwrap().spice_level, Some(SpiceLevel::ExtraHot));
        assert_eq!(cart.line("A").unwrap().spice_level, Some(SpiceLevel::Medium));
    }

    #[test]
    fn test_instructions() {
        let mut cart = Cart::new();
        cart.add(&dish("A", 100.0));
        cart.update_instructions("A", "  no onion ");
        assert_eq!(cart.line("A").unwrap().instructions.as_deref(), Some("no onion"));
        cart.update_instructions("A", "   ");
        assert_eq!(cart.line("A").unwrap().instructions, None);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::for_table("T9");
        cart.add(&dish("A", 100.0));
        cart.remove("missing");
        assert_eq!(cart.lines().len(), 1);

        cart.set_discount(Decimal::from(10));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.table_id(), None);
        assert_eq!(cart.discount(), Decimal::ZERO);
    }

    #[test]
    fn test_discount_and_rate() {
        let mut cart = Cart::new().with_tax_rate(Decimal::new(18, 2));
        cart.add(&dish("A", 1000.0));
        cart.set_discount(Decimal::from(80));
        assert_eq!(cart.tax(), Decimal::from(180));
        assert_eq!(cart.total(), Decimal::from(1100));
        assert_eq!(cart.tax_at(DEFAULT_TAX_RATE), Decimal::from(50));

        cart.set_discount(Decimal::from(-5));
        assert_eq!(cart.discount(), Decimal::ZERO);
    }

    #[test]
    fn test_subtotal_tracks_surviving_lines() {
        let mut cart = Cart::new();
        let items = [dish("A", 12.5), dish("B", 0.1), dish("C", 99.99)];
        for item in &items {
            cart.add(item);
            cart.add(item);
        }
        cart.update_quantity("B", 7);
        cart.remove("C");
        cart.add(&items[2]);

        let expected: Decimal = cart
            .lines()
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(cart.subtotal(), expected);
        assert_eq!(round_money(cart.subtotal()), Decimal::new(12569, 2));
    }
}
