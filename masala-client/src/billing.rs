//! Billing and payment validation
//!
//! Payment forms are checked locally against the amount due; a form that
//! fails validation never reaches the backend.

use crate::cart::Cart;
use crate::money::{self, round_money, to_decimal, to_f64};
use crate::tables::AggregatedTable;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::order::{PaymentInput, PaymentMethod};

/// Amounts printed on a bill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bill {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl Bill {
    /// Bill for the current cart
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            discount: cart.discount(),
            total: cart.total(),
        }
    }

    /// Bill for a table's running balance.
    ///
    /// The aggregated amount already includes tax; the split into subtotal
    /// and tax is derived backwards from `tax_rate`.
    pub fn for_table(table: &AggregatedTable, tax_rate: Decimal) -> Self {
        let total = table.total_amount.max(Decimal::ZERO);
        let subtotal = total
            .checked_div(Decimal::ONE + tax_rate)
            .map(round_money)
            .unwrap_or(total);
        Self {
            subtotal,
            tax: total - subtotal,
            discount: Decimal::ZERO,
            total,
        }
    }

    /// Amount the customer has to pay, rounded to cents
    pub fn amount_due(&self) -> Decimal {
        round_money(self.total)
    }
}

/// Payment details as entered by staff
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub method: PaymentMethod,
    pub amount_paid: f64,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl PaymentForm {
    pub fn new(method: PaymentMethod, amount_paid: f64) -> Self {
        Self {
            method,
            amount_paid,
            reference: None,
            notes: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check the form against `amount_due`.
    ///
    /// # Errors
    /// - `ValueOutOfRange` if the amount is not a positive finite number
    /// - `PaymentInsufficientAmount` if it falls short of the amount due
    ///   by more than 0.01
    pub fn validate(&self, amount_due: Decimal) -> Result<ValidatedPayment, AppError> {
        if !self.amount_paid.is_finite() || self.amount_paid <= 0.0 {
            return Err(AppError::out_of_range(
                "amount_paid",
                format!("Amount must be a positive number, got {}", self.amount_paid),
            ));
        }

        let paid = round_money(to_decimal(self.amount_paid));
        let due = round_money(amount_due);
        if !money::is_payment_sufficient(paid, due) {
            return Err(AppError::with_message(
                ErrorCode::PaymentInsufficientAmount,
                format!(
                    "Amount paid {} is less than amount due {}",
                    money::format_amount(paid),
                    money::format_amount(due)
                ),
            )
            .with_detail("amount_due", to_f64(due))
            .with_detail("amount_paid", to_f64(paid)));
        }

        let change_due = if self.method == PaymentMethod::Cash {
            (paid - due).max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Ok(ValidatedPayment {
            method: self.method,
            amount: paid,
            reference: self
                .method
                .is_electronic()
                .then(|| non_blank(self.reference.as_deref()))
                .flatten(),
            notes: non_blank(self.notes.as_deref()),
            change_due,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A payment form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayment {
    pub method: PaymentMethod,
    pub amount: Decimal,
    /// Only kept for electronic methods
    pub reference: Option<String>,
    pub notes: Option<String>,
    /// Change to hand back (cash only)
    pub change_due: Decimal,
}

impl ValidatedPayment {
    /// Wire payload for recording this payment against `order_id`
    pub fn into_input(self, order_id: impl Into<String>) -> PaymentInput {
        PaymentInput {
            order_id: order_id.into(),
            method: self.method,
            amount: to_f64(self.amount),
            reference: self.reference,
            notes: self.notes,
        }
    }

    /// One payload per running order.
    ///
    /// Each order is paid its own balance; the last one takes whatever is
    /// left of the tendered amount, so the payloads add up to what the
    /// customer handed over.
    pub fn split_across(self, orders: &IndexMap<String, Decimal>) -> Vec<PaymentInput> {
        let mut remaining = self.amount;
        let last = orders.len().saturating_sub(1);

        orders
            .iter()
            .enumerate()
            .map(|(i, (order_id, balance))| {
                let share = if i == last {
                    remaining
                } else {
                    round_money(*balance).max(Decimal::ZERO).min(remaining)
                };
                remaining -= share;
                PaymentInput {
                    order_id: order_id.clone(),
                    method: self.method,
                    amount: to_f64(share),
                    reference: self.reference.clone(),
                    notes: self.notes.clone(),
                }
            })
            .collect()
    }
}
