//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic happens on `Decimal`. Values are rounded to 2 decimal
//! places only when converted to `f64` for the wire or formatted for display.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// GST rate used when nothing else is configured (5%)
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation. NaN and infinities become zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for the wire, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round half away from zero to 2 decimal places
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display ("472.50")
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Tax on a subtotal at the given rate (unrounded)
pub fn tax_for(subtotal: Decimal, rate: Decimal) -> Decimal {
    subtotal * rate
}

/// subtotal + tax - discount, never below zero
pub fn total_for(subtotal: Decimal, tax: Decimal, discount: Decimal) -> Decimal {
    (subtotal + tax - discount).max(Decimal::ZERO)
}

/// Check if `paid` covers `required` (with 0.01 tolerance)
pub fn is_payment_sufficient(paid: Decimal, required: Decimal) -> bool {
    paid >= required - MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_and_total_defaults() {
        let subtotal = Decimal::from(1000);
        let tax = tax_for(subtotal, DEFAULT_TAX_RATE);
        assert_eq!(round_money(tax), Decimal::new(5000, 2));
        assert_eq!(
            round_money(total_for(subtotal, tax, Decimal::ZERO)),
            Decimal::new(105000, 2)
        );
    }

    #[test]
    fn test_total_never_negative() {
        let total = total_for(Decimal::from(10), Decimal::ZERO, Decimal::from(25));
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn test_accumulation_precision() {
        let sum: Decimal = (0..1000).map(|_| to_decimal(0.01)).sum();
        assert_eq!(to_f64(sum), 10.0);

        let f64_sum: f64 = (0..10).map(|_| 0.1).sum();
        assert_ne!(f64_sum, 1.0);
        let dec_sum: Decimal = (0..10).map(|_| to_decimal(0.1)).sum();
        assert_eq!(to_f64(dec_sum), 1.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_money(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
        assert_eq!(format_amount(Decimal::new(4725, 1)), "472.50");
    }

    #[test]
    fn test_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_is_payment_sufficient() {
        let due = Decimal::new(47250, 2);
        assert!(is_payment_sufficient(due, due));
        assert!(is_payment_sufficient(Decimal::new(47249, 2), due));
        assert!(!is_payment_sufficient(Decimal::new(47248, 2), due));
    }
}
