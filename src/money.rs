//! Money
//!
//! Prices are stored as integral minor units (piastres) and only become
//! [`Money`] at the display edge.

use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Storefront currency.
pub const CURRENCY: &Currency = iso::EGP;

/// Wrap a minor-unit amount in the storefront currency.
pub fn to_money(minor: u64) -> Money<'static, Currency> {
    Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), CURRENCY)
}

/// Format a minor-unit amount for display.
pub fn format_price(minor: u64) -> String {
    to_money(minor).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_minor_units_in_pounds() {
        assert_eq!(to_money(45_00), Money::from_minor(4500, iso::EGP));
        assert_eq!(to_money(45_00).currency(), CURRENCY);
    }

    #[test]
    fn formats_whole_pounds() {
        let formatted = format_price(1234_50);

        assert!(formatted.contains("234"), "{formatted}");
        assert_ne!(format_price(0), format_price(1));
    }
}
