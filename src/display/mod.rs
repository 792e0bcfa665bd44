//! Display formatting for terminal output
//!
//! Number formatting shared by every view, plus table and detail views for
//! ingredients, recipes and units.

pub mod ingredient;
pub mod recipe;
pub mod unit;

pub use ingredient::{format_ingredient_details, format_ingredient_list};
pub use recipe::{format_breakdown, format_recipe_list};
pub use unit::{format_conversion, format_unit_table};

use crate::models::Quantity;

/// Rendered in place of non-finite numbers
pub const NOT_AVAILABLE: &str = "n/a";

/// Format an amount with a currency symbol and 2 decimals, e.g. `$12.40`
///
/// Negative amounts put the sign before the symbol: `-$1.00`.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let rounded = (amount * 100.0).round() / 100.0;
    if rounded < 0.0 {
        format!("-{}{:.2}", symbol, -rounded)
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

/// Format a quantity with its unit, e.g. `100 g`
pub fn format_amount(amount: Quantity) -> String {
    format!("{} {}", format_quantity(amount.value), amount.unit)
}

/// Format a quantity with at most 4 decimals and no trailing zeros
///
/// `1000.0` prints as `1000`, `0.0153` as `0.0153`, `2.50` as `2.5`.
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = format!("{:.4}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Format a percentage with 1 decimal, e.g. `64.6%`
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.1}%", value)
}

/// Format a per-base-unit cost: up to 4 decimals so small costs stay visible
pub fn format_unit_cost(symbol: &str, cost: f64) -> String {
    if !cost.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if cost < 0.0 {
        format!("-{}{}", symbol, format_quantity(-cost))
    } else {
        format!("{}{}", symbol, format_quantity(cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("$", 12.4), "$12.40");
        assert_eq!(format_currency("$", 22.6), "$22.60");
        assert_eq!(format_currency("$", 0.0), "$0.00");
        assert_eq!(format_currency("$", -1.0), "-$1.00");
        assert_eq!(format_currency("$", -0.001), "$0.00");
        assert_eq!(format_currency("€", 3.456), "€3.46");
        assert_eq!(format_currency("$", f64::INFINITY), "n/a");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1000.0), "1000");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.001), "0.001");
        assert_eq!(format_quantity(0.00001), "0");
        assert_eq!(format_quantity(-0.00001), "0");
        assert_eq!(format_quantity(2.0 / 3.0), "0.6667");
        assert_eq!(format_quantity(f64::NAN), "n/a");
    }

    #[test]
    fn test_format_amount() {
        use crate::models::Unit;

        assert_eq!(format_amount(Quantity::new(100.0, Unit::Gram)), "100 g");
        assert_eq!(format_amount(Quantity::new(0.25, Unit::Liter)), "0.25 L");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(64.571428), "64.6%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(f64::NEG_INFINITY), "n/a");
    }

    #[test]
    fn test_format_unit_cost() {
        assert_eq!(format_unit_cost("$", 0.08), "$0.08");
        assert_eq!(format_unit_cost("$", 3.5), "$3.5");
        assert_eq!(format_unit_cost("$", 0.06), "$0.06");
        assert_eq!(format_unit_cost("$", f64::INFINITY), "n/a");
    }
}
