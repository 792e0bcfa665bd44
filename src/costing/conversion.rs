//! Unit conversion engine
//!
//! Every conversion pivots on the base unit of the measurement category
//! (grams, milliliters, pieces): scale into the base, then out of it. Two units
//! are convertible exactly when they share a category.

use thiserror::Error;

use crate::models::{MeasurementCategory, Unit};

/// The two units belong to different measurement categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "Cannot convert {from} ({}) to {to} ({}): units belong to different categories",
    .from.category(),
    .to.category()
)]
pub struct IncompatibleCategories {
    pub from: Unit,
    pub to: Unit,
}

/// Measurement category of a unit
pub fn category_of(unit: Unit) -> MeasurementCategory {
    unit.category()
}

/// Canonical unit of the unit's category (g, ml or pz)
pub fn base_unit_of(unit: Unit) -> Unit {
    unit.category().base_unit()
}

/// Scale a value into its category's base unit
///
/// Zero and negative values are scaled like any other.
pub fn to_base(value: f64, unit: Unit) -> f64 {
    value * unit.base_factor()
}

/// Scale a base-unit value into `unit`; the inverse of [`to_base`]
pub fn from_base(value: f64, unit: Unit) -> f64 {
    value / unit.base_factor()
}

/// Convert a value between two units of the same category
///
/// Returns the input unchanged when `from == to`.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, IncompatibleCategories> {
    if category_of(from) != category_of(to) {
        return Err(IncompatibleCategories { from, to });
    }

    if from == to {
        return Ok(value);
    }

    Ok(from_base(to_base(value, from), to))
}

/// Check that two units can be converted into each other
pub fn ensure_compatible(from: Unit, to: Unit) -> Result<(), IncompatibleCategories> {
    if category_of(from) == category_of(to) {
        Ok(())
    } else {
        Err(IncompatibleCategories { from, to })
    }
}
