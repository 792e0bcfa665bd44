//! Unit conversion CLI commands

use crate::costing::convert;
use crate::display::{format_conversion, format_unit_table};
use crate::error::FoodCostResult;
use crate::models::Unit;

/// Convert a value between two units and print the result
///
/// Cross-category conversions fail with the incompatibility message.
pub fn handle_convert_command(value: f64, from: Unit, to: Unit) -> FoodCostResult<()> {
    let result = convert(value, from, to)?;
    println!("{}", format_conversion(value, from, result, to));
    Ok(())
}

/// Print the supported units
pub fn handle_units_command() {
    println!("{}", format_unit_table());
}
