//! Unit and conversion display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format_quantity;
use crate::models::Unit;

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Base unit")]
    base: String,
}

/// Format every supported unit with its label and category
pub fn format_unit_table() -> String {
    let rows = Unit::all().iter().map(|unit| UnitRow {
        symbol: unit.symbol(),
        label: unit.label(),
        category: unit.category().to_string(),
        base: format!(
            "1 {} = {} {}",
            unit,
            format_quantity(unit.base_factor()),
            unit.category().base_unit()
        ),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a successful conversion, e.g. `1 kg = 1000 g`
pub fn format_conversion(value: f64, from: Unit, result: f64, to: Unit) -> String {
    format!(
        "{} {} = {} {}",
        format_quantity(value),
        from,
        format_quantity(result),
        to
    )
}
