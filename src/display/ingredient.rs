//! Ingredient display formatting
//!
//! Formats ingredients for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_amount, format_currency, format_unit_cost};
use crate::config::Settings;
use crate::models::{Ingredient, Recipe};
use crate::services::IngredientCost;

#[derive(Tabled)]
struct IngredientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Purchased")]
    purchased: String,
    #[tabled(rename = "Unit cost")]
    unit_cost: String,
}

/// Format a list of ingredients with their unit costs as a table
pub fn format_ingredient_list(items: &[IngredientCost], settings: &Settings) -> String {
    if items.is_empty() {
        return "No ingredients found.".to_string();
    }

    let rows = items.iter().map(|item| IngredientRow {
        id: item.ingredient.id.to_string(),
        name: item.ingredient.name.clone(),
        price: settings.format_currency(item.ingredient.price),
        purchased: format_amount(item.ingredient.purchased()),
        unit_cost: format!(
            "{} / {}",
            format_unit_cost(&settings.currency_symbol, item.unit_cost),
            item.ingredient.unit.category().base_unit()
        ),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n{} ingredient(s)\n", table, items.len())
}

/// Format a single ingredient's details
pub fn format_ingredient_details(
    ingredient: &Ingredient,
    unit_cost: f64,
    used_by: &[Recipe],
    settings: &Settings,
) -> String {
    let base = ingredient.unit.category().base_unit();
    let mut output = String::new();

    output.push_str(&format!("Ingredient: {}\n", ingredient.name));
    output.push_str(&format!("  ID:         {}\n", ingredient.id));
    output.push_str(&format!(
        "  Price:      {}\n",
        format_currency(&settings.currency_symbol, ingredient.price)
    ));
    output.push_str(&format!(
        "  Purchased:  {}\n",
        format_amount(ingredient.purchased())
    ));
    output.push_str(&format!("  Category:   {}\n", ingredient.unit.category()));
    output.push_str(&format!(
        "  Unit cost:  {} per {}\n",
        format_unit_cost(&settings.currency_symbol, unit_cost),
        base
    ));
    output.push_str(&format!(
        "  Updated:    {}\n",
        ingredient.updated_at.format("%Y-%m-%d %H:%M")
    ));

    if used_by.is_empty() {
        output.push_str("  Used by:    (no recipes)\n");
    } else {
        let names: Vec<&str> = used_by.iter().map(|r| r.name.as_str()).collect();
        output.push_str(&format!("  Used by:    {}\n", names.join(", ")));
    }

    output
}
