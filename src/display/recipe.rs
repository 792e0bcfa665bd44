//! Recipe display formatting
//!
//! Recipe tables with cost and margin, and the per-line cost breakdown.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_amount, format_percent, format_unit_cost};
use crate::config::Settings;
use crate::costing::{profit_and_margin, CostBreakdown};
use crate::models::Recipe;
use crate::services::CostedRecipe;

#[derive(Tabled)]
struct RecipeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Lines")]
    lines: usize,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Margin")]
    margin: String,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Ingredient")]
    ingredient: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Unit cost")]
    unit_cost: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

/// Format recipes with cost, sale price and margin as a table
pub fn format_recipe_list(items: &[CostedRecipe], settings: &Settings) -> String {
    if items.is_empty() {
        return "No recipes found.".to_string();
    }

    let rows = items.iter().map(|item| {
        let figures = profit_and_margin(item.cost, item.recipe.sale_price);
        RecipeRow {
            id: item.recipe.id.to_string(),
            name: item.recipe.name.clone(),
            category: item.recipe.category.clone(),
            lines: item.recipe.lines.len(),
            cost: settings.format_currency(item.cost),
            price: settings.format_currency(item.recipe.sale_price),
            margin: format_percent(figures.margin_percent),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n{} recipe(s)\n", table, items.len())
}

/// Format a recipe with its line-by-line cost breakdown
pub fn format_breakdown(recipe: &Recipe, breakdown: &CostBreakdown, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Recipe: {}\n", recipe.name));
    output.push_str(&format!("  ID:         {}\n", recipe.id));
    if !recipe.category.is_empty() {
        output.push_str(&format!("  Category:   {}\n", recipe.category));
    }
    output.push('\n');

    if breakdown.lines.is_empty() {
        output.push_str("  (no ingredient lines)\n");
    } else {
        let rows = breakdown.lines.iter().map(|detail| LineRow {
            position: detail.position,
            ingredient: detail
                .ingredient_name
                .clone()
                .unwrap_or_else(|| format!("(missing {})", detail.line.ingredient_id)),
            quantity: format_amount(detail.line.required()),
            unit_cost: detail
                .unit_cost
                .map(|c| format_unit_cost(&settings.currency_symbol, c))
                .unwrap_or_else(|| "-".to_string()),
            cost: settings.format_currency(detail.cost),
        });

        let mut table = Table::new(rows);
        table.with(Style::psql());
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format!(
        "  Cost:       {}\n",
        settings.format_currency(breakdown.total_cost)
    ));
    output.push_str(&format!(
        "  Sale price: {}\n",
        settings.format_currency(breakdown.sale_price)
    ));
    output.push_str(&format!(
        "  Profit:     {}\n",
        settings.format_currency(breakdown.profit)
    ));
    output.push_str(&format!(
        "  Margin:     {}\n",
        format_percent(breakdown.margin_percent)
    ));

    if breakdown.has_warnings() {
        output.push_str("\nWarnings:\n");
        for warning in &breakdown.warnings {
            output.push_str(&format!("  ! {}\n", warning));
        }
    }

    output
}
