//! CSV Export functionality
//!
//! Exports ingredients with their unit costs, and recipes with cost, profit
//! and margin, in spreadsheet-friendly CSV.

use std::io::Write;

use crate::costing::{breakdown_total, profit_and_margin, unit_cost_of};
use crate::error::{FoodCostError, FoodCostResult};
use crate::storage::Storage;

const INGREDIENTS_HEADER: &[&str] = &[
    "ID",
    "Name",
    "Price",
    "Quantity",
    "Unit",
    "Category",
    "Unit Cost",
    "Base Unit",
];

const RECIPES_HEADER: &[&str] = &[
    "ID",
    "Name",
    "Category",
    "Lines",
    "Cost",
    "Sale Price",
    "Profit",
    "Margin Percent",
];

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

fn export_error(e: impl std::fmt::Display) -> FoodCostError {
    FoodCostError::Export(format!("CSV write error: {}", e))
}

/// Export all ingredients to CSV
pub fn export_ingredients_csv<W: Write>(storage: &Storage, writer: &mut W) -> FoodCostResult<()> {
    let mut csv = csv_writer(writer);
    csv.write_record(INGREDIENTS_HEADER).map_err(export_error)?;

    for ingredient in storage.ingredients.get_all()? {
        let unit_cost = unit_cost_of(&ingredient);
        csv.write_record([
            ingredient.id.as_uuid().to_string(),
            ingredient.name.clone(),
            format!("{:.2}", ingredient.price),
            ingredient.quantity.to_string(),
            ingredient.unit.to_string(),
            ingredient.unit.category().to_string(),
            if unit_cost.is_finite() {
                format!("{:.6}", unit_cost)
            } else {
                String::new()
            },
            ingredient.unit.category().base_unit().to_string(),
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    Ok(())
}

/// Export all recipes with cost, profit and margin to CSV
pub fn export_recipes_csv<W: Write>(storage: &Storage, writer: &mut W) -> FoodCostResult<()> {
    let ingredients = storage.ingredients.to_map()?;
    let mut csv = csv_writer(writer);
    csv.write_record(RECIPES_HEADER).map_err(export_error)?;

    for recipe in storage.recipes.get_all()? {
        let cost = breakdown_total(&recipe, &ingredients);
        let figures = profit_and_margin(cost, recipe.sale_price);
        csv.write_record([
            recipe.id.as_uuid().to_string(),
            recipe.name.clone(),
            recipe.category.clone(),
            recipe.lines.len().to_string(),
            format!("{:.2}", cost),
            format!("{:.2}", recipe.sale_price),
            format!("{:.2}", figures.profit),
            format!("{:.1}", figures.margin_percent),
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FoodCostPaths;
    use crate::models::{Ingredient, Unit};
    use crate::storage::sample_catalogue;
    use tempfile::TempDir;

    fn seeded_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FoodCostPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let (ingredients, recipes) = sample_catalogue();
        storage.ingredients.replace_all(ingredients).unwrap();
        storage.recipes.replace_all(recipes).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_ingredients_csv() {
        let (_temp_dir, storage) = seeded_storage();

        let mut output = Vec::new();
        export_ingredients_csv(&storage, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("ID,Name,Price,Quantity,Unit"));

        let sausage = lines.iter().find(|l| l.contains("Salchicha")).unwrap();
        assert!(sausage.contains(",80.00,1,kg,mass,0.080000,g"));
    }

    #[test]
    fn test_recipes_csv() {
        let (_temp_dir, storage) = seeded_storage();

        let mut output = Vec::new();
        export_recipes_csv(&storage, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("Hotdog Clásico,Hotdogs,3,12.40,35.00,22.60,64.6"));
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FoodCostPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage
            .ingredients
            .upsert(Ingredient::new("Sal, fina", 10.0, 1.0, Unit::Kilogram))
            .unwrap();

        let mut output = Vec::new();
        export_ingredients_csv(&storage, &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("\"Sal, fina\""));
    }
}
