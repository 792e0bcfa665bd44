//! Storage initialization
//!
//! Handles first-run setup and the optional sample catalogue

use crate::config::paths::FoodCostPaths;
use crate::error::FoodCostError;
use crate::models::{Ingredient, Recipe, RecipeLine, Unit};

use super::file_io::write_json_atomic;
use super::ingredients::IngredientData;
use super::recipes::RecipeData;

/// Initialize storage for a fresh installation
///
/// Creates the data directory. When `with_samples` is set and no ingredient
/// or recipe files exist yet, writes a small sample catalogue. Existing data
/// is never overwritten.
pub fn initialize_storage(paths: &FoodCostPaths, with_samples: bool) -> Result<(), FoodCostError> {
    paths.ensure_directories()?;

    if with_samples && needs_initialization(paths) {
        let (ingredients, recipes) = sample_catalogue();
        write_json_atomic(paths.ingredients_file(), &IngredientData { ingredients })?;
        write_json_atomic(paths.recipes_file(), &RecipeData { recipes })?;
    }

    Ok(())
}

/// Check if neither data file exists yet
pub fn needs_initialization(paths: &FoodCostPaths) -> bool {
    !paths.ingredients_file().exists() && !paths.recipes_file().exists()
}

/// Five ingredients and one recipe costed from three of them
pub fn sample_catalogue() -> (Vec<Ingredient>, Vec<Recipe>) {
    let bun = Ingredient::new("Pan de Hotdog", 35.0, 10.0, Unit::Piece);
    let sausage = Ingredient::new("Salchicha", 80.0, 1.0, Unit::Kilogram);
    let patty = Ingredient::new("Carne de Hamburguesa", 120.0, 1.0, Unit::Kilogram);
    let cheese = Ingredient::new("Queso Amarillo", 45.0, 500.0, Unit::Gram);
    let mayo = Ingredient::new("Mayonesa", 60.0, 1.0, Unit::Liter);

    let mut hotdog = Recipe::new("Hotdog Clásico", "Hotdogs", 35.0);
    hotdog.add_line(RecipeLine::new(bun.id, 1.0, Unit::Piece));
    hotdog.add_line(RecipeLine::new(sausage.id, 100.0, Unit::Gram));
    hotdog.add_line(RecipeLine::new(mayo.id, 15.0, Unit::Milliliter));

    (vec![bun, sausage, patty, cheese, mayo], vec![hotdog])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::recipe_cost;
    use crate::storage::file_io::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_with_samples() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FoodCostPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths, true).unwrap();
        assert!(!needs_initialization(&paths));

        let ingredients: IngredientData = read_json(paths.ingredients_file()).unwrap();
        let recipes: RecipeData = read_json(paths.recipes_file()).unwrap();
        assert_eq!(ingredients.ingredients.len(), 5);
        assert_eq!(recipes.recipes.len(), 1);
    }

    #[test]
    fn test_initialize_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FoodCostPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, false).unwrap();

        assert!(paths.data_dir().exists());
        assert!(needs_initialization(&paths));
    }

    #[test]
    fn test_existing_data_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FoodCostPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        write_json_atomic(paths.ingredients_file(), &IngredientData::default()).unwrap();

        initialize_storage(&paths, true).unwrap();

        let ingredients: IngredientData = read_json(paths.ingredients_file()).unwrap();
        assert!(ingredients.ingredients.is_empty());
    }

    #[test]
    fn test_sample_recipe_cost() {
        let (ingredients, recipes) = sample_catalogue();
        let cost = recipe_cost(&recipes[0].lines, &ingredients);
        assert!((cost - 12.4).abs() < 1e-9);
    }
}
