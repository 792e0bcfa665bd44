//! Recipe repository for JSON storage
//!
//! Manages loading and saving recipes to recipes.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FoodCostError;
use crate::models::{IngredientId, Recipe, RecipeId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable recipe data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RecipeData {
    pub recipes: Vec<Recipe>,
}

/// Repository for recipe persistence
pub struct RecipeRepository {
    path: PathBuf,
    data: RwLock<HashMap<RecipeId, Recipe>>,
    /// Index: normalized name -> recipe_id
    by_name: RwLock<HashMap<String, RecipeId>>,
}

impl RecipeRepository {
    /// Create a new recipe repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load recipes from disk
    pub fn load(&self) -> Result<(), FoodCostError> {
        let file_data: RecipeData = read_json(&self.path)?;
        self.replace_all(file_data.recipes)
    }

    /// Replace the in-memory collection
    pub fn replace_all(&self, recipes: Vec<Recipe>) -> Result<(), FoodCostError> {
        let mut data = self.data.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_name.clear();

        for recipe in recipes {
            by_name.insert(Recipe::normalize_name(&recipe.name), recipe.id);
            data.insert(recipe.id, recipe);
        }

        Ok(())
    }

    /// Save recipes to disk
    pub fn save(&self) -> Result<(), FoodCostError> {
        let recipes = self.get_all()?;
        write_json_atomic(&self.path, &RecipeData { recipes })
    }

    /// Get a recipe by ID
    pub fn get(&self, id: RecipeId) -> Result<Option<Recipe>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all recipes, sorted by category then name
    pub fn get_all(&self) -> Result<Vec<Recipe>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut recipes: Vec<_> = data.values().cloned().collect();
        recipes.sort_by(|a, b| {
            a.category
                .to_lowercase()
                .cmp(&b.category.to_lowercase())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(recipes)
    }

    /// Get recipes in a category (case-insensitive)
    pub fn get_by_category(&self, category: &str) -> Result<Vec<Recipe>, FoodCostError> {
        let wanted = category.trim().to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| r.category.trim().to_lowercase() == wanted)
            .collect())
    }

    /// Get recipes with at least one line referencing an ingredient
    pub fn recipes_using(&self, ingredient_id: IngredientId) -> Result<Vec<Recipe>, FoodCostError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| r.uses_ingredient(ingredient_id))
            .collect())
    }

    /// Get a recipe by exact name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Recipe>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_name = self.by_name.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_name
            .get(&Recipe::normalize_name(name))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Find a recipe whose ID starts with the given short form
    pub fn find_by_short_id(&self, short: &str) -> Result<Option<Recipe>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().find(|r| r.id.matches_short(short)).cloned())
    }

    /// Insert or update a recipe
    pub fn upsert(&self, recipe: Recipe) -> Result<(), FoodCostError> {
        let mut data = self.data.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&recipe.id) {
            by_name.remove(&Recipe::normalize_name(&old.name));
        }

        by_name.insert(Recipe::normalize_name(&recipe.name), recipe.id);
        data.insert(recipe.id, recipe);
        Ok(())
    }

    /// Delete a recipe, returning whether it existed
    pub fn delete(&self, id: RecipeId) -> Result<bool, FoodCostError> {
        let mut data = self.data.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.remove(&id) {
            Some(recipe) => {
                by_name.remove(&Recipe::normalize_name(&recipe.name));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count recipes
    pub fn count(&self) -> Result<usize, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecipeLine, Unit};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, RecipeRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recipes.json");
        let repo = RecipeRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_sorted_by_category_then_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Recipe::new("Hotdog Sencillo", "Hotdogs", 30.0))
            .unwrap();
        repo.upsert(Recipe::new("Hamburguesa", "Burgers", 60.0))
            .unwrap();
        repo.upsert(Recipe::new("Hotdog Clásico", "Hotdogs", 35.0))
            .unwrap();

        let names: Vec<String> = repo.get_all().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Hamburguesa", "Hotdog Clásico", "Hotdog Sencillo"]);
    }

    #[test]
    fn test_get_by_category() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Recipe::new("Hotdog Clásico", "Hotdogs", 35.0))
            .unwrap();
        repo.upsert(Recipe::new("Hamburguesa", "Burgers", 60.0))
            .unwrap();

        let hotdogs = repo.get_by_category("hotdogs").unwrap();
        assert_eq!(hotdogs.len(), 1);
        assert_eq!(hotdogs[0].name, "Hotdog Clásico");
        assert!(repo.get_by_category("Drinks").unwrap().is_empty());
    }

    #[test]
    fn test_recipes_using() {
        let (_temp_dir, repo) = create_test_repo();
        let sausage = IngredientId::new();

        let mut hotdog = Recipe::new("Hotdog Clásico", "Hotdogs", 35.0);
        hotdog.add_line(RecipeLine::new(sausage, 100.0, Unit::Gram));
        repo.upsert(hotdog).unwrap();
        repo.upsert(Recipe::new("Hamburguesa", "Burgers", 60.0))
            .unwrap();

        let using = repo.recipes_using(sausage).unwrap();
        assert_eq!(using.len(), 1);
        assert_eq!(using[0].name, "Hotdog Clásico");
    }

    #[test]
    fn test_save_and_reload_keeps_lines() {
        let (temp_dir, repo) = create_test_repo();
        let mut recipe = Recipe::new("Hotdog Clásico", "Hotdogs", 35.0);
        recipe.add_line(RecipeLine::new(IngredientId::new(), 15.0, Unit::Milliliter));
        let id = recipe.id;

        repo.upsert(recipe.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = RecipeRepository::new(temp_dir.path().join("recipes.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.get(id).unwrap().unwrap(), recipe);
    }

    #[test]
    fn test_delete_clears_name_index() {
        let (_temp_dir, repo) = create_test_repo();
        let recipe = Recipe::new("Hotdog Clásico", "Hotdogs", 35.0);
        let id = recipe.id;
        repo.upsert(recipe).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(repo.get_by_name("hotdog clásico").unwrap().is_none());
    }
}
