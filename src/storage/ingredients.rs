//! Ingredient repository for JSON storage
//!
//! Manages loading and saving ingredients to ingredients.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FoodCostError;
use crate::models::{Ingredient, IngredientId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable ingredient data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct IngredientData {
    pub ingredients: Vec<Ingredient>,
}

/// Repository for ingredient persistence
pub struct IngredientRepository {
    path: PathBuf,
    data: RwLock<HashMap<IngredientId, Ingredient>>,
    /// Index: normalized name -> ingredient_id
    by_name: RwLock<HashMap<String, IngredientId>>,
}

impl IngredientRepository {
    /// Create a new ingredient repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load ingredients from disk
    pub fn load(&self) -> Result<(), FoodCostError> {
        let file_data: IngredientData = read_json(&self.path)?;
        self.replace_all(file_data.ingredients)
    }

    /// Replace the in-memory collection
    pub fn replace_all(&self, ingredients: Vec<Ingredient>) -> Result<(), FoodCostError> {
        let mut data = self.data.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_name.clear();

        for ingredient in ingredients {
            by_name.insert(Ingredient::normalize_name(&ingredient.name), ingredient.id);
            data.insert(ingredient.id, ingredient);
        }

        Ok(())
    }

    /// Save ingredients to disk
    pub fn save(&self) -> Result<(), FoodCostError> {
        let ingredients = self.get_all()?;
        write_json_atomic(&self.path, &IngredientData { ingredients })
    }

    /// Get an ingredient by ID
    pub fn get(&self, id: IngredientId) -> Result<Option<Ingredient>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all ingredients, sorted by name
    pub fn get_all(&self) -> Result<Vec<Ingredient>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut ingredients: Vec<_> = data.values().cloned().collect();
        ingredients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(ingredients)
    }

    /// Snapshot of all ingredients keyed by ID
    pub fn to_map(&self) -> Result<HashMap<IngredientId, Ingredient>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Get an ingredient by exact name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Ingredient>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_name = self.by_name.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_name
            .get(&Ingredient::normalize_name(name))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Find an ingredient whose ID starts with the given short form
    pub fn find_by_short_id(&self, short: &str) -> Result<Option<Ingredient>, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().find(|i| i.id.matches_short(short)).cloned())
    }

    /// Insert or update an ingredient
    pub fn upsert(&self, ingredient: Ingredient) -> Result<(), FoodCostError> {
        let mut data = self.data.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        // Drop the old name index entry when renaming
        if let Some(old) = data.get(&ingredient.id) {
            by_name.remove(&Ingredient::normalize_name(&old.name));
        }

        by_name.insert(Ingredient::normalize_name(&ingredient.name), ingredient.id);
        data.insert(ingredient.id, ingredient);
        Ok(())
    }

    /// Delete an ingredient, returning whether it existed
    pub fn delete(&self, id: IngredientId) -> Result<bool, FoodCostError> {
        let mut data = self.data.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.remove(&id) {
            Some(ingredient) => {
                by_name.remove(&Ingredient::normalize_name(&ingredient.name));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count ingredients
    pub fn count(&self) -> Result<usize, FoodCostError> {
        let data = self.data.read().map_err(|e| {
            FoodCostError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
