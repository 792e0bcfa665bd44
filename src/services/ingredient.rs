//! Ingredient service
//!
//! Business logic for ingredient management: duplicate checks, validation,
//! audit logging, and protecting recipe lines that depend on an ingredient.

use tracing::{info, warn};

use crate::audit::EntityType;
use crate::costing::unit_cost_of;
use crate::error::{FoodCostError, FoodCostResult};
use crate::models::{Ingredient, IngredientId, Recipe, Unit};
use crate::storage::Storage;

/// Service for ingredient management
pub struct IngredientService<'a> {
    storage: &'a Storage,
    enforce_unit_categories: bool,
}

/// Fields to change on an ingredient; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub unit: Option<Unit>,
}

impl IngredientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none() && self.unit.is_none()
    }
}

/// Result of deleting an ingredient
#[derive(Debug, Clone)]
pub struct IngredientDeletion {
    pub ingredient: Ingredient,
    /// Recipes whose lines now reference a missing ingredient
    pub affected_recipes: Vec<Recipe>,
}

/// An ingredient together with its derived cost per base unit
#[derive(Debug, Clone)]
pub struct IngredientCost {
    pub ingredient: Ingredient,
    pub unit_cost: f64,
}

impl<'a> IngredientService<'a> {
    /// Create a new ingredient service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            enforce_unit_categories: true,
        }
    }

    /// Toggle the unit category guard on updates
    pub fn with_unit_checks(mut self, enforce: bool) -> Self {
        self.enforce_unit_categories = enforce;
        self
    }

    /// Create a new ingredient
    pub fn create(
        &self,
        name: &str,
        price: f64,
        quantity: f64,
        unit: Unit,
    ) -> FoodCostResult<Ingredient> {
        let name = name.trim();

        if self.storage.ingredients.get_by_name(name)?.is_some() {
            return Err(FoodCostError::Duplicate {
                entity_type: "Ingredient",
                identifier: name.to_string(),
            });
        }

        let ingredient = Ingredient::new(name, price, quantity, unit);
        ingredient
            .validate()
            .map_err(|e| FoodCostError::Validation(e.to_string()))?;

        self.storage.ingredients.upsert(ingredient.clone())?;
        self.storage.ingredients.save()?;

        self.storage.log_create(
            EntityType::Ingredient,
            ingredient.id.to_string(),
            Some(ingredient.name.clone()),
            &ingredient,
        )?;

        info!(id = %ingredient.id, name = %ingredient.name, "created ingredient");
        Ok(ingredient)
    }

    /// Get an ingredient by ID
    pub fn get(&self, id: IngredientId) -> FoodCostResult<Option<Ingredient>> {
        self.storage.ingredients.get(id)
    }

    /// Find an ingredient by name, full ID, or short ID
    pub fn find(&self, identifier: &str) -> FoodCostResult<Option<Ingredient>> {
        if let Some(ingredient) = self.storage.ingredients.get_by_name(identifier)? {
            return Ok(Some(ingredient));
        }

        if let Ok(id) = identifier.trim().parse::<IngredientId>() {
            if let Some(ingredient) = self.storage.ingredients.get(id)? {
                return Ok(Some(ingredient));
            }
        }

        self.storage.ingredients.find_by_short_id(identifier)
    }

    /// Find an ingredient or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FoodCostResult<Ingredient> {
        self.find(identifier)?
            .ok_or_else(|| FoodCostError::ingredient_not_found(identifier))
    }

    /// List all ingredients, sorted by name
    pub fn list(&self) -> FoodCostResult<Vec<Ingredient>> {
        self.storage.ingredients.get_all()
    }

    /// List all ingredients with their cost per base unit
    pub fn list_with_costs(&self) -> FoodCostResult<Vec<IngredientCost>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|ingredient| IngredientCost {
                unit_cost: unit_cost_of(&ingredient),
                ingredient,
            })
            .collect())
    }

    /// Cost per base unit of an ingredient
    pub fn unit_cost(&self, id: IngredientId) -> FoodCostResult<f64> {
        let ingredient = self
            .storage
            .ingredients
            .get(id)?
            .ok_or_else(|| FoodCostError::ingredient_not_found(id.to_string()))?;
        Ok(unit_cost_of(&ingredient))
    }

    /// Recipes with lines referencing an ingredient
    pub fn dependent_recipes(&self, id: IngredientId) -> FoodCostResult<Vec<Recipe>> {
        self.storage.recipes.recipes_using(id)
    }

    /// Update an ingredient
    pub fn update(&self, id: IngredientId, changes: IngredientUpdate) -> FoodCostResult<Ingredient> {
        let mut ingredient = self
            .storage
            .ingredients
            .get(id)?
            .ok_or_else(|| FoodCostError::ingredient_not_found(id.to_string()))?;

        if changes.is_empty() {
            return Ok(ingredient);
        }

        let before = ingredient.clone();

        if let Some(name) = &changes.name {
            let name = name.trim();
            if let Some(existing) = self.storage.ingredients.get_by_name(name)? {
                if existing.id != id {
                    return Err(FoodCostError::Duplicate {
                        entity_type: "Ingredient",
                        identifier: name.to_string(),
                    });
                }
            }
            ingredient.rename(name);
        }

        let unit = changes.unit.unwrap_or(ingredient.unit);
        if self.enforce_unit_categories && unit.category() != ingredient.unit.category() {
            let dependents = self.dependent_recipes(id)?;
            if !dependents.is_empty() {
                let names: Vec<&str> = dependents.iter().map(|r| r.name.as_str()).collect();
                return Err(FoodCostError::Validation(format!(
                    "Cannot change '{}' from {} to {}: used by {}",
                    ingredient.name,
                    ingredient.unit.category(),
                    unit.category(),
                    names.join(", ")
                )));
            }
        }

        ingredient.set_purchase(
            changes.price.unwrap_or(ingredient.price),
            changes.quantity.unwrap_or(ingredient.quantity),
            unit,
        );

        ingredient
            .validate()
            .map_err(|e| FoodCostError::Validation(e.to_string()))?;

        self.storage.ingredients.upsert(ingredient.clone())?;
        self.storage.ingredients.save()?;

        self.storage.log_update(
            EntityType::Ingredient,
            ingredient.id.to_string(),
            Some(ingredient.name.clone()),
            &before,
            &ingredient,
        )?;

        info!(id = %ingredient.id, name = %ingredient.name, "updated ingredient");
        Ok(ingredient)
    }

    /// Delete an ingredient
    ///
    /// Recipes using the ingredient keep their lines, which then cost zero.
    /// Without `force`, deletion is refused while such recipes exist.
    pub fn delete(&self, id: IngredientId, force: bool) -> FoodCostResult<IngredientDeletion> {
        let ingredient = self
            .storage
            .ingredients
            .get(id)?
            .ok_or_else(|| FoodCostError::ingredient_not_found(id.to_string()))?;

        let affected_recipes = self.dependent_recipes(id)?;
        if !affected_recipes.is_empty() && !force {
            let names: Vec<&str> = affected_recipes.iter().map(|r| r.name.as_str()).collect();
            return Err(FoodCostError::Validation(format!(
                "'{}' is used by {}; pass --force to delete anyway",
                ingredient.name,
                names.join(", ")
            )));
        }

        self.storage.ingredients.delete(id)?;
        self.storage.ingredients.save()?;

        self.storage.log_delete(
            EntityType::Ingredient,
            id.to_string(),
            Some(ingredient.name.clone()),
            &ingredient,
        )?;

        for recipe in &affected_recipes {
            warn!(recipe = %recipe.name, ingredient = %ingredient.name, "recipe now has a dangling line");
        }
        info!(id = %id, name = %ingredient.name, "deleted ingredient");

        Ok(IngredientDeletion {
            ingredient,
            affected_recipes,
        })
    }

    /// Count ingredients
    pub fn count(&self) -> FoodCostResult<usize> {
        self.storage.ingredients.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FoodCostPaths;
    use crate::models::RecipeLine;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FoodCostPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_recipe_using(storage: &Storage, ingredient: &Ingredient) -> Recipe {
        let mut recipe = Recipe::new("Hotdog Clásico", "Hotdogs", 35.0);
        recipe.add_line(RecipeLine::new(ingredient.id, 100.0, Unit::Gram));
        storage.recipes.upsert(recipe.clone()).unwrap();
        recipe
    }

    #[test]
    fn test_create_ingredient() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);

        let ingredient = service
            .create("  Salchicha ", 80.0, 1.0, Unit::Kilogram)
            .unwrap();
        assert_eq!(ingredient.name, "Salchicha");
        assert_eq!(service.count().unwrap(), 1);
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);

        service.create("Salchicha", 80.0, 1.0, Unit::Kilogram).unwrap();
        let err = service
            .create("salchicha", 90.0, 1.0, Unit::Kilogram)
            .unwrap_err();
        assert!(matches!(err, FoodCostError::Duplicate { .. }));
    }

    #[test]
    fn test_create_rejects_zero_quantity() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);

        let err = service.create("Sal", 10.0, 0.0, Unit::Kilogram).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_name_and_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);
        let created = service.create("Mayonesa", 60.0, 1.0, Unit::Liter).unwrap();

        assert_eq!(service.find("MAYONESA").unwrap().unwrap().id, created.id);
        assert_eq!(
            service.find(&created.id.to_string()).unwrap().unwrap().id,
            created.id
        );
        assert!(service.find("Ketchup").unwrap().is_none());
        assert!(service.require("Ketchup").unwrap_err().is_not_found());
    }

    #[test]
    fn test_unit_cost() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);
        let sausage = service.create("Salchicha", 80.0, 1.0, Unit::Kilogram).unwrap();

        assert!((service.unit_cost(sausage.id).unwrap() - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_update_price_logs_diff() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);
        let sausage = service.create("Salchicha", 80.0, 1.0, Unit::Kilogram).unwrap();

        let updated = service
            .update(
                sausage.id,
                IngredientUpdate {
                    price: Some(92.5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, 92.5);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("price: 80.0 -> 92.5")
        );
    }

    #[test]
    fn test_update_within_category_is_allowed_when_used() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);
        let sausage = service.create("Salchicha", 80.0, 1.0, Unit::Kilogram).unwrap();
        add_recipe_using(&storage, &sausage);

        let updated = service
            .update(
                sausage.id,
                IngredientUpdate {
                    quantity: Some(500.0),
                    unit: Some(Unit::Gram),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.unit, Unit::Gram);
    }

    #[test]
    fn test_update_category_change_blocked_when_used() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);
        let sausage = service.create("Salchicha", 80.0, 1.0, Unit::Kilogram).unwrap();
        add_recipe_using(&storage, &sausage);

        let err = service
            .update(
                sausage.id,
                IngredientUpdate {
                    unit: Some(Unit::Liter),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Hotdog Clásico"));

        let relaxed = IngredientService::new(&storage).with_unit_checks(false);
        assert!(relaxed
            .update(
                sausage.id,
                IngredientUpdate {
                    unit: Some(Unit::Liter),
                    ..Default::default()
                },
            )
            .is_ok());
    }

    #[test]
    fn test_rename_to_existing_name_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);
        service.create("Salchicha", 80.0, 1.0, Unit::Kilogram).unwrap();
        let mayo = service.create("Mayonesa", 60.0, 1.0, Unit::Liter).unwrap();

        let err = service
            .update(
                mayo.id,
                IngredientUpdate {
                    name: Some("Salchicha".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, FoodCostError::Duplicate { .. }));
    }

    #[test]
    fn test_delete_unused() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);
        let sausage = service.create("Salchicha", 80.0, 1.0, Unit::Kilogram).unwrap();

        let deletion = service.delete(sausage.id, false).unwrap();
        assert!(deletion.affected_recipes.is_empty());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_used_requires_force() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IngredientService::new(&storage);
        let sausage = service.create("Salchicha", 80.0, 1.0, Unit::Kilogram).unwrap();
        let recipe = add_recipe_using(&storage, &sausage);

        assert!(service.delete(sausage.id, false).unwrap_err().is_validation());
        assert_eq!(service.count().unwrap(), 1);

        let deletion = service.delete(sausage.id, true).unwrap();
        assert_eq!(deletion.affected_recipes.len(), 1);
        assert_eq!(deletion.affected_recipes[0].id, recipe.id);

        // The recipe keeps its dangling line
        let kept = storage.recipes.get(recipe.id).unwrap().unwrap();
        assert_eq!(kept.lines.len(), 1);
    }
}
