//! Recipe service
//!
//! Business logic for recipes and their ingredient lines, plus costing of
//! stored recipes against the current ingredient catalogue.

use tracing::{info, warn};

use crate::audit::EntityType;
use crate::costing::{breakdown_total, cost_breakdown, ensure_compatible, CostBreakdown};
use crate::error::{FoodCostError, FoodCostResult};
use crate::models::{IngredientId, Recipe, RecipeId, RecipeLine, Unit};
use crate::storage::Storage;

/// Service for recipe management
pub struct RecipeService<'a> {
    storage: &'a Storage,
    enforce_unit_categories: bool,
}

/// Fields to change on a recipe; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub sale_price: Option<f64>,
}

impl RecipeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.sale_price.is_none()
    }
}

/// A recipe with its current total cost
#[derive(Debug, Clone)]
pub struct CostedRecipe {
    pub recipe: Recipe,
    pub cost: f64,
}

impl<'a> RecipeService<'a> {
    /// Create a new recipe service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            enforce_unit_categories: true,
        }
    }

    /// Toggle the unit category check when adding lines
    pub fn with_unit_checks(mut self, enforce: bool) -> Self {
        self.enforce_unit_categories = enforce;
        self
    }

    /// Create a new recipe with no lines
    pub fn create(&self, name: &str, category: &str, sale_price: f64) -> FoodCostResult<Recipe> {
        let name = name.trim();

        if self.storage.recipes.get_by_name(name)?.is_some() {
            return Err(FoodCostError::Duplicate {
                entity_type: "Recipe",
                identifier: name.to_string(),
            });
        }

        let recipe = Recipe::new(name, category.trim(), sale_price);
        recipe
            .validate()
            .map_err(|e| FoodCostError::Validation(e.to_string()))?;

        self.storage.recipes.upsert(recipe.clone())?;
        self.storage.recipes.save()?;

        self.storage.log_create(
            EntityType::Recipe,
            recipe.id.to_string(),
            Some(recipe.name.clone()),
            &recipe,
        )?;

        info!(id = %recipe.id, name = %recipe.name, "created recipe");
        Ok(recipe)
    }

    /// Get a recipe by ID
    pub fn get(&self, id: RecipeId) -> FoodCostResult<Option<Recipe>> {
        self.storage.recipes.get(id)
    }

    /// Find a recipe by name, full ID, or short ID
    pub fn find(&self, identifier: &str) -> FoodCostResult<Option<Recipe>> {
        if let Some(recipe) = self.storage.recipes.get_by_name(identifier)? {
            return Ok(Some(recipe));
        }

        if let Ok(id) = identifier.trim().parse::<RecipeId>() {
            if let Some(recipe) = self.storage.recipes.get(id)? {
                return Ok(Some(recipe));
            }
        }

        self.storage.recipes.find_by_short_id(identifier)
    }

    /// Find a recipe or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FoodCostResult<Recipe> {
        self.find(identifier)?
            .ok_or_else(|| FoodCostError::recipe_not_found(identifier))
    }

    /// List all recipes
    pub fn list(&self) -> FoodCostResult<Vec<Recipe>> {
        self.storage.recipes.get_all()
    }

    /// List recipes in a category
    pub fn list_by_category(&self, category: &str) -> FoodCostResult<Vec<Recipe>> {
        self.storage.recipes.get_by_category(category)
    }

    /// Cost a list of recipes against the current ingredients
    pub fn with_costs(&self, recipes: Vec<Recipe>) -> FoodCostResult<Vec<CostedRecipe>> {
        let ingredients = self.storage.ingredients.to_map()?;
        Ok(recipes
            .into_iter()
            .map(|recipe| CostedRecipe {
                cost: breakdown_total(&recipe, &ingredients),
                recipe,
            })
            .collect())
    }

    /// Line-by-line costing of a recipe
    pub fn breakdown(&self, id: RecipeId) -> FoodCostResult<CostBreakdown> {
        let recipe = self
            .storage
            .recipes
            .get(id)?
            .ok_or_else(|| FoodCostError::recipe_not_found(id.to_string()))?;
        let ingredients = self.storage.ingredients.to_map()?;

        let breakdown = cost_breakdown(&recipe, &ingredients);
        for warning in &breakdown.warnings {
            warn!(recipe = %recipe.name, "{}", warning);
        }
        Ok(breakdown)
    }

    /// Update a recipe's name, category or sale price
    pub fn update(&self, id: RecipeId, changes: RecipeUpdate) -> FoodCostResult<Recipe> {
        let mut recipe = self
            .storage
            .recipes
            .get(id)?
            .ok_or_else(|| FoodCostError::recipe_not_found(id.to_string()))?;

        if changes.is_empty() {
            return Ok(recipe);
        }

        let before = recipe.clone();

        if let Some(name) = &changes.name {
            let name = name.trim();
            if let Some(existing) = self.storage.recipes.get_by_name(name)? {
                if existing.id != id {
                    return Err(FoodCostError::Duplicate {
                        entity_type: "Recipe",
                        identifier: name.to_string(),
                    });
                }
            }
            recipe.name = name.to_string();
        }
        if let Some(category) = &changes.category {
            recipe.category = category.trim().to_string();
        }
        if let Some(sale_price) = changes.sale_price {
            recipe.sale_price = sale_price;
        }
        recipe.updated_at = chrono::Utc::now();

        recipe
            .validate()
            .map_err(|e| FoodCostError::Validation(e.to_string()))?;

        self.save_update(&before, &recipe)?;
        info!(id = %recipe.id, name = %recipe.name, "updated recipe");
        Ok(recipe)
    }

    /// Append an ingredient line to a recipe
    pub fn add_line(
        &self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
        quantity: f64,
        unit: Unit,
    ) -> FoodCostResult<(Recipe, RecipeLine)> {
        let mut recipe = self
            .storage
            .recipes
            .get(recipe_id)?
            .ok_or_else(|| FoodCostError::recipe_not_found(recipe_id.to_string()))?;
        let ingredient = self
            .storage
            .ingredients
            .get(ingredient_id)?
            .ok_or_else(|| FoodCostError::ingredient_not_found(ingredient_id.to_string()))?;

        if self.enforce_unit_categories {
            ensure_compatible(unit, ingredient.unit)?;
        }

        let before = recipe.clone();
        let line = RecipeLine::new(ingredient.id, quantity, unit);
        recipe.add_line(line.clone());

        recipe
            .validate()
            .map_err(|e| FoodCostError::Validation(e.to_string()))?;

        self.save_update(&before, &recipe)?;
        info!(recipe = %recipe.name, ingredient = %ingredient.name, "added recipe line");
        Ok((recipe, line))
    }

    /// Remove a line by position (1-based) or short line ID
    pub fn remove_line(
        &self,
        recipe_id: RecipeId,
        line: &str,
    ) -> FoodCostResult<(Recipe, RecipeLine)> {
        let mut recipe = self
            .storage
            .recipes
            .get(recipe_id)?
            .ok_or_else(|| FoodCostError::recipe_not_found(recipe_id.to_string()))?;

        let line_id = recipe
            .find_line(line)
            .map(|l| l.id)
            .ok_or_else(|| FoodCostError::line_not_found(line))?;

        let before = recipe.clone();
        let removed = recipe
            .remove_line(line_id)
            .ok_or_else(|| FoodCostError::line_not_found(line))?;

        self.save_update(&before, &recipe)?;
        info!(recipe = %recipe.name, line = %removed.id, "removed recipe line");
        Ok((recipe, removed))
    }

    /// Delete a recipe
    pub fn delete(&self, id: RecipeId) -> FoodCostResult<Recipe> {
        let recipe = self
            .storage
            .recipes
            .get(id)?
            .ok_or_else(|| FoodCostError::recipe_not_found(id.to_string()))?;

        self.storage.recipes.delete(id)?;
        self.storage.recipes.save()?;

        self.storage.log_delete(
            EntityType::Recipe,
            id.to_string(),
            Some(recipe.name.clone()),
            &recipe,
        )?;

        info!(id = %id, name = %recipe.name, "deleted recipe");
        Ok(recipe)
    }

    /// Count recipes
    pub fn count(&self) -> FoodCostResult<usize> {
        self.storage.recipes.count()
    }

    fn save_update(&self, before: &Recipe, after: &Recipe) -> FoodCostResult<()> {
        self.storage.recipes.upsert(after.clone())?;
        self.storage.recipes.save()?;

        self.storage.log_update(
            EntityType::Recipe,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
        )
    }
}
