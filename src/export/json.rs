//! JSON Export functionality
//!
//! Exports the ingredient catalogue and recipes to JSON with schema
//! versioning, and restores them from such an export.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::costing::average_recipe_cost;
use crate::error::{FoodCostError, FoodCostResult};
use crate::models::{Ingredient, Recipe};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub ingredients: Vec<Ingredient>,

    pub recipes: Vec<Recipe>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub ingredient_count: usize,
    pub recipe_count: usize,
    pub line_count: usize,
    /// Average recipe cost at export time
    pub average_recipe_cost: f64,
}

/// What an import replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub ingredients: usize,
    pub recipes: usize,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> FoodCostResult<Self> {
        let ingredients = storage.ingredients.get_all()?;
        let recipes = storage.recipes.get_all()?;

        let metadata = ExportMetadata {
            ingredient_count: ingredients.len(),
            recipe_count: recipes.len(),
            line_count: recipes.iter().map(|r| r.lines.len()).sum(),
            average_recipe_cost: average_recipe_cost(&recipes, &ingredients),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            ingredients,
            recipes,
            metadata,
        })
    }

    /// Validate the export structure
    ///
    /// Recipe lines may reference ingredients missing from the export; those
    /// lines cost zero after import like any other dangling line.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut ingredient_ids = HashSet::new();
        let mut ingredient_names = HashSet::new();
        for ingredient in &self.ingredients {
            ingredient
                .validate()
                .map_err(|e| format!("Ingredient '{}': {}", ingredient.name, e))?;
            if !ingredient_ids.insert(ingredient.id) {
                return Err(format!("Duplicate ingredient ID {}", ingredient.id));
            }
            if !ingredient_names.insert(Ingredient::normalize_name(&ingredient.name)) {
                return Err(format!("Duplicate ingredient name '{}'", ingredient.name));
            }
        }

        let mut recipe_ids = HashSet::new();
        let mut recipe_names = HashSet::new();
        for recipe in &self.recipes {
            recipe
                .validate()
                .map_err(|e| format!("Recipe '{}': {}", recipe.name, e))?;
            if !recipe_ids.insert(recipe.id) {
                return Err(format!("Duplicate recipe ID {}", recipe.id));
            }
            if !recipe_names.insert(Recipe::normalize_name(&recipe.name)) {
                return Err(format!("Duplicate recipe name '{}'", recipe.name));
            }
        }

        Ok(())
    }

    /// Replace the stored ingredients and recipes with this export
    pub fn restore(self, storage: &Storage) -> FoodCostResult<ImportSummary> {
        self.validate().map_err(FoodCostError::Import)?;

        let summary = ImportSummary {
            ingredients: self.ingredients.len(),
            recipes: self.recipes.len(),
        };

        let mut entries = Vec::with_capacity(summary.ingredients + summary.recipes);
        entries.extend(self.ingredients.iter().map(|i| {
            AuditEntry::create(EntityType::Ingredient, i.id.to_string(), Some(i.name.clone()), i)
        }));
        entries.extend(self.recipes.iter().map(|r| {
            AuditEntry::create(EntityType::Recipe, r.id.to_string(), Some(r.name.clone()), r)
        }));

        storage.ingredients.replace_all(self.ingredients)?;
        storage.recipes.replace_all(self.recipes)?;
        storage.save_all()?;
        storage.audit().log_batch(&entries)?;

        info!(
            ingredients = summary.ingredients,
            recipes = summary.recipes,
            "restored catalogue from export"
        );
        Ok(summary)
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FoodCostResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FoodCostError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> FoodCostResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| FoodCostError::Import(e.to_string()))?;

    export.validate().map_err(FoodCostError::Import)?;

    Ok(export)
}
