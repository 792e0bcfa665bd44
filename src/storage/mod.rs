//! Storage layer for foodcost
//!
//! JSON file storage with atomic writes, plus the audit log every mutation
//! is recorded in.

pub mod file_io;
pub mod ingredients;
pub mod init;
pub mod recipes;

pub use file_io::{read_json, write_json_atomic};
pub use ingredients::{IngredientData, IngredientRepository};
pub use init::{initialize_storage, sample_catalogue};
pub use recipes::{RecipeData, RecipeRepository};

use std::collections::HashMap;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FoodCostPaths;
use crate::error::FoodCostError;
use crate::models::{Ingredient, IngredientId, Recipe};

/// Point-in-time copy of both collections, used for costing
#[derive(Debug, Clone, Default)]
pub struct CostingSnapshot {
    pub ingredients: HashMap<IngredientId, Ingredient>,
    pub recipes: Vec<Recipe>,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FoodCostPaths,
    pub ingredients: IngredientRepository,
    pub recipes: RecipeRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FoodCostPaths) -> Result<Self, FoodCostError> {
        paths.ensure_directories()?;

        Ok(Self {
            ingredients: IngredientRepository::new(paths.ingredients_file()),
            recipes: RecipeRepository::new(paths.recipes_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FoodCostPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FoodCostError> {
        self.ingredients.load()?;
        self.recipes.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FoodCostError> {
        self.ingredients.save()?;
        self.recipes.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Copy both collections for costing
    pub fn snapshot(&self) -> Result<CostingSnapshot, FoodCostError> {
        Ok(CostingSnapshot {
            ingredients: self.ingredients.to_map()?,
            recipes: self.recipes.get_all()?,
        })
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FoodCostError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), FoodCostError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FoodCostError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
