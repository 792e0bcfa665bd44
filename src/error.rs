//! Custom error types for foodcost
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::costing::IncompatibleCategories;

/// The main error type for foodcost operations
#[derive(Error, Debug)]
pub enum FoodCostError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Units from different measurement categories were mixed
    #[error(transparent)]
    IncompatibleUnits(#[from] IncompatibleCategories),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl FoodCostError {
    /// Create a "not found" error for ingredients
    pub fn ingredient_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Ingredient",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recipes
    pub fn recipe_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recipe",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recipe lines
    pub fn line_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recipe line",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FoodCostError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FoodCostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for foodcost operations
pub type FoodCostResult<T> = Result<T, FoodCostError>;
