//! Core data models for foodcost
//!
//! This module contains the data structures of the costing domain:
//! units of measure, ingredients, and recipes.

pub mod ids;
pub mod ingredient;
pub mod recipe;
pub mod unit;

pub use ids::{IngredientId, RecipeId, RecipeLineId};
pub use ingredient::{Ingredient, IngredientValidationError};
pub use recipe::{Recipe, RecipeLine, RecipeValidationError};
pub use unit::{MeasurementCategory, Quantity, Unit, UnitParseError};
