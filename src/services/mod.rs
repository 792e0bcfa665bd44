//! Service layer for foodcost
//!
//! Business logic on top of the storage layer: validation, duplicate checks,
//! cross-entity rules between ingredients and recipe lines, and audit logging.

pub mod ingredient;
pub mod recipe;

pub use ingredient::{IngredientCost, IngredientDeletion, IngredientService, IngredientUpdate};
pub use recipe::{CostedRecipe, RecipeService, RecipeUpdate};
