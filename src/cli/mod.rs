//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod convert;
pub mod export;
pub mod ingredient;
pub mod recipe;

pub use audit::handle_audit_command;
pub use convert::{handle_convert_command, handle_units_command};
pub use export::{handle_export_command, handle_import_command, ExportCommands};
pub use ingredient::{handle_ingredient_command, IngredientCommands};
pub use recipe::{handle_recipe_command, RecipeCommands};
