//! Ingredient CLI commands
//!
//! Implements CLI commands for managing the ingredient catalogue.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_ingredient_details, format_ingredient_list};
use crate::error::FoodCostResult;
use crate::models::Unit;
use crate::services::{IngredientService, IngredientUpdate};
use crate::storage::Storage;

/// Ingredient subcommands
#[derive(Subcommand)]
pub enum IngredientCommands {
    /// Add a purchased ingredient
    Add {
        /// Ingredient name
        name: String,
        /// Total price paid
        price: f64,
        /// Purchased quantity
        quantity: f64,
        /// Unit of the purchased quantity (kg, g, L, ml, pz)
        unit: Unit,
    },
    /// List all ingredients with their unit costs
    List,
    /// Show ingredient details
    Show {
        /// Ingredient name or ID
        ingredient: String,
    },
    /// Edit an ingredient
    Edit {
        /// Ingredient name or ID
        ingredient: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New total price
        #[arg(short, long)]
        price: Option<f64>,
        /// New purchased quantity
        #[arg(short, long)]
        quantity: Option<f64>,
        /// New unit
        #[arg(short, long)]
        unit: Option<Unit>,
    },
    /// Delete an ingredient
    Delete {
        /// Ingredient name or ID
        ingredient: String,
        /// Delete even if recipes use it (their lines will cost zero)
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an ingredient command
pub fn handle_ingredient_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IngredientCommands,
) -> FoodCostResult<()> {
    let service =
        IngredientService::new(storage).with_unit_checks(settings.enforce_unit_categories);

    match cmd {
        IngredientCommands::Add {
            name,
            price,
            quantity,
            unit,
        } => {
            let ingredient = service.create(&name, price, quantity, unit)?;
            let unit_cost = service.unit_cost(ingredient.id)?;
            println!("Created ingredient: {}", ingredient.name);
            println!("  ID: {}", ingredient.id);
            println!(
                "  Unit cost: {}",
                crate::display::format_unit_cost(&settings.currency_symbol, unit_cost)
            );
        }

        IngredientCommands::List => {
            let items = service.list_with_costs()?;
            println!("{}", format_ingredient_list(&items, settings));
        }

        IngredientCommands::Show { ingredient } => {
            let ingredient = service.require(&ingredient)?;
            let unit_cost = service.unit_cost(ingredient.id)?;
            let used_by = service.dependent_recipes(ingredient.id)?;
            print!(
                "{}",
                format_ingredient_details(&ingredient, unit_cost, &used_by, settings)
            );
        }

        IngredientCommands::Edit {
            ingredient,
            name,
            price,
            quantity,
            unit,
        } => {
            let existing = service.require(&ingredient)?;
            let changes = IngredientUpdate {
                name,
                price,
                quantity,
                unit,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --name, --price, --quantity or --unit.");
                return Ok(());
            }

            let updated = service.update(existing.id, changes)?;
            println!("Updated ingredient: {}", updated.name);
        }

        IngredientCommands::Delete { ingredient, force } => {
            let existing = service.require(&ingredient)?;
            let deletion = service.delete(existing.id, force)?;
            println!("Deleted ingredient: {}", deletion.ingredient.name);

            if !deletion.affected_recipes.is_empty() {
                println!("These recipes now have a line with no ingredient (costed as 0):");
                for recipe in &deletion.affected_recipes {
                    println!("  - {}", recipe.name);
                }
            }
        }
    }

    Ok(())
}
