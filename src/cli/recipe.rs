//! Recipe CLI commands
//!
//! Implements CLI commands for recipes, their ingredient lines, and costing.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_amount, format_breakdown, format_quantity, format_recipe_list};
use crate::error::FoodCostResult;
use crate::models::Unit;
use crate::services::{IngredientService, RecipeService, RecipeUpdate};
use crate::storage::Storage;

/// Recipe subcommands
#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Create a recipe
    Create {
        /// Recipe name
        name: String,
        /// Sale price
        sale_price: f64,
        /// Menu category (e.g., "Hotdogs")
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// List recipes with cost and margin
    List {
        /// Only show recipes in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a recipe's cost breakdown
    Show {
        /// Recipe name or ID
        recipe: String,
    },
    /// Edit a recipe's name, category or sale price
    Edit {
        /// Recipe name or ID
        recipe: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New sale price
        #[arg(short, long)]
        price: Option<f64>,
    },
    /// Delete a recipe
    Delete {
        /// Recipe name or ID
        recipe: String,
    },
    /// Add an ingredient line to a recipe
    AddLine {
        /// Recipe name or ID
        recipe: String,
        /// Ingredient name or ID
        ingredient: String,
        /// Required quantity
        quantity: f64,
        /// Unit of the required quantity (kg, g, L, ml, pz)
        unit: Unit,
    },
    /// Remove an ingredient line from a recipe
    RemoveLine {
        /// Recipe name or ID
        recipe: String,
        /// Line position (as shown by `recipe show`) or line ID
        line: String,
    },
}

/// Handle a recipe command
pub fn handle_recipe_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecipeCommands,
) -> FoodCostResult<()> {
    let service = RecipeService::new(storage).with_unit_checks(settings.enforce_unit_categories);

    match cmd {
        RecipeCommands::Create {
            name,
            sale_price,
            category,
        } => {
            let recipe = service.create(&name, &category, sale_price)?;
            println!("Created recipe: {}", recipe);
            println!("  ID: {}", recipe.id);
            println!(
                "Add ingredients with: foodcost recipe add-line \"{}\" <ingredient> <quantity> <unit>",
                recipe.name
            );
        }

        RecipeCommands::List { category } => {
            let recipes = match category {
                Some(category) => service.list_by_category(&category)?,
                None => service.list()?,
            };
            let items = service.with_costs(recipes)?;
            println!("{}", format_recipe_list(&items, settings));
        }

        RecipeCommands::Show { recipe } => {
            let recipe = service.require(&recipe)?;
            let breakdown = service.breakdown(recipe.id)?;
            print!("{}", format_breakdown(&recipe, &breakdown, settings));
        }

        RecipeCommands::Edit {
            recipe,
            name,
            category,
            price,
        } => {
            let existing = service.require(&recipe)?;
            let changes = RecipeUpdate {
                name,
                category,
                sale_price: price,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --name, --category or --price.");
                return Ok(());
            }

            let updated = service.update(existing.id, changes)?;
            println!("Updated recipe: {}", updated);
        }

        RecipeCommands::Delete { recipe } => {
            let existing = service.require(&recipe)?;
            let deleted = service.delete(existing.id)?;
            println!("Deleted recipe: {}", deleted.name);
        }

        RecipeCommands::AddLine {
            recipe,
            ingredient,
            quantity,
            unit,
        } => {
            let recipe = service.require(&recipe)?;
            let ingredient = IngredientService::new(storage).require(&ingredient)?;
            let (updated, _) = service.add_line(recipe.id, ingredient.id, quantity, unit)?;
            println!(
                "Added {} {} of {} to {} (line {})",
                format_quantity(quantity),
                unit,
                ingredient.name,
                updated.name,
                updated.lines.len()
            );
        }

        RecipeCommands::RemoveLine { recipe, line } => {
            let recipe = service.require(&recipe)?;
            let (updated, removed) = service.remove_line(recipe.id, &line)?;
            println!(
                "Removed {} line from {}",
                format_amount(removed.required()),
                updated.name
            );
        }
    }

    Ok(())
}
