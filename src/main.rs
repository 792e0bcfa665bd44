use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use foodcost::cli::{
    handle_audit_command, handle_convert_command, handle_export_command, handle_import_command,
    handle_ingredient_command, handle_recipe_command, handle_units_command,
};
use foodcost::config::{paths::FoodCostPaths, settings::Settings};
use foodcost::models::Unit;
use foodcost::reports::DashboardReport;
use foodcost::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "FOODCOST_LOG";

#[derive(Parser)]
#[command(
    name = "foodcost",
    version,
    about = "Ingredient costing and recipe profitability from the command line",
    long_about = "foodcost tracks what you pay for ingredients, converts between \
                  units of mass, volume and count, and works out what each recipe \
                  costs to make and the profit and margin at its sale price."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Start with no ingredients or recipes instead of the sample menu
        #[arg(long)]
        empty: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Ingredient management commands
    #[command(subcommand, alias = "ing")]
    Ingredient(foodcost::cli::IngredientCommands),

    /// Recipe management commands
    #[command(subcommand)]
    Recipe(foodcost::cli::RecipeCommands),

    /// Convert a quantity between units
    #[command(allow_negative_numbers = true)]
    Convert {
        /// Value to convert
        value: f64,
        /// Unit to convert from (kg, g, L, ml, pz)
        from: Unit,
        /// Unit to convert to (kg, g, L, ml, pz)
        to: Unit,
    },

    /// List supported units
    Units,

    /// Show catalogue statistics and recent recipes
    #[command(alias = "dash")]
    Dashboard,

    /// Export data
    #[command(subcommand)]
    Export(foodcost::cli::ExportCommands),

    /// Replace all ingredients and recipes with an export file
    Import {
        /// Path to a JSON or YAML export
        input: PathBuf,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let mut filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("foodcost=warn"));
    if verbose {
        filter = filter.add_directive("foodcost=debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    // Commands that need no stored data
    match &cli.command {
        Some(Commands::Convert { value, from, to }) => {
            handle_convert_command(*value, *from, *to)?;
            return Ok(());
        }
        Some(Commands::Units) => {
            handle_units_command();
            return Ok(());
        }
        None => {
            println!("foodcost - ingredient costing and recipe profitability");
            println!();
            println!("Run 'foodcost --help' for usage information.");
            println!("Run 'foodcost init' to create the data directory.");
            return Ok(());
        }
        _ => {}
    }

    // Initialize paths and settings
    let paths = FoodCostPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved data directory");

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init { empty }) => {
            let already = storage.is_initialized();
            foodcost::storage::initialize_storage(&paths, !empty)?;
            settings.save(&paths)?;

            if already {
                println!("foodcost is already initialized at: {}", paths.base_dir().display());
                println!("Existing data was left untouched.");
            } else {
                println!("Initialized foodcost at: {}", paths.base_dir().display());
                if !empty {
                    storage.load_all()?;
                    println!(
                        "Sample menu created: {} ingredients, {} recipe.",
                        storage.ingredients.count()?,
                        storage.recipes.count()?
                    );
                }
                println!();
                println!("Run 'foodcost dashboard' to see an overview.");
            }
        }
        Some(Commands::Config) => {
            println!("foodcost Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:        {}", settings.currency_symbol);
            println!("  Healthy margin:         {}%", settings.healthy_margin_percent);
            println!("  Fair margin:            {}%", settings.fair_margin_percent);
            println!("  Recent recipes shown:   {}", settings.recent_recipes);
            println!("  Enforce unit categories: {}", settings.enforce_unit_categories);
        }
        Some(Commands::Ingredient(cmd)) => {
            handle_ingredient_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Recipe(cmd)) => {
            handle_recipe_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Dashboard) => {
            let report = DashboardReport::generate(&storage, &settings)?;
            print!("{}", report.format_terminal(&settings));
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Import { input }) => {
            handle_import_command(&storage, &input)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Convert { .. }) | Some(Commands::Units) | None => {}
    }

    Ok(())
}
