//! CLI commands for data export and import
//!
//! Provides commands for exporting data in various formats and restoring a
//! JSON or YAML export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{FoodCostError, FoodCostResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Full export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (full database)
    Json,
    /// YAML format (full database, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all ingredients and recipes to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export ingredients with unit costs to CSV
    Ingredients {
        /// Output file path
        output: PathBuf,
    },

    /// Export recipes with cost, profit and margin to CSV
    Recipes {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FoodCostResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
            }
            finish(writer)?;
            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Ingredients { output } => {
            let mut writer = create_output(&output)?;
            csv::export_ingredients_csv(storage, &mut writer)?;
            finish(writer)?;

            let count = storage.ingredients.count()?;
            println!("Exported {} ingredients to: {}", count, output.display());
        }

        ExportCommands::Recipes { output } => {
            let mut writer = create_output(&output)?;
            csv::export_recipes_csv(storage, &mut writer)?;
            finish(writer)?;

            let count = storage.recipes.count()?;
            println!("Exported {} recipes to: {}", count, output.display());
        }

        ExportCommands::Info => {
            let export = json::FullExport::from_storage(storage)?;
            println!("Export Information");
            println!("==================");
            println!("Schema version:      {}", export.schema_version);
            println!("App version:         {}", export.app_version);
            println!("Ingredients:         {}", export.metadata.ingredient_count);
            println!("Recipes:             {}", export.metadata.recipe_count);
            println!("Recipe lines:        {}", export.metadata.line_count);
        }
    }

    Ok(())
}

/// Replace all ingredients and recipes with the contents of an export file
///
/// The format is picked from the extension: `.yaml`/`.yml` for YAML,
/// anything else is read as JSON.
pub fn handle_import_command(storage: &Storage, input: &Path) -> FoodCostResult<()> {
    let contents = std::fs::read_to_string(input).map_err(|e| {
        FoodCostError::Import(format!("Failed to read {}: {}", input.display(), e))
    })?;

    let is_yaml = matches!(
        input.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let export = if is_yaml {
        yaml::import_from_yaml(&contents)?
    } else {
        json::import_from_json(&contents)?
    };

    let summary = export.restore(storage)?;
    println!(
        "Imported {} ingredients and {} recipes from: {}",
        summary.ingredients,
        summary.recipes,
        input.display()
    );

    Ok(())
}

fn create_output(output: &Path) -> FoodCostResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        FoodCostError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> FoodCostResult<()> {
    writer
        .flush()
        .map_err(|e| FoodCostError::Export(format!("Failed to flush output: {}", e)))
}
