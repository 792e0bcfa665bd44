//! YAML Export functionality
//!
//! Exports the complete catalogue to YAML for human-readable backup.

use std::io::Write;

use crate::error::{FoodCostError, FoodCostResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FoodCostResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(
        writer,
        "# foodcost export\n# Generated: {}\n# App Version: {}\n",
        export.exported_at, export.app_version
    )
    .map_err(|e| FoodCostError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FoodCostError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> FoodCostResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FoodCostError::Import(e.to_string()))?;

    export.validate().map_err(FoodCostError::Import)?;

    Ok(export)
}
