//! Export module for foodcost
//!
//! - CSV: ingredient and recipe tables (spreadsheet-compatible)
//! - JSON: machine-readable full export, also accepted by `foodcost import`
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_ingredients_csv, export_recipes_csv};
pub use json::{
    export_full_json, import_from_json, ExportMetadata, FullExport, ImportSummary,
    EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_full_yaml, import_from_yaml};
