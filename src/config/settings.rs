//! User settings for foodcost
//!
//! Manages user preferences: currency symbol, margin thresholds used to
//! grade recipes, and how strictly recipe lines are checked against their
//! ingredient's unit.

use serde::{Deserialize, Serialize};

use super::paths::FoodCostPaths;
use crate::error::FoodCostError;

/// User settings for foodcost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Margin (percent) at or above which a recipe is considered healthy
    #[serde(default = "default_healthy_margin")]
    pub healthy_margin_percent: f64,

    /// Margin (percent) at or above which a recipe is considered fair
    #[serde(default = "default_fair_margin")]
    pub fair_margin_percent: f64,

    /// Number of recipes listed on the dashboard
    #[serde(default = "default_recent_recipes")]
    pub recent_recipes: usize,

    /// Reject recipe lines whose unit category differs from the ingredient's
    #[serde(default = "default_enforce_unit_categories")]
    pub enforce_unit_categories: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_healthy_margin() -> f64 {
    50.0
}

fn default_fair_margin() -> f64 {
    30.0
}

fn default_recent_recipes() -> usize {
    5
}

fn default_enforce_unit_categories() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            healthy_margin_percent: default_healthy_margin(),
            fair_margin_percent: default_fair_margin(),
            recent_recipes: default_recent_recipes(),
            enforce_unit_categories: default_enforce_unit_categories(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FoodCostPaths) -> Result<Self, FoodCostError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FoodCostError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FoodCostError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FoodCostPaths) -> Result<(), FoodCostError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FoodCostError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FoodCostError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check that the margin thresholds are ordered
    pub fn validate(&self) -> Result<(), FoodCostError> {
        if self.fair_margin_percent > self.healthy_margin_percent {
            return Err(FoodCostError::Config(format!(
                "fair_margin_percent ({}) must not exceed healthy_margin_percent ({})",
                self.fair_margin_percent, self.healthy_margin_percent
            )));
        }
        Ok(())
    }

    /// Format an amount with the configured currency symbol and 2 decimals
    pub fn format_currency(&self, amount: f64) -> String {
        crate::display::format_currency(&self.currency_symbol, amount)
    }
}
