//! Path management for foodcost
//!
//! Provides platform-aware path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `FOODCOST_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/foodcost` on Linux, `%APPDATA%\foodcost\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FoodCostError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FOODCOST_DATA_DIR";

/// Manages all paths used by foodcost
#[derive(Debug, Clone)]
pub struct FoodCostPaths {
    /// Base directory for all foodcost data
    base_dir: PathBuf,
}

impl FoodCostPaths {
    /// Create a new FoodCostPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `FOODCOST_DATA_DIR` is not set.
    pub fn new() -> Result<Self, FoodCostError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FoodCostPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to ingredients.json
    pub fn ingredients_file(&self) -> PathBuf {
        self.data_dir().join("ingredients.json")
    }

    /// Get the path to recipes.json
    pub fn recipes_file(&self) -> PathBuf {
        self.data_dir().join("recipes.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FoodCostError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FoodCostError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FoodCostError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if foodcost has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FoodCostError> {
    ProjectDirs::from("", "", "foodcost")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            FoodCostError::Config(format!(
                "Could not determine a home directory; set {} instead",
                DATA_DIR_ENV
            ))
        })
}
