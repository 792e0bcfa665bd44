//! Configuration module for foodcost
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FoodCostPaths;
pub use settings::Settings;
