//! foodcost - ingredient costing and recipe profitability
//!
//! This library provides the core functionality for the foodcost CLI: a unit
//! conversion engine for mass, volume and count, and cost aggregation that
//! turns ingredient purchase prices into recipe costs, profit and margin.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `costing`: Unit conversion and cost aggregation (pure functions)
//! - `models`: Units, ingredients and recipes
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Dashboard statistics
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV export, JSON/YAML import
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use foodcost::costing::{convert, recipe_cost};
//! use foodcost::models::Unit;
//!
//! assert_eq!(convert(1.0, Unit::Kilogram, Unit::Gram)?, 1000.0);
//! let cost = recipe_cost(&recipe.lines, &ingredients);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod costing;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::FoodCostError;
