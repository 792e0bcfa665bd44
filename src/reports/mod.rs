//! Reports module for foodcost
//!
//! Catalogue-wide summaries built from a costing snapshot.

pub mod dashboard;

pub use dashboard::{DashboardReport, MarginTier, RecentRecipeRow};
