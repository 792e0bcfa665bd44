//! Audit logging
//!
//! Records every create, update and delete of ingredients and recipes with
//! before/after values in an append-only JSONL log.
//!
//! - `AuditEntry`: one logged operation, with a diff summary for updates.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `generate_diff`: top-level field diff between two serialized states.
//!
//! # Example
//!
//! ```rust,ignore
//! use foodcost::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::update(
//!     EntityType::Ingredient,
//!     ingredient.id.to_string(),
//!     Some(ingredient.name.clone()),
//!     &before,
//!     &ingredient,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
