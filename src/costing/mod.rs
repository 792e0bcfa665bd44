//! Costing core
//!
//! Two pure components:
//!
//! - `conversion`: maps quantities to and from the base unit of their
//!   measurement category and converts between compatible units.
//! - `aggregate`: derives per-base-unit ingredient costs, recipe line costs,
//!   recipe totals, and profit/margin figures.
//!
//! Neither component holds state or performs I/O. Callers pass in snapshots of
//! the records they want costed.

pub mod aggregate;
pub mod conversion;

pub use aggregate::{
    average_recipe_cost, breakdown_total, checked_line_cost, cost_breakdown, line_cost,
    profit_and_margin, recipe_cost, unit_cost_of, CostBreakdown, CostWarning, IngredientLookup, LineCostDetail,
    ProfitAndMargin,
};
pub use conversion::{
    base_unit_of, category_of, convert, ensure_compatible, from_base, to_base,
    IncompatibleCategories,
};
