//! Dashboard Report
//!
//! Catalogue-wide statistics: how many ingredients and recipes exist, the
//! average recipe cost, and the most recently added recipes graded by margin.

use std::fmt;

use serde::Serialize;

use crate::config::Settings;
use crate::costing::{average_recipe_cost, breakdown_total, profit_and_margin};
use crate::display::format_percent;
use crate::error::FoodCostResult;
use crate::models::RecipeId;
use crate::storage::{CostingSnapshot, Storage};

/// How healthy a recipe's margin is relative to the configured thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginTier {
    Healthy,
    Fair,
    Low,
}

impl MarginTier {
    /// Grade a margin percentage
    pub fn classify(margin_percent: f64, settings: &Settings) -> Self {
        if margin_percent >= settings.healthy_margin_percent {
            Self::Healthy
        } else if margin_percent >= settings.fair_margin_percent {
            Self::Fair
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for MarginTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Fair => write!(f, "fair"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// One recipe on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct RecentRecipeRow {
    pub recipe_id: RecipeId,
    pub name: String,
    pub category: String,
    pub cost: f64,
    pub sale_price: f64,
    pub profit: f64,
    pub margin_percent: f64,
    pub tier: MarginTier,
}

/// Dashboard Report
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub ingredient_count: usize,
    pub recipe_count: usize,
    /// Mean cost over all recipes; 0 when there are none
    pub average_recipe_cost: f64,
    /// Newest recipes first
    pub recent: Vec<RecentRecipeRow>,
}

impl DashboardReport {
    /// Generate the dashboard from the current store
    pub fn generate(storage: &Storage, settings: &Settings) -> FoodCostResult<Self> {
        Ok(Self::from_snapshot(&storage.snapshot()?, settings))
    }

    /// Generate the dashboard from a snapshot
    pub fn from_snapshot(snapshot: &CostingSnapshot, settings: &Settings) -> Self {
        let mut newest: Vec<_> = snapshot.recipes.iter().collect();
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let recent = newest
            .into_iter()
            .take(settings.recent_recipes)
            .map(|recipe| {
                let cost = breakdown_total(recipe, &snapshot.ingredients);
                let figures = profit_and_margin(cost, recipe.sale_price);
                RecentRecipeRow {
                    recipe_id: recipe.id,
                    name: recipe.name.clone(),
                    category: recipe.category.clone(),
                    cost,
                    sale_price: recipe.sale_price,
                    profit: figures.profit,
                    margin_percent: figures.margin_percent,
                    tier: MarginTier::classify(figures.margin_percent, settings),
                }
            })
            .collect();

        Self {
            ingredient_count: snapshot.ingredients.len(),
            recipe_count: snapshot.recipes.len(),
            average_recipe_cost: average_recipe_cost(&snapshot.recipes, &snapshot.ingredients),
            recent,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();

        output.push_str("Dashboard\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Ingredients:          {:>10}\n", self.ingredient_count));
        output.push_str(&format!("Recipes:              {:>10}\n", self.recipe_count));
        output.push_str(&format!(
            "Average recipe cost:  {:>10}\n",
            settings.format_currency(self.average_recipe_cost)
        ));
        output.push('\n');

        if self.recent.is_empty() {
            output.push_str("No recipes yet. Create one with `foodcost recipe create`.\n");
            return output;
        }

        output.push_str("Recent recipes\n");
        output.push_str(&format!(
            "{:<28} {:>10} {:>10} {:>8}  {}\n",
            "Recipe", "Cost", "Price", "Margin", "Tier"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.recent {
            output.push_str(&format!(
                "{:<28} {:>10} {:>10} {:>8}  {}\n",
                row.name,
                settings.format_currency(row.cost),
                settings.format_currency(row.sale_price),
                format_percent(row.margin_percent),
                row.tier
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample_catalogue;
    use chrono::Duration;

    fn sample_snapshot() -> CostingSnapshot {
        let (ingredients, recipes) = sample_catalogue();
        CostingSnapshot {
            ingredients: ingredients.into_iter().map(|i| (i.id, i)).collect(),
            recipes,
        }
    }

    #[test]
    fn test_margin_tiers() {
        let settings = Settings::default();
        assert_eq!(MarginTier::classify(64.6, &settings), MarginTier::Healthy);
        assert_eq!(MarginTier::classify(50.0, &settings), MarginTier::Healthy);
        assert_eq!(MarginTier::classify(30.0, &settings), MarginTier::Fair);
        assert_eq!(MarginTier::classify(29.9, &settings), MarginTier::Low);
        assert_eq!(MarginTier::classify(0.0, &settings), MarginTier::Low);
    }

    #[test]
    fn test_empty_dashboard() {
        let report = DashboardReport::from_snapshot(&CostingSnapshot::default(), &Settings::default());
        assert_eq!(report.ingredient_count, 0);
        assert_eq!(report.recipe_count, 0);
        assert_eq!(report.average_recipe_cost, 0.0);
        assert!(report.recent.is_empty());
        assert!(report
            .format_terminal(&Settings::default())
            .contains("No recipes yet"));
    }

    #[test]
    fn test_sample_dashboard() {
        let settings = Settings::default();
        let report = DashboardReport::from_snapshot(&sample_snapshot(), &settings);

        assert_eq!(report.ingredient_count, 5);
        assert_eq!(report.recipe_count, 1);
        assert!((report.average_recipe_cost - 12.4).abs() < 1e-9);
        assert_eq!(report.recent[0].tier, MarginTier::Healthy);

        let output = report.format_terminal(&settings);
        assert!(output.contains("$12.40"));
        assert!(output.contains("64.6%"));
        assert!(output.contains("healthy"));
    }

    #[test]
    fn test_dangling_line_costs_zero() {
        let mut snapshot = sample_snapshot();
        let sausage_id = snapshot
            .ingredients
            .values()
            .find(|i| i.name == "Salchicha")
            .map(|i| i.id)
            .unwrap();
        snapshot.ingredients.remove(&sausage_id);

        let settings = Settings::default();
        let report = DashboardReport::from_snapshot(&snapshot, &settings);

        // bun 3.50 + mayonnaise 0.90
        assert!((report.average_recipe_cost - 4.4).abs() < 1e-9);
        assert!((report.recent[0].cost - 4.4).abs() < 1e-9);
        assert!(report.format_terminal(&settings).contains("$4.40"));
    }

    #[test]
    fn test_undefined_unit_cost_renders_not_available() {
        let mut snapshot = sample_snapshot();
        for ingredient in snapshot.ingredients.values_mut() {
            if ingredient.name == "Pan de Hotdog" {
                ingredient.quantity = 0.0;
            }
        }

        let settings = Settings::default();
        let report = DashboardReport::from_snapshot(&snapshot, &settings);

        assert!(!report.average_recipe_cost.is_finite());
        assert_eq!(report.recent[0].tier, MarginTier::Low);
        let output = report.format_terminal(&settings);
        assert!(output.contains("n/a"));
        assert!(!output.contains("NaN"));
        assert!(!output.contains("inf"));
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let mut snapshot = sample_snapshot();
        let base = snapshot.recipes[0].clone();
        for i in 1..=3 {
            let mut recipe = crate::models::Recipe::new(format!("Extra {}", i), "", 10.0);
            recipe.created_at = base.created_at + Duration::minutes(i);
            snapshot.recipes.push(recipe);
        }

        let settings = Settings {
            recent_recipes: 2,
            ..Settings::default()
        };
        let report = DashboardReport::from_snapshot(&snapshot, &settings);

        assert_eq!(report.recipe_count, 4);
        let names: Vec<&str> = report.recent.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Extra 3", "Extra 2"]);
    }
}
