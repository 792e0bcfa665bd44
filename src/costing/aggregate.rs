//! Cost aggregation
//!
//! Turns ingredient purchase prices into per-base-unit costs and sums those
//! over recipe lines. All functions are pure and read the records they are
//! given; nothing here touches storage.

use std::collections::HashMap;

use serde::Serialize;

use super::conversion::{ensure_compatible, to_base, IncompatibleCategories};
use crate::models::{Ingredient, IngredientId, Recipe, RecipeLine};

/// Read-only access to ingredients by ID
pub trait IngredientLookup {
    fn ingredient(&self, id: IngredientId) -> Option<&Ingredient>;
}

impl IngredientLookup for HashMap<IngredientId, Ingredient> {
    fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.get(&id)
    }
}

impl IngredientLookup for [Ingredient] {
    fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.iter().find(|i| i.id == id)
    }
}

impl IngredientLookup for Vec<Ingredient> {
    fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.as_slice().ingredient(id)
    }
}

/// Cost of one base unit (g, ml or pz) of an ingredient
///
/// A zero purchased quantity yields a non-finite result; callers decide how to
/// present it.
pub fn unit_cost_of(ingredient: &Ingredient) -> f64 {
    ingredient.price / to_base(ingredient.quantity, ingredient.unit)
}

/// Cost contributed by a recipe line
///
/// Does not check that the line's unit shares the ingredient's category; see
/// [`checked_line_cost`].
pub fn line_cost(line: &RecipeLine, ingredient: &Ingredient) -> f64 {
    unit_cost_of(ingredient) * to_base(line.quantity, line.unit)
}

/// Cost contributed by a recipe line, rejecting mismatched categories
pub fn checked_line_cost(
    line: &RecipeLine,
    ingredient: &Ingredient,
) -> Result<f64, IncompatibleCategories> {
    ensure_compatible(line.unit, ingredient.unit)?;
    Ok(line_cost(line, ingredient))
}

/// Total cost of a set of recipe lines
///
/// Lines whose ingredient is missing from `lookup` contribute nothing.
pub fn recipe_cost<L>(lines: &[RecipeLine], lookup: &L) -> f64
where
    L: IngredientLookup + ?Sized,
{
    lines
        .iter()
        .filter_map(|line| {
            lookup
                .ingredient(line.ingredient_id)
                .map(|ingredient| line_cost(line, ingredient))
        })
        .sum()
}

/// Profit and margin of a sale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitAndMargin {
    pub profit: f64,
    /// Profit as a percentage of the sale price; 0 when the sale price is 0
    pub margin_percent: f64,
}

/// Derive profit and margin from a cost and a sale price
pub fn profit_and_margin(cost: f64, sale_price: f64) -> ProfitAndMargin {
    let profit = sale_price - cost;
    let margin_percent = if sale_price > 0.0 {
        (profit / sale_price) * 100.0
    } else {
        0.0
    };

    ProfitAndMargin {
        profit,
        margin_percent,
    }
}

/// Recipe total as every report shows it
///
/// Same as the `cost_breakdown` total: lines in a different unit category
/// from their ingredient cost zero here, unlike in `recipe_cost`.
pub fn breakdown_total<L>(recipe: &Recipe, lookup: &L) -> f64
where
    L: IngredientLookup + ?Sized,
{
    cost_breakdown(recipe, lookup).total_cost
}

/// Average `breakdown_total` across recipes; 0 when there are none
pub fn average_recipe_cost<L>(recipes: &[Recipe], lookup: &L) -> f64
where
    L: IngredientLookup + ?Sized,
{
    if recipes.is_empty() {
        return 0.0;
    }

    let total: f64 = recipes.iter().map(|r| breakdown_total(r, lookup)).sum();
    total / recipes.len() as f64
}

/// A problem found while costing a recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostWarning {
    /// The line references an ingredient that no longer exists
    MissingIngredient {
        line_position: usize,
        ingredient_id: IngredientId,
    },
    /// The line's unit and the ingredient's purchase unit are in different categories
    IncompatibleUnits {
        line_position: usize,
        ingredient_name: String,
        #[serde(skip)]
        error: IncompatibleCategories,
    },
    /// The ingredient's unit cost is not a finite number (zero purchased quantity)
    UndefinedUnitCost {
        line_position: usize,
        ingredient_name: String,
    },
}

impl std::fmt::Display for CostWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingIngredient {
                line_position,
                ingredient_id,
            } => write!(
                f,
                "line {}: ingredient {} no longer exists (costed as 0)",
                line_position, ingredient_id
            ),
            Self::IncompatibleUnits {
                line_position,
                ingredient_name,
                error,
            } => write!(
                f,
                "line {} ({}): {} (costed as 0)",
                line_position, ingredient_name, error
            ),
            Self::UndefinedUnitCost {
                line_position,
                ingredient_name,
            } => write!(
                f,
                "line {} ({}): unit cost is undefined because the purchased quantity is zero",
                line_position, ingredient_name
            ),
        }
    }
}

/// Cost of a single line, as shown in a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineCostDetail {
    /// 1-based position in the recipe
    pub position: usize,
    pub line: RecipeLine,
    /// Ingredient name, if the ingredient exists
    pub ingredient_name: Option<String>,
    /// Cost per base unit of the ingredient, if the ingredient exists
    pub unit_cost: Option<f64>,
    /// Cost contributed to the recipe total
    pub cost: f64,
}

/// Line-by-line costing of a recipe with any problems found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub lines: Vec<LineCostDetail>,
    pub total_cost: f64,
    pub sale_price: f64,
    pub profit: f64,
    pub margin_percent: f64,
    pub warnings: Vec<CostWarning>,
}

impl CostBreakdown {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Cost a recipe line by line
///
/// Missing ingredients and category mismatches contribute zero and are reported
/// as warnings instead of silently skewing the total.
pub fn cost_breakdown<L>(recipe: &Recipe, lookup: &L) -> CostBreakdown
where
    L: IngredientLookup + ?Sized,
{
    let mut lines = Vec::with_capacity(recipe.lines.len());
    let mut warnings = Vec::new();

    for (index, line) in recipe.lines.iter().enumerate() {
        let position = index + 1;

        let Some(ingredient) = lookup.ingredient(line.ingredient_id) else {
            warnings.push(CostWarning::MissingIngredient {
                line_position: position,
                ingredient_id: line.ingredient_id,
            });
            lines.push(LineCostDetail {
                position,
                line: line.clone(),
                ingredient_name: None,
                unit_cost: None,
                cost: 0.0,
            });
            continue;
        };

        let unit_cost = unit_cost_of(ingredient);
        let cost = match checked_line_cost(line, ingredient) {
            Ok(cost) => cost,
            Err(error) => {
                warnings.push(CostWarning::IncompatibleUnits {
                    line_position: position,
                    ingredient_name: ingredient.name.clone(),
                    error,
                });
                0.0
            }
        };

        if !unit_cost.is_finite() {
            warnings.push(CostWarning::UndefinedUnitCost {
                line_position: position,
                ingredient_name: ingredient.name.clone(),
            });
        }

        lines.push(LineCostDetail {
            position,
            line: line.clone(),
            ingredient_name: Some(ingredient.name.clone()),
            unit_cost: Some(unit_cost),
            cost,
        });
    }

    let total_cost: f64 = lines.iter().map(|l| l.cost).sum();
    let ProfitAndMargin {
        profit,
        margin_percent,
    } = profit_and_margin(total_cost, recipe.sale_price);

    CostBreakdown {
        lines,
        total_cost,
        sale_price: recipe.sale_price,
        profit,
        margin_percent,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sausage() -> Ingredient {
        Ingredient::new("Salchicha", 80.0, 1.0, Unit::Kilogram)
    }

    fn bun() -> Ingredient {
        Ingredient::new("Pan de Hotdog", 35.0, 10.0, Unit::Piece)
    }

    fn mayonnaise() -> Ingredient {
        Ingredient::new("Mayonesa", 60.0, 1.0, Unit::Liter)
    }

    fn hotdog(bun: &Ingredient, sausage: &Ingredient, mayo: &Ingredient) -> Recipe {
        let mut recipe = Recipe::new("Hotdog Clásico", "Hotdogs", 35.0);
        recipe.add_line(RecipeLine::new(bun.id, 1.0, Unit::Piece));
        recipe.add_line(RecipeLine::new(sausage.id, 100.0, Unit::Gram));
        recipe.add_line(RecipeLine::new(mayo.id, 15.0, Unit::Milliliter));
        recipe
    }

    #[test]
    fn test_unit_cost_per_gram() {
        assert!(approx(unit_cost_of(&sausage()), 0.08));
    }

    #[test]
    fn test_unit_cost_zero_quantity_is_not_finite() {
        let mut ingredient = sausage();
        ingredient.quantity = 0.0;
        assert!(!unit_cost_of(&ingredient).is_finite());

        ingredient.price = 0.0;
        assert!(unit_cost_of(&ingredient).is_nan());
    }

    #[test]
    fn test_line_cost() {
        let sausage = sausage();
        let line = RecipeLine::new(sausage.id, 100.0, Unit::Gram);
        assert!(approx(line_cost(&line, &sausage), 8.0));

        let bun = bun();
        let line = RecipeLine::new(bun.id, 1.0, Unit::Piece);
        assert!(approx(line_cost(&line, &bun), 3.5));
    }

    #[test]
    fn test_line_cost_across_purchase_units() {
        // bought in grams, used in kilograms
        let cheese = Ingredient::new("Queso Amarillo", 45.0, 500.0, Unit::Gram);
        let line = RecipeLine::new(cheese.id, 0.02, Unit::Kilogram);
        assert!(approx(line_cost(&line, &cheese), 1.8));
    }

    #[test]
    fn test_checked_line_cost_rejects_mismatch() {
        let sausage = sausage();
        let line = RecipeLine::new(sausage.id, 100.0, Unit::Milliliter);
        assert_eq!(
            checked_line_cost(&line, &sausage),
            Err(IncompatibleCategories {
                from: Unit::Milliliter,
                to: Unit::Kilogram
            })
        );

        let line = RecipeLine::new(sausage.id, 0.1, Unit::Kilogram);
        assert!(approx(checked_line_cost(&line, &sausage).unwrap(), 8.0));
    }

    #[test]
    fn test_recipe_cost_and_margin() {
        let (bun, sausage, mayo) = (bun(), sausage(), mayonnaise());
        let recipe = hotdog(&bun, &sausage, &mayo);
        let lookup = vec![bun, sausage, mayo];

        let total = recipe_cost(&recipe.lines, &lookup);
        assert!(approx(total, 12.4));

        let pm = profit_and_margin(total, recipe.sale_price);
        assert!(approx(pm.profit, 35.0 - total));
        assert!(approx(pm.margin_percent, (35.0 - total) / 35.0 * 100.0));
        assert!(approx(pm.margin_percent, 64.57142857142857));
    }

    #[test]
    fn test_recipe_cost_empty() {
        let lookup: Vec<Ingredient> = Vec::new();
        assert_eq!(recipe_cost(&[], &lookup), 0.0);
    }

    #[test]
    fn test_recipe_cost_skips_missing_ingredient() {
        let sausage = sausage();
        let lines = vec![
            RecipeLine::new(IngredientId::new(), 3.0, Unit::Piece),
            RecipeLine::new(sausage.id, 100.0, Unit::Gram),
        ];

        let mut lookup = HashMap::new();
        lookup.insert(sausage.id, sausage);

        assert!(approx(recipe_cost(&lines, &lookup), 8.0));
    }

    #[test]
    fn test_margin_zero_sale_price() {
        assert_eq!(profit_and_margin(12.4, 0.0).margin_percent, 0.0);
        assert_eq!(profit_and_margin(0.0, 0.0).margin_percent, 0.0);
        assert_eq!(profit_and_margin(12.4, 0.0).profit, -12.4);
    }

    #[test]
    fn test_negative_margin() {
        let pm = profit_and_margin(50.0, 40.0);
        assert!(approx(pm.profit, -10.0));
        assert!(approx(pm.margin_percent, -25.0));
    }

    #[test]
    fn test_average_recipe_cost() {
        let (bun, sausage, mayo) = (bun(), sausage(), mayonnaise());
        let hotdog = hotdog(&bun, &sausage, &mayo);
        let mut plain = Recipe::new("Pan Solo", "Extras", 5.0);
        plain.add_line(RecipeLine::new(bun.id, 1.0, Unit::Piece));
        let lookup = vec![bun, sausage, mayo];

        let avg = average_recipe_cost(&[hotdog, plain], &lookup);
        assert!(approx(avg, (12.4 + 3.5) / 2.0));
        assert_eq!(average_recipe_cost(&[], &lookup), 0.0);
    }

    #[test]
    fn test_breakdown_matches_recipe_cost() {
        let (bun, sausage, mayo) = (bun(), sausage(), mayonnaise());
        let recipe = hotdog(&bun, &sausage, &mayo);
        let lookup = vec![bun, sausage, mayo];

        let breakdown = cost_breakdown(&recipe, &lookup);
        assert!(!breakdown.has_warnings());
        assert_eq!(breakdown.lines.len(), 3);
        assert!(approx(breakdown.lines[0].cost, 3.5));
        assert!(approx(breakdown.lines[1].cost, 8.0));
        assert!(approx(breakdown.lines[2].cost, 0.9));
        assert!(approx(breakdown.total_cost, recipe_cost(&recipe.lines, &lookup)));
        assert!(approx(breakdown.profit, 22.6));
    }

    #[test]
    fn test_breakdown_reports_problems() {
        let sausage = sausage();
        let mut empty = mayonnaise();
        empty.quantity = 0.0;

        let mut recipe = Recipe::new("Broken", "", 20.0);
        let ghost = IngredientId::new();
        recipe.add_line(RecipeLine::new(ghost, 1.0, Unit::Piece));
        recipe.add_line(RecipeLine::new(sausage.id, 100.0, Unit::Milliliter));
        recipe.add_line(RecipeLine::new(sausage.id, 50.0, Unit::Gram));
        recipe.add_line(RecipeLine::new(empty.id, 10.0, Unit::Milliliter));
        let lookup = vec![sausage, empty];

        let breakdown = cost_breakdown(&recipe, &lookup);
        assert_eq!(breakdown.warnings.len(), 3);
        assert_eq!(
            breakdown.warnings[0],
            CostWarning::MissingIngredient {
                line_position: 1,
                ingredient_id: ghost
            }
        );
        assert!(matches!(
            breakdown.warnings[1],
            CostWarning::IncompatibleUnits { line_position: 2, .. }
        ));
        assert!(matches!(
            breakdown.warnings[2],
            CostWarning::UndefinedUnitCost { line_position: 4, .. }
        ));
        assert_eq!(breakdown.lines[0].cost, 0.0);
        assert_eq!(breakdown.lines[1].cost, 0.0);
        assert!(approx(breakdown.lines[2].cost, 4.0));
        assert!(!breakdown.total_cost.is_finite());
    }

    #[test]
    fn test_breakdown_total_zeroes_mismatched_lines() {
        let sausage = sausage();
        let mut recipe = Recipe::new("Salchicha Líquida", "", 20.0);
        recipe.add_line(RecipeLine::new(sausage.id, 100.0, Unit::Milliliter));
        let lookup = vec![sausage];

        // the raw sum still scales the mismatched line
        assert!(approx(recipe_cost(&recipe.lines, &lookup), 8.0));
        assert_eq!(breakdown_total(&recipe, &lookup), 0.0);
        assert_eq!(
            breakdown_total(&recipe, &lookup),
            cost_breakdown(&recipe, &lookup).total_cost
        );
        assert_eq!(average_recipe_cost(&[recipe], &lookup), 0.0);
    }

    #[test]
    fn test_average_counts_dangling_lines_as_zero() {
        let sausage = sausage();
        let mut recipe = Recipe::new("Medio Hotdog", "", 20.0);
        recipe.add_line(RecipeLine::new(IngredientId::new(), 1.0, Unit::Piece));
        recipe.add_line(RecipeLine::new(sausage.id, 100.0, Unit::Gram));
        let lookup = vec![sausage];

        assert!(approx(average_recipe_cost(&[recipe], &lookup), 8.0));
    }

    #[test]
    fn test_warning_display() {
        let warning = CostWarning::UndefinedUnitCost {
            line_position: 2,
            ingredient_name: "Mayonesa".into(),
        };
        assert!(warning.to_string().starts_with("line 2 (Mayonesa)"));
    }
}
