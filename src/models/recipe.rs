//! Recipe model
//!
//! A recipe is an ordered list of ingredient lines plus the price it sells for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{IngredientId, RecipeId, RecipeLineId};
use super::unit::{Quantity, Unit};

/// One ingredient requirement within a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    /// Unique identifier
    pub id: RecipeLineId,

    /// Referenced ingredient (may dangle if the ingredient was deleted)
    pub ingredient_id: IngredientId,

    /// Required quantity, in `unit`
    pub quantity: f64,

    /// Unit of the required quantity
    pub unit: Unit,
}

impl RecipeLine {
    /// Create a new recipe line
    pub fn new(ingredient_id: IngredientId, quantity: f64, unit: Unit) -> Self {
        Self {
            id: RecipeLineId::new(),
            ingredient_id,
            quantity,
            unit,
        }
    }

    /// The required amount as a quantity
    pub fn required(&self) -> Quantity {
        Quantity::new(self.quantity, self.unit)
    }
}

/// A sellable recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: RecipeId,

    /// Recipe name (e.g., "Hotdog Clásico")
    pub name: String,

    /// Free-form menu category (e.g., "Hotdogs")
    #[serde(default)]
    pub category: String,

    /// Ingredient lines, in the order they were added
    #[serde(default)]
    pub lines: Vec<RecipeLine>,

    /// Price the recipe sells for
    pub sale_price: f64,

    /// When the recipe was created
    pub created_at: DateTime<Utc>,

    /// When the recipe was last modified
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new recipe with no lines
    pub fn new(name: impl Into<String>, category: impl Into<String>, sale_price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: RecipeId::new(),
            name: name.into(),
            category: category.into(),
            lines: Vec::new(),
            sale_price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a line
    pub fn add_line(&mut self, line: RecipeLine) {
        self.lines.push(line);
        self.updated_at = Utc::now();
    }

    /// Remove a line by ID, returning it if present
    pub fn remove_line(&mut self, line_id: RecipeLineId) -> Option<RecipeLine> {
        let index = self.lines.iter().position(|l| l.id == line_id)?;
        self.updated_at = Utc::now();
        Some(self.lines.remove(index))
    }

    /// Find a line by its position (1-based, as shown to users) or short ID
    pub fn find_line(&self, identifier: &str) -> Option<&RecipeLine> {
        if let Ok(position) = identifier.trim().parse::<usize>() {
            if position >= 1 {
                return self.lines.get(position - 1);
            }
        }
        self.lines.iter().find(|l| l.id.matches_short(identifier))
    }

    /// Whether any line references the given ingredient
    pub fn uses_ingredient(&self, ingredient_id: IngredientId) -> bool {
        self.lines.iter().any(|l| l.ingredient_id == ingredient_id)
    }

    /// Normalize a name for case-insensitive lookup
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Validate the recipe
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(RecipeValidationError::NameTooLong(self.name.len()));
        }

        if !self.sale_price.is_finite() || self.sale_price < 0.0 {
            return Err(RecipeValidationError::InvalidSalePrice(self.sale_price));
        }

        for line in &self.lines {
            if !line.quantity.is_finite() || line.quantity < 0.0 {
                return Err(RecipeValidationError::InvalidLineQuantity(line.quantity));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} [{}]", self.name, self.category)
        }
    }
}

/// Validation errors for recipes
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidSalePrice(f64),
    InvalidLineQuantity(f64),
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Recipe name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Recipe name too long ({} chars, max 100)", len),
            Self::InvalidSalePrice(price) => {
                write!(f, "Sale price must be a non-negative number, got {}", price)
            }
            Self::InvalidLineQuantity(qty) => {
                write!(f, "Line quantity must be a non-negative number, got {}", qty)
            }
        }
    }
}

impl std::error::Error for RecipeValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_lines() {
        let mut recipe = Recipe::new("Hotdog Clásico", "Hotdogs", 35.0);
        let bun = IngredientId::new();
        let line = RecipeLine::new(bun, 1.0, Unit::Piece);
        let line_id = line.id;

        recipe.add_line(line);
        recipe.add_line(RecipeLine::new(IngredientId::new(), 100.0, Unit::Gram));
        assert_eq!(recipe.lines.len(), 2);
        assert!(recipe.uses_ingredient(bun));

        let removed = recipe.remove_line(line_id).unwrap();
        assert_eq!(removed.ingredient_id, bun);
        assert_eq!(recipe.lines.len(), 1);
        assert!(!recipe.uses_ingredient(bun));
        assert!(recipe.remove_line(line_id).is_none());
    }

    #[test]
    fn test_find_line() {
        let mut recipe = Recipe::new("Hamburguesa", "Burgers", 60.0);
        let first = RecipeLine::new(IngredientId::new(), 150.0, Unit::Gram);
        let second = RecipeLine::new(IngredientId::new(), 1.0, Unit::Piece);
        let second_id = second.id;
        recipe.add_line(first);
        recipe.add_line(second);

        assert_eq!(recipe.find_line("2").unwrap().id, second_id);
        assert_eq!(
            recipe.find_line(&second_id.to_string()).unwrap().id,
            second_id
        );
        assert!(recipe.find_line("0").is_none());
        assert!(recipe.find_line("3").is_none());
    }

    #[test]
    fn test_validation() {
        let mut recipe = Recipe::new("  ", "", 10.0);
        assert_eq!(recipe.validate(), Err(RecipeValidationError::EmptyName));

        recipe.name = "Nachos".into();
        recipe.sale_price = -5.0;
        assert!(matches!(
            recipe.validate(),
            Err(RecipeValidationError::InvalidSalePrice(_))
        ));

        recipe.sale_price = 0.0;
        assert!(recipe.validate().is_ok());

        recipe.add_line(RecipeLine::new(IngredientId::new(), -1.0, Unit::Gram));
        assert!(matches!(
            recipe.validate(),
            Err(RecipeValidationError::InvalidLineQuantity(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Recipe::new("Hotdog Clásico", "Hotdogs", 35.0).to_string(),
            "Hotdog Clásico [Hotdogs]"
        );
        assert_eq!(Recipe::new("Agua", "", 10.0).to_string(), "Agua");
    }
}
