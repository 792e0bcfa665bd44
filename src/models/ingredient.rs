//! Ingredient model
//!
//! A purchased ingredient: what was paid, and how much of it was bought.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::IngredientId;
use super::unit::{Quantity, Unit};

/// A purchased ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: IngredientId,

    /// Display name (e.g., "Salchicha")
    pub name: String,

    /// Total price paid for the purchased quantity
    pub price: f64,

    /// Purchased quantity, in `unit`
    pub quantity: f64,

    /// Unit of the purchased quantity
    pub unit: Unit,

    /// When the ingredient was created
    pub created_at: DateTime<Utc>,

    /// When the ingredient was last modified
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    /// Create a new ingredient
    pub fn new(name: impl Into<String>, price: f64, quantity: f64, unit: Unit) -> Self {
        let now = Utc::now();
        Self {
            id: IngredientId::new(),
            name: name.into(),
            price,
            quantity,
            unit,
            created_at: now,
            updated_at: now,
        }
    }

    /// The purchased amount as a quantity
    pub fn purchased(&self) -> Quantity {
        Quantity::new(self.quantity, self.unit)
    }

    /// Update the purchase details
    pub fn set_purchase(&mut self, price: f64, quantity: f64, unit: Unit) {
        self.price = price;
        self.quantity = quantity;
        self.unit = unit;
        self.updated_at = Utc::now();
    }

    /// Rename the ingredient
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Normalize a name for case-insensitive lookup
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Validate the ingredient
    pub fn validate(&self) -> Result<(), IngredientValidationError> {
        if self.name.trim().is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(IngredientValidationError::NameTooLong(self.name.len()));
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(IngredientValidationError::InvalidPrice(self.price));
        }

        // A zero purchased quantity would make the unit cost undefined
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(IngredientValidationError::InvalidQuantity(self.quantity));
        }

        Ok(())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.quantity, self.unit)
    }
}

/// Validation errors for ingredients
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidPrice(f64),
    InvalidQuantity(f64),
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Ingredient name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Ingredient name too long ({} chars, max 100)", len)
            }
            Self::InvalidPrice(price) => {
                write!(f, "Price must be a non-negative number, got {}", price)
            }
            Self::InvalidQuantity(qty) => write!(
                f,
                "Purchased quantity must be greater than zero, got {}",
                qty
            ),
        }
    }
}

impl std::error::Error for IngredientValidationError {}
