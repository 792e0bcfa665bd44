//! Units of measure and their measurement categories
//!
//! The unit set is closed: every unit belongs to exactly one category and the
//! mapping is an exhaustive match, so an unknown unit can never reach the
//! conversion engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement category a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementCategory {
    Mass,
    Volume,
    Count,
}

impl MeasurementCategory {
    /// All categories in display order
    pub fn all() -> &'static [MeasurementCategory] {
        &[Self::Mass, Self::Volume, Self::Count]
    }

    /// The canonical unit every conversion in this category pivots on
    pub const fn base_unit(self) -> Unit {
        match self {
            Self::Mass => Unit::Gram,
            Self::Volume => Unit::Milliliter,
            Self::Count => Unit::Piece,
        }
    }
}

impl fmt::Display for MeasurementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mass => write!(f, "mass"),
            Self::Volume => write!(f, "volume"),
            Self::Count => write!(f, "count"),
        }
    }
}

/// Unit of measure for purchases and recipe lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "pz")]
    Piece,
}

impl Unit {
    /// All units in display order
    pub fn all() -> &'static [Unit] {
        &[
            Self::Kilogram,
            Self::Gram,
            Self::Liter,
            Self::Milliliter,
            Self::Piece,
        ]
    }

    /// Short symbol, as stored on disk
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Liter => "L",
            Self::Milliliter => "ml",
            Self::Piece => "pz",
        }
    }

    /// Human-readable label, e.g. "Kilograms (kg)"
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kilogram => "Kilograms (kg)",
            Self::Gram => "Grams (g)",
            Self::Liter => "Liters (L)",
            Self::Milliliter => "Milliliters (ml)",
            Self::Piece => "Pieces (pz)",
        }
    }

    /// Measurement category of this unit
    pub const fn category(self) -> MeasurementCategory {
        match self {
            Self::Kilogram | Self::Gram => MeasurementCategory::Mass,
            Self::Liter | Self::Milliliter => MeasurementCategory::Volume,
            Self::Piece => MeasurementCategory::Count,
        }
    }

    /// Number of base units in one of this unit
    pub const fn base_factor(self) -> f64 {
        match self {
            Self::Kilogram | Self::Liter => 1000.0,
            Self::Gram | Self::Milliliter | Self::Piece => 1.0,
        }
    }

    /// Parse a unit from user input
    ///
    /// Accepts symbols in any case plus common long names ("kilogram",
    /// "litre", "pieces", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Some(Self::Kilogram),
            "g" | "gr" | "gram" | "grams" => Some(Self::Gram),
            "l" | "lt" | "liter" | "liters" | "litre" | "litres" => Some(Self::Liter),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Some(Self::Milliliter)
            }
            "pz" | "pc" | "pcs" | "piece" | "pieces" => Some(Self::Piece),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a unit string is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitParseError(pub String);

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown unit '{}'. Valid units: kg, g, L, ml, pz",
            self.0
        )
    }
}

impl std::error::Error for UnitParseError {}

impl FromStr for Unit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnitParseError(s.to_string()))
    }
}

/// A numeric amount paired with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn category(&self) -> MeasurementCategory {
        self.unit.category()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
