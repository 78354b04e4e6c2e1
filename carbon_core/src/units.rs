//! # Unit Types
//!
//! Type-safe wrappers for the units that differ between regional unit
//! systems. They stay lightweight (just f64 wrappers) so JSON stays clean.
//!
//! ## Conversions
//!
//! | From | To   | Factor                |
//! |------|------|-----------------------|
//! | m²   | ft²  | 10.7639               |
//! | m³   | ft³  | 35.3147               |
//! | kg   | lb   | 2.20462               |
//! | °C   | °F   | °C × 9/5 + 32         |
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::units::{Celsius, Fahrenheit, Kilograms, Pounds};
//!
//! let mass: Pounds = Kilograms(10.0).into();
//! assert!((mass.0 - 22.0462).abs() < 1e-9);
//!
//! let temp: Fahrenheit = Celsius(100.0).into();
//! assert_eq!(temp.0, 212.0);
//! ```

use serde::{Deserialize, Serialize};

pub const SQFT_PER_SQM: f64 = 10.7639;
pub const SQM_PER_SQFT: f64 = 0.092903;
pub const CUFT_PER_CUM: f64 = 35.3147;
pub const CUM_PER_CUFT: f64 = 0.0283168;
pub const LB_PER_KG: f64 = 2.20462;
pub const KG_PER_LB: f64 = 0.453592;

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFeet(pub f64);

impl From<SqMeters> for SqFeet {
    fn from(sqm: SqMeters) -> Self {
        SqFeet(sqm.0 * SQFT_PER_SQM)
    }
}

impl From<SqFeet> for SqMeters {
    fn from(sqft: SqFeet) -> Self {
        SqMeters(sqft.0 * SQM_PER_SQFT)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicFeet(pub f64);

impl From<CubicMeters> for CubicFeet {
    fn from(cum: CubicMeters) -> Self {
        CubicFeet(cum.0 * CUFT_PER_CUM)
    }
}

impl From<CubicFeet> for CubicMeters {
    fn from(cuft: CubicFeet) -> Self {
        CubicMeters(cuft.0 * CUM_PER_CUFT)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 * LB_PER_KG)
    }
}

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 * KG_PER_LB)
    }
}

/// Convert a quantity to kilograms if `unit` names a mass unit.
///
/// Returns `None` for non-mass units (m², m³, pieces, ...).
pub fn mass_in_kg(quantity: f64, unit: &str) -> Option<f64> {
    match unit.trim().to_ascii_lowercase().as_str() {
        "kg" | "kgs" | "kilogram" | "kilograms" => Some(quantity),
        "t" | "tonne" | "tonnes" | "metric_ton" => Some(quantity * 1000.0),
        "lb" | "lbs" | "pound" | "pounds" => Some(Kilograms::from(Pounds(quantity)).0),
        _ => None,
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

// ============================================================================
// Emissions
// ============================================================================

/// Global warming potential in kg CO2-equivalent
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgCo2e(pub f64);

impl KgCo2e {
    /// Express in metric tonnes CO2e
    pub fn tonnes(self) -> f64 {
        self.0 / 1000.0
    }
}
