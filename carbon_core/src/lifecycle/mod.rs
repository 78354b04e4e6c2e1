//! # Lifecycle Emissions
//!
//! Converts material, transport, energy and waste quantities into the 17
//! EN 15804 stage values (A1–D). Follows the crate-wide pattern:
//!
//! - `*Input` - input records (JSON-serializable, validated)
//! - [`EpdStageResult`] - per-stage output
//! - [`LifecycleEmissionsCalculator::calculate`] - pure calculation
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::config::EmissionParameters;
//! use carbon_core::lifecycle::{LifecycleEmissionsCalculator, LifecycleInput, MaterialInput, EpdStage};
//! use carbon_core::regional::RegionalFactorRegistry;
//!
//! let registry = RegionalFactorRegistry::with_defaults();
//! let calculator = LifecycleEmissionsCalculator::new(&registry, EmissionParameters::default());
//!
//! let input = LifecycleInput {
//!     materials: vec![
//!         MaterialInput::new("Concrete", 10.0, "m3", 2.0),
//!         MaterialInput::new("Rebar", 5.0, "t", 3.0),
//!     ],
//!     ..LifecycleInput::default()
//! };
//!
//! let result = calculator.calculate(&input).unwrap();
//! assert_eq!(result.get(EpdStage::A1), 35.0);
//! ```

pub mod calculator;
pub mod stages;

pub use calculator::LifecycleEmissionsCalculator;
pub use stages::{EpdStage, EpdStageResult, ModuleTotals};

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, ensure_non_negative, ensure_percentage, CalcError, CalcResult};
use crate::units::mass_in_kg;

/// A material line item.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Concrete C30/37", "quantity": 120.0, "unit": "m3", "carbon_footprint": 310.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInput {
    pub name: String,

    /// Quantity in `unit` (≥ 0)
    pub quantity: f64,

    /// Unit of `quantity` (kg, t, lbs, m3, m2, pcs, ...)
    pub unit: String,

    /// Emission factor, kg CO2e per `unit`. May be negative for
    /// materials with net biogenic storage (timber, CLT).
    pub carbon_footprint: f64,

    /// Material family (e.g. "steel"); selects the fallback alternative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl MaterialInput {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>, carbon_footprint: f64) -> Self {
        MaterialInput {
            name: name.into(),
            quantity,
            unit: unit.into(),
            carbon_footprint,
            category: None,
        }
    }

    /// Set the material family (builder pattern)
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative(format!("materials[{}].quantity", self.name), self.quantity)?;
        ensure_finite(format!("materials[{}].carbon_footprint", self.name), self.carbon_footprint)?;
        Ok(())
    }

    /// Embodied emissions of this line: quantity × factor
    pub fn embodied_co2e(&self) -> f64 {
        self.quantity * self.carbon_footprint
    }

    /// Mass in kg if the unit is a mass unit
    pub fn mass_kg(&self) -> Option<f64> {
        mass_in_kg(self.quantity, &self.unit)
    }
}

/// Freight transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Truck,
    Rail,
    Ship,
}

impl TransportMode {
    pub fn code(&self) -> &'static str {
        match self {
            TransportMode::Truck => "truck",
            TransportMode::Rail => "rail",
            TransportMode::Ship => "ship",
        }
    }
}

fn default_fuel() -> String {
    "diesel".to_string()
}

/// A freight leg delivering materials to the manufacturer.
///
/// A `weight_kg` of zero means "the whole material weight".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportInput {
    pub mode: TransportMode,
    pub distance_km: f64,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default = "default_fuel")]
    pub fuel_type: String,
}

impl TransportInput {
    pub fn new(mode: TransportMode, distance_km: f64, weight_kg: f64, fuel_type: impl Into<String>) -> Self {
        TransportInput {
            mode,
            distance_km,
            weight_kg,
            fuel_type: fuel_type.into(),
        }
    }

    pub fn validate(&self, index: usize) -> CalcResult<()> {
        ensure_non_negative(format!("transport[{}].distance_km", index), self.distance_km)?;
        ensure_non_negative(format!("transport[{}].weight_kg", index), self.weight_kg)?;
        Ok(())
    }
}

/// Energy carrier used in manufacturing (A3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyType {
    Electricity,
    #[serde(alias = "natural_gas")]
    Gas,
}

/// Manufacturing energy consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyInput {
    #[serde(rename = "type")]
    pub energy_type: EnergyType,
    pub amount: f64,
    /// kWh, MWh, MJ or GJ
    pub unit: String,
    /// Renewable share of this supply (0-100)
    #[serde(default)]
    pub renewable_percentage: f64,
}

impl EnergyInput {
    pub fn new(energy_type: EnergyType, amount: f64, unit: impl Into<String>, renewable_percentage: f64) -> Self {
        EnergyInput {
            energy_type,
            amount,
            unit: unit.into(),
            renewable_percentage,
        }
    }

    pub fn validate(&self, index: usize) -> CalcResult<()> {
        ensure_non_negative(format!("energy[{}].amount", index), self.amount)?;
        ensure_percentage(format!("energy[{}].renewable_percentage", index), self.renewable_percentage)?;
        self.amount_kwh().map(|_| ())
    }

    /// Amount normalized to kWh
    pub fn amount_kwh(&self) -> CalcResult<f64> {
        let factor = match self.unit.trim().to_ascii_lowercase().as_str() {
            "kwh" => 1.0,
            "mwh" => 1000.0,
            "mj" => 1.0 / 3.6,
            "gj" => 1000.0 / 3.6,
            _ => {
                return Err(CalcError::invalid_input(
                    "energy.unit",
                    self.unit.clone(),
                    "Energy unit must be kWh, MWh, MJ or GJ",
                ))
            }
        };
        Ok(self.amount * factor)
    }
}

/// End-of-life waste routing, each rate 0-100. Rates need not sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WasteProfile {
    pub recycling_rate: f64,
    pub incineration_rate: f64,
    pub landfill_rate: f64,
}

impl WasteProfile {
    pub fn new(recycling_rate: f64, incineration_rate: f64, landfill_rate: f64) -> Self {
        WasteProfile {
            recycling_rate,
            incineration_rate,
            landfill_rate,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_percentage("waste.recycling_rate", self.recycling_rate)?;
        ensure_percentage("waste.incineration_rate", self.incineration_rate)?;
        ensure_percentage("waste.landfill_rate", self.landfill_rate)?;
        Ok(())
    }
}

/// Everything the calculator needs for one project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleInput {
    /// Country for transport factors; the calculator default applies if None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub materials: Vec<MaterialInput>,
    pub transport: Vec<TransportInput>,
    pub energy: Vec<EnergyInput>,
    pub waste: WasteProfile,
}

impl LifecycleInput {
    pub fn validate(&self) -> CalcResult<()> {
        for material in &self.materials {
            material.validate()?;
        }
        for (i, leg) in self.transport.iter().enumerate() {
            leg.validate(i)?;
        }
        for (i, energy) in self.energy.iter().enumerate() {
            energy.validate(i)?;
        }
        self.waste.validate()
    }

    /// Sum of material masses in kg; non-mass units contribute nothing.
    pub fn total_material_weight_kg(&self) -> f64 {
        self.materials.iter().filter_map(MaterialInput::mass_kg).sum()
    }
}
