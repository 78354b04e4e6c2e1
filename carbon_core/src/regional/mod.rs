//! # Regional Factor Registry
//!
//! Per-country emission factors (electricity grid, fuels, materials,
//! transport) plus the unit system each country reports in.
//!
//! Lookups never fail: an unknown country or factor key falls back to a
//! documented default ([`DEFAULT_TRANSPORT_FACTOR`] for transport, `0.0`
//! otherwise). Callers that need strict validation check
//! [`RegionalFactorRegistry::is_registered`] or use
//! [`RegionalFactorRegistry::config`], which returns
//! [`CalcError::UnknownRegion`].
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::regional::{FactorCategory, RegionalFactorRegistry};
//!
//! let registry = RegionalFactorRegistry::with_defaults();
//! let grid = registry.get_factor("GB", FactorCategory::Electricity, "grid");
//! assert!(grid > 0.0);
//!
//! // Same region: no adjustment
//! assert_eq!(registry.calculate_regional_adjustment(1000.0, "DE", "DE"), 1000.0);
//! ```

pub mod catalog;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_non_negative, ensure_percentage, CalcError, CalcResult};
use crate::units::{Celsius, CubicFeet, CubicMeters, Fahrenheit, Kilograms, Pounds, SqFeet, SqMeters};

/// Transport factor used when a country or mode/fuel pair is unknown:
/// diesel truck, kg CO2e per tonne-km.
pub const DEFAULT_TRANSPORT_FACTOR: f64 = 0.062;

/// Weight of the climate ratio in the regional adjustment formula
pub const CLIMATE_WEIGHT: f64 = 0.6;
/// Weight of the grid-intensity ratio in the regional adjustment formula
pub const GRID_WEIGHT: f64 = 0.4;

/// Factor families held by a [`RegionalConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Electricity,
    Fuel,
    Material,
    Transport,
}

/// Physical quantities whose unit differs between regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Area,
    Volume,
    Weight,
    Temperature,
}

/// Units a country reports in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSystem {
    pub area: String,
    pub volume: String,
    pub weight: String,
    pub temperature: String,
    pub distance: String,
}

impl UnitSystem {
    pub fn metric() -> Self {
        UnitSystem {
            area: "m²".to_string(),
            volume: "m³".to_string(),
            weight: "kg".to_string(),
            temperature: "°C".to_string(),
            distance: "km".to_string(),
        }
    }

    pub fn imperial() -> Self {
        UnitSystem {
            area: "ft²".to_string(),
            volume: "ft³".to_string(),
            weight: "lbs".to_string(),
            temperature: "°F".to_string(),
            distance: "mi".to_string(),
        }
    }

    /// Unit used for the given quantity
    pub fn unit_for(&self, unit_type: UnitType) -> &str {
        match unit_type {
            UnitType::Area => &self.area,
            UnitType::Volume => &self.volume,
            UnitType::Weight => &self.weight,
            UnitType::Temperature => &self.temperature,
        }
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::metric()
    }
}

/// Emission factors and reporting conventions of one country.
///
/// Factor maps are keyed by lower-case names (`"diesel"`, `"concrete"`,
/// `"truck_diesel"`). Transport factors are kg CO2e per tonne-km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalConfig {
    /// ISO 3166 alpha-2 code (registry key)
    pub country: String,
    pub region: String,
    pub currency: String,
    /// Grid intensity (kg CO2e/kWh)
    pub electricity_factor: f64,
    pub fuel_factors: HashMap<String, f64>,
    pub material_factors: HashMap<String, f64>,
    pub transport_factors: HashMap<String, f64>,
    /// Relative climate severity (1.0 = temperate reference)
    pub climate_factor: f64,
    /// Share of renewables in the grid (0-100)
    pub renewable_percentage: f64,
    pub units: UnitSystem,
}

type Conversion = fn(f64) -> f64;

impl RegionalConfig {
    /// Climate factor must be positive; electricity, fuel, material and
    /// transport factors finite and non-negative; renewables within 0-100.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.climate_factor.is_finite() || self.climate_factor <= 0.0 {
            return Err(CalcError::invalid_input(
                format!("{}.climate_factor", self.country),
                self.climate_factor.to_string(),
                "Climate factor must be a finite, positive number",
            ));
        }
        ensure_non_negative(format!("{}.electricity_factor", self.country), self.electricity_factor)?;
        ensure_percentage(format!("{}.renewable_percentage", self.country), self.renewable_percentage)?;

        let tables = [
            ("fuel_factors", &self.fuel_factors),
            ("material_factors", &self.material_factors),
            ("transport_factors", &self.transport_factors),
        ];
        for (table, factors) in tables {
            for (key, value) in factors {
                ensure_non_negative(format!("{}.{}[{}]", self.country, table, key), *value)?;
            }
        }
        Ok(())
    }
}

// Bilateral unit conversions, keyed "from->to".
static UNIT_CONVERSIONS: Lazy<HashMap<&'static str, Conversion>> = Lazy::new(|| {
    HashMap::from([
        ("m²->ft²", (|v: f64| SqFeet::from(SqMeters(v)).0) as Conversion),
        ("ft²->m²", (|v: f64| SqMeters::from(SqFeet(v)).0) as Conversion),
        ("m³->ft³", (|v: f64| CubicFeet::from(CubicMeters(v)).0) as Conversion),
        ("ft³->m³", (|v: f64| CubicMeters::from(CubicFeet(v)).0) as Conversion),
        ("kg->lbs", (|v: f64| Pounds::from(Kilograms(v)).0) as Conversion),
        ("lbs->kg", (|v: f64| Kilograms::from(Pounds(v)).0) as Conversion),
        ("°C->°F", (|v: f64| Fahrenheit::from(Celsius(v)).0) as Conversion),
        ("°F->°C", (|v: f64| Celsius::from(Fahrenheit(v)).0) as Conversion),
    ])
});

fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase()
}

/// Catalog of [`RegionalConfig`]s keyed by country code.
///
/// Built once at startup and shared by reference; it holds no interior
/// mutability, so concurrent reads need no synchronization.
#[derive(Debug, Clone, Default)]
pub struct RegionalFactorRegistry {
    configs: HashMap<String, RegionalConfig>,
}

impl RegionalFactorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in country catalog
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for config in catalog::default_configs() {
            if let Err(err) = registry.register(config) {
                tracing::error!(error = %err, "skipping invalid built-in regional config");
            }
        }
        registry
    }

    /// Insert or overwrite a config under its country key.
    ///
    /// # Errors
    ///
    /// [`CalcError::InvalidInput`] if the config fails
    /// [`RegionalConfig::validate`]; the registry is left unchanged.
    pub fn register(&mut self, config: RegionalConfig) -> CalcResult<()> {
        config.validate()?;
        let key = normalize_key(&config.country);
        if self.configs.insert(key.clone(), config).is_some() {
            tracing::debug!(country = %key, "replaced regional config");
        }
        Ok(())
    }

    pub fn is_registered(&self, country: &str) -> bool {
        self.configs.contains_key(&normalize_key(country))
    }

    /// Strict lookup.
    pub fn config(&self, country: &str) -> CalcResult<&RegionalConfig> {
        self.configs
            .get(&normalize_key(country))
            .ok_or_else(|| CalcError::unknown_region(country))
    }

    /// Registered country codes, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.configs.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Look up a factor. Electricity ignores `subcategory`.
    ///
    /// Unknown country or key yields [`DEFAULT_TRANSPORT_FACTOR`] for
    /// transport and `0.0` for every other category.
    pub fn get_factor(&self, country: &str, category: FactorCategory, subcategory: &str) -> f64 {
        let fallback = match category {
            FactorCategory::Transport => DEFAULT_TRANSPORT_FACTOR,
            _ => 0.0,
        };

        let Some(config) = self.configs.get(&normalize_key(country)) else {
            tracing::warn!(country, ?category, "unknown region, using default factor");
            return fallback;
        };

        let key = subcategory.trim().to_lowercase();
        let found = match category {
            FactorCategory::Electricity => Some(config.electricity_factor),
            FactorCategory::Fuel => config.fuel_factors.get(&key).copied(),
            FactorCategory::Material => config.material_factors.get(&key).copied(),
            FactorCategory::Transport => config.transport_factors.get(&key).copied(),
        };

        found.unwrap_or_else(|| {
            tracing::debug!(country, ?category, subcategory, "factor not found, using default");
            fallback
        })
    }

    /// Transport factor for a mode/fuel pair.
    ///
    /// Tries `"{mode}_{fuel}"`, then `"{mode}"`, then the default.
    pub fn transport_factor(&self, country: &str, mode: &str, fuel: &str) -> f64 {
        let Ok(config) = self.config(country) else {
            tracing::warn!(country, mode, fuel, "unknown region, using default transport factor");
            return DEFAULT_TRANSPORT_FACTOR;
        };

        let mode = mode.trim().to_lowercase();
        let fuel = fuel.trim().to_lowercase();
        config
            .transport_factors
            .get(&format!("{}_{}", mode, fuel))
            .or_else(|| config.transport_factors.get(&mode))
            .copied()
            .unwrap_or_else(|| {
                tracing::warn!(country, %mode, %fuel, "unknown transport mode/fuel, using default factor");
                DEFAULT_TRANSPORT_FACTOR
            })
    }

    /// Convert `value` from the unit `from_country` uses to the one `to_country` uses.
    ///
    /// Returns `value` unchanged when the units match, a country is unknown,
    /// or the pair has no conversion.
    pub fn convert_units(&self, value: f64, unit_type: UnitType, from_country: &str, to_country: &str) -> f64 {
        let (Ok(from), Ok(to)) = (self.config(from_country), self.config(to_country)) else {
            return value;
        };

        let from_unit = from.units.unit_for(unit_type);
        let to_unit = to.units.unit_for(unit_type);
        if from_unit == to_unit {
            return value;
        }

        match UNIT_CONVERSIONS.get(format!("{}->{}", from_unit, to_unit).as_str()) {
            Some(convert) => convert(value),
            None => {
                tracing::debug!(from_unit, to_unit, "no unit conversion, value unchanged");
                value
            }
        }
    }

    /// Scale emissions computed for one region to another:
    /// `base × (0.6 × climate ratio + 0.4 × grid ratio)`.
    ///
    /// Returns `base_emissions` unchanged if either country is unregistered.
    pub fn calculate_regional_adjustment(&self, base_emissions: f64, from_country: &str, to_country: &str) -> f64 {
        let (Ok(from), Ok(to)) = (self.config(from_country), self.config(to_country)) else {
            tracing::warn!(from_country, to_country, "regional adjustment skipped, unknown region");
            return base_emissions;
        };

        if from.climate_factor <= 0.0 || from.electricity_factor <= 0.0 {
            return base_emissions;
        }

        let climate_ratio = to.climate_factor / from.climate_factor;
        let grid_ratio = to.electricity_factor / from.electricity_factor;
        base_emissions * (CLIMATE_WEIGHT * climate_ratio + GRID_WEIGHT * grid_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RegionalFactorRegistry {
        RegionalFactorRegistry::with_defaults()
    }

    #[test]
    fn test_defaults_registered() {
        let reg = registry();
        for code in ["US", "GB", "DE", "FR", "AU", "JP", "CN", "IN", "CA", "SG"] {
            assert!(reg.is_registered(code), "{} missing", code);
        }
        assert!(reg.is_registered("gb"));
        assert_eq!(reg.countries().len(), 10);
    }

    #[test]
    fn test_register_overwrites() {
        let mut reg = registry();
        let mut config = reg.config("FR").unwrap().clone();
        config.electricity_factor = 0.5;
        reg.register(config).unwrap();
        assert_eq!(reg.get_factor("FR", FactorCategory::Electricity, ""), 0.5);
        assert_eq!(reg.countries().len(), 10);
    }

    #[test]
    fn test_register_rejects_invalid_factors() {
        let mut reg = registry();
        let before = reg.config("GB").unwrap().clone();

        let mut config = before.clone();
        config.climate_factor = 0.0;
        assert!(matches!(reg.register(config), Err(CalcError::InvalidInput { .. })));

        let mut config = before.clone();
        config.electricity_factor = f64::NAN;
        assert!(reg.register(config).is_err());

        let mut config = before.clone();
        config.material_factors.insert("steel".to_string(), -1.0);
        assert!(reg.register(config).is_err());

        assert_eq!(reg.config("GB").unwrap(), &before);
    }

    #[test]
    fn test_unknown_region_defaults() {
        let reg = registry();
        assert_eq!(reg.get_factor("XX", FactorCategory::Electricity, "grid"), 0.0);
        assert_eq!(reg.get_factor("XX", FactorCategory::Transport, "truck_diesel"), DEFAULT_TRANSPORT_FACTOR);
        assert!(matches!(reg.config("XX"), Err(CalcError::UnknownRegion { .. })));
    }

    #[test]
    fn test_unknown_subcategory_defaults() {
        let reg = registry();
        assert_eq!(reg.get_factor("DE", FactorCategory::Material, "unobtainium"), 0.0);
        assert_eq!(reg.get_factor("DE", FactorCategory::Transport, "zeppelin"), DEFAULT_TRANSPORT_FACTOR);
        assert!(reg.get_factor("DE", FactorCategory::Fuel, "Diesel") > 0.0);
    }

    #[test]
    fn test_transport_factor_lookup_order() {
        let reg = registry();
        let rail_electric = reg.transport_factor("FR", "rail", "electric");
        let rail = reg.transport_factor("FR", "rail", "hydrogen");
        assert!(rail_electric < rail);
        assert_eq!(reg.transport_factor("FR", "hovercraft", "diesel"), DEFAULT_TRANSPORT_FACTOR);
    }

    #[test]
    fn test_convert_units() {
        let reg = registry();
        let sqft = reg.convert_units(100.0, UnitType::Area, "GB", "US");
        assert!((sqft - 1076.39).abs() < 1e-9);

        let kg = reg.convert_units(100.0, UnitType::Weight, "US", "DE");
        assert!((kg - 45.3592).abs() < 1e-9);

        let m3 = reg.convert_units(10.0, UnitType::Volume, "US", "DE");
        assert!((m3 - 0.283168).abs() < 1e-9);

        let fahrenheit = reg.convert_units(20.0, UnitType::Temperature, "FR", "US");
        assert!((fahrenheit - 68.0).abs() < 1e-9);

        // Matching units and unknown countries pass through
        assert_eq!(reg.convert_units(42.0, UnitType::Volume, "DE", "FR"), 42.0);
        assert_eq!(reg.convert_units(42.0, UnitType::Volume, "DE", "XX"), 42.0);
    }

    #[test]
    fn test_regional_adjustment_identity() {
        let reg = registry();
        for code in reg.countries() {
            assert_eq!(reg.calculate_regional_adjustment(1234.5, code, code), 1234.5);
        }
    }

    #[test]
    fn test_regional_adjustment_formula() {
        let reg = registry();
        let from = reg.config("US").unwrap();
        let to = reg.config("FR").unwrap();
        let expected = 1000.0
            * (0.6 * (to.climate_factor / from.climate_factor)
                + 0.4 * (to.electricity_factor / from.electricity_factor));
        let adjusted = reg.calculate_regional_adjustment(1000.0, "US", "FR");
        assert!((adjusted - expected).abs() < 1e-9);
        // France has a far cleaner grid than the US
        assert!(adjusted < 1000.0);
    }

    #[test]
    fn test_regional_adjustment_unknown() {
        let reg = registry();
        assert_eq!(reg.calculate_regional_adjustment(500.0, "US", "XX"), 500.0);
        assert_eq!(reg.calculate_regional_adjustment(500.0, "XX", "US"), 500.0);
    }
}
