//! Built-in regional factor catalog.
//!
//! Grid intensities are national averages (kg CO2e/kWh). Fuel factors are
//! per litre for liquids and per kWh for natural gas. Material factors are
//! cradle-to-gate kg CO2e/kg. Transport factors are kg CO2e per tonne-km.

use std::collections::HashMap;

use super::{RegionalConfig, UnitSystem};

/// Baseline fuel factors shared by every country.
fn fuel_factors() -> HashMap<String, f64> {
    [
        ("diesel", 2.68),
        ("petrol", 2.31),
        ("gasoline", 2.31),
        ("natural_gas", 0.184),
        ("lpg", 1.51),
        ("heating_oil", 2.52),
        ("heavy_fuel_oil", 3.11),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Baseline material factors; `steel_scale` captures the local mix of
/// blast-furnace vs. electric-arc production, `cement_scale` the clinker ratio.
fn material_factors(steel_scale: f64, cement_scale: f64) -> HashMap<String, f64> {
    [
        ("concrete", 0.13 * cement_scale),
        ("cement", 0.91 * cement_scale),
        ("steel", 1.85 * steel_scale),
        ("rebar", 1.99 * steel_scale),
        ("aluminum", 8.24),
        ("glass", 1.44),
        ("timber", 0.45),
        ("glulam", 0.51),
        ("brick", 0.24),
        ("insulation", 1.86),
        ("gypsum", 0.39),
        ("asphalt", 0.19),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Transport factors; electric modes follow the local grid.
fn transport_factors(electricity_factor: f64) -> HashMap<String, f64> {
    let grid_scale = electricity_factor / 0.4;
    [
        ("truck", 0.062),
        ("truck_diesel", 0.062),
        ("truck_lng", 0.054),
        ("truck_electric", 0.025 * grid_scale),
        ("rail", 0.022),
        ("rail_diesel", 0.022),
        ("rail_electric", 0.008 * grid_scale),
        ("ship", 0.008),
        ("ship_heavy_fuel_oil", 0.008),
        ("ship_diesel", 0.010),
        ("ship_lng", 0.007),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

struct Row {
    country: &'static str,
    region: &'static str,
    currency: &'static str,
    electricity_factor: f64,
    climate_factor: f64,
    renewable_percentage: f64,
    steel_scale: f64,
    cement_scale: f64,
    imperial: bool,
}

const ROWS: [Row; 10] = [
    Row { country: "US", region: "North America", currency: "USD", electricity_factor: 0.386, climate_factor: 1.00, renewable_percentage: 21.0, steel_scale: 0.75, cement_scale: 1.00, imperial: true },
    Row { country: "CA", region: "North America", currency: "CAD", electricity_factor: 0.120, climate_factor: 1.20, renewable_percentage: 68.0, steel_scale: 0.85, cement_scale: 0.95, imperial: false },
    Row { country: "GB", region: "Europe", currency: "GBP", electricity_factor: 0.207, climate_factor: 0.90, renewable_percentage: 43.0, steel_scale: 0.90, cement_scale: 0.92, imperial: false },
    Row { country: "DE", region: "Europe", currency: "EUR", electricity_factor: 0.366, climate_factor: 0.95, renewable_percentage: 46.0, steel_scale: 0.88, cement_scale: 0.90, imperial: false },
    Row { country: "FR", region: "Europe", currency: "EUR", electricity_factor: 0.052, climate_factor: 0.92, renewable_percentage: 25.0, steel_scale: 0.80, cement_scale: 0.88, imperial: false },
    Row { country: "AU", region: "Oceania", currency: "AUD", electricity_factor: 0.680, climate_factor: 1.10, renewable_percentage: 32.0, steel_scale: 1.05, cement_scale: 1.02, imperial: false },
    Row { country: "JP", region: "Asia", currency: "JPY", electricity_factor: 0.457, climate_factor: 1.00, renewable_percentage: 22.0, steel_scale: 1.02, cement_scale: 0.97, imperial: false },
    Row { country: "CN", region: "Asia", currency: "CNY", electricity_factor: 0.581, climate_factor: 1.05, renewable_percentage: 31.0, steel_scale: 1.15, cement_scale: 1.08, imperial: false },
    Row { country: "IN", region: "Asia", currency: "INR", electricity_factor: 0.708, climate_factor: 1.15, renewable_percentage: 23.0, steel_scale: 1.20, cement_scale: 1.05, imperial: false },
    Row { country: "SG", region: "Asia", currency: "SGD", electricity_factor: 0.408, climate_factor: 1.25, renewable_percentage: 4.0, steel_scale: 1.00, cement_scale: 1.00, imperial: false },
];

/// Country configs registered by [`super::RegionalFactorRegistry::with_defaults`].
pub fn default_configs() -> Vec<RegionalConfig> {
    ROWS.iter()
        .map(|row| RegionalConfig {
            country: row.country.to_string(),
            region: row.region.to_string(),
            currency: row.currency.to_string(),
            electricity_factor: row.electricity_factor,
            fuel_factors: fuel_factors(),
            material_factors: material_factors(row.steel_scale, row.cement_scale),
            transport_factors: transport_factors(row.electricity_factor),
            climate_factor: row.climate_factor,
            renewable_percentage: row.renewable_percentage,
            units: if row.imperial {
                UnitSystem::imperial()
            } else {
                UnitSystem::metric()
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_consistent() {
        let configs = default_configs();
        assert_eq!(configs.len(), ROWS.len());
        for config in &configs {
            assert!(config.electricity_factor > 0.0);
            assert!(config.climate_factor > 0.0);
            assert!((0.0..=100.0).contains(&config.renewable_percentage));
            assert!(config.transport_factors.contains_key("truck_diesel"));
            assert_eq!(config.transport_factors["truck_diesel"], super::super::DEFAULT_TRANSPORT_FACTOR);
            assert!(config.validate().is_ok(), "{} fails validation", config.country);
        }
    }

    #[test]
    fn test_us_reports_imperial() {
        let us = default_configs().into_iter().find(|c| c.country == "US").unwrap();
        assert_eq!(us.units.area, "ft²");
        assert_eq!(us.units.temperature, "°F");
    }
}
