//! GHG Protocol scope inventory.
//!
//! Scope 1 (direct combustion and refrigerant leakage), Scope 2 (purchased
//! electricity, heat and steam) and Scope 3 (business travel, commuting,
//! waste) are computed independently; `total_emissions` is their sum.
//! Fuel and grid factors come from the [`RegionalFactorRegistry`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_non_negative, CalcError, CalcResult};
use crate::regional::{FactorCategory, RegionalFactorRegistry};

/// District heat, kg CO2e/kWh
pub const HEAT_FACTOR: f64 = 0.170;
/// Purchased steam, kg CO2e/kWh
pub const STEAM_FACTOR: f64 = 0.190;

/// 100-year GWP (IPCC AR5) of common refrigerants.
pub fn refrigerant_gwp(refrigerant: &str) -> Option<f64> {
    let gwp = match refrigerant.trim().to_uppercase().replace('-', "").as_str() {
        "R410A" => 2088.0,
        "R134A" => 1430.0,
        "R32" => 675.0,
        "R404A" => 3922.0,
        "R407C" => 1774.0,
        "R22" => 1810.0,
        "R1234YF" => 4.0,
        "R290" => 3.0,
        "R744" | "CO2" => 1.0,
        _ => return None,
    };
    Some(gwp)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Air,
    Rail,
    Car,
    Bus,
}

impl TravelMode {
    /// kg CO2e per passenger-km
    pub fn factor(&self) -> f64 {
        match self {
            TravelMode::Air => 0.255,
            TravelMode::Rail => 0.041,
            TravelMode::Car => 0.171,
            TravelMode::Bus => 0.105,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteMethod {
    Landfill,
    Incineration,
    Recycling,
    Composting,
}

impl WasteMethod {
    /// kg CO2e per tonne
    pub fn factor(&self) -> f64 {
        match self {
            WasteMethod::Landfill => 587.0,
            WasteMethod::Incineration => 21.3,
            WasteMethod::Recycling => 21.3,
            WasteMethod::Composting => 8.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelUse {
    /// Registry fuel key (diesel, natural_gas, ...)
    pub fuel: String,
    /// Litres for liquids, kWh for natural gas
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefrigerantLeak {
    pub refrigerant: String,
    pub leaked_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelActivity {
    pub mode: TravelMode,
    /// Passenger-km
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteDisposal {
    pub method: WasteMethod,
    pub tonnes: f64,
}

/// Activity data for one reporting period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GhgActivityData {
    /// Country for fuel and grid factors
    pub country: String,
    pub fuels: Vec<FuelUse>,
    pub refrigerants: Vec<RefrigerantLeak>,
    pub electricity_kwh: f64,
    pub heat_kwh: f64,
    pub steam_kwh: f64,
    pub business_travel: Vec<TravelActivity>,
    pub commuting: Vec<TravelActivity>,
    pub waste: Vec<WasteDisposal>,
}

/// Emissions of one scope with a per-source breakdown (kg CO2e).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScopeEmissions {
    pub total: f64,
    pub breakdown: BTreeMap<String, f64>,
}

impl ScopeEmissions {
    fn add(&mut self, source: impl Into<String>, kg: f64) {
        *self.breakdown.entry(source.into()).or_insert(0.0) += kg;
        self.total += kg;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhgInventory {
    pub scope1: ScopeEmissions,
    pub scope2: ScopeEmissions,
    pub scope3: ScopeEmissions,
    pub total_emissions: f64,
}

/// Scope calculator bound to a factor registry.
#[derive(Debug, Clone, Copy)]
pub struct GhgScopeCalculator<'a> {
    registry: &'a RegionalFactorRegistry,
}

impl<'a> GhgScopeCalculator<'a> {
    pub fn new(registry: &'a RegionalFactorRegistry) -> Self {
        GhgScopeCalculator { registry }
    }

    /// Direct emissions: fuel × registry fuel factor, leak × refrigerant GWP.
    pub fn scope1(&self, data: &GhgActivityData) -> CalcResult<ScopeEmissions> {
        let mut scope = ScopeEmissions::default();
        for fuel in &data.fuels {
            ensure_non_negative(format!("fuels[{}].amount", fuel.fuel), fuel.amount)?;
            let factor = self.registry.get_factor(&data.country, FactorCategory::Fuel, &fuel.fuel);
            if factor == 0.0 {
                tracing::warn!(fuel = %fuel.fuel, country = %data.country, "no fuel factor, counted as zero");
            }
            scope.add(format!("combustion:{}", fuel.fuel.to_lowercase()), fuel.amount * factor);
        }
        for leak in &data.refrigerants {
            ensure_non_negative(format!("refrigerants[{}].leaked_kg", leak.refrigerant), leak.leaked_kg)?;
            let gwp = refrigerant_gwp(&leak.refrigerant).ok_or_else(|| {
                CalcError::invalid_input("refrigerant", leak.refrigerant.clone(), "Unknown refrigerant")
            })?;
            scope.add(format!("refrigerant:{}", leak.refrigerant.to_uppercase()), leak.leaked_kg * gwp);
        }
        Ok(scope)
    }

    /// Location-based purchased energy.
    pub fn scope2(&self, data: &GhgActivityData) -> CalcResult<ScopeEmissions> {
        ensure_non_negative("electricity_kwh", data.electricity_kwh)?;
        ensure_non_negative("heat_kwh", data.heat_kwh)?;
        ensure_non_negative("steam_kwh", data.steam_kwh)?;

        let grid = self.registry.get_factor(&data.country, FactorCategory::Electricity, "grid");
        let mut scope = ScopeEmissions::default();
        scope.add("electricity", data.electricity_kwh * grid);
        scope.add("heat", data.heat_kwh * HEAT_FACTOR);
        scope.add("steam", data.steam_kwh * STEAM_FACTOR);
        Ok(scope)
    }

    /// Business travel, commuting and waste.
    pub fn scope3(&self, data: &GhgActivityData) -> CalcResult<ScopeEmissions> {
        let mut scope = ScopeEmissions::default();
        for trip in &data.business_travel {
            ensure_non_negative("business_travel.distance_km", trip.distance_km)?;
            scope.add("business_travel", trip.distance_km * trip.mode.factor());
        }
        for trip in &data.commuting {
            ensure_non_negative("commuting.distance_km", trip.distance_km)?;
            scope.add("employee_commuting", trip.distance_km * trip.mode.factor());
        }
        for waste in &data.waste {
            ensure_non_negative("waste.tonnes", waste.tonnes)?;
            scope.add("waste", waste.tonnes * waste.method.factor());
        }
        Ok(scope)
    }

    pub fn inventory(&self, data: &GhgActivityData) -> CalcResult<GhgInventory> {
        let scope1 = self.scope1(data)?;
        let scope2 = self.scope2(data)?;
        let scope3 = self.scope3(data)?;
        let total_emissions = scope1.total + scope2.total + scope3.total;
        Ok(GhgInventory {
            scope1,
            scope2,
            scope3,
            total_emissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity() -> GhgActivityData {
        GhgActivityData {
            country: "GB".to_string(),
            fuels: vec![
                FuelUse { fuel: "diesel".into(), amount: 1000.0 },
                FuelUse { fuel: "natural_gas".into(), amount: 5000.0 },
            ],
            refrigerants: vec![RefrigerantLeak { refrigerant: "R-410A".into(), leaked_kg: 2.0 }],
            electricity_kwh: 10_000.0,
            heat_kwh: 1000.0,
            steam_kwh: 0.0,
            business_travel: vec![TravelActivity { mode: TravelMode::Air, distance_km: 4000.0 }],
            commuting: vec![TravelActivity { mode: TravelMode::Car, distance_km: 20_000.0 }],
            waste: vec![WasteDisposal { method: WasteMethod::Landfill, tonnes: 3.0 }],
        }
    }

    #[test]
    fn test_scope1() {
        let reg = RegionalFactorRegistry::with_defaults();
        let scope = GhgScopeCalculator::new(&reg).scope1(&activity()).unwrap();
        let expected = 1000.0 * 2.68 + 5000.0 * 0.184 + 2.0 * 2088.0;
        assert!((scope.total - expected).abs() < 1e-6);
        assert!(scope.breakdown.contains_key("refrigerant:R-410A"));
    }

    #[test]
    fn test_scope2_uses_grid_factor() {
        let reg = RegionalFactorRegistry::with_defaults();
        let scope = GhgScopeCalculator::new(&reg).scope2(&activity()).unwrap();
        let grid = reg.config("GB").unwrap().electricity_factor;
        assert!((scope.total - (10_000.0 * grid + 1000.0 * HEAT_FACTOR)).abs() < 1e-6);
    }

    #[test]
    fn test_inventory_total_is_sum_of_scopes() {
        let reg = RegionalFactorRegistry::with_defaults();
        let inv = GhgScopeCalculator::new(&reg).inventory(&activity()).unwrap();
        assert_eq!(inv.total_emissions, inv.scope1.total + inv.scope2.total + inv.scope3.total);
        let scope3 = 4000.0 * 0.255 + 20_000.0 * 0.171 + 3.0 * 587.0;
        assert!((inv.scope3.total - scope3).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_refrigerant_rejected() {
        let reg = RegionalFactorRegistry::with_defaults();
        let mut data = activity();
        data.refrigerants[0].refrigerant = "R-999".into();
        assert!(matches!(
            GhgScopeCalculator::new(&reg).scope1(&data),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_unknown_country_defaults_to_zero_factors() {
        let reg = RegionalFactorRegistry::with_defaults();
        let mut data = activity();
        data.country = "ZZ".into();
        let scope2 = GhgScopeCalculator::new(&reg).scope2(&data).unwrap();
        assert_eq!(scope2.breakdown["electricity"], 0.0);
    }

    #[test]
    fn test_refrigerant_names() {
        assert_eq!(refrigerant_gwp("r134a"), Some(1430.0));
        assert_eq!(refrigerant_gwp("R-32"), Some(675.0));
        assert_eq!(refrigerant_gwp("unobtainium"), None);
    }
}
