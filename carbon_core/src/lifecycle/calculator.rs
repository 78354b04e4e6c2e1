//! Stage formulas.
//!
//! ```text
//! A1 = Σ quantity × carbon_footprint
//! A2 = Σ legs  factor(mode, fuel) × weight × distance / 1000
//! A3 = Σ energy (kWh × 0.82 | 0.18) × (1 − renewable / 100)
//! A4 = factor × total weight × 50 km / 1000
//! A5 = 0.05 × A1
//! B1..B7 = 0
//! C1 = 0.02 × A1
//! C2 = factor × total weight × 25 km / 1000
//! C3 = incineration × 0.05 × A1 − recycling × 0.10 × A1
//! C4 = landfill × 0.02 × A1
//! D  = −(recycling × 0.15 × A1)
//! ```
//!
//! Shares are the waste rates divided by 100. Constants come from
//! [`EmissionParameters`].

use crate::config::EmissionParameters;
use crate::errors::CalcResult;
use crate::regional::{RegionalFactorRegistry, DEFAULT_TRANSPORT_FACTOR};

use super::{EnergyType, EpdStageResult, LifecycleInput, TransportInput};

/// Stateless calculator bound to a registry and a parameter table.
#[derive(Debug, Clone)]
pub struct LifecycleEmissionsCalculator<'a> {
    registry: &'a RegionalFactorRegistry,
    parameters: EmissionParameters,
    default_country: String,
}

impl<'a> LifecycleEmissionsCalculator<'a> {
    pub fn new(registry: &'a RegionalFactorRegistry, parameters: EmissionParameters) -> Self {
        LifecycleEmissionsCalculator {
            registry,
            parameters,
            default_country: "US".to_string(),
        }
    }

    /// Country used when the input does not name one (builder pattern)
    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }

    pub fn parameters(&self) -> &EmissionParameters {
        &self.parameters
    }

    /// Calculate the 17 stage values for `input`.
    ///
    /// # Errors
    ///
    /// [`crate::CalcError::InvalidInput`] for negative or non-finite
    /// quantities, distances, weights or energy amounts, percentages outside
    /// 0-100, and unknown energy units.
    pub fn calculate(&self, input: &LifecycleInput) -> CalcResult<EpdStageResult> {
        input.validate()?;
        self.parameters.validate()?;

        let p = &self.parameters;
        let country = input.country.as_deref().unwrap_or(&self.default_country);
        let total_weight_kg = input.total_material_weight_kg();

        let a1: f64 = input.materials.iter().map(|m| m.embodied_co2e()).sum();

        let a2: f64 = input
            .transport
            .iter()
            .map(|leg| {
                let weight = if leg.weight_kg > 0.0 { leg.weight_kg } else { total_weight_kg };
                self.leg_factor(country, leg) * weight * leg.distance_km / 1000.0
            })
            .sum();

        let mut a3 = 0.0;
        for energy in &input.energy {
            let factor = match energy.energy_type {
                EnergyType::Electricity => p.electricity_factor,
                EnergyType::Gas => p.gas_factor,
            };
            a3 += energy.amount_kwh()? * factor * (1.0 - energy.renewable_percentage / 100.0);
        }

        // Site delivery and waste legs reuse the first leg's mode/fuel
        let delivery_factor = input
            .transport
            .first()
            .map(|leg| self.leg_factor(country, leg))
            .unwrap_or(DEFAULT_TRANSPORT_FACTOR);
        let a4 = delivery_factor * total_weight_kg * p.site_delivery_km / 1000.0;
        let a5 = p.installation_share * a1;

        let recycling = input.waste.recycling_rate / 100.0;
        let incineration = input.waste.incineration_rate / 100.0;
        let landfill = input.waste.landfill_rate / 100.0;

        let c1 = p.deconstruction_share * a1;
        let c2 = delivery_factor * total_weight_kg * p.waste_transport_km / 1000.0;
        let c3 = incineration * p.incineration_share * a1 - recycling * p.recycling_processing_share * a1;
        let c4 = landfill * p.landfill_share * a1;
        let d = -(recycling * p.recycling_credit_share * a1);

        let values = [
            a1, a2, a3, a4, a5, // A
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // B1-B7
            c1, c2, c3, c4, // C
            d,
        ];

        let result = EpdStageResult::from_values(values, p.gwp_fossil_share, p.gwp_biogenic_share);
        tracing::debug!(
            country,
            materials = input.materials.len(),
            total_co2e = result.total_co2e,
            "lifecycle emissions calculated"
        );
        Ok(result)
    }

    fn leg_factor(&self, country: &str, leg: &TransportInput) -> f64 {
        self.registry.transport_factor(country, leg.mode.code(), &leg.fuel_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{EnergyInput, EpdStage, MaterialInput, TransportMode, WasteProfile};
    use crate::CalcError;

    const EPS: f64 = 1e-9;

    fn registry() -> RegionalFactorRegistry {
        RegionalFactorRegistry::with_defaults()
    }

    fn full_input() -> LifecycleInput {
        LifecycleInput {
            country: Some("GB".to_string()),
            materials: vec![
                MaterialInput::new("Steel beams", 2.0, "t", 1850.0),
                MaterialInput::new("Timber", 800.0, "kg", 0.45),
                MaterialInput::new("Concrete", 40.0, "m3", 310.0),
            ],
            transport: vec![
                TransportInput::new(TransportMode::Truck, 120.0, 0.0, "diesel"),
                TransportInput::new(TransportMode::Rail, 400.0, 2000.0, "electric"),
            ],
            energy: vec![
                EnergyInput::new(EnergyType::Electricity, 1200.0, "kWh", 40.0),
                EnergyInput::new(EnergyType::Gas, 500.0, "kWh", 0.0),
            ],
            waste: WasteProfile::new(70.0, 10.0, 20.0),
        }
    }

    #[test]
    fn test_a1_example() {
        let reg = registry();
        let calc = LifecycleEmissionsCalculator::new(&reg, EmissionParameters::default());
        let input = LifecycleInput {
            materials: vec![
                MaterialInput::new("A", 10.0, "m3", 2.0),
                MaterialInput::new("B", 5.0, "m3", 3.0),
            ],
            ..LifecycleInput::default()
        };
        let result = calc.calculate(&input).unwrap();
        assert_eq!(result.get(EpdStage::A1), 35.0);
        assert!((result.get(EpdStage::A5) - 1.75).abs() < EPS);
        assert!((result.get(EpdStage::C1) - 0.7).abs() < EPS);
        // No mass units: no transport burden
        assert_eq!(result.get(EpdStage::A4), 0.0);
    }

    #[test]
    fn test_stage_formulas() {
        let reg = registry();
        let calc = LifecycleEmissionsCalculator::new(&reg, EmissionParameters::default());
        let input = full_input();
        let result = calc.calculate(&input).unwrap();

        let a1 = 2.0 * 1850.0 + 800.0 * 0.45 + 40.0 * 310.0;
        assert!((result.get(EpdStage::A1) - a1).abs() < EPS);

        let weight = 2800.0;
        let truck = reg.transport_factor("GB", "truck", "diesel");
        let rail = reg.transport_factor("GB", "rail", "electric");
        let a2 = truck * weight * 120.0 / 1000.0 + rail * 2000.0 * 400.0 / 1000.0;
        assert!((result.get(EpdStage::A2) - a2).abs() < EPS);

        let a3 = 1200.0 * 0.82 * 0.6 + 500.0 * 0.18;
        assert!((result.get(EpdStage::A3) - a3).abs() < EPS);

        assert!((result.get(EpdStage::A4) - truck * weight * 50.0 / 1000.0).abs() < EPS);
        assert!((result.get(EpdStage::C2) - truck * weight * 25.0 / 1000.0).abs() < EPS);
        assert!((result.get(EpdStage::C3) - (0.1 * 0.05 * a1 - 0.7 * 0.10 * a1)).abs() < 1e-6);
        assert!((result.get(EpdStage::C4) - 0.2 * 0.02 * a1).abs() < 1e-6);
        assert!((result.get(EpdStage::D) + 0.7 * 0.15 * a1).abs() < 1e-6);

        for stage in [EpdStage::B1, EpdStage::B2, EpdStage::B3, EpdStage::B4, EpdStage::B5, EpdStage::B6, EpdStage::B7] {
            assert_eq!(result.get(stage), 0.0);
        }
    }

    #[test]
    fn test_total_is_sum_of_stages() {
        let reg = registry();
        let calc = LifecycleEmissionsCalculator::new(&reg, EmissionParameters::default());
        let result = calc.calculate(&full_input()).unwrap();
        let sum: f64 = result.stages.values().sum();
        assert!((sum - result.total_co2e).abs() < 1e-6);
        assert_eq!(result.gwp_fossil + result.gwp_biogenic, result.gwp_total);
        assert!((result.gwp_total - 0.95 * result.total_co2e).abs() < 1e-6);
    }

    #[test]
    fn test_credit_never_positive() {
        let reg = registry();
        let calc = LifecycleEmissionsCalculator::new(&reg, EmissionParameters::default());
        let mut input = full_input();
        input.waste = WasteProfile::default();
        let result = calc.calculate(&input).unwrap();
        assert!(result.get(EpdStage::D) <= 0.0);
        assert_eq!(result.get(EpdStage::C3), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let reg = registry();
        let calc = LifecycleEmissionsCalculator::new(&reg, EmissionParameters::default());

        let mut input = full_input();
        input.materials[0].quantity = -1.0;
        assert!(matches!(calc.calculate(&input), Err(CalcError::InvalidInput { .. })));

        let mut input = full_input();
        input.transport[0].distance_km = f64::INFINITY;
        assert!(matches!(calc.calculate(&input), Err(CalcError::InvalidInput { .. })));

        let mut input = full_input();
        input.energy[0].renewable_percentage = 150.0;
        assert!(matches!(calc.calculate(&input), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_unknown_country_uses_default_factor() {
        let reg = registry();
        let calc = LifecycleEmissionsCalculator::new(&reg, EmissionParameters::default());
        let mut input = full_input();
        input.country = Some("ZZ".to_string());
        input.transport.truncate(1);
        let result = calc.calculate(&input).unwrap();
        let expected = DEFAULT_TRANSPORT_FACTOR * 2800.0 * 120.0 / 1000.0;
        assert!((result.get(EpdStage::A2) - expected).abs() < EPS);
    }

    #[test]
    fn test_custom_parameters() {
        let reg = registry();
        let params = EmissionParameters {
            installation_share: 0.10,
            site_delivery_km: 100.0,
            ..EmissionParameters::default()
        };
        let calc = LifecycleEmissionsCalculator::new(&reg, params).with_default_country("DE");
        let input = LifecycleInput {
            materials: vec![MaterialInput::new("Steel", 1000.0, "kg", 2.0)],
            ..LifecycleInput::default()
        };
        let result = calc.calculate(&input).unwrap();
        assert!((result.get(EpdStage::A5) - 200.0).abs() < EPS);
        let expected_a4 = DEFAULT_TRANSPORT_FACTOR * 1000.0 * 100.0 / 1000.0;
        assert!((result.get(EpdStage::A4) - expected_a4).abs() < EPS);
    }
}
