//! EN 15804 lifecycle stage codes and the per-stage result set.
//!
//! The stage order (A1…A5, B1…B7, C1…C4, D) and the exact code strings are
//! part of the serialized contract; exporters rely on both.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// EN 15804 module codes. Variant order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EpdStage {
    /// Raw material supply
    A1,
    /// Transport to manufacturer
    A2,
    /// Manufacturing
    A3,
    /// Transport to site
    A4,
    /// Construction / installation
    A5,
    /// Use
    B1,
    /// Maintenance
    B2,
    /// Repair
    B3,
    /// Replacement
    B4,
    /// Refurbishment
    B5,
    /// Operational energy use
    B6,
    /// Operational water use
    B7,
    /// Deconstruction / demolition
    C1,
    /// Transport to waste processing
    C2,
    /// Waste processing
    C3,
    /// Disposal
    C4,
    /// Reuse, recovery and recycling potential
    D,
}

impl EpdStage {
    /// All stages in reporting order
    pub const ALL: [EpdStage; 17] = [
        EpdStage::A1,
        EpdStage::A2,
        EpdStage::A3,
        EpdStage::A4,
        EpdStage::A5,
        EpdStage::B1,
        EpdStage::B2,
        EpdStage::B3,
        EpdStage::B4,
        EpdStage::B5,
        EpdStage::B6,
        EpdStage::B7,
        EpdStage::C1,
        EpdStage::C2,
        EpdStage::C3,
        EpdStage::C4,
        EpdStage::D,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EpdStage::A1 => "A1",
            EpdStage::A2 => "A2",
            EpdStage::A3 => "A3",
            EpdStage::A4 => "A4",
            EpdStage::A5 => "A5",
            EpdStage::B1 => "B1",
            EpdStage::B2 => "B2",
            EpdStage::B3 => "B3",
            EpdStage::B4 => "B4",
            EpdStage::B5 => "B5",
            EpdStage::B6 => "B6",
            EpdStage::B7 => "B7",
            EpdStage::C1 => "C1",
            EpdStage::C2 => "C2",
            EpdStage::C3 => "C3",
            EpdStage::C4 => "C4",
            EpdStage::D => "D",
        }
    }

    /// Parse a stage code (case-insensitive).
    pub fn from_code(code: &str) -> CalcResult<Self> {
        let upper = code.trim().to_uppercase();
        EpdStage::ALL
            .iter()
            .copied()
            .find(|stage| stage.code() == upper)
            .ok_or_else(|| CalcError::invalid_input("stage", code, "Unknown EN 15804 stage code"))
    }

    pub fn description(&self) -> &'static str {
        match self {
            EpdStage::A1 => "Raw material supply",
            EpdStage::A2 => "Transport to manufacturer",
            EpdStage::A3 => "Manufacturing",
            EpdStage::A4 => "Transport to site",
            EpdStage::A5 => "Construction installation",
            EpdStage::B1 => "Use",
            EpdStage::B2 => "Maintenance",
            EpdStage::B3 => "Repair",
            EpdStage::B4 => "Replacement",
            EpdStage::B5 => "Refurbishment",
            EpdStage::B6 => "Operational energy use",
            EpdStage::B7 => "Operational water use",
            EpdStage::C1 => "Deconstruction",
            EpdStage::C2 => "Waste transport",
            EpdStage::C3 => "Waste processing",
            EpdStage::C4 => "Disposal",
            EpdStage::D => "Benefits beyond the system boundary",
        }
    }
}

impl std::fmt::Display for EpdStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Subtotals per EN 15804 information module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuleTotals {
    /// A1-A3
    pub product: f64,
    /// A4-A5
    pub construction: f64,
    /// B1-B7
    pub use_stage: f64,
    /// C1-C4
    pub end_of_life: f64,
    /// D
    pub beyond_system: f64,
}

/// Per-stage emissions in kg CO2e.
///
/// `total_co2e` is always the sum of the 17 stage values. The GWP split is
/// a fixed heuristic (fossil 85%, biogenic 10% by default), so `gwp_total`
/// is 95% of `total_co2e` rather than all of it.
///
/// ## JSON Example
///
/// ```json
/// {
///   "stages": { "A1": 35.0, "A2": 0.0, "...": 0.0, "D": -1.05 },
///   "total_co2e": 37.2,
///   "gwp_fossil": 31.62,
///   "gwp_biogenic": 3.72,
///   "gwp_total": 35.34
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpdStageResult {
    pub stages: BTreeMap<EpdStage, f64>,
    pub total_co2e: f64,
    pub gwp_fossil: f64,
    pub gwp_biogenic: f64,
    pub gwp_total: f64,
}

impl EpdStageResult {
    /// Build from stage values in [`EpdStage::ALL`] order.
    pub fn from_values(values: [f64; 17], fossil_share: f64, biogenic_share: f64) -> Self {
        let stages: BTreeMap<EpdStage, f64> = EpdStage::ALL.iter().copied().zip(values).collect();
        let total_co2e: f64 = stages.values().sum();
        let gwp_fossil = fossil_share * total_co2e;
        let gwp_biogenic = biogenic_share * total_co2e;

        EpdStageResult {
            stages,
            total_co2e,
            gwp_fossil,
            gwp_biogenic,
            gwp_total: gwp_fossil + gwp_biogenic,
        }
    }

    pub fn get(&self, stage: EpdStage) -> f64 {
        self.stages.get(&stage).copied().unwrap_or(0.0)
    }

    /// Look up a stage by its code string.
    pub fn stage_by_code(&self, code: &str) -> CalcResult<f64> {
        EpdStage::from_code(code).map(|stage| self.get(stage))
    }

    fn sum(&self, from: EpdStage, to: EpdStage) -> f64 {
        self.stages.range(from..=to).map(|(_, v)| v).sum()
    }

    pub fn modules(&self) -> ModuleTotals {
        ModuleTotals {
            product: self.sum(EpdStage::A1, EpdStage::A3),
            construction: self.sum(EpdStage::A4, EpdStage::A5),
            use_stage: self.sum(EpdStage::B1, EpdStage::B7),
            end_of_life: self.sum(EpdStage::C1, EpdStage::C4),
            beyond_system: self.get(EpdStage::D),
        }
    }

    /// Stages in reporting order as `(code, value)` pairs.
    pub fn ordered(&self) -> Vec<(&'static str, f64)> {
        EpdStage::ALL.iter().map(|s| (s.code(), self.get(*s))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EpdStageResult {
        let mut values = [0.0; 17];
        values[0] = 100.0; // A1
        values[1] = 10.0; // A2
        values[4] = 5.0; // A5
        values[12] = 2.0; // C1
        values[16] = -15.0; // D
        EpdStageResult::from_values(values, 0.85, 0.10)
    }

    #[test]
    fn test_stage_order_and_codes() {
        let codes: Vec<&str> = EpdStage::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(
            codes,
            ["A1", "A2", "A3", "A4", "A5", "B1", "B2", "B3", "B4", "B5", "B6", "B7", "C1", "C2", "C3", "C4", "D"]
        );
        let mut sorted = EpdStage::ALL;
        sorted.sort();
        assert_eq!(sorted, EpdStage::ALL);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(EpdStage::from_code("b6").unwrap(), EpdStage::B6);
        assert_eq!(EpdStage::from_code("D").unwrap(), EpdStage::D);
        let err = EpdStage::from_code("E1").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_totals_and_gwp() {
        let result = sample();
        assert_eq!(result.total_co2e, 102.0);
        assert_eq!(result.gwp_fossil + result.gwp_biogenic, result.gwp_total);
        assert!((result.gwp_total - 0.95 * result.total_co2e).abs() < 1e-9);
    }

    #[test]
    fn test_modules() {
        let modules = sample().modules();
        assert_eq!(modules.product, 110.0);
        assert_eq!(modules.construction, 5.0);
        assert_eq!(modules.use_stage, 0.0);
        assert_eq!(modules.end_of_life, 2.0);
        assert_eq!(modules.beyond_system, -15.0);
    }

    #[test]
    fn test_serialized_stage_keys_in_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let a1 = json.find("\"A1\"").unwrap();
        let b7 = json.find("\"B7\"").unwrap();
        let d = json.find("\"D\"").unwrap();
        assert!(a1 < b7 && b7 < d);
        let roundtrip: EpdStageResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, sample());
    }

    #[test]
    fn test_stage_by_code() {
        let result = sample();
        assert_eq!(result.stage_by_code("A1").unwrap(), 100.0);
        assert!(result.stage_by_code("Z9").is_err());
    }
}
