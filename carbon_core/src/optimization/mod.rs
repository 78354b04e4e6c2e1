//! # Material Optimization
//!
//! Lower-carbon alternatives for a bill of materials. Suggestions come from
//! an injected [`RecommendationProvider`] when one is configured, otherwise
//! (or when it times out, fails, or answers with something unusable) from
//! a deterministic local [`fallback_report`]. Reports are memoized per
//! material-set [`fingerprint`] by [`OptimizationRecommendationCache`].
//!
//! ## Provider response format
//!
//! ```json
//! {
//!   "alternatives": [
//!     { "original": "Concrete C30/37", "alternative": "GGBS concrete", "carbon_footprint": 190.0 }
//!   ]
//! }
//! ```
//!
//! Text around the JSON object is ignored. `carbon_footprint` is the
//! alternative's factor in the original material's unit.

pub mod cache;
pub mod fallback;
pub mod provider;

pub use cache::{CacheEntry, Clock, ManualClock, OptimizationRecommendationCache, SystemClock};
pub use fallback::{fallback_report, FALLBACK_FACTOR_SCALE, FALLBACK_REDUCTION_PERCENT};
pub use provider::RecommendationProvider;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::lifecycle::MaterialInput;

/// Where a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Provider,
    Fallback,
}

/// One suggested substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAlternative {
    pub original: String,
    pub alternative: String,
    /// kg CO2e per unit of the original material
    pub original_factor: f64,
    /// kg CO2e per unit of the original material
    pub alternative_factor: f64,
    pub reduction_percent: f64,
    /// quantity × (original_factor − alternative_factor)
    pub reduction_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub alternatives: Vec<MaterialAlternative>,
    pub total_reduction_kg: f64,
    pub source: ReportSource,
}

impl OptimizationReport {
    pub fn new(alternatives: Vec<MaterialAlternative>, source: ReportSource) -> Self {
        let total_reduction_kg = alternatives.iter().map(|a| a.reduction_kg).sum();
        OptimizationReport {
            alternatives,
            total_reduction_kg,
            source,
        }
    }

    /// Parse raw provider text against the materials it was asked about.
    ///
    /// # Errors
    ///
    /// [`CalcError::ProviderMalformedResponse`] when no JSON object is found,
    /// it does not match the expected shape, names a material that was not
    /// in the request, or carries a negative or non-finite factor.
    pub fn parse(raw: &str, materials: &[MaterialInput]) -> CalcResult<Self> {
        let json = extract_json_object(raw).ok_or_else(|| CalcError::malformed_response("no JSON object in response"))?;
        let parsed: RawReport =
            serde_json::from_str(json).map_err(|e| CalcError::malformed_response(e.to_string()))?;

        let mut alternatives = Vec::with_capacity(parsed.alternatives.len());
        for raw_alt in parsed.alternatives {
            let material = materials
                .iter()
                .find(|m| m.name.eq_ignore_ascii_case(raw_alt.original.trim()))
                .ok_or_else(|| {
                    CalcError::malformed_response(format!("unknown material '{}'", raw_alt.original))
                })?;

            if !raw_alt.carbon_footprint.is_finite() || raw_alt.carbon_footprint < 0.0 {
                return Err(CalcError::malformed_response(format!(
                    "invalid carbon_footprint {} for '{}'",
                    raw_alt.carbon_footprint, raw_alt.original
                )));
            }

            let reduction_percent = if material.carbon_footprint > 0.0 {
                (1.0 - raw_alt.carbon_footprint / material.carbon_footprint) * 100.0
            } else {
                0.0
            };

            alternatives.push(MaterialAlternative {
                original: material.name.clone(),
                alternative: raw_alt.alternative,
                original_factor: material.carbon_footprint,
                alternative_factor: raw_alt.carbon_footprint,
                reduction_percent,
                reduction_kg: material.quantity * (material.carbon_footprint - raw_alt.carbon_footprint),
                rationale: raw_alt.rationale,
            });
        }

        Ok(OptimizationReport::new(alternatives, ReportSource::Provider))
    }
}

#[derive(Debug, Deserialize)]
struct RawReport {
    alternatives: Vec<RawAlternative>,
}

#[derive(Debug, Deserialize)]
struct RawAlternative {
    original: String,
    alternative: String,
    carbon_footprint: f64,
    #[serde(default)]
    rationale: Option<String>,
}

fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Canonical key for a material set.
///
/// `(name, quantity, carbon_footprint)` triples are sorted, so the key does
/// not depend on input order. Names are written as JSON strings so separator
/// characters inside a name cannot merge two lines. Floats use their
/// shortest round-trip form.
pub fn fingerprint(materials: &[MaterialInput]) -> String {
    let mut triples: Vec<(&str, f64, f64)> = materials
        .iter()
        .map(|m| (m.name.as_str(), m.quantity, m.carbon_footprint))
        .collect();
    triples.sort_by(|a, b| {
        a.0.cmp(b.0)
            .then_with(|| a.1.total_cmp(&b.1))
            .then_with(|| a.2.total_cmp(&b.2))
    });

    triples
        .iter()
        .map(|(name, quantity, factor)| {
            format!("[{},{},{}]", serde_json::Value::from(*name), quantity, factor)
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materials() -> Vec<MaterialInput> {
        vec![
            MaterialInput::new("Concrete", 100.0, "m3", 300.0),
            MaterialInput::new("Steel", 2000.0, "kg", 1.85),
            MaterialInput::new("Timber", 500.0, "kg", 0.45),
        ]
    }

    #[test]
    fn test_fingerprint_permutation_invariant() {
        let a = materials();
        let mut b = materials();
        b.reverse();
        b.swap(0, 1);
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_distinguishes_quantities() {
        let a = materials();
        let mut b = materials();
        b[1].quantity = 2001.0;
        assert_ne!(fingerprint(&a), fingerprint(&b));
        assert_eq!(fingerprint(&[]), "");
    }

    #[test]
    fn test_fingerprint_names_with_separators() {
        let merged = vec![MaterialInput::new("x:1:1|y", 1.0, "kg", 1.0)];
        let split = vec![MaterialInput::new("x", 1.0, "kg", 1.0), MaterialInput::new("y", 1.0, "kg", 1.0)];
        assert_ne!(fingerprint(&merged), fingerprint(&split));

        let quoted = vec![MaterialInput::new(r#"x",1,1],["y"#, 1.0, "kg", 1.0)];
        assert_ne!(fingerprint(&quoted), fingerprint(&split));
        assert_eq!(fingerprint(&split), r#"["x",1,1],["y",1,1]"#);
    }

    #[test]
    fn test_parse_provider_report() {
        let raw = r#"Here you go:
        {"alternatives": [
            {"original": "concrete", "alternative": "GGBS concrete", "carbon_footprint": 180.0, "rationale": "50% slag"}
        ]}"#;
        let report = OptimizationReport::parse(raw, &materials()).unwrap();
        assert_eq!(report.source, ReportSource::Provider);
        assert_eq!(report.alternatives.len(), 1);
        let alt = &report.alternatives[0];
        assert_eq!(alt.original, "Concrete");
        assert!((alt.reduction_percent - 40.0).abs() < 1e-9);
        assert!((alt.reduction_kg - 12_000.0).abs() < 1e-9);
        assert_eq!(report.total_reduction_kg, alt.reduction_kg);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let m = materials();
        assert!(matches!(
            OptimizationReport::parse("no idea", &m),
            Err(CalcError::ProviderMalformedResponse { .. })
        ));
        assert!(OptimizationReport::parse(r#"{"alternatives": 3}"#, &m).is_err());
        assert!(OptimizationReport::parse(
            r#"{"alternatives": [{"original": "Glass", "alternative": "x", "carbon_footprint": 1.0}]}"#,
            &m
        )
        .is_err());
        assert!(OptimizationReport::parse(
            r#"{"alternatives": [{"original": "Steel", "alternative": "x", "carbon_footprint": -1.0}]}"#,
            &m
        )
        .is_err());
    }
}
