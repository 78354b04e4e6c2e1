//! Deterministic local suggestions.

use crate::lifecycle::MaterialInput;

use super::{MaterialAlternative, OptimizationReport, ReportSource};

/// Alternative factor as a share of the original
pub const FALLBACK_FACTOR_SCALE: f64 = 0.7;
pub const FALLBACK_REDUCTION_PERCENT: f64 = 30.0;

/// One alternative per material with a positive footprint, at 0.7× the
/// original factor.
pub fn fallback_report(materials: &[MaterialInput]) -> OptimizationReport {
    let alternatives = materials
        .iter()
        .filter(|m| m.carbon_footprint > 0.0 && m.quantity > 0.0)
        .map(|m| {
            let alternative_factor = m.carbon_footprint * FALLBACK_FACTOR_SCALE;
            MaterialAlternative {
                original: m.name.clone(),
                alternative: alternative_name(m),
                original_factor: m.carbon_footprint,
                alternative_factor,
                reduction_percent: FALLBACK_REDUCTION_PERCENT,
                reduction_kg: m.quantity * (m.carbon_footprint - alternative_factor),
                rationale: None,
            }
        })
        .collect();

    OptimizationReport::new(alternatives, ReportSource::Fallback)
}

fn alternative_name(material: &MaterialInput) -> String {
    let family = material
        .category
        .as_deref()
        .unwrap_or(&material.name)
        .to_lowercase();

    if family.contains("concrete") || family.contains("cement") {
        "Low-clinker concrete (GGBS/fly ash blend)".to_string()
    } else if family.contains("steel") {
        "Recycled-content steel (EAF)".to_string()
    } else if family.contains("alumin") {
        "Recycled aluminium".to_string()
    } else if family.contains("brick") || family.contains("block") {
        "Unfired or recycled masonry".to_string()
    } else if family.contains("insulation") {
        "Bio-based insulation".to_string()
    } else {
        format!("Low-carbon {}", material.name)
    }
}
