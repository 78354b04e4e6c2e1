//! # Compliance Scoring
//!
//! Scores a project against green-building rating systems. Each standard is
//! a fixed data table ([`ComplianceStandard`]): weighted categories made of
//! subcategories with a point ceiling and a [`CalculationType`], plus a
//! threshold ladder of certification levels.
//!
//! ## Scoring
//!
//! ```text
//! subcategory  Absolute   → max if compliant else 0
//!              Percentage → min(max, improvement / 10)
//!              Ratio      → min(max, actual / baseline × max)
//! category     Σ subcategory scores, max = Σ subcategory max
//! overall      Σ(score × weight) / Σ(max × weight) × 100
//! level        highest threshold with overall ≥ min_score (inclusive)
//! ```
//!
//! Standard-specific ratings (LEED points, BREEAM weighted score, Green
//! Star, CASBEE BEE, NABERS stars) live in [`rating`]; GHG-Protocol scope
//! inventories in [`ghg`].
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::compliance::{ComplianceStandardsEngine, ProjectData};
//!
//! let engine = ComplianceStandardsEngine::with_default_catalog();
//! let data = ProjectData {
//!     compliant: true,
//!     improvement_metric: 400.0,
//!     actual_value: 8.0,
//!     baseline_value: 10.0,
//!     ..ProjectData::default()
//! };
//!
//! let result = engine.calculate_compliance("BREEAM", &data, &[]).unwrap();
//! assert!(result.overall_score > 0.0);
//! ```

pub mod catalog;
pub mod ghg;
pub mod rating;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::lifecycle::MaterialInput;

/// Category share below which a category recommendation is emitted
pub const CATEGORY_RECOMMENDATION_RATIO: f64 = 0.70;
/// Subcategory share below which a focused recommendation is emitted
pub const SUBCATEGORY_RECOMMENDATION_RATIO: f64 = 0.50;

/// How a subcategory converts project data into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationType {
    /// All-or-nothing credit
    Absolute,
    /// Points scale with an improvement metric (1 point per 10 units)
    Percentage,
    /// Points scale with actual / baseline
    Ratio,
}

/// A creditable item inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub max_points: f64,
    pub calculation_type: CalculationType,
}

/// A weighted group of subcategories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub subcategories: Vec<Subcategory>,
    /// Prerequisites that must hold before any credit in this category counts
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            weight,
            subcategories: Vec::new(),
            requirements: Vec::new(),
        }
    }

    /// Add a subcategory (builder pattern)
    pub fn sub(mut self, id: &str, name: &str, max_points: f64, calculation_type: CalculationType) -> Self {
        self.subcategories.push(Subcategory {
            id: id.to_string(),
            name: name.to_string(),
            max_points,
            calculation_type,
        });
        self
    }

    /// Add a prerequisite (builder pattern)
    pub fn requirement(mut self, text: &str) -> Self {
        self.requirements.push(text.to_string());
        self
    }

    pub fn max_points(&self) -> f64 {
        self.subcategories.iter().map(|s| s.max_points).sum()
    }
}

/// One rung of a certification ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub level: String,
    pub min_score: f64,
}

/// A rating system definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceStandard {
    pub id: String,
    pub name: String,
    pub version: String,
    pub categories: Vec<Category>,
    /// Sorted descending by `min_score`
    pub thresholds: Vec<Threshold>,
}

impl ComplianceStandard {
    pub fn new(id: &str, name: &str, version: &str) -> Self {
        ComplianceStandard {
            id: id.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            categories: Vec::new(),
            thresholds: Vec::new(),
        }
    }

    /// Add a category (builder pattern)
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Add a threshold, keeping the ladder sorted descending (builder pattern)
    pub fn threshold(mut self, level: &str, min_score: f64) -> Self {
        self.thresholds.push(Threshold {
            level: level.to_string(),
            min_score,
        });
        self.thresholds
            .sort_by(|a, b| b.min_score.total_cmp(&a.min_score));
        self
    }

    /// Level names from best to worst
    pub fn certification_levels(&self) -> Vec<&str> {
        self.thresholds.iter().map(|t| t.level.as_str()).collect()
    }

    /// Highest level whose `min_score` the score reaches (inclusive).
    pub fn level_for(&self, score: f64) -> Option<&str> {
        self.thresholds
            .iter()
            .find(|t| score >= t.min_score)
            .map(|t| t.level.as_str())
    }

    /// Lowest threshold on the ladder
    pub fn minimum_score(&self) -> Option<f64> {
        self.thresholds.last().map(|t| t.min_score)
    }
}

/// Metric overrides for a single subcategory; unset fields fall back to
/// the project-level values in [`ProjectData`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubcategoryMetrics {
    pub compliant: Option<bool>,
    pub improvement_metric: Option<f64>,
    pub actual_value: Option<f64>,
    pub baseline_value: Option<f64>,
}

/// Project performance data fed into the scoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectData {
    /// Drives Absolute subcategories
    pub compliant: bool,
    /// Drives Percentage subcategories (points = metric / 10)
    pub improvement_metric: f64,
    /// Ratio numerator
    pub actual_value: f64,
    /// Ratio denominator
    pub baseline_value: f64,
    /// Per-subcategory overrides keyed by subcategory id
    pub subcategories: HashMap<String, SubcategoryMetrics>,
}

impl ProjectData {
    /// Override the metrics of one subcategory (builder pattern)
    pub fn with_subcategory(mut self, id: impl Into<String>, metrics: SubcategoryMetrics) -> Self {
        self.subcategories.insert(id.into(), metrics);
        self
    }

    /// Feed a lifecycle result into a Percentage subcategory as the
    /// percent reduction against a reference building (never negative).
    pub fn with_emissions_reduction(self, id: impl Into<String>, project_co2e: f64, reference_co2e: f64) -> Self {
        let reduction = if reference_co2e > 0.0 {
            ((1.0 - project_co2e / reference_co2e) * 100.0).max(0.0)
        } else {
            0.0
        };
        self.with_subcategory(
            id,
            SubcategoryMetrics {
                improvement_metric: Some(reduction),
                ..SubcategoryMetrics::default()
            },
        )
    }

    pub fn validate(&self) -> CalcResult<()> {
        let check = |field: String, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(CalcError::invalid_input(field, value.to_string(), "Metric must be finite"))
            }
        };
        check("improvement_metric".to_string(), self.improvement_metric)?;
        check("actual_value".to_string(), self.actual_value)?;
        check("baseline_value".to_string(), self.baseline_value)?;
        for (id, m) in &self.subcategories {
            for (name, value) in [
                ("improvement_metric", m.improvement_metric),
                ("actual_value", m.actual_value),
                ("baseline_value", m.baseline_value),
            ] {
                if let Some(v) = value {
                    check(format!("subcategories[{}].{}", id, name), v)?;
                }
            }
        }
        Ok(())
    }

    fn metrics_for(&self, id: &str) -> (bool, f64, f64, f64) {
        let o = self.subcategories.get(id).copied().unwrap_or_default();
        (
            o.compliant.unwrap_or(self.compliant),
            o.improvement_metric.unwrap_or(self.improvement_metric),
            o.actual_value.unwrap_or(self.actual_value),
            o.baseline_value.unwrap_or(self.baseline_value),
        )
    }
}

/// Score of one subcategory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryScore {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub max_points: f64,
}

/// Score of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub score: f64,
    pub max_points: f64,
    pub subcategories: Vec<SubcategoryScore>,
}

impl CategoryScore {
    /// Share of available points achieved (0-1)
    pub fn ratio(&self) -> f64 {
        if self.max_points > 0.0 {
            self.score / self.max_points
        } else {
            0.0
        }
    }
}

/// Outcome of scoring a project against one standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub standard_id: String,
    /// Weighted score, 0-100
    pub overall_score: f64,
    pub category_scores: Vec<CategoryScore>,
    pub certification_level: Option<String>,
    pub compliance: bool,
    pub recommendations: Vec<String>,
    /// Σ quantity × factor of the supplied materials
    pub embodied_carbon_kg: f64,
}

impl ComplianceResult {
    /// Level name, or "Unclassified" when no threshold was reached
    pub fn level_display(&self) -> &str {
        self.certification_level.as_deref().unwrap_or("Unclassified")
    }
}

/// Score one subcategory.
pub fn score_subcategory(sub: &Subcategory, data: &ProjectData) -> f64 {
    let (compliant, improvement, actual, baseline) = data.metrics_for(&sub.id);
    let score = match sub.calculation_type {
        CalculationType::Absolute => {
            if compliant {
                sub.max_points
            } else {
                0.0
            }
        }
        CalculationType::Percentage => sub.max_points.min(improvement / 10.0),
        CalculationType::Ratio => {
            if baseline > 0.0 {
                sub.max_points.min(actual / baseline * sub.max_points)
            } else {
                0.0
            }
        }
    };
    score.max(0.0)
}

fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase().replace([' ', '-'], "_")
}

/// Catalog of rating standards plus the scoring routine.
///
/// Built once at startup; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ComplianceStandardsEngine {
    standards: BTreeMap<String, ComplianceStandard>,
}

impl ComplianceStandardsEngine {
    /// Engine with an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine loaded with LEED, BREEAM, CASBEE, Green Star, NABERS and the
    /// three GHG-Protocol scopes
    pub fn with_default_catalog() -> Self {
        catalog::default_standards()
            .into_iter()
            .fold(Self::new(), |engine, standard| engine.with_standard(standard))
    }

    /// Add or replace a standard (builder pattern)
    pub fn with_standard(mut self, standard: ComplianceStandard) -> Self {
        self.standards.insert(normalize_id(&standard.id), standard);
        self
    }

    pub fn standard(&self, standard_id: &str) -> CalcResult<&ComplianceStandard> {
        self.standards
            .get(&normalize_id(standard_id))
            .ok_or_else(|| CalcError::unknown_standard(standard_id))
    }

    pub fn standard_ids(&self) -> Vec<&str> {
        self.standards.values().map(|s| s.id.as_str()).collect()
    }

    /// Score `data` against the standard `standard_id`.
    ///
    /// # Errors
    ///
    /// - [`CalcError::UnknownStandard`] if the id is not in the catalog
    /// - [`CalcError::InvalidInput`] for non-finite metrics or invalid materials
    pub fn calculate_compliance(
        &self,
        standard_id: &str,
        data: &ProjectData,
        materials: &[MaterialInput],
    ) -> CalcResult<ComplianceResult> {
        let standard = self.standard(standard_id)?;
        data.validate()?;
        for material in materials {
            material.validate()?;
        }

        let category_scores: Vec<CategoryScore> = standard
            .categories
            .iter()
            .map(|category| {
                let subcategories: Vec<SubcategoryScore> = category
                    .subcategories
                    .iter()
                    .map(|sub| SubcategoryScore {
                        id: sub.id.clone(),
                        name: sub.name.clone(),
                        score: score_subcategory(sub, data),
                        max_points: sub.max_points,
                    })
                    .collect();
                CategoryScore {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    weight: category.weight,
                    score: subcategories.iter().map(|s| s.score).sum(),
                    max_points: category.max_points(),
                    subcategories,
                }
            })
            .collect();

        let weighted_score: f64 = category_scores.iter().map(|c| c.score * c.weight).sum();
        let weighted_max: f64 = category_scores.iter().map(|c| c.max_points * c.weight).sum();
        let overall_score = if weighted_max > 0.0 {
            weighted_score * 100.0 / weighted_max
        } else {
            0.0
        };

        let certification_level = standard.level_for(overall_score).map(str::to_string);
        let compliance = standard
            .minimum_score()
            .is_some_and(|min| overall_score >= min);

        let embodied_carbon_kg = materials.iter().map(MaterialInput::embodied_co2e).sum();
        let recommendations = recommendations(standard, &category_scores, materials);

        tracing::debug!(
            standard = %standard.id,
            overall_score,
            level = certification_level.as_deref().unwrap_or("Unclassified"),
            "compliance scored"
        );

        Ok(ComplianceResult {
            standard_id: standard.id.clone(),
            overall_score,
            category_scores,
            certification_level,
            compliance,
            recommendations,
            embodied_carbon_kg,
        })
    }
}

fn recommendations(standard: &ComplianceStandard, scores: &[CategoryScore], materials: &[MaterialInput]) -> Vec<String> {
    let mut out = Vec::new();

    for (category, score) in standard.categories.iter().zip(scores) {
        if score.max_points > 0.0 && score.ratio() < CATEGORY_RECOMMENDATION_RATIO {
            out.push(format!(
                "Improve {} performance: currently {:.0}% of available points",
                score.name,
                score.ratio() * 100.0
            ));
            if !category.requirements.is_empty() {
                out.push(format!(
                    "Confirm {} prerequisites: {}",
                    score.name,
                    category.requirements.join("; ")
                ));
            }
            if category.id.contains("material") {
                if let Some(top) = highest_emitter(materials) {
                    out.push(format!(
                        "Highest embodied carbon material is {} ({:.0} kg CO2e); consider a lower-carbon alternative",
                        top.name,
                        top.embodied_co2e()
                    ));
                }
            }
        }

        for sub in &score.subcategories {
            if sub.max_points > 0.0 && sub.score / sub.max_points < SUBCATEGORY_RECOMMENDATION_RATIO {
                out.push(format!(
                    "Focus on {} in {}: {:.1} of {:.1} points achieved",
                    sub.name, score.name, sub.score, sub.max_points
                ));
            }
        }
    }

    out
}

fn highest_emitter(materials: &[MaterialInput]) -> Option<&MaterialInput> {
    materials
        .iter()
        .filter(|m| m.embodied_co2e() > 0.0)
        .max_by(|a, b| a.embodied_co2e().total_cmp(&b.embodied_co2e()))
}
