//! Standard-specific rating ladders.
//!
//! These work on each scheme's native score (LEED points, BREEAM weighted
//! percentage, Green Star percentage, CASBEE BEE, NABERS intensity) rather
//! than the generic weighted score of [`super::ComplianceStandardsEngine`].
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::compliance::rating::{leed_assessment, LeedLevel};
//!
//! let leed = leed_assessment(60);
//! assert_eq!(leed.level, LeedLevel::Gold);
//! assert_eq!(leed.points_to_gold, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_non_negative, CalcError, CalcResult};

// ============================================================================
// LEED
// ============================================================================

pub const LEED_GOLD_POINTS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeedLevel {
    NotCertified,
    Certified,
    Silver,
    Gold,
    Platinum,
}

impl LeedLevel {
    pub fn from_points(points: u32) -> Self {
        match points {
            80.. => LeedLevel::Platinum,
            60..=79 => LeedLevel::Gold,
            50..=59 => LeedLevel::Silver,
            40..=49 => LeedLevel::Certified,
            _ => LeedLevel::NotCertified,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LeedLevel::Platinum => "Platinum",
            LeedLevel::Gold => "Gold",
            LeedLevel::Silver => "Silver",
            LeedLevel::Certified => "Certified",
            LeedLevel::NotCertified => "Not Certified",
        }
    }
}

impl std::fmt::Display for LeedLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeedAssessment {
    pub total_points: u32,
    pub level: LeedLevel,
    /// `max(0, 60 − total_points)`
    pub points_to_gold: u32,
}

pub fn leed_assessment(total_points: u32) -> LeedAssessment {
    LeedAssessment {
        total_points,
        level: LeedLevel::from_points(total_points),
        points_to_gold: LEED_GOLD_POINTS.saturating_sub(total_points),
    }
}

// ============================================================================
// BREEAM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BreeamRating {
    Unclassified,
    Pass,
    Good,
    VeryGood,
    Excellent,
    Outstanding,
}

impl BreeamRating {
    /// Inclusive lower bounds: 85 / 70 / 55 / 45 / 30
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            BreeamRating::Outstanding
        } else if score >= 70.0 {
            BreeamRating::Excellent
        } else if score >= 55.0 {
            BreeamRating::VeryGood
        } else if score >= 45.0 {
            BreeamRating::Good
        } else if score >= 30.0 {
            BreeamRating::Pass
        } else {
            BreeamRating::Unclassified
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BreeamRating::Outstanding => "Outstanding",
            BreeamRating::Excellent => "Excellent",
            BreeamRating::VeryGood => "Very Good",
            BreeamRating::Good => "Good",
            BreeamRating::Pass => "Pass",
            BreeamRating::Unclassified => "Unclassified",
        }
    }
}

impl std::fmt::Display for BreeamRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Percentage of credits achieved in one BREEAM section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreeamCategoryScore {
    pub category: String,
    pub weight: f64,
    /// 0-100
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreeamAssessment {
    pub weighted_score: f64,
    pub rating: BreeamRating,
}

/// Weighted BREEAM score: `Σ score × weight / Σ weight`.
pub fn breeam_assessment(categories: &[BreeamCategoryScore]) -> CalcResult<BreeamAssessment> {
    for c in categories {
        ensure_non_negative(format!("{}.weight", c.category), c.weight)?;
        ensure_non_negative(format!("{}.score", c.category), c.score)?;
    }
    let total_weight: f64 = categories.iter().map(|c| c.weight).sum();
    if total_weight <= 0.0 {
        return Err(CalcError::invalid_input(
            "weights",
            total_weight.to_string(),
            "Category weights must sum to a positive value",
        ));
    }

    let weighted_score = categories.iter().map(|c| c.score * c.weight).sum::<f64>() / total_weight;
    Ok(BreeamAssessment {
        weighted_score,
        rating: BreeamRating::from_score(weighted_score),
    })
}

// ============================================================================
// Green Star
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenStarRating {
    pub score: f64,
    /// 0 when below the 1 Star threshold
    pub stars: u8,
}

impl GreenStarRating {
    pub fn label(&self) -> String {
        match self.stars {
            0 => "Not Rated".to_string(),
            n => format!("{} Star", n),
        }
    }
}

const GREEN_STAR_LADDER: [(f64, u8); 6] = [(75.0, 6), (60.0, 5), (45.0, 4), (30.0, 3), (15.0, 2), (10.0, 1)];

pub fn green_star_rating(score: f64) -> GreenStarRating {
    let stars = GREEN_STAR_LADDER
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, stars)| *stars)
        .unwrap_or(0);
    GreenStarRating { score, stars }
}

// ============================================================================
// CASBEE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CasbeeRank {
    C,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B+")]
    BPlus,
    A,
    S,
}

impl CasbeeRank {
    pub fn from_bee(bee: f64) -> Self {
        if bee >= 3.0 {
            CasbeeRank::S
        } else if bee >= 1.5 {
            CasbeeRank::A
        } else if bee >= 1.0 {
            CasbeeRank::BPlus
        } else if bee >= 0.5 {
            CasbeeRank::BMinus
        } else {
            CasbeeRank::C
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CasbeeRank::S => "S (Excellent)",
            CasbeeRank::A => "A (Very Good)",
            CasbeeRank::BPlus => "B+ (Good)",
            CasbeeRank::BMinus => "B- (Slightly Poor)",
            CasbeeRank::C => "C (Poor)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasbeeAssessment {
    /// Environmental quality, 0-100
    pub quality: f64,
    /// Environmental load, > 0
    pub load: f64,
    /// Built Environment Efficiency = Q / L
    pub bee: f64,
    pub rank: CasbeeRank,
}

pub fn casbee_assessment(quality: f64, load: f64) -> CalcResult<CasbeeAssessment> {
    ensure_non_negative("quality", quality)?;
    if !load.is_finite() || load <= 0.0 {
        return Err(CalcError::invalid_input("load", load.to_string(), "Environmental load must be positive"));
    }
    let bee = quality / load;
    Ok(CasbeeAssessment {
        quality,
        load,
        bee,
        rank: CasbeeRank::from_bee(bee),
    })
}

// ============================================================================
// NABERS Energy
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NabersRating {
    /// kg CO2e per m² per year
    pub intensity: f64,
    /// Intensity relative to the benchmark (1.0 = market average)
    pub benchmark_ratio: f64,
    pub stars: u8,
}

// Upper bound of the benchmark ratio for each star band
const NABERS_LADDER: [(f64, u8); 6] = [(0.25, 6), (0.50, 5), (0.75, 4), (1.00, 3), (1.25, 2), (1.50, 1)];

/// Star band from annual operational emissions against a market benchmark
/// (3 stars = benchmark).
pub fn nabers_energy_rating(annual_emissions_kg: f64, floor_area_m2: f64, benchmark_kg_per_m2: f64) -> CalcResult<NabersRating> {
    ensure_non_negative("annual_emissions_kg", annual_emissions_kg)?;
    for (field, value) in [("floor_area_m2", floor_area_m2), ("benchmark_kg_per_m2", benchmark_kg_per_m2)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
        }
    }

    let intensity = annual_emissions_kg / floor_area_m2;
    let benchmark_ratio = intensity / benchmark_kg_per_m2;
    let stars = NABERS_LADDER
        .iter()
        .find(|(max_ratio, _)| benchmark_ratio <= *max_ratio)
        .map(|(_, stars)| *stars)
        .unwrap_or(0);

    Ok(NabersRating {
        intensity,
        benchmark_ratio,
        stars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leed_examples() {
        let gold = leed_assessment(60);
        assert_eq!(gold.level, LeedLevel::Gold);
        assert_eq!(gold.level.display_name(), "Gold");
        assert_eq!(gold.points_to_gold, 0);

        let none = leed_assessment(39);
        assert_eq!(none.level.display_name(), "Not Certified");
        assert_eq!(none.points_to_gold, 21);

        assert_eq!(leed_assessment(80).level, LeedLevel::Platinum);
        assert_eq!(leed_assessment(50).level, LeedLevel::Silver);
        assert_eq!(leed_assessment(40).level, LeedLevel::Certified);
        assert_eq!(leed_assessment(95).points_to_gold, 0);
    }

    #[test]
    fn test_breeam_boundaries() {
        assert_eq!(BreeamRating::from_score(55.0).display_name(), "Very Good");
        assert_eq!(BreeamRating::from_score(54.999), BreeamRating::Good);
        assert_eq!(BreeamRating::from_score(85.0), BreeamRating::Outstanding);
        assert_eq!(BreeamRating::from_score(30.0), BreeamRating::Pass);
        assert_eq!(BreeamRating::from_score(29.9), BreeamRating::Unclassified);
    }

    #[test]
    fn test_breeam_all_fifty() {
        let weights = [0.11, 0.14, 0.16, 0.10, 0.07, 0.15, 0.06, 0.13, 0.08];
        let categories: Vec<BreeamCategoryScore> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| BreeamCategoryScore {
                category: format!("cat{}", i),
                weight: *w,
                score: 50.0,
            })
            .collect();
        let assessment = breeam_assessment(&categories).unwrap();
        assert!((assessment.weighted_score - 50.0).abs() < 1e-9);
        assert_eq!(assessment.rating, BreeamRating::Good);
    }

    #[test]
    fn test_breeam_zero_weights() {
        let categories = vec![BreeamCategoryScore {
            category: "energy".into(),
            weight: 0.0,
            score: 90.0,
        }];
        assert!(breeam_assessment(&categories).is_err());
    }

    #[test]
    fn test_green_star() {
        assert_eq!(green_star_rating(75.0).stars, 6);
        assert_eq!(green_star_rating(74.9).stars, 5);
        assert_eq!(green_star_rating(45.0).label(), "4 Star");
        assert_eq!(green_star_rating(10.0).stars, 1);
        assert_eq!(green_star_rating(9.9).label(), "Not Rated");
    }

    #[test]
    fn test_casbee() {
        assert_eq!(casbee_assessment(90.0, 30.0).unwrap().rank, CasbeeRank::S);
        assert_eq!(casbee_assessment(60.0, 40.0).unwrap().rank, CasbeeRank::A);
        assert_eq!(casbee_assessment(50.0, 50.0).unwrap().rank, CasbeeRank::BPlus);
        assert_eq!(casbee_assessment(30.0, 50.0).unwrap().rank, CasbeeRank::BMinus);
        assert_eq!(casbee_assessment(10.0, 50.0).unwrap().rank, CasbeeRank::C);
        assert!(casbee_assessment(50.0, 0.0).is_err());
        assert_eq!(serde_json::to_string(&CasbeeRank::BPlus).unwrap(), "\"B+\"");
    }

    #[test]
    fn test_nabers() {
        // 100 kg/m² against a 100 kg/m² benchmark: market average
        let avg = nabers_energy_rating(100_000.0, 1000.0, 100.0).unwrap();
        assert_eq!(avg.intensity, 100.0);
        assert_eq!(avg.stars, 3);

        assert_eq!(nabers_energy_rating(20_000.0, 1000.0, 100.0).unwrap().stars, 6);
        assert_eq!(nabers_energy_rating(200_000.0, 1000.0, 100.0).unwrap().stars, 0);
        assert!(nabers_energy_rating(1.0, 0.0, 100.0).is_err());
    }
}
