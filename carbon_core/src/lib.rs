//! # carbon_core - Construction Carbon Calculation Engine
//!
//! `carbon_core` computes the embodied and operational carbon of a building
//! project: EN 15978 / EN 15804 life-cycle stages (A1-D) with per-country
//! emission factors, scoring against green-building rating systems (LEED,
//! BREEAM, CASBEE, Green Star, NABERS, GHG Protocol scopes), and cached
//! lower-carbon material suggestions.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: calculators take input and return results
//! - **JSON-First**: all inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Degrade, don't fail**: unknown regions use default factors, a missing
//!   or failing recommendation provider yields a local fallback report
//!
//! ## Quick Start
//!
//! ```rust
//! use carbon_core::config::EmissionParameters;
//! use carbon_core::lifecycle::{EpdStage, LifecycleEmissionsCalculator, LifecycleInput, MaterialInput};
//! use carbon_core::regional::RegionalFactorRegistry;
//!
//! let registry = RegionalFactorRegistry::with_defaults();
//! let calculator = LifecycleEmissionsCalculator::new(&registry, EmissionParameters::default());
//!
//! let input = LifecycleInput {
//!     materials: vec![
//!         MaterialInput::new("Concrete", 10.0, "m3", 2.0),
//!         MaterialInput::new("Mortar", 5.0, "m3", 3.0),
//!     ],
//!     ..LifecycleInput::default()
//! };
//!
//! let result = calculator.calculate(&input).unwrap();
//! assert_eq!(result.get(EpdStage::A1), 35.0);
//! ```
//!
//! ## Modules
//!
//! - [`lifecycle`] - Input records, EPD stages, the stage calculator
//! - [`regional`] - Per-country factor registry and default catalog
//! - [`compliance`] - Standards catalog, scoring, rating ladders, GHG scopes
//! - [`optimization`] - Recommendation provider, fallback, TTL cache
//! - [`project`] - Project container, metadata, and settings
//! - [`config`] - Engine settings and emission parameters
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Project and settings files with atomic saves

pub mod compliance;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod lifecycle;
pub mod optimization;
pub mod project;
pub mod regional;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use compliance::{ComplianceResult, ComplianceStandardsEngine, ProjectData};
pub use config::{EmissionParameters, EngineSettings};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, load_settings, save_project};
pub use lifecycle::{EpdStage, EpdStageResult, LifecycleEmissionsCalculator, LifecycleInput, MaterialInput};
pub use optimization::{OptimizationRecommendationCache, OptimizationReport, RecommendationProvider};
pub use project::{Project, ProjectMetadata, ProjectSettings};
pub use regional::RegionalFactorRegistry;
