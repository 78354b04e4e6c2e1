//! # Engine Settings
//!
//! Tunable parameters for the calculation engine. Every field has a default,
//! so a settings file only needs to list what it overrides:
//!
//! ```json
//! {
//!   "default_country": "GB",
//!   "cache": { "ttl_secs": 600 }
//! }
//! ```
//!
//! The heuristic emission constants live in [`EmissionParameters`]. Their
//! defaults are the published values downstream reports are compared
//! against; change them only with that in mind.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_non_negative, CalcError, CalcResult};

/// Top-level settings for an engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Country used when a project does not name one
    pub default_country: String,

    /// Heuristic constants used by the lifecycle calculator
    pub parameters: EmissionParameters,

    /// Recommendation cache behaviour
    pub cache: CacheSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            default_country: "US".to_string(),
            parameters: EmissionParameters::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> CalcResult<()> {
        if self.default_country.trim().is_empty() {
            return Err(CalcError::invalid_input(
                "default_country",
                self.default_country.clone(),
                "Default country must not be empty",
            ));
        }
        if self.cache.ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(CalcError::invalid_input(
                "cache.ttl_secs",
                self.cache.ttl_secs.to_string(),
                format!("Cache TTL must not exceed {} seconds", MAX_CACHE_TTL_SECS),
            ));
        }
        if self.cache.provider_timeout_secs == 0 {
            return Err(CalcError::invalid_input(
                "cache.provider_timeout_secs",
                "0",
                "Provider timeout must be at least one second",
            ));
        }
        self.parameters.validate()
    }
}

/// Heuristic constants of the lifecycle stage formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionParameters {
    /// A3 factor applied to electricity (kg CO2e/kWh)
    pub electricity_factor: f64,
    /// A3 factor applied to gas (kg CO2e/kWh)
    pub gas_factor: f64,
    /// Share of total GWP reported as fossil
    pub gwp_fossil_share: f64,
    /// Share of total GWP reported as biogenic
    pub gwp_biogenic_share: f64,
    /// A5 installation allowance as a fraction of A1
    pub installation_share: f64,
    /// C1 deconstruction allowance as a fraction of A1
    pub deconstruction_share: f64,
    /// C3 incineration burden as a fraction of A1
    pub incineration_share: f64,
    /// C3 recycling offset as a fraction of A1
    pub recycling_processing_share: f64,
    /// C4 landfill burden as a fraction of A1
    pub landfill_share: f64,
    /// D recycling credit as a fraction of A1
    pub recycling_credit_share: f64,
    /// A4 assumed site-delivery distance (km)
    pub site_delivery_km: f64,
    /// C2 assumed waste-transport distance (km)
    pub waste_transport_km: f64,
}

impl Default for EmissionParameters {
    fn default() -> Self {
        EmissionParameters {
            electricity_factor: 0.82,
            gas_factor: 0.18,
            gwp_fossil_share: 0.85,
            gwp_biogenic_share: 0.10,
            installation_share: 0.05,
            deconstruction_share: 0.02,
            incineration_share: 0.05,
            recycling_processing_share: 0.10,
            landfill_share: 0.02,
            recycling_credit_share: 0.15,
            site_delivery_km: 50.0,
            waste_transport_km: 25.0,
        }
    }
}

impl EmissionParameters {
    /// Validate that every constant is finite and non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("parameters.electricity_factor", self.electricity_factor)?;
        ensure_non_negative("parameters.gas_factor", self.gas_factor)?;
        ensure_non_negative("parameters.gwp_fossil_share", self.gwp_fossil_share)?;
        ensure_non_negative("parameters.gwp_biogenic_share", self.gwp_biogenic_share)?;
        ensure_non_negative("parameters.installation_share", self.installation_share)?;
        ensure_non_negative("parameters.deconstruction_share", self.deconstruction_share)?;
        ensure_non_negative("parameters.incineration_share", self.incineration_share)?;
        ensure_non_negative("parameters.recycling_processing_share", self.recycling_processing_share)?;
        ensure_non_negative("parameters.landfill_share", self.landfill_share)?;
        ensure_non_negative("parameters.recycling_credit_share", self.recycling_credit_share)?;
        ensure_non_negative("parameters.site_delivery_km", self.site_delivery_km)?;
        ensure_non_negative("parameters.waste_transport_km", self.waste_transport_km)?;
        Ok(())
    }
}

/// Longest accepted cache TTL (one year)
pub const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Settings for the recommendation cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
    /// Upper bound for a single provider call in seconds
    pub provider_timeout_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            ttl_secs: 30 * 60,
            provider_timeout_secs: 30,
        }
    }
}

impl CacheSettings {
    /// Entry lifetime, capped at [`MAX_CACHE_TTL_SECS`]
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_secs.min(MAX_CACHE_TTL_SECS) as i64)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}
