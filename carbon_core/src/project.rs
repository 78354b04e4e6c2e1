//! # Project Data Structures
//!
//! The `Project` struct bundles everything one assessment needs: the
//! lifecycle inputs, the compliance performance data, optional GHG activity
//! data, and the settings naming the country and rating standard.
//! Projects serialize to `.carbon` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (schema version, assessor, job info, timestamps)
//! ├── settings: ProjectSettings (country, standard)
//! ├── inputs: LifecycleInput (materials, transport, energy, waste)
//! ├── compliance: ProjectData (scoring metrics)
//! └── ghg: Option<GhgActivityData>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::lifecycle::MaterialInput;
//! use carbon_core::project::Project;
//!
//! let mut project = Project::new("Jane Assessor", "25-042", "ACME Corp");
//! project.add_material(MaterialInput::new("Concrete C30/37", 120.0, "m3", 310.0));
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Concrete C30/37"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compliance::ghg::GhgActivityData;
use crate::compliance::ProjectData;
use crate::lifecycle::{LifecycleInput, MaterialInput};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub settings: ProjectSettings,

    /// Lifecycle calculation inputs
    #[serde(default)]
    pub inputs: LifecycleInput,

    /// Performance data for compliance scoring
    #[serde(default)]
    pub compliance: ProjectData,

    /// Operational activity data for a GHG Protocol inventory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghg: Option<GhgActivityData>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carbon_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.assessor, "John Doe");
    /// assert_eq!(project.settings.standard_id, "LEED");
    /// ```
    pub fn new(assessor: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                id: Uuid::new_v4(),
                version: SCHEMA_VERSION.to_string(),
                assessor: assessor.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
            inputs: LifecycleInput::default(),
            compliance: ProjectData::default(),
            ghg: None,
        }
    }

    pub fn add_material(&mut self, material: MaterialInput) {
        self.inputs.materials.push(material);
        self.touch();
    }

    /// Remove every material with the given name. Returns how many were removed.
    pub fn remove_material(&mut self, name: &str) -> usize {
        let before = self.inputs.materials.len();
        self.inputs.materials.retain(|m| m.name != name);
        let removed = before - self.inputs.materials.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Country named by the project: the input's own country, else the
    /// project setting. `None` when neither is set.
    pub fn country(&self) -> Option<&str> {
        fn named(country: &Option<String>) -> Option<&str> {
            country.as_deref().map(str::trim).filter(|c| !c.is_empty())
        }
        named(&self.inputs.country).or_else(|| named(&self.settings.country))
    }

    /// Country for factor lookups, falling back to `default_country`.
    pub fn country_or<'a>(&'a self, default_country: &'a str) -> &'a str {
        self.country().unwrap_or(default_country)
    }

    /// Lifecycle input carrying the project's country, if it names one.
    /// Otherwise the calculator's default country applies.
    pub fn lifecycle_input(&self) -> LifecycleInput {
        let mut input = self.inputs.clone();
        input.country = self.country().map(str::to_string);
        input
    }

    /// GHG activity data with an empty country filled from the project,
    /// else from `default_country`
    pub fn ghg_activity(&self, default_country: &str) -> Option<GhgActivityData> {
        self.ghg.clone().map(|mut data| {
            if data.country.trim().is_empty() {
                data.country = self.country_or(default_country).to_string();
            }
            data
        })
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub id: Uuid,

    /// Schema version (for migration compatibility)
    pub version: String,

    /// Person responsible for the assessment
    pub assessor: String,

    /// Job/project number
    pub job_id: String,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// ISO 3166 alpha-2 country code; engine default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Compliance standard id (LEED, BREEAM, GHG_SCOPE_1, ...)
    pub standard_id: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            country: None,
            standard_id: "LEED".to_string(),
        }
    }
}
