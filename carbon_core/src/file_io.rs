//! # File I/O Module
//!
//! Project and settings files are plain JSON.
//! - **Atomic saves**: write to `<file>.tmp`, fsync, rename over the target
//! - **Version validation**: project files from an incompatible schema are rejected
//! - **Tolerant settings**: missing settings fields take their defaults
//!
//! ## Example
//!
//! ```rust,no_run
//! use carbon_core::file_io::{load_project, save_project};
//! use carbon_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Assessor", "25-001", "Client");
//! let path = Path::new("office_block.carbon");
//!
//! save_project(&project, path)?;
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), carbon_core::errors::CalcError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::EngineSettings;
use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Save a project with atomic write semantics.
///
/// 1. Serialize project to JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk (fsync)
/// 4. Rename over `path`
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    write_json_atomic(project, path)?;
    tracing::debug!(path = %path.display(), "project saved");
    Ok(())
}

/// Load a project file.
///
/// # Errors
///
/// * [`CalcError::FileError`] - I/O error
/// * [`CalcError::SerializationError`] - invalid JSON
/// * [`CalcError::VersionMismatch`] - file written by an incompatible schema
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = read_to_string(path)?;
    let project: Project = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Load engine settings. Absent fields fall back to their defaults and
/// the result is validated.
pub fn load_settings(path: &Path) -> CalcResult<EngineSettings> {
    let contents = read_to_string(path)?;
    let settings: EngineSettings = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings(settings: &EngineSettings, path: &Path) -> CalcResult<()> {
    write_json_atomic(settings, path)
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Major versions must match; on 0.x the file's minor may not be newer
/// than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::MaterialInput;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("carbon_core_test_{}_{}.carbon", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/path/to/project.carbon")),
            Path::new("/path/to/project.carbon.tmp")
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");

        let mut project = Project::new("Test Assessor", "TEST-001", "Test Client");
        project.add_material(MaterialInput::new("Steel", 1000.0, "kg", 1.85));
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.assessor, "Test Assessor");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.inputs.materials.len(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");
        let project = Project::new("Test", "TEST", "Client");
        save_project(&project, &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_project(Path::new("/nonexistent/path/project.carbon"));
        assert!(matches!(result, Err(CalcError::FileError { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_project(&path), Err(CalcError::SerializationError { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(matches!(validate_version("0.2.0"), Err(CalcError::VersionMismatch { .. })));
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_settings_partial_file() {
        let path = temp_path("settings");
        fs::write(&path, r#"{ "default_country": "GB", "cache": { "ttl_secs": 600 } }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.default_country, "GB");
        assert_eq!(settings.cache.ttl_secs, 600);
        assert_eq!(settings.cache.provider_timeout_secs, 30);
        assert_eq!(settings.parameters.electricity_factor, 0.82);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_settings_rejects_oversized_ttl() {
        let path = temp_path("settings_ttl");
        fs::write(&path, r#"{ "cache": { "ttl_secs": 10000000000000000 } }"#).unwrap();
        assert!(matches!(load_settings(&path), Err(CalcError::InvalidInput { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_settings_roundtrip() {
        let path = temp_path("settings_rt");
        let mut settings = EngineSettings::default();
        settings.default_country = "AU".to_string();
        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }
}
