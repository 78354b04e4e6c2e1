//! # Error Types
//!
//! Structured error types for carbon_core. Each variant carries enough
//! context for a caller (human or program) to understand and fix the input.
//!
//! Only contract violations abort a call: [`CalcError::InvalidInput`] and
//! [`CalcError::UnknownStandard`]. Region and provider errors are recovered
//! inside the engine (default factors, fallback report) and are only
//! surfaced by the strict lookup APIs.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::errors::{CalcError, CalcResult};
//!
//! fn validate_distance(distance_km: f64) -> CalcResult<()> {
//!     if !distance_km.is_finite() || distance_km < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "distance_km",
//!             distance_km.to_string(),
//!             "Distance must be a finite, non-negative number",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for carbon_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (negative, non-finite, out of range, unknown code)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Country is not registered in the regional factor registry
    #[error("Unknown region: {country}")]
    UnknownRegion { country: String },

    /// Standard id is absent from the compliance catalog
    #[error("Unknown compliance standard: {standard_id}")]
    UnknownStandard { standard_id: String },

    /// Recommendation provider did not answer in time
    #[error("Recommendation provider timed out after {seconds}s")]
    ProviderTimeout { seconds: u64 },

    /// Recommendation provider returned an error
    #[error("Recommendation provider failed: {reason}")]
    ProviderFailed { reason: String },

    /// Recommendation provider answered with something we could not use
    #[error("Recommendation provider returned a malformed response: {reason}")]
    ProviderMalformedResponse { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Project file written by an incompatible schema version
    #[error("Project file version {file_version} is not compatible with {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownRegion error
    pub fn unknown_region(country: impl Into<String>) -> Self {
        CalcError::UnknownRegion {
            country: country.into(),
        }
    }

    /// Create an UnknownStandard error
    pub fn unknown_standard(standard_id: impl Into<String>) -> Self {
        CalcError::UnknownStandard {
            standard_id: standard_id.into(),
        }
    }

    /// Create a ProviderMalformedResponse error
    pub fn malformed_response(reason: impl Into<String>) -> Self {
        CalcError::ProviderMalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if the engine recovers from this error on its own
    /// (default factors or the fallback recommendation report).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::UnknownRegion { .. }
                | CalcError::ProviderTimeout { .. }
                | CalcError::ProviderFailed { .. }
                | CalcError::ProviderMalformedResponse { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownRegion { .. } => "UNKNOWN_REGION",
            CalcError::UnknownStandard { .. } => "UNKNOWN_STANDARD",
            CalcError::ProviderTimeout { .. } => "PROVIDER_TIMEOUT",
            CalcError::ProviderFailed { .. } => "PROVIDER_FAILED",
            CalcError::ProviderMalformedResponse { .. } => "PROVIDER_MALFORMED_RESPONSE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject negative or non-finite values.
pub(crate) fn ensure_non_negative(field: impl Into<String>, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite, non-negative number",
        ));
    }
    Ok(())
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(field: impl Into<String>, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    Ok(())
}

/// Reject values outside 0-100.
pub(crate) fn ensure_percentage(field: impl Into<String>, value: f64) -> CalcResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Percentage must be between 0 and 100",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("quantity", "-5", "Value must be a finite, non-negative number");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unknown_region("XX").error_code(), "UNKNOWN_REGION");
        assert_eq!(CalcError::unknown_standard("FOO").error_code(), "UNKNOWN_STANDARD");
        assert_eq!(CalcError::ProviderTimeout { seconds: 30 }.error_code(), "PROVIDER_TIMEOUT");
    }

    #[test]
    fn test_recoverable() {
        assert!(CalcError::unknown_region("XX").is_recoverable());
        assert!(CalcError::malformed_response("not json").is_recoverable());
        assert!(!CalcError::unknown_standard("FOO").is_recoverable());
        assert!(!CalcError::invalid_input("a", "b", "c").is_recoverable());
    }

    #[test]
    fn test_validation_helpers() {
        assert!(ensure_non_negative("quantity", 0.0).is_ok());
        assert!(ensure_non_negative("quantity", -1.0).is_err());
        assert!(ensure_non_negative("quantity", f64::NAN).is_err());
        assert!(ensure_non_negative("quantity", f64::INFINITY).is_err());
        assert!(ensure_finite("factor", -0.9).is_ok());
        assert!(ensure_finite("factor", f64::NAN).is_err());
        assert!(ensure_percentage("rate", 100.0).is_ok());
        assert!(ensure_percentage("rate", 100.5).is_err());
    }
}
