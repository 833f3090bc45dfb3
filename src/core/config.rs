use serde::{Deserialize, Serialize};

use crate::error::{FhirModelError, Result};

pub const DEFAULT_MAX_STRING_LENGTH: usize = 1024 * 1024;

/// Switches for the checks that run when a node is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Master switch. When off, only type-level invariants hold.
    pub enabled: bool,
    pub check_reference_types: bool,
    pub extended_codeable_concept_validation: bool,
    pub check_control_chars: bool,
    /// Emit advisories for EXAMPLE-strength binding mismatches.
    pub report_example_bindings: bool,
    pub max_string_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_reference_types: true,
            extended_codeable_concept_validation: true,
            check_control_chars: true,
            report_example_bindings: false,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}

impl ValidationConfig {
    /// Trusted mode: input is assumed valid and no schema checks run.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.max_string_length == 0 {
            return Err(FhirModelError::configuration_error(
                "maxStringLength must be greater than zero",
            ));
        }
        Ok(config)
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_reference_type_checks(mut self, enabled: bool) -> Self {
        self.check_reference_types = enabled;
        self
    }

    pub fn with_extended_codeable_concept_validation(mut self, enabled: bool) -> Self {
        self.extended_codeable_concept_validation = enabled;
        self
    }

    pub fn with_control_char_checks(mut self, enabled: bool) -> Self {
        self.check_control_chars = enabled;
        self
    }

    pub fn with_example_bindings_reported(mut self, enabled: bool) -> Self {
        self.report_example_bindings = enabled;
        self
    }

    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let config =
            ValidationConfig::from_json_str(r#"{"checkReferenceTypes": false}"#).unwrap();
        assert!(config.enabled);
        assert!(!config.check_reference_types);
        assert_eq!(config.max_string_length, DEFAULT_MAX_STRING_LENGTH);
    }

    #[test]
    fn zero_string_length_is_rejected() {
        let err = ValidationConfig::from_json_str(r#"{"maxStringLength": 0}"#).unwrap_err();
        assert!(matches!(err, FhirModelError::Configuration { .. }));
    }

    #[test]
    fn malformed_document_is_a_serialization_error() {
        let err = ValidationConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, FhirModelError::Serialization(_)));
    }
}
