//! Lab configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::instrument::{Magnification, Unit};
use crate::{DEFAULT_ALIGNMENT_TOLERANCE_PX, EXPERIMENT_ID, IDLE_PROMPT};

/// Tunables for a lab session.
///
/// Every field has a default, so a YAML file only needs the keys it
/// overrides:
///
/// ```yaml
/// alignment_tolerance_px: 3
/// default_magnification: 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// How close (exclusive, in pixels) the second axis must be for a
    /// point-alignment step to complete.
    pub alignment_tolerance_px: i32,

    /// Lens selected on start-up and whenever a tutorial starts.
    pub default_magnification: Magnification,

    /// Unit label selected on start-up and whenever a tutorial starts.
    pub default_unit: Unit,

    /// Message shown when no tutorial is running.
    pub idle_message: String,

    /// Experiment whose samples the session offers.
    pub experiment_id: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            alignment_tolerance_px: DEFAULT_ALIGNMENT_TOLERANCE_PX,
            default_magnification: Magnification::default(),
            default_unit: Unit::default(),
            idle_message: IDLE_PROMPT.to_string(),
            experiment_id: EXPERIMENT_ID.to_string(),
        }
    }
}

impl LabConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: LabConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alignment_tolerance_px <= 0 {
            return Err(ConfigError::InvalidTolerance(self.alignment_tolerance_px));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = LabConfig::default();
        assert_eq!(config.alignment_tolerance_px, 2);
        assert_eq!(config.default_magnification, Magnification::X10);
        assert_eq!(config.default_unit, Unit::Millimetres);
        assert_eq!(config.experiment_id, "profile-projector");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = LabConfig::from_yaml_str("alignment_tolerance_px: 5\n").unwrap();
        assert_eq!(config.alignment_tolerance_px, 5);
        assert_eq!(config.idle_message, IDLE_PROMPT);
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        let err = LabConfig::from_yaml_str("alignment_tolerance_px: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTolerance(0)));
    }

    #[test]
    fn rejects_unknown_magnification() {
        let err = LabConfig::from_yaml_str("default_magnification: 15\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_unit: in").unwrap();
        let config = LabConfig::load(file.path()).unwrap();
        assert_eq!(config.default_unit, Unit::Inches);

        let missing = LabConfig::load("/nonexistent/lab.yaml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
