use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::LOG_LINE_LEADER;

/// Analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Substring identifying message-delivery log lines
    pub marker: String,
    /// Compute per-message metrics on the rayon pool
    pub parallel: bool,
    /// Worker threads for parallel processing (0 = auto-detect)
    pub threads: usize,
    pub output: OutputConfig,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub json: bool,
    pub text: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: LOG_LINE_LEADER.to_string(),
            parallel: true,
            threads: 0,
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("analysis_output"),
            json: true,
            text: true,
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.marker.is_empty() {
            return Err(ValidationError::InvalidMarker(
                "marker cannot be empty".to_string(),
            ));
        }
        if self.marker.contains('\n') {
            return Err(ValidationError::InvalidMarker(
                "marker cannot span lines".to_string(),
            ));
        }

        if !self.output.json && !self.output.text {
            return Err(ValidationError::InvalidOutput(
                "at least one of json or text output must be enabled".to_string(),
            ));
        }
        if self.output.dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidOutput(
                "output dir cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid marker: {0}")]
    InvalidMarker(String),
    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.marker, LOG_LINE_LEADER);
        assert!(config.parallel);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("marker: \"MSG|\"\noutput:\n  text: false\n").unwrap();
        assert_eq!(config.marker, "MSG|");
        assert!(config.parallel);
        assert!(config.output.json);
        assert!(!config.output.text);
        assert_eq!(config.output.dir, PathBuf::from("analysis_output"));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let config = Config {
            marker: String::new(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidMarker(_))));
    }

    #[test]
    fn test_no_output_format_rejected() {
        let mut config = Config::default();
        config.output.json = false;
        config.output.text = false;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidOutput(_))));
    }
}
