use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::DEFAULT_WEIGHT_TOLERANCE;

pub const DEFAULT_PRECISION: usize = 4;
pub const MAX_PRECISION: usize = 10;

/// Settings file.
///
/// Example YAML:
/// ```yaml
/// data_path: /srv/site-rank/dataset.json
/// weight_tolerance: 0.01
/// display:
///   precision: 3
///   colors: false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dataset JSON file (default: ~/.config/site-rank/dataset.json)
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Allowed |Σweights - 1| before a warning is raised (default: 0.001)
    #[serde(default)]
    pub weight_tolerance: Option<f64>,

    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Decimal places for scores (default: 4)
    #[serde(default)]
    pub precision: Option<usize>,

    /// Force colored output on or off; auto-detected from the terminal when unset
    #[serde(default)]
    pub colors: Option<bool>,
}

impl Config {
    pub fn weight_tolerance(&self) -> f64 {
        self.weight_tolerance.unwrap_or(DEFAULT_WEIGHT_TOLERANCE)
    }

    pub fn precision(&self) -> usize {
        self.display
            .as_ref()
            .and_then(|d| d.precision)
            .unwrap_or(DEFAULT_PRECISION)
    }

    pub fn colors(&self) -> Option<bool> {
        self.display.as_ref().and_then(|d| d.colors)
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(tolerance) = config.weight_tolerance {
        if !tolerance.is_finite() || tolerance < 0.0 {
            errors.push(format!(
                "weight_tolerance: must be a non-negative number, got {}",
                tolerance
            ));
        }
    }

    if let Some(precision) = config.display.as_ref().and_then(|d| d.precision) {
        if precision > MAX_PRECISION {
            errors.push(format!(
                "display.precision: must be at most {}, got {}",
                MAX_PRECISION, precision
            ));
        }
    }

    if let Some(ref path) = config.data_path {
        if path.as_os_str().is_empty() {
            errors.push("data_path: must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.precision(), DEFAULT_PRECISION);
        assert_eq!(config.weight_tolerance(), DEFAULT_WEIGHT_TOLERANCE);
        assert!(config.colors().is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
data_path: /tmp/dataset.json
weight_tolerance: 0.01
display:
  precision: 3
  colors: false
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/dataset.json")));
        assert_eq!(config.weight_tolerance(), 0.01);
        assert_eq!(config.precision(), 3);
        assert_eq!(config.colors(), Some(false));
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "weights_tolerance: 0.1\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            data_path: Some(PathBuf::from("data.json")),
            weight_tolerance: Some(0.05),
            display: Some(DisplayConfig {
                precision: Some(2),
                colors: Some(true),
            }),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            data_path: None,
            weight_tolerance: Some(-1.0),
            display: Some(DisplayConfig {
                precision: Some(42),
                colors: None,
            }),
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("weight_tolerance"));
        assert!(errors[1].contains("display.precision"));
    }
}
