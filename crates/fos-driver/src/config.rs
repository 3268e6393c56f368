//! Driver Configuration

use serde::Deserialize;

use crate::viewport::DEFAULT_VIEWPORT_WIDTH;

/// Driver configuration options
///
/// Defaults come from the `DEVICE_WIDTH` and `VIEWPORT_WIDTH` environment
/// variables at build time, when set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriverConfig {
    /// Pinned device width; unset means the document client width
    pub device_width: Option<f64>,

    /// Width of the design viewport in design units
    pub viewport_width: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            device_width: parse_width(option_env!("DEVICE_WIDTH")),
            viewport_width: parse_width(option_env!("VIEWPORT_WIDTH")).unwrap_or(DEFAULT_VIEWPORT_WIDTH),
        }
    }
}

impl DriverConfig {
    /// Parse a JSON document such as `{"viewportWidth": 640}`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(ConfigError::InvalidViewportWidth(self.viewport_width));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid driver config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("viewportWidth must be positive, got {0}")]
    InvalidViewportWidth(f64),
}

fn parse_width(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|w| w.is_finite() && *w > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let config = DriverConfig::from_json(r#"{"deviceWidth": 414, "viewportWidth": 828}"#).unwrap();
        assert_eq!(config.device_width, Some(414.0));
        assert_eq!(config.viewport_width, 828.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = DriverConfig::from_json(r#"{"deviceWidth": 320}"#).unwrap();
        assert_eq!(config.viewport_width, DriverConfig::default().viewport_width);
    }

    #[test]
    fn test_rejects_zero_viewport() {
        let err = DriverConfig::from_json(r#"{"viewportWidth": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewportWidth(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(DriverConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_width() {
        assert_eq!(parse_width(Some(" 375 ")), Some(375.0));
        assert_eq!(parse_width(Some("wide")), None);
        assert_eq!(parse_width(Some("-1")), None);
        assert_eq!(parse_width(None), None);
    }
}
