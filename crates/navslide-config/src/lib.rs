//! Navslide configuration system
//!
//! This crate provides centralized configuration for page transitions,
//! loading settings from `navslide.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default timing curve of the slide transition.
pub const DEFAULT_TIMING: &str = "cubic-bezier(0.3, 0.4, 0, 0.9)";

/// Default total duration of the slide transition, in seconds.
pub const DEFAULT_DURATION: f64 = 0.4;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct NavslideConfig {
    /// Slide transition timing
    pub transition: TransitionConfig,
    /// Background mask inserted behind animating pages
    pub mask: MaskConfig,
}

/// Timing parameters shared by every transition an animator drives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// CSS timing function, e.g. `ease-out` or `cubic-bezier(0.3, 0.4, 0, 0.9)`
    pub timing: String,
    /// Delay in seconds before visible motion starts
    pub delay: f64,
    /// Duration in seconds of the visible motion
    pub duration: f64,
}

/// Mask overlay appearance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaskConfig {
    /// RGBA fill of the mask, components in [0, 1]
    pub color: [f32; 4],
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            timing: DEFAULT_TIMING.to_string(),
            delay: 0.0,
            duration: DEFAULT_DURATION,
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl TransitionConfig {
    /// Reject negative or non-finite timings.
    pub fn validate(&self) -> Result<()> {
        check_seconds("transition.delay", self.delay)?;
        check_seconds("transition.duration", self.duration)?;
        if self.timing.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "transition.timing",
                reason: "timing function must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn check_seconds(key: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("expected a non-negative number of seconds, got {value}"),
        });
    }
    Ok(())
}

impl MaskConfig {
    /// Reject color components outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        if self
            .color
            .iter()
            .any(|c| !c.is_finite() || !(0.0..=1.0).contains(c))
        {
            return Err(ConfigError::Invalid {
                key: "mask.color",
                reason: format!("components must be within [0, 1], got {:?}", self.color),
            });
        }
        Ok(())
    }
}

impl NavslideConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the navslide.toml configuration file
    ///
    /// # Returns
    /// * `Ok(NavslideConfig)` - Successfully loaded and validated configuration
    /// * `Err(ConfigError)` - The file could not be read, parsed or validated
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location (navslide.toml in the current directory)
    /// or return default configuration if the file doesn't exist or is invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file("navslide.toml").unwrap_or_default()
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.transition.validate()?;
        self.mask.validate()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        self.merge_with_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source.
    pub fn merge_with_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(timing) = var("NAVSLIDE_TIMING") {
            if !timing.trim().is_empty() {
                self.transition.timing = timing;
            }
        }
        if let Some(delay) = var("NAVSLIDE_DELAY").and_then(|v| v.trim().parse::<f64>().ok()) {
            if check_seconds("transition.delay", delay).is_ok() {
                self.transition.delay = delay;
            }
        }
        if let Some(duration) =
            var("NAVSLIDE_DURATION").and_then(|v| v.trim().parse::<f64>().ok())
        {
            if check_seconds("transition.duration", duration).is_ok() {
                self.transition.duration = duration;
            }
        }
        if let Some(color) = var("NAVSLIDE_MASK_COLOR").and_then(|v| parse_color(&v)) {
            self.mask.color = color;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from navslide.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

/// Parse `r,g,b,a` with components in [0, 1].
fn parse_color(value: &str) -> Option<[f32; 4]> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    let color: [f32; 4] = parts.try_into().ok()?;
    MaskConfig { color }.validate().ok()?;
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = NavslideConfig::default();
        assert_eq!(config.transition.timing, DEFAULT_TIMING);
        assert_eq!(config.transition.delay, 0.0);
        assert_eq!(config.transition.duration, 0.4);
        assert_eq!(config.mask.color, [0.0, 0.0, 0.0, 1.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = NavslideConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: NavslideConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_str = r#"
            [transition]
            duration = 0.25
        "#;
        let config: NavslideConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.transition.duration, 0.25);
        assert_eq!(config.transition.delay, 0.0);
        assert_eq!(config.transition.timing, DEFAULT_TIMING);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[transition]\ntiming = \"ease-in\"\ndelay = 0.1\n\n[mask]\ncolor = [1.0, 1.0, 1.0, 1.0]"
        )
        .unwrap();

        let config = NavslideConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.transition.timing, "ease-in");
        assert_eq!(config.transition.delay, 0.1);
        assert_eq!(config.mask.color, [1.0; 4]);
    }

    #[test]
    fn test_load_rejects_negative_duration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[transition]\nduration = -1.0").unwrap();

        let err = NavslideConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "transition.duration",
                ..
            }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = NavslideConfig::load_from_file("/nonexistent/navslide.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_merge_with_vars() {
        let vars: HashMap<&str, &str> = [
            ("NAVSLIDE_TIMING", "linear"),
            ("NAVSLIDE_DELAY", "0.05"),
            ("NAVSLIDE_DURATION", "not-a-number"),
            ("NAVSLIDE_MASK_COLOR", "0.1, 0.2, 0.3, 1"),
        ]
        .into_iter()
        .collect();

        let mut config = NavslideConfig::default();
        config.merge_with_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.transition.timing, "linear");
        assert_eq!(config.transition.delay, 0.05);
        // Unparseable override is ignored
        assert_eq!(config.transition.duration, 0.4);
        assert_eq!(config.mask.color, [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn test_merge_ignores_out_of_range() {
        let mut config = NavslideConfig::default();
        config.merge_with_vars(|key| match key {
            "NAVSLIDE_DELAY" => Some("-3".to_string()),
            "NAVSLIDE_MASK_COLOR" => Some("2,0,0,1".to_string()),
            _ => None,
        });
        assert_eq!(config.transition.delay, 0.0);
        assert_eq!(config.mask.color, [0.0, 0.0, 0.0, 1.0]);
    }
}
