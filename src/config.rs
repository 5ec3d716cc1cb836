//! Pipeline configuration.
//!
//! Loaded from an optional `shelfpaper.toml`, typically placed next to the
//! library JSON. Every key is optional; defaults are the long-standing
//! pipeline constants. Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [covers]
//! max_width = 400       # Normalized cover width cap (never upscales)
//! quality = 85          # JPEG quality for normalized covers
//!
//! [mosaic]
//! tile_width = 100      # Width of one mosaic cell
//! quality = 95          # JPEG quality for the composite
//! screen_aspect = [16, 9]  # Target canvas shape
//! ```
//!
//! Command-line flags override whatever the file says; the file overrides
//! the stock defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from `shelfpaper.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Cover normalization settings.
    pub covers: CoversConfig,
    /// Mosaic rendering settings.
    pub mosaic: MosaicConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.covers.max_width == 0 {
            return Err(ConfigError::Validation(
                "covers.max_width must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.covers.quality) {
            return Err(ConfigError::Validation(
                "covers.quality must be 1-100".into(),
            ));
        }
        if self.mosaic.tile_width == 0 {
            return Err(ConfigError::Validation(
                "mosaic.tile_width must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.mosaic.quality) {
            return Err(ConfigError::Validation(
                "mosaic.quality must be 1-100".into(),
            ));
        }
        if self.mosaic.screen_aspect[0] == 0 || self.mosaic.screen_aspect[1] == 0 {
            return Err(ConfigError::Validation(
                "mosaic.screen_aspect values must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Cover normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoversConfig {
    /// Width cap for normalized covers; sources are never upscaled.
    pub max_width: u32,
    /// JPEG quality for normalized covers (1-100).
    pub quality: u8,
}

impl Default for CoversConfig {
    fn default() -> Self {
        Self {
            max_width: 400,
            quality: 85,
        }
    }
}

/// Mosaic rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MosaicConfig {
    /// Width of one mosaic cell, in pixels.
    pub tile_width: u32,
    /// JPEG quality for the composite image (1-100).
    pub quality: u8,
    /// Target canvas shape as `[width, height]`, e.g. `[16, 9]`.
    pub screen_aspect: [u32; 2],
}

impl MosaicConfig {
    pub fn screen_aspect_ratio(&self) -> f64 {
        f64::from(self.screen_aspect[0]) / f64::from(self.screen_aspect[1])
    }
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_width: 100,
            quality: 95,
            screen_aspect: [16, 9],
        }
    }
}

/// Load config from `path`, or the stock defaults when no file exists.
///
/// Rejects unknown keys and validates the result.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.covers.max_width, 400);
        assert_eq!(config.covers.quality, 85);
        assert_eq!(config.mosaic.tile_width, 100);
        assert_eq!(config.mosaic.quality, 95);
        assert_eq!(config.mosaic.screen_aspect, [16, 9]);
    }

    #[test]
    fn screen_aspect_ratio_is_computed() {
        let config = MosaicConfig::default();
        assert!((config.screen_aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[covers]
max_width = 600
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.covers.max_width, 600);
        // Everything else stays at defaults.
        assert_eq!(config.covers.quality, 85);
        assert_eq!(config.mosaic.tile_width, 100);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("shelfpaper.toml")).unwrap();
        assert_eq!(config.covers.max_width, 400);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shelfpaper.toml");
        fs::write(
            &path,
            r#"
[mosaic]
tile_width = 150
screen_aspect = [21, 9]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.mosaic.tile_width, 150);
        assert_eq!(config.mosaic.screen_aspect, [21, 9]);
        assert_eq!(config.mosaic.quality, 95);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shelfpaper.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[covers]
max_widht = 400
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml = r#"
[coverz]
quality = 90
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_quality_out_of_range() {
        let mut config = Config::default();
        config.covers.quality = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mosaic.quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_dimensions() {
        let mut config = Config::default();
        config.covers.max_width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mosaic.tile_width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mosaic.screen_aspect = [16, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shelfpaper.toml");
        fs::write(
            &path,
            r#"
[covers]
quality = 200
"#,
        )
        .unwrap();

        let result = load_config(&path);
        assert!(result.is_err());
    }
}
