//! Encode configuration.
//!
//! Handles loading and validating the optional `assetpress.toml` file.
//! The compiled-in defaults match the delivery settings the pipeline has
//! always used; a config file in the source root may override them.
//!
//! ## Config File Location
//!
//! Place `assetpress.toml` in the source directory root:
//!
//! ```text
//! src/assets/images/
//! ├── assetpress.toml          # Optional — overrides stock defaults
//! ├── hero.jpg
//! └── icons/
//!     └── logo.svg
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [jpeg]
//! quality = 80              # Re-encode quality (1-100)
//! progressive = true        # Progressive scan
//!
//! [png]
//! quality = 80              # Re-encode quality (1-100)
//! compression_level = 9     # Deflate effort (0-9)
//!
//! [webp]
//! quality = 75              # Derived WebP quality (1-100)
//!
//! [avif]
//! quality = 65              # Derived AVIF quality (1-100)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only lower the AVIF quality
//! [avif]
//! quality = 50
//! ```
//!
//! Unknown keys are rejected to catch typos early.

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

/// Filename looked up in the source root.
pub const CONFIG_FILENAME: &str = "assetpress.toml";

/// Per-format encode parameters, immutable for the duration of a run.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeConfig {
    /// JPEG re-encode settings.
    pub jpeg: JpegParams,
    /// PNG re-encode settings.
    pub png: PngParams,
    /// Derived WebP settings.
    pub webp: WebpParams,
    /// Derived AVIF settings.
    pub avif: AvifParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegParams {
    pub quality: u8,
    pub progressive: bool,
}

impl Default for JpegParams {
    fn default() -> Self {
        Self {
            quality: 80,
            progressive: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PngParams {
    pub quality: u8,
    pub compression_level: u8,
}

impl Default for PngParams {
    fn default() -> Self {
        Self {
            quality: 80,
            compression_level: 9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebpParams {
    pub quality: u8,
}

impl Default for WebpParams {
    fn default() -> Self {
        Self { quality: 75 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvifParams {
    pub quality: u8,
}

impl Default for AvifParams {
    fn default() -> Self {
        Self { quality: 65 }
    }
}

impl EncodeConfig {
    /// Validate all parameter ranges. Qualities are 1-100, PNG compression 0-9.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_quality("jpeg.quality", self.jpeg.quality)?;
        check_quality("png.quality", self.png.quality)?;
        check_quality("webp.quality", self.webp.quality)?;
        check_quality("avif.quality", self.avif.quality)?;
        if self.png.compression_level > 9 {
            return Err(ConfigError::Validation(format!(
                "png.compression_level must be 0-9, got {}",
                self.png.compression_level
            )));
        }
        Ok(())
    }
}

fn check_quality(field: &str, value: u8) -> Result<(), ConfigError> {
    if !(1..=100).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be 1-100, got {value}"
        )));
    }
    Ok(())
}

/// Load the encode config for a run.
///
/// Reads `assetpress.toml` from the source root if it exists, otherwise
/// returns the stock defaults. The loaded config is validated either way.
pub fn load_config(source_root: &Path) -> Result<EncodeConfig, ConfigError> {
    let config_path = source_root.join(CONFIG_FILENAME);
    let config: EncodeConfig = if config_path.is_file() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        EncodeConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Stock `assetpress.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = EncodeConfig::default();
    format!(
        "\
# assetpress configuration
# Place this file in the source directory root. All options are optional;
# the values below are the defaults.

[jpeg]
quality = {jpeg_q}              # Re-encode quality (1-100)
progressive = {jpeg_p}        # Progressive scan

[png]
quality = {png_q}              # Re-encode quality (1-100)
compression_level = {png_c}     # Deflate effort (0-9)

[webp]
quality = {webp_q}              # Derived WebP quality (1-100)

[avif]
quality = {avif_q}              # Derived AVIF quality (1-100)
",
        jpeg_q = defaults.jpeg.quality,
        jpeg_p = defaults.jpeg.progressive,
        png_q = defaults.png.quality,
        png_c = defaults.png.compression_level,
        webp_q = defaults.webp.quality,
        avif_q = defaults.avif.quality,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_values_match_delivery_settings() {
        let config = EncodeConfig::default();
        assert_eq!(config.jpeg.quality, 80);
        assert!(config.jpeg.progressive);
        assert_eq!(config.png.quality, 80);
        assert_eq!(config.png.compression_level, 9);
        assert_eq!(config.webp.quality, 75);
        assert_eq!(config.avif.quality, 65);
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.jpeg.quality, 80);
        assert_eq!(config.avif.quality, 65);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[avif]\nquality = 50\n").unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.avif.quality, 50);
        // Everything else stays stock
        assert_eq!(config.jpeg.quality, 80);
        assert_eq!(config.webp.quality, 75);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[jpg]\nquality = 80\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn out_of_range_quality_in_file_fails_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[webp]\nquality = 0\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_quality_fails_validation() {
        let config = EncodeConfig {
            jpeg: JpegParams {
                quality: 0,
                progressive: true,
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jpeg.quality"));
    }

    #[test]
    fn compression_level_above_nine_fails_validation() {
        let config = EncodeConfig {
            png: PngParams {
                quality: 80,
                compression_level: 10,
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("compression_level"));
    }

    #[test]
    fn stock_config_parses_back_to_defaults() {
        let parsed: EncodeConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(parsed.jpeg.quality, 80);
        assert!(parsed.jpeg.progressive);
        assert_eq!(parsed.png.compression_level, 9);
        assert_eq!(parsed.webp.quality, 75);
        assert_eq!(parsed.avif.quality, 65);
    }
}
