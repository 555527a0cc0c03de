//! Configuration module.
//!
//! Handles loading, validating, and merging `backgrounder.toml`. Stock defaults
//! are overridden by the user file, and command-line flags override both.
//!
//! ## Config File Location
//!
//! Pass `--config <file>`, or place `backgrounder.toml` in the working
//! directory. Without either, the stock defaults below apply.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [background]
//! aspect_ratio = "4/5"       # decimal in (0, 1) or W:H, W/H, W-H, W|H
//! orientation = "vertical"   # reported for decimal ratios and fallbacks
//! kind = "BLURRED"           # BLURRED, BLACK, WHITE, COLOR, BRIGHTEST, DARKEST
//! color = "#000000"          # used by COLOR
//!
//! [sampling]
//! brightest_threshold = 150       # channel value counted as "bright"
//! brightest_threshold_count = 3   # skip pixels with this many bright channels
//! darkest_ceiling = 100.0         # darkest scan ignores brighter pixels
//!
//! [output]
//! dir = "./output/"
//! quality = 95               # JPEG quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::aspect::{AspectRatioResolver, DEFAULT_ASPECT_RATIO, Orientation};
use crate::imaging::{BackgroundKind, ParamsError, Quality, SamplingParams, parse_color};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "backgrounder.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Config validation error: {0}")]
    Params(#[from] ParamsError),
}

/// Configuration loaded from `backgrounder.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgrounderConfig {
    /// Target shape and fill strategy.
    pub background: BackgroundConfig,
    /// Edge-color sampling thresholds.
    pub sampling: SamplingConfig,
    /// Where and how generated canvases are written.
    pub output: OutputConfig,
}

impl BackgrounderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.sampling.brightest_threshold_count;
        if !(1..=3).contains(&count) {
            return Err(ConfigError::Validation(
                "sampling.brightest_threshold_count must be 1-3".into(),
            ));
        }
        let ceiling = self.sampling.darkest_ceiling;
        if !(0.0..=255.0).contains(&ceiling) {
            return Err(ConfigError::Validation(
                "sampling.darkest_ceiling must be 0-255".into(),
            ));
        }
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.background.aspect_ratio.trim().is_empty() {
            return Err(ConfigError::Validation(
                "background.aspect_ratio must not be empty".into(),
            ));
        }
        self.background.kind()?;
        Ok(())
    }

    /// Resolver carrying the configured default orientation.
    pub fn resolver(&self) -> AspectRatioResolver {
        AspectRatioResolver::new(self.background.orientation)
    }

    pub fn sampling_params(&self) -> SamplingParams {
        SamplingParams {
            brightest_threshold: self.sampling.brightest_threshold,
            brightest_threshold_count: self.sampling.brightest_threshold_count,
            darkest_ceiling: self.sampling.darkest_ceiling,
        }
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }
}

/// Target shape and fill strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Aspect-ratio expression, e.g. `"4/5"` or `"0.8"`.
    pub aspect_ratio: String,
    /// Orientation reported for decimal ratios and unparsable expressions.
    pub orientation: Orientation,
    /// Fill strategy token.
    pub kind: String,
    /// Fill color for `COLOR`, as `#rrggbb` or `r,g,b`.
    pub color: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            orientation: Orientation::Vertical,
            kind: "BLURRED".to_string(),
            color: "#000000".to_string(),
        }
    }
}

impl BackgroundConfig {
    /// Parse `kind` and `color` into a [`BackgroundKind`].
    pub fn kind(&self) -> Result<BackgroundKind, ParamsError> {
        let color = parse_color(&self.color)?;
        BackgroundKind::from_token(&self.kind, Some(color))
    }
}

/// Edge-color sampling thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// Channel value above which a channel counts as bright.
    pub brightest_threshold: u8,
    /// Brightest scan skips pixels with at least this many bright channels.
    pub brightest_threshold_count: u8,
    /// Darkest scan ignores pixels brighter than this perceived brightness.
    pub darkest_ceiling: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        let stock = SamplingParams::default();
        Self {
            brightest_threshold: stock.brightest_threshold,
            brightest_threshold_count: stock.brightest_threshold_count,
            darkest_ceiling: stock.darkest_ceiling,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving generated canvases.
    pub dir: PathBuf,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./output/"),
            quality: Quality::default().value(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BackgrounderConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BackgrounderConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BackgrounderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `backgrounder.toml` in `cwd` is
/// used when present, otherwise the stock defaults.
pub fn load_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<BackgrounderConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let implicit = cwd.join(CONFIG_FILE_NAME);
            if implicit.is_file() {
                Some(load_raw_config(&implicit)?)
            } else {
                None
            }
        }
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `backgrounder.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Backgrounder Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Background
# ---------------------------------------------------------------------------
[background]
# Target canvas shape. Either a decimal between 0 and 1 (canvas width as a
# fraction of the photo height) or a pair such as 4/5, 16:9, 3-2 or 1|1.
# Pairs with the larger number first are treated as horizontal.
aspect_ratio = "4/5"

# Orientation reported for decimal ratios and unreadable expressions.
orientation = "vertical"

# How the added space is filled:
#   BLURRED   - stretched, blurred copy of the photo
#   BLACK     - solid black
#   WHITE     - solid white
#   COLOR     - solid `color` below
#   BRIGHTEST - brightest non-blown-out pixel from the top half of the side edges
#   DARKEST   - darkest pixel from the side edges
kind = "BLURRED"

# Fill color for COLOR, as #rrggbb or r,g,b.
color = "#000000"

# ---------------------------------------------------------------------------
# Edge sampling (BRIGHTEST / DARKEST)
# ---------------------------------------------------------------------------
[sampling]
# A channel above this value counts as bright.
brightest_threshold = 150

# BRIGHTEST skips pixels with at least this many bright channels (1-3).
brightest_threshold_count = 3

# DARKEST only considers pixels at or below this perceived brightness (0-255).
# When none qualify the fill is white.
darkest_ceiling = 100.0

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Directory for generated images (created if missing).
dir = "./output/"

# JPEG quality (1 = worst, 100 = best).
quality = 95
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = BackgrounderConfig::default();
        assert_eq!(config.background.aspect_ratio, "4/5");
        assert_eq!(config.background.orientation, Orientation::Vertical);
        assert_eq!(config.background.kind, "BLURRED");
        assert_eq!(config.sampling.brightest_threshold, 150);
        assert_eq!(config.sampling.brightest_threshold_count, 3);
        assert_eq!(config.sampling.darkest_ceiling, 100.0);
        assert_eq!(config.output.dir, PathBuf::from("./output/"));
        assert_eq!(config.output.quality, 95);
    }

    #[test]
    fn default_config_is_valid() {
        BackgrounderConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[background]
kind = "COLOR"
color = "#336699"
"##;
        let config: BackgrounderConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.background.kind().unwrap(),
            BackgroundKind::Color(Rgb([0x33, 0x66, 0x99]))
        );
        // Defaults preserved
        assert_eq!(config.background.aspect_ratio, "4/5");
        assert_eq!(config.output.quality, 95);
    }

    #[test]
    fn parse_orientation_lowercase() {
        let toml = r##"
[background]
orientation = "horizontal"
"##;
        let config: BackgrounderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.background.orientation, Orientation::Horizontal);
        assert_eq!(config.resolver().resolve("0.5").orientation, Orientation::Horizontal);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r##"
[background]
aspect = "4/5"
"##;
        assert!(toml::from_str::<BackgrounderConfig>(toml).is_err());
    }

    #[test]
    fn sampling_params_mirror_config() {
        let mut config = BackgrounderConfig::default();
        config.sampling.brightest_threshold = 200;
        config.sampling.darkest_ceiling = 42.0;
        let params = config.sampling_params();
        assert_eq!(params.brightest_threshold, 200);
        assert_eq!(params.brightest_threshold_count, 3);
        assert_eq!(params.darkest_ceiling, 42.0);
    }

    #[test]
    fn validate_rejects_bad_threshold_count() {
        let mut config = BackgrounderConfig::default();
        config.sampling.brightest_threshold_count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.sampling.brightest_threshold_count = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_quality() {
        let mut config = BackgrounderConfig::default();
        config.output.quality = 0;
        assert!(config.validate().is_err());
        config.output.quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_ceiling() {
        let mut config = BackgrounderConfig::default();
        config.sampling.darkest_ceiling = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_kind() {
        let mut config = BackgrounderConfig::default();
        config.background.kind = "blurred".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Params(ParamsError::UnknownKind(_)))
        ));
    }

    #[test]
    fn validate_rejects_bad_color() {
        let mut config = BackgrounderConfig::default();
        config.background.color = "teal".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Params(ParamsError::InvalidColor(_)))
        ));
    }

    #[test]
    fn merge_overlay_replaces_leaf_values() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[output]\nquality = 80").unwrap();
        let merged = merge_toml(base, overlay);
        let config: BackgrounderConfig = merged.try_into().unwrap();
        assert_eq!(config.output.quality, 80);
        assert_eq!(config.output.dir, PathBuf::from("./output/"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.background.aspect_ratio, "4/5");
    }

    #[test]
    fn load_config_reads_implicit_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[background]\naspect_ratio = \"16:9\"\n",
        )
        .unwrap();

        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.background.aspect_ratio, "16:9");
        assert_eq!(config.background.kind, "BLURRED");
    }

    #[test]
    fn load_config_prefers_explicit_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[output]\nquality = 10\n").unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "[output]\nquality = 70\n").unwrap();

        let config = load_config(Some(&explicit), tmp.path()).unwrap();
        assert_eq!(config.output.quality, 70);
    }

    #[test]
    fn load_config_missing_explicit_path_errors() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("absent.toml")), tmp.path());
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_errors() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[background\n").unwrap();
        assert!(matches!(
            load_config(None, tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[output]\nquality = 0\n").unwrap();
        assert!(matches!(
            load_config(None, tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: BackgrounderConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = BackgrounderConfig::default();
        assert_eq!(config.background.aspect_ratio, defaults.background.aspect_ratio);
        assert_eq!(config.background.kind, defaults.background.kind);
        assert_eq!(config.sampling.darkest_ceiling, defaults.sampling.darkest_ceiling);
        assert_eq!(config.output.quality, defaults.output.quality);
        config.validate().unwrap();
    }
}
