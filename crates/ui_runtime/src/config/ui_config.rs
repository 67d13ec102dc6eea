//! Runtime tunables for layout, cursor arbitration and text wrapping

use std::path::Path;

use serde::{Serialize, Deserialize};
use super::{Config, ConfigError};

/// # UI Runtime Configuration
///
/// Values that hosts may want to tune without recompiling. Every field has a
/// default, so partial config files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Minimum edge length of a cursor hit box, keeps tiny controls clickable
    pub min_hit_size: f32,
    /// Wrap-width changes smaller than this don't trigger a rewrap
    pub wrap_hysteresis: f32,
    /// Default spacing between scroll box members
    pub scroll_spacing: f32,
    /// Default minimum number of visible scroll box members
    pub min_visible_count: usize,
    /// Distance from the camera to the screen-space plane
    pub screen_plane_distance: f32,
    /// Width of the resizable window border
    pub window_border: f32,
    /// Smallest size a window can be resized to
    pub window_min_size: [f32; 2],
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            min_hit_size: 8.0,
            wrap_hysteresis: 2.0,
            scroll_spacing: 0.0,
            min_visible_count: 1,
            screen_plane_distance: 0.05,
            window_border: 4.0,
            window_min_size: [64.0, 48.0],
        }
    }
}

impl Config for UiConfig {}

impl UiConfig {
    /// Reject values that would poison layout math
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, f32); 6] = [
            ("min_hit_size", self.min_hit_size),
            ("wrap_hysteresis", self.wrap_hysteresis),
            ("scroll_spacing", self.scroll_spacing),
            ("window_border", self.window_border),
            ("window_min_size[0]", self.window_min_size[0]),
            ("window_min_size[1]", self.window_min_size[1]),
        ];

        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite, non-negative number, got {value}"),
                });
            }
        }

        if !self.screen_plane_distance.is_finite() || self.screen_plane_distance <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "screen_plane_distance",
                reason: format!("must be positive, got {}", self.screen_plane_distance),
            });
        }

        Ok(())
    }

    /// Load a config file and validate it
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::load_from_file(path)?;
        config.validate()?;
        log::info!("Loaded UI config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults_are_valid() {
        assert!(UiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = UiConfig { wrap_hysteresis: f32::NAN, ..Default::default() };
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "wrap_hysteresis"),
            other => panic!("expected invalid field error, got {other:?}"),
        }

        let config = UiConfig { screen_plane_distance: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.toml");

        let config = UiConfig { min_hit_size: 12.0, min_visible_count: 3, ..Default::default() };
        config.save_to_file(&path).unwrap();

        let loaded = UiConfig::load_validated(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.ron");
        std::fs::write(&path, "(min_hit_size: 4.0)").unwrap();

        let loaded = UiConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.min_hit_size, 4.0);
        assert_eq!(loaded.window_border, UiConfig::default().window_border);
    }

    #[test]
    fn test_unsupported_extension() {
        // Rejected before the file is opened
        assert!(matches!(UiConfig::load_from_file("settings.json"), Err(ConfigError::UnsupportedFormat(_))));

        let config = UiConfig::default();
        let text = config.render(ConfigFormat::Ron).unwrap();
        assert_eq!(UiConfig::parse(&text, ConfigFormat::Ron).unwrap(), config);
    }
}
