//! Engine configuration and its on-disk formats.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Largest accepted field side. The field keeps 20 bytes per pixel.
pub const MAX_FIELD_SIZE: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Side length of the square field, in pixels.
    pub field_size: u32,
    /// Number of ticks a trail point survives.
    pub max_age: u32,
    /// Brush radius as a fraction of `field_size`.
    pub radius_fraction: f32,
    /// Share of a point's life spent fading in.
    pub attack_fraction: f32,
    /// Multiplier on the squared pointer distance before saturation.
    pub force_gain: f32,
    /// Peak opacity of the soft falloff around each point.
    pub glow_alpha: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            field_size: 64,
            max_age: 64,
            radius_fraction: 0.1,
            attack_fraction: 0.3,
            force_gain: 10_000.0,
            glow_alpha: 0.2,
        }
    }
}

impl TrailConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_size == 0 {
            return Err(ConfigError::ZeroFieldSize);
        }
        if self.field_size > MAX_FIELD_SIZE {
            return Err(ConfigError::FieldTooLarge(self.field_size));
        }
        if self.max_age == 0 {
            return Err(ConfigError::ZeroMaxAge);
        }
        if !self.radius_fraction.is_finite() || self.radius_fraction < 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius_fraction));
        }
        if !(self.attack_fraction > 0.0 && self.attack_fraction < 1.0) {
            return Err(ConfigError::InvalidAttack(self.attack_fraction));
        }
        if !self.force_gain.is_finite() || self.force_gain < 0.0 {
            return Err(ConfigError::InvalidForceGain(self.force_gain));
        }
        if !self.glow_alpha.is_finite() || self.glow_alpha < 0.0 {
            return Err(ConfigError::InvalidGlowAlpha(self.glow_alpha));
        }
        Ok(())
    }

    /// Brush radius in field pixels.
    pub fn radius(&self) -> f32 {
        self.radius_fraction * self.field_size as f32
    }

    /// Fraction of remaining life a point is advected per tick.
    pub fn decay_speed(&self) -> f32 {
        1.0 / self.max_age as f32
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, picking the parser from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&source)?;
        debug!(path = %path.display(), ?config, "loaded trail config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TrailConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.radius() - 6.4).abs() < 1e-5);
        assert!((config.decay_speed() - 1.0 / 64.0).abs() < 1e-7);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = TrailConfig::from_toml_str("field_size = 128\nmax_age = 32\n").unwrap();
        assert_eq!(config.field_size, 128);
        assert_eq!(config.max_age, 32);
        assert_eq!(config.radius_fraction, 0.1);
        assert_eq!(config.attack_fraction, 0.3);
    }

    #[test]
    fn json_is_accepted() {
        let config = TrailConfig::from_json_str(r#"{ "radius_fraction": 0.25 }"#).unwrap();
        assert_eq!(config.radius_fraction, 0.25);
        assert_eq!(config.field_size, 64);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let zero_size = TrailConfig { field_size: 0, ..Default::default() };
        assert!(matches!(zero_size.validate(), Err(ConfigError::ZeroFieldSize)));

        let huge = TrailConfig { field_size: 100_000, ..Default::default() };
        assert!(matches!(huge.validate(), Err(ConfigError::FieldTooLarge(100_000))));
        let largest = TrailConfig { field_size: MAX_FIELD_SIZE, ..Default::default() };
        assert!(largest.validate().is_ok());

        let zero_age = TrailConfig { max_age: 0, ..Default::default() };
        assert!(matches!(zero_age.validate(), Err(ConfigError::ZeroMaxAge)));

        let radius = TrailConfig { radius_fraction: f32::NAN, ..Default::default() };
        assert!(matches!(radius.validate(), Err(ConfigError::InvalidRadius(_))));

        let attack = TrailConfig { attack_fraction: 1.0, ..Default::default() };
        assert!(matches!(attack.validate(), Err(ConfigError::InvalidAttack(_))));

        let gain = TrailConfig { force_gain: -1.0, ..Default::default() };
        assert!(matches!(gain.validate(), Err(ConfigError::InvalidForceGain(_))));

        let alpha = TrailConfig { glow_alpha: f32::INFINITY, ..Default::default() };
        assert!(matches!(alpha.validate(), Err(ConfigError::InvalidGlowAlpha(_))));
    }

    #[test]
    fn parse_errors_surface_as_config_errors() {
        assert!(matches!(
            TrailConfig::from_toml_str("field_size = \"big\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(TrailConfig::from_json_str("{"), Err(ConfigError::Json(_))));
        assert!(matches!(
            TrailConfig::from_toml_str("max_age = 0"),
            Err(ConfigError::ZeroMaxAge)
        ));
    }

    #[test]
    fn unknown_extension_is_rejected_before_reading() {
        let err = TrailConfig::load("does-not-exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = TrailConfig::load("definitely/missing/trail.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("trail.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
