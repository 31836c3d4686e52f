//! Face configuration
//!
//! Uses RON (Rusty Object Notation) for a small human-editable file
//! carrying the geometry and battery constants. Every field has a
//! default, so a partial file or no file at all still renders the
//! stock face.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

/// Tunable face constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceConfig {
    /// Angular steps per minute of dial rotation; 1 gives 60 steps per turn
    #[serde(default = "default_density")]
    pub density: u32,
    /// Radial shrink factor per full turn of the spiral
    #[serde(default = "default_loop_scale")]
    pub loop_scale: f32,
    /// Rim band thickness at full battery, in pixels
    #[serde(default = "default_rim_size")]
    pub rim_size: f32,
    /// Voltage that reads as an empty battery
    #[serde(default = "default_voltage_min")]
    pub voltage_min: f32,
    /// Voltage that reads as a full battery
    #[serde(default = "default_voltage_max")]
    pub voltage_max: f32,
    /// Below this voltage the face shows the warning glyph
    #[serde(default = "default_voltage_warning")]
    pub voltage_warning: f32,
}

fn default_density() -> u32 {
    1
}

fn default_loop_scale() -> f32 {
    0.45
}

fn default_rim_size() -> f32 {
    20.0
}

fn default_voltage_min() -> f32 {
    3.5
}

fn default_voltage_max() -> f32 {
    4.2
}

fn default_voltage_warning() -> f32 {
    3.6
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            loop_scale: default_loop_scale(),
            rim_size: default_rim_size(),
            voltage_min: default_voltage_min(),
            voltage_max: default_voltage_max(),
            voltage_warning: default_voltage_warning(),
        }
    }
}

impl FaceConfig {
    /// Pull hand-edited values back into ranges the renderer can use
    pub fn validate(mut self) -> Self {
        self.density = self.density.max(1);
        if !self.loop_scale.is_finite() {
            self.loop_scale = default_loop_scale();
        }
        self.loop_scale = self.loop_scale.clamp(0.01, 0.99);
        if !(self.voltage_max > self.voltage_min) {
            self.voltage_min = default_voltage_min();
            self.voltage_max = default_voltage_max();
        }
        self
    }
}

/// Load a face configuration from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FaceConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: FaceConfig = ron::from_str(&contents)?;
    Ok(config.validate())
}

/// Save a face configuration to a RON file
pub fn save_config<P: AsRef<Path>>(config: &FaceConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(2)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_the_stock_face() {
        let config = FaceConfig::default();
        assert_eq!(config.density, 1);
        assert!((config.loop_scale - 0.45).abs() < 1e-6);
        assert!((config.rim_size - 20.0).abs() < 1e-6);
        assert!((config.voltage_min - 3.5).abs() < 1e-6);
        assert!((config.voltage_max - 4.2).abs() < 1e-6);
        assert!((config.voltage_warning - 3.6).abs() < 1e-6);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: FaceConfig = ron::from_str("(density: 3)").unwrap();
        assert_eq!(config.density, 3);
        assert!((config.loop_scale - 0.45).abs() < 1e-6);
        assert!((config.voltage_warning - 3.6).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip() {
        let mut config = FaceConfig::default();
        config.density = 2;
        config.rim_size = 12.0;

        let path = std::env::temp_dir().join("face_config_round_trip.ron");
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_clamps_nonsense() {
        let mut config = FaceConfig::default();
        config.density = 0;
        config.loop_scale = 1.5;
        let config = config.validate();
        assert_eq!(config.density, 1);
        assert!((config.loop_scale - 0.99).abs() < 1e-6);

        let mut config = FaceConfig::default();
        config.loop_scale = f32::NAN;
        config.voltage_min = 4.5;
        config.voltage_max = 3.0;
        let config = config.validate();
        assert!((config.loop_scale - 0.45).abs() < 1e-6);
        assert!((config.voltage_min - 3.5).abs() < 1e-6);
        assert!((config.voltage_max - 4.2).abs() < 1e-6);
    }
}
