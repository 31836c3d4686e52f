//! Battery state and its effect on the face

use crate::config::FaceConfig;

/// Rim scale floor so an empty battery still leaves half the band
pub const BATTERY_MIN_SCALE: f32 = 0.5;
const BATTERY_SCALE_RANGE: f32 = 1.0 - BATTERY_MIN_SCALE;

/// Maps measured battery voltages to face proportions, using the
/// thresholds the config carries
#[derive(Debug, Clone, Copy)]
pub struct BatteryGauge {
    min: f32,
    max: f32,
    warning: f32,
}

impl BatteryGauge {
    pub fn new(config: &FaceConfig) -> Self {
        Self {
            min: config.voltage_min,
            max: config.voltage_max,
            warning: config.voltage_warning,
        }
    }

    /// Charge fraction, clamped to [0, 1]
    pub fn fill(&self, voltage: f32) -> f32 {
        ((voltage - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Factor applied to the rim thickness, from `BATTERY_MIN_SCALE` when
    /// empty up to 1 when full
    pub fn rim_scale(&self, voltage: f32) -> f32 {
        BATTERY_MIN_SCALE + BATTERY_SCALE_RANGE * self.fill(voltage)
    }

    /// True once the voltage drops under the warning level
    pub fn is_low(&self, voltage: f32) -> bool {
        voltage < self.warning
    }
}

impl Default for BatteryGauge {
    fn default() -> Self {
        Self::new(&FaceConfig::default())
    }
}
