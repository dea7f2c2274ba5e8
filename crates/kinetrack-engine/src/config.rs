//! Engine configuration.

use serde::{Deserialize, Serialize};

use kinetrack_core::{Error, Result};

/// Complete engine configuration.
///
/// Keys missing from a file or environment source fall back to the
/// documented defaults, so partial overrides load cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gesture clock interval (milliseconds). The clock fires
    /// independently of frame arrival.
    pub tick_interval_ms: u64,

    /// Minimum per-axis pixel displacement between two ticks' hand
    /// positions required to classify a swipe
    pub displacement_threshold_px: f32,

    /// Gesture broadcast channel capacity
    pub gesture_channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 300,
            displacement_threshold_px: 300.0,
            gesture_channel_capacity: 64,
        }
    }
}

impl EngineConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("KINETRACK"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("KINETRACK"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate before arming the engine. A zero tick interval means
    /// the gesture clock cannot be armed, which is fatal.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config(
                "tick interval must be non-zero to arm the gesture clock".into(),
            ));
        }

        if !self.displacement_threshold_px.is_finite() || self.displacement_threshold_px <= 0.0 {
            return Err(Error::Config(format!(
                "displacement threshold must be positive and finite, got {}",
                self.displacement_threshold_px
            )));
        }

        if self.gesture_channel_capacity == 0 {
            return Err(Error::Config("gesture channel capacity must be non-zero".into()));
        }

        Ok(())
    }
}
