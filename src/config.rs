//! Runtime-tunable simulation constants.
//!
//! Only the two cosmetic scalars are tunable: the top-speed estimate factor
//! and the lateral drift speed. Gravity, fuel burn, tilt limits, the frame
//! cap and phase thresholds are fixed in [`crate::constants`]. A TOML document
//! only needs to name the keys it overrides; any other key is rejected.
//!
//! ```toml
//! top_speed_factor = 2.5
//! lateral_drift_speed = 60.0
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{physics, steering};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Multiplier from T/W to the cosmetic top-speed estimate
    pub top_speed_factor: f64,
    /// Sideways drift per radian of tilt, per second
    pub lateral_drift_speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            top_speed_factor: physics::TOP_SPEED_FACTOR,
            lateral_drift_speed: steering::LATERAL_DRIFT_SPEED,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) TOML document and validate the result
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("top_speed_factor", self.top_speed_factor)?;
        non_negative("lateral_drift_speed", self.lateral_drift_speed)?;
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be finite and not negative",
        })
    }
}
