pub mod ephemeris;
pub mod provider;

use crate::error::{Result, ShadowError};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The sun's position in the sky at a given time.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarPosition {
    /// Degrees clockwise from north, [0, 360).
    pub azimuth: f64,
    /// Degrees above the horizon (negative below).
    pub elevation: f64,
    /// When the position was computed.
    pub time: DateTime<Tz>,
}

impl SolarPosition {
    /// Returns true if the sun is above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.elevation > 0.0
    }
}

impl fmt::Display for SolarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sun position at {}: azimuth {:.1}° from north, elevation {:.1}° above horizon",
            self.time.format("%Y-%m-%d %H:%M %Z"),
            self.azimuth,
            self.elevation
        )
    }
}

/// Optional fixed sun position that bypasses the location/time lookup.
///
/// Used for deterministic testing and synthetic scenarios. When
/// `override_position` is true, both angles must be supplied and valid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SunOverride {
    pub override_position: bool,
    /// Fixed elevation in degrees, [0, 90].
    pub elevation: Option<f64>,
    /// Fixed azimuth in degrees, [0, 360].
    pub azimuth: Option<f64>,
}

impl SunOverride {
    /// A validated always-on override.
    pub fn fixed(elevation: f64, azimuth: f64) -> Result<Self> {
        let this = Self {
            override_position: true,
            elevation: Some(elevation),
            azimuth: Some(azimuth),
        };
        this.validate()?;
        Ok(this)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.override_position {
            return Ok(());
        }
        let (elevation, azimuth) = match (self.elevation, self.azimuth) {
            (Some(e), Some(a)) => (e, a),
            _ => {
                return Err(ShadowError::Configuration(
                    "when override_position is true, both elevation and azimuth must be specified"
                        .to_string(),
                ))
            }
        };
        if !(0.0..=90.0).contains(&elevation) {
            return Err(ShadowError::Configuration(format!(
                "invalid override elevation: {elevation}, must be between 0 and 90 degrees"
            )));
        }
        if !(0.0..=360.0).contains(&azimuth) {
            return Err(ShadowError::Configuration(format!(
                "invalid override azimuth: {azimuth}, must be between 0 and 360 degrees"
            )));
        }
        Ok(())
    }

    /// The fixed `(azimuth, elevation)` pair, after validation.
    pub fn fixed_angles(&self) -> Result<(f64, f64)> {
        self.validate()?;
        match (self.azimuth, self.elevation) {
            (Some(a), Some(e)) => Ok((a, e)),
            _ => Err(ShadowError::Configuration(
                "sun override has no fixed angles".to_string(),
            )),
        }
    }
}
