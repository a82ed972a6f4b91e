use crate::error::{Result, ShadowError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic location used for solar position lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    address: Option<String>,
}

impl Location {
    /// Creates a location, validating that latitude is within [-90, 90]
    /// and longitude within [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            address: None,
        })
    }

    /// Attaches a human-readable address label (e.g. from a geocoding layer).
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(addr) => write!(f, "{} ({:.6}°, {:.6}°)", addr, self.latitude, self.longitude),
            None => write!(f, "{:.6}°, {:.6}°", self.latitude, self.longitude),
        }
    }
}

/// Checks latitude/longitude bounds shared by `Location` and the sun provider.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ShadowError::CoordinateRange(format!(
            "invalid latitude: {latitude}, must be between -90 and 90"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ShadowError::CoordinateRange(format!(
            "invalid longitude: {longitude}, must be between -180 and 180"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_location() {
        let loc = Location::new(39.7392, -104.9903).unwrap();
        assert_eq!(loc.latitude(), 39.7392);
        assert_eq!(loc.longitude(), -104.9903);
        assert!(loc.address().is_none());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(Location::new(90.1, 0.0).is_err());
        assert!(Location::new(-90.1, 0.0).is_err());
        assert!(Location::new(0.0, 180.1).is_err());
        assert!(Location::new(0.0, -181.0).is_err());
        // Boundary values are valid
        assert!(Location::new(90.0, 180.0).is_ok());
        assert!(Location::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_display() {
        let loc = Location::new(39.7392, -104.9903).unwrap();
        assert_eq!(format!("{loc}"), "39.739200°, -104.990300°");
        let loc = loc.with_address("Denver, CO");
        assert!(format!("{loc}").starts_with("Denver, CO ("));
    }
}
