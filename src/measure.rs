//! Unit-aware length measurements.
//!
//! Arithmetic is exposed as explicit functions that convert between units
//! rather than operator overloads, so the unit logic stays auditable.

use crate::error::{Result, ShadowError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric tolerance for comparing measurements (in the common unit).
const EPS: f64 = 1e-9;

/// Units of length supported by the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Meters,
    Feet,
    Inches,
    Centimeters,
}

impl LengthUnit {
    /// Conversion factor to meters.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Feet => 0.3048,
            LengthUnit::Inches => 0.0254,
            LengthUnit::Centimeters => 0.01,
        }
    }

    /// Short symbol used in rendered output.
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Feet => "ft",
            LengthUnit::Inches => "in",
            LengthUnit::Centimeters => "cm",
        }
    }

    /// Parses a unit name. Names are case-insensitive and common
    /// abbreviations are accepted.
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::Meters),
            "ft" | "foot" | "feet" => Ok(LengthUnit::Feet),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(LengthUnit::Centimeters)
            }
            other => Err(ShadowError::Unit(format!(
                "unknown unit: {other}. Supported units are: meters, feet, inches, centimeters"
            ))),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = ShadowError;

    fn from_str(s: &str) -> Result<Self> {
        LengthUnit::parse(s)
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A length magnitude tagged with its unit. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    magnitude: f64,
    unit: LengthUnit,
}

impl Measurement {
    pub fn new(magnitude: f64, unit: LengthUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Parses the textual form `<number> <unit-name>`, e.g. `"10 feet"`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split_whitespace();
        let number = parts.next().ok_or_else(|| {
            ShadowError::Unit(format!("expected '<number> <unit>', got: {text:?}"))
        })?;
        let unit = parts.next().ok_or_else(|| {
            ShadowError::Unit(format!(
                "missing unit in {text:?}, expected e.g. '10 feet'"
            ))
        })?;
        if parts.next().is_some() {
            return Err(ShadowError::Unit(format!(
                "expected '<number> <unit>', got: {text:?}"
            )));
        }
        let magnitude: f64 = number
            .parse()
            .map_err(|_| ShadowError::Unit(format!("invalid number: {number}")))?;
        Ok(Self::new(magnitude, LengthUnit::parse(unit)?))
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Magnitude expressed in the requested unit.
    pub fn magnitude_in(&self, unit: LengthUnit) -> f64 {
        self.magnitude * self.unit.meters_per_unit() / unit.meters_per_unit()
    }

    /// Returns an equal measurement expressed in the requested unit.
    pub fn convert(&self, unit: LengthUnit) -> Self {
        Self::new(self.magnitude_in(unit), unit)
    }

    /// Sum of two measurements, expressed in `self`'s unit.
    pub fn add(&self, other: &Measurement) -> Self {
        Self::new(self.magnitude + other.magnitude_in(self.unit), self.unit)
    }

    /// Difference of two measurements, expressed in `self`'s unit.
    pub fn sub(&self, other: &Measurement) -> Self {
        Self::new(self.magnitude - other.magnitude_in(self.unit), self.unit)
    }

    /// Multiplies the magnitude by a dimensionless scalar.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.magnitude * factor, self.unit)
    }

    /// Returns true if both measurements denote (nearly) the same length.
    pub fn is_close(&self, other: &Measurement) -> bool {
        (self.magnitude - other.magnitude_in(self.unit)).abs() < EPS
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "{:.prec$} {}", self.magnitude, self.unit, prec = prec)
    }
}

/// An area magnitude in squared length units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquareMeasure {
    magnitude: f64,
    unit: LengthUnit,
}

impl SquareMeasure {
    pub fn new(magnitude: f64, unit: LengthUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Magnitude in squared units of `unit`.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn magnitude_in(&self, unit: LengthUnit) -> f64 {
        let factor = self.unit.meters_per_unit() / unit.meters_per_unit();
        self.magnitude * factor * factor
    }

    pub fn convert(&self, unit: LengthUnit) -> Self {
        Self::new(self.magnitude_in(unit), unit)
    }
}

impl fmt::Display for SquareMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "{:.prec$} {}²", self.magnitude, self.unit, prec = prec)
    }
}
