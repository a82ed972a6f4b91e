use crate::geom::vector::Vector;
use crate::geom::{math_angle_to_bearing, EPS};
use crate::measure::{LengthUnit, Measurement};
use std::fmt;

/// A 2D point with unit-aware coordinates.
///
/// Both axes always carry the same unit; `new` converts `y` into the unit
/// of `x` to keep the invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: Measurement,
    y: Measurement,
}

impl Point {
    pub fn new(x: Measurement, y: Measurement) -> Self {
        let y = y.convert(x.unit());
        Self { x, y }
    }

    pub fn from_values(x: f64, y: f64, unit: LengthUnit) -> Self {
        Self {
            x: Measurement::new(x, unit),
            y: Measurement::new(y, unit),
        }
    }

    pub fn x(&self) -> Measurement {
        self.x
    }

    pub fn y(&self) -> Measurement {
        self.y
    }

    /// The unit shared by both coordinates.
    pub fn unit(&self) -> LengthUnit {
        self.x.unit()
    }

    /// Returns the same point expressed in a different unit.
    pub fn convert(&self, unit: LengthUnit) -> Self {
        Self {
            x: self.x.convert(unit),
            y: self.y.convert(unit),
        }
    }

    /// Euclidean distance to another point, in this point's unit.
    pub fn distance(&self, other: &Point) -> Measurement {
        let unit = self.unit();
        let dx = other.x.magnitude_in(unit) - self.x.magnitude();
        let dy = other.y.magnitude_in(unit) - self.y.magnitude();
        Measurement::new(dx.hypot(dy), unit)
    }

    /// Midpoint between two points, in the first point's unit.
    pub fn midpoint(a: &Point, b: &Point) -> Point {
        let unit = a.unit();
        Point::from_values(
            (a.x.magnitude() + b.x.magnitude_in(unit)) / 2.0,
            (a.y.magnitude() + b.y.magnitude_in(unit)) / 2.0,
            unit,
        )
    }

    /// Compass bearing from this point to another, in degrees clockwise
    /// from north. Returns `None` when the points coincide.
    pub fn bearing_to(&self, other: &Point) -> Option<f64> {
        let unit = self.unit();
        let dx = other.x.magnitude_in(unit) - self.x.magnitude();
        let dy = other.y.magnitude_in(unit) - self.y.magnitude();
        if dx.abs() < EPS && dy.abs() < EPS {
            return None;
        }
        Some(math_angle_to_bearing(dy.atan2(dx)))
    }

    /// Returns a copy displaced by the given vector. The displacement is
    /// converted into this point's unit.
    pub fn translate(&self, v: &Vector) -> Point {
        let unit = self.unit();
        Point::from_values(
            self.x.magnitude() + v.dx().magnitude_in(unit),
            self.y.magnitude() + v.dy().magnitude_in(unit),
            unit,
        )
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Point) -> bool {
        let unit = self.unit();
        (self.x.magnitude() - other.x.magnitude_in(unit)).abs() < EPS
            && (self.y.magnitude() - other.y.magnitude_in(unit)).abs() < EPS
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "Point({:.prec$}, {:.prec$})", self.x, self.y, prec = prec)
    }
}
