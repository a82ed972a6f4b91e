use crate::geom::point::Point;
use crate::geom::{math_angle_to_bearing, EPS};
use crate::measure::{LengthUnit, Measurement};
use std::fmt;

/// A 2D displacement with unit-aware components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    dx: Measurement,
    dy: Measurement,
}

impl Vector {
    pub fn new(dx: Measurement, dy: Measurement) -> Self {
        let dy = dy.convert(dx.unit());
        Self { dx, dy }
    }

    pub fn from_points(beg: &Point, end: &Point) -> Self {
        let unit = beg.unit();
        Self {
            dx: end.x().convert(unit).sub(&beg.x()),
            dy: end.y().convert(unit).sub(&beg.y()),
        }
    }

    /// Builds a displacement of the given length along a compass bearing
    /// (degrees clockwise from north). In compass coordinates
    /// `dx = length * sin(bearing)`, `dy = length * cos(bearing)`.
    pub fn from_polar(length: Measurement, bearing_deg: f64) -> Self {
        let rad = bearing_deg.to_radians();
        Self {
            dx: length.scale(rad.sin()),
            dy: length.scale(rad.cos()),
        }
    }

    pub fn dx(&self) -> Measurement {
        self.dx
    }

    pub fn dy(&self) -> Measurement {
        self.dy
    }

    pub fn unit(&self) -> LengthUnit {
        self.dx.unit()
    }

    /// Returns the length of the vector.
    pub fn length(&self) -> Measurement {
        Measurement::new(
            self.dx.magnitude().hypot(self.dy.magnitude()),
            self.dx.unit(),
        )
    }

    /// Compass bearing of this vector, or `None` for a (near) zero vector.
    pub fn bearing(&self) -> Option<f64> {
        let dx = self.dx.magnitude();
        let dy = self.dy.magnitude_in(self.dx.unit());
        if dx.abs() < EPS && dy.abs() < EPS {
            return None;
        }
        Some(math_angle_to_bearing(dy.atan2(dx)))
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(
            f,
            "Vector({:.prec$}, {:.prec$})",
            self.dx,
            self.dy,
            prec = prec
        )
    }
}
