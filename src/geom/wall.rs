use crate::error::{Result, ShadowError};
use crate::geom::point::Point;
use crate::geom::vector::Vector;
use crate::measure::{LengthUnit, Measurement};
use std::fmt;

/// A vertical wall with a name, a height and a footprint from `start` to
/// `end`.
///
/// Invariant: `start != end`; a zero-length wall has no bearing. The end
/// point is normalized into the start point's unit at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    name: String,
    height: Measurement,
    start: Point,
    end: Point,
}

impl Wall {
    pub fn new(
        name: impl Into<String>,
        height: Measurement,
        start: Point,
        end: Point,
    ) -> Result<Self> {
        let name = name.into();
        let end = end.convert(start.unit());
        if start.is_close(&end) {
            return Err(ShadowError::InvalidGeometry(format!(
                "wall {name:?} has coincident start and end points, bearing is undefined"
            )));
        }
        Ok(Self {
            name,
            height,
            start,
            end,
        })
    }

    /// Convenience constructor from raw values with units.
    pub fn from_values(
        name: impl Into<String>,
        height: f64,
        height_unit: LengthUnit,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
        position_unit: LengthUnit,
    ) -> Result<Self> {
        Self::new(
            name,
            Measurement::new(height, height_unit),
            Point::from_values(start_x, start_y, position_unit),
            Point::from_values(end_x, end_y, position_unit),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> Measurement {
        self.height
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Footprint length from start to end.
    pub fn width(&self) -> Measurement {
        self.start.distance(&self.end)
    }

    /// Compass bearing of the wall footprint, degrees clockwise from north.
    pub fn bearing(&self) -> f64 {
        // The start != end invariant guarantees a bearing exists.
        Vector::from_points(&self.start, &self.end)
            .bearing()
            .unwrap_or(0.0)
    }

    /// Returns a copy with all measurements expressed in `unit`.
    pub fn convert(&self, unit: LengthUnit) -> Wall {
        Wall {
            name: self.name.clone(),
            height: self.height.convert(unit),
            start: self.start.convert(unit),
            end: self.end.convert(unit),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wall {:?}: height {}, {} -> {}",
            self.name, self.height, self.start, self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn wall(sx: f64, sy: f64, ex: f64, ey: f64) -> Wall {
        Wall::from_values(
            "test",
            10.0,
            LengthUnit::Feet,
            sx,
            sy,
            ex,
            ey,
            LengthUnit::Feet,
        )
        .unwrap()
    }

    #[test]
    fn test_degenerate_wall_rejected() {
        let p = Point::from_values(1.0, 1.0, LengthUnit::Meters);
        let res = Wall::new("bad", Measurement::new(3.0, LengthUnit::Meters), p, p);
        assert!(matches!(res, Err(ShadowError::InvalidGeometry(_))));
    }

    #[test]
    fn test_bearing_cardinal() {
        // (0,0) -> (0,10): due north
        assert_abs_diff_eq!(wall(0.0, 0.0, 0.0, 10.0).bearing(), 0.0);
        // (0,0) -> (10,0): due east
        assert_abs_diff_eq!(wall(0.0, 0.0, 10.0, 0.0).bearing(), 90.0);
        // (0,0) -> (0,-10): due south
        assert_abs_diff_eq!(wall(0.0, 0.0, 0.0, -10.0).bearing(), 180.0);
        // (0,0) -> (-10,0): due west
        assert_abs_diff_eq!(wall(0.0, 0.0, -10.0, 0.0).bearing(), 270.0);
    }

    #[test]
    fn test_width() {
        let w = wall(0.0, 0.0, 3.0, 4.0);
        assert_abs_diff_eq!(w.width().magnitude(), 5.0);
        assert_eq!(w.width().unit(), LengthUnit::Feet);
    }

    #[test]
    fn test_mixed_unit_endpoints_normalized() {
        let w = Wall::new(
            "mixed",
            Measurement::new(2.0, LengthUnit::Meters),
            Point::from_values(0.0, 0.0, LengthUnit::Meters),
            Point::from_values(300.0, 400.0, LengthUnit::Centimeters),
        )
        .unwrap();
        assert_eq!(w.end().unit(), LengthUnit::Meters);
        assert_abs_diff_eq!(w.width().magnitude(), 5.0);
    }

    #[test]
    fn test_convert() {
        let w = wall(0.0, 0.0, 10.0, 0.0).convert(LengthUnit::Meters);
        assert_eq!(w.height().unit(), LengthUnit::Meters);
        assert_abs_diff_eq!(w.height().magnitude(), 3.048);
        assert_abs_diff_eq!(w.width().magnitude(), 3.048);
    }
}
