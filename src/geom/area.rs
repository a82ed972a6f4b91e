use crate::error::{Result, ShadowError};
use crate::geom::point::Point;
use crate::geom::polygon;
use crate::measure::{LengthUnit, SquareMeasure};
use crate::shadow::Shadow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named polygonal region of interest.
///
/// Vertices are raw coordinate pairs sharing one unit, intended in
/// counter-clockwise order for a positive signed area (the absolute value
/// is taken regardless).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    name: String,
    vertices: Vec<(f64, f64)>,
    unit: LengthUnit,
}

impl Area {
    /// Creates an area; at least 3 vertices are required.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<(f64, f64)>,
        unit: LengthUnit,
    ) -> Result<Self> {
        let name = name.into();
        if vertices.len() < 3 {
            return Err(ShadowError::InvalidGeometry(format!(
                "area {name:?} must have at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self {
            name,
            vertices,
            unit,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// Vertices as unit-aware points.
    pub fn points(&self) -> Vec<Point> {
        self.vertices
            .iter()
            .map(|&(x, y)| Point::from_values(x, y, self.unit))
            .collect()
    }

    /// Polygon area (shoelace formula), in squared vertex units.
    pub fn area(&self) -> SquareMeasure {
        SquareMeasure::new(polygon::shoelace_area(&self.vertices), self.unit)
    }

    /// Ray-casting containment test. The point is converted into this
    /// area's unit before testing.
    pub fn contains(&self, point: &Point) -> bool {
        let p = point.convert(self.unit);
        polygon::contains_point(&self.vertices, p.x().magnitude(), p.y().magnitude())
    }

    /// Bounding box as `(min, max)` corner points.
    pub fn bounding_box(&self) -> (Point, Point) {
        let ((xmin, ymin), (xmax, ymax)) = polygon::bounding_box(&self.vertices);
        (
            Point::from_values(xmin, ymin, self.unit),
            Point::from_values(xmax, ymax, self.unit),
        )
    }

    /// Percentage of this area overlapped by another area, converting the
    /// other region into this area's unit.
    pub fn overlap_percentage(&self, other: &Area) -> f64 {
        let scale = other.unit.meters_per_unit() / self.unit.meters_per_unit();
        let other_verts: Vec<(f64, f64)> = other
            .vertices
            .iter()
            .map(|&(x, y)| (x * scale, y * scale))
            .collect();
        polygon::overlap_percentage(&self.vertices, &other_verts)
    }

    /// Percentage of this area covered by a shadow polygon.
    pub fn shadow_coverage(&self, shadow: &Shadow) -> f64 {
        let shadow_verts = shadow.vertex_coords_in(self.unit);
        polygon::overlap_percentage(&self.vertices, &shadow_verts)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Area {:?}: {} vertices, {}",
            self.name,
            self.vertices.len(),
            self.area()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Area {
        Area::new(
            "patio",
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            LengthUnit::Meters,
        )
        .unwrap()
    }

    #[test]
    fn test_too_few_vertices() {
        let res = Area::new("bad", vec![(0.0, 0.0), (1.0, 0.0)], LengthUnit::Meters);
        assert!(matches!(res, Err(ShadowError::InvalidGeometry(_))));
    }

    #[test]
    fn test_area() {
        let a = square().area();
        assert_abs_diff_eq!(a.magnitude(), 100.0);
        assert_eq!(a.unit(), LengthUnit::Meters);
    }

    #[test]
    fn test_contains_converts_units() {
        let sq = square();
        assert!(sq.contains(&Point::from_values(5.0, 5.0, LengthUnit::Meters)));
        assert!(!sq.contains(&Point::from_values(15.0, 15.0, LengthUnit::Meters)));
        // 500 cm == 5 m: inside after conversion
        assert!(sq.contains(&Point::from_values(500.0, 500.0, LengthUnit::Centimeters)));
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = square().bounding_box();
        assert!(min.is_close(&Point::from_values(0.0, 0.0, LengthUnit::Meters)));
        assert!(max.is_close(&Point::from_values(10.0, 10.0, LengthUnit::Meters)));
    }

    #[test]
    fn test_overlap_with_unit_conversion() {
        let sq = square();
        // Same half-square but expressed in centimeters
        let half = Area::new(
            "half",
            vec![
                (500.0, 0.0),
                (1500.0, 0.0),
                (1500.0, 1000.0),
                (500.0, 1000.0),
            ],
            LengthUnit::Centimeters,
        )
        .unwrap();
        assert_abs_diff_eq!(sq.overlap_percentage(&half), 50.0, epsilon = 1e-6);
    }
}
