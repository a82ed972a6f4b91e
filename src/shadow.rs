//! The shadow cast by a wall at a specific time.

use crate::error::{Result, ShadowError};
use crate::geom::point::Point;
use crate::geom::polygon;
use crate::geom::wall::Wall;
use crate::measure::{LengthUnit, Measurement, SquareMeasure};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

/// A shadow polygon with exactly four vertices.
///
/// The vertex order is a contract every derived metric relies on:
///
/// ```text
///     Wall edge
/// 0 ------------- 1
/// |               |
/// |    Shadow     |
/// |               |
/// 3 ------------- 2
///    Shadow end
/// ```
///
/// - `vertices[0]`: wall start
/// - `vertices[1]`: wall end
/// - `vertices[2]`: shadow end beyond the wall end
/// - `vertices[3]`: shadow end beyond the wall start
///
/// In the parallel-sun case the quadrilateral degenerates: the shadow
/// collapses toward the wall midpoint and the closing vertex duplicates
/// the wall start, still keeping exactly four vertices.
///
/// A shadow owns its vertices and a copy of the wall that cast it; it is
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    wall: Wall,
    time: DateTime<Tz>,
    vertices: [Point; 4],
    solar_elevation: f64,
    solar_azimuth: f64,
}

impl Shadow {
    /// Bundles a computed shadow. All four vertices must share one unit;
    /// mixed units are rejected rather than silently converted.
    pub fn new(
        wall: Wall,
        time: DateTime<Tz>,
        vertices: [Point; 4],
        solar_elevation: f64,
        solar_azimuth: f64,
    ) -> Result<Self> {
        let unit = vertices[0].unit();
        if vertices.iter().any(|v| v.unit() != unit) {
            return Err(ShadowError::Unit(format!(
                "shadow vertices must share one unit, got mixed units for wall {:?}",
                wall.name()
            )));
        }
        Ok(Self {
            wall,
            time,
            vertices,
            solar_elevation,
            solar_azimuth,
        })
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn time(&self) -> &DateTime<Tz> {
        &self.time
    }

    pub fn vertices(&self) -> &[Point; 4] {
        &self.vertices
    }

    pub fn solar_elevation(&self) -> f64 {
        self.solar_elevation
    }

    pub fn solar_azimuth(&self) -> f64 {
        self.solar_azimuth
    }

    /// The unit shared by all vertices.
    pub fn unit(&self) -> LengthUnit {
        self.vertices[0].unit()
    }

    /// Distance from the wall midpoint to the shadow-end midpoint.
    pub fn length(&self) -> Measurement {
        let wall_mid = Point::midpoint(&self.vertices[0], &self.vertices[1]);
        let shadow_mid = Point::midpoint(&self.vertices[2], &self.vertices[3]);
        wall_mid.distance(&shadow_mid)
    }

    /// Distance between the two shadow-end vertices.
    pub fn width(&self) -> Measurement {
        self.vertices[2].distance(&self.vertices[3])
    }

    /// Shadow polygon area (shoelace formula), in squared vertex units.
    pub fn area(&self) -> SquareMeasure {
        SquareMeasure::new(polygon::shoelace_area(&self.vertex_coords()), self.unit())
    }

    /// Compass bearing from the wall midpoint to the shadow-end midpoint,
    /// degrees clockwise from north. A fully collapsed shadow (zero
    /// length) reports 0°.
    pub fn angle(&self) -> f64 {
        let wall_mid = Point::midpoint(&self.vertices[0], &self.vertices[1]);
        let shadow_mid = Point::midpoint(&self.vertices[2], &self.vertices[3]);
        wall_mid.bearing_to(&shadow_mid).unwrap_or(0.0)
    }

    /// Raw vertex coordinates in the shadow's own unit.
    pub fn vertex_coords(&self) -> Vec<(f64, f64)> {
        self.vertices
            .iter()
            .map(|p| (p.x().magnitude(), p.y().magnitude()))
            .collect()
    }

    /// Raw vertex coordinates converted into the requested unit.
    pub fn vertex_coords_in(&self, unit: LengthUnit) -> Vec<(f64, f64)> {
        self.vertices
            .iter()
            .map(|p| (p.x().magnitude_in(unit), p.y().magnitude_in(unit)))
            .collect()
    }

    /// Serializable summary for presentation layers.
    pub fn report(&self) -> ShadowReport {
        ShadowReport {
            wall_name: self.wall.name().to_string(),
            time: self.time.to_rfc3339(),
            length: self.length().to_string(),
            width: self.width().to_string(),
            area: self.area().to_string(),
            angle: self.angle(),
            solar_elevation: self.solar_elevation,
            solar_azimuth: self.solar_azimuth,
            vertices: self.vertex_coords(),
            unit: self.unit(),
        }
    }
}

impl fmt::Display for Shadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shadow of {:?} at {}: length {}, width {}, area {}, direction {:.1}° from north",
            self.wall.name(),
            self.time.format("%Y-%m-%d %H:%M"),
            self.length(),
            self.width(),
            self.area(),
            self.angle()
        )
    }
}

/// Flat, serializable view of a shadow for API and plotting layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowReport {
    pub wall_name: String,
    pub time: String,
    pub length: String,
    pub width: String,
    pub area: String,
    pub angle: f64,
    pub solar_elevation: f64,
    pub solar_azimuth: f64,
    pub vertices: Vec<(f64, f64)>,
    pub unit: LengthUnit,
}
