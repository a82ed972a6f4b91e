//! Projection of wall shadows onto the ground plane, and the calculator
//! tying walls, location and solar positions together.

use crate::error::Result;
use crate::geom::angular_difference;
use crate::geom::point::Point;
use crate::geom::vector::Vector;
use crate::geom::wall::Wall;
use crate::location::Location;
use crate::measure::Measurement;
use crate::shadow::Shadow;
use crate::sun::provider::SunPositionProvider;
use crate::sun::{SolarPosition, SunOverride};
use crate::timespec::TimeSpec;
use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

/// Bearing difference (degrees) within which the sun counts as parallel
/// to the wall footprint.
pub const PARALLEL_TOLERANCE_DEG: f64 = 5.0;
/// Below this elevation (radians) the shadow length is clamped instead of
/// letting `tan` blow up toward the horizon.
const MIN_ELEVATION_RAD: f64 = 0.001;
/// Clamped shadow length as a multiple of the wall height.
const HORIZON_LENGTH_FACTOR: f64 = 1000.0;

/// Shadow length on flat ground: `height / tan(elevation)`, clamped near
/// the horizon so the result is always finite.
pub fn shadow_length(height: Measurement, elevation_deg: f64) -> Measurement {
    let rad = elevation_deg.to_radians();
    if rad < MIN_ELEVATION_RAD {
        debug!(elevation_deg, "sun near the horizon, clamping shadow length");
        height.scale(HORIZON_LENGTH_FACTOR)
    } else {
        height.scale(1.0 / rad.tan())
    }
}

/// The direction a shadow falls: directly away from the sun.
pub fn shadow_bearing(solar_azimuth: f64) -> f64 {
    (solar_azimuth + 180.0).rem_euclid(360.0)
}

/// Projects wall shadows given solar angles.
#[derive(Debug, Clone, Copy)]
pub struct ShadowProjector {
    /// Degrees within which the sun is treated as parallel to the wall.
    pub parallel_tolerance: f64,
}

impl Default for ShadowProjector {
    fn default() -> Self {
        Self {
            parallel_tolerance: PARALLEL_TOLERANCE_DEG,
        }
    }
}

impl ShadowProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the sun shines along the wall footprint, in
    /// either direction. The boundary is inclusive at alignment and
    /// exclusive at opposition, so exactly one branch fires at each edge.
    fn is_parallel(&self, wall_bearing: f64, solar_azimuth: f64) -> bool {
        let diff = angular_difference(wall_bearing, solar_azimuth);
        diff <= self.parallel_tolerance || diff > 180.0 - self.parallel_tolerance
    }

    /// Projects the shadow of a wall for the given solar angles.
    ///
    /// The shadow is a quadrilateral anchored on the wall footprint. In
    /// the general case both wall endpoints are displaced away from the
    /// sun; when the sun is parallel to the wall the far edge collapses
    /// to a single displaced midpoint.
    pub fn project(
        &self,
        wall: &Wall,
        position: &SolarPosition,
    ) -> Result<Shadow> {
        let wall_bearing = wall.bearing();
        let length = shadow_length(wall.height(), position.elevation);
        let direction = shadow_bearing(position.azimuth);
        let displacement = Vector::from_polar(length.convert(wall.start().unit()), direction);

        let diff = angular_difference(wall_bearing, position.azimuth);
        if (diff - 90.0).abs() <= self.parallel_tolerance {
            debug!(
                wall = wall.name(),
                wall_bearing,
                solar_azimuth = position.azimuth,
                "sun roughly perpendicular to wall"
            );
        }

        let start = wall.start();
        let end = wall.end();
        let vertices = if self.is_parallel(wall_bearing, position.azimuth) {
            debug!(
                wall = wall.name(),
                wall_bearing,
                solar_azimuth = position.azimuth,
                "sun parallel to wall, collapsing shadow to the midpoint"
            );
            let mid = Point::midpoint(&start, &end);
            [start, end, mid.translate(&displacement), start]
        } else {
            [
                start,
                end,
                end.translate(&displacement),
                start.translate(&displacement),
            ]
        };

        Shadow::new(
            wall.clone(),
            position.time.clone(),
            vertices,
            position.elevation,
            position.azimuth,
        )
    }
}

/// High-level facade: walls at a location, shadows over time.
///
/// Owns the solar position provider, so repeated calls share its cache.
pub struct ShadowCalculator {
    location: Location,
    walls: Vec<Wall>,
    provider: SunPositionProvider,
    projector: ShadowProjector,
    sun_override: Option<SunOverride>,
}

impl ShadowCalculator {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            walls: Vec::new(),
            provider: SunPositionProvider::new(),
            projector: ShadowProjector::new(),
            sun_override: None,
        }
    }

    pub fn with_provider(mut self, provider: SunPositionProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_projector(mut self, projector: ShadowProjector) -> Self {
        self.projector = projector;
        self
    }

    /// Pins the sun to fixed angles for every calculation.
    pub fn with_sun_override(mut self, sun_override: SunOverride) -> Self {
        self.sun_override = Some(sun_override);
        self
    }

    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn provider(&self) -> &SunPositionProvider {
        &self.provider
    }

    /// Solar position at this calculator's location, honoring the override.
    pub fn sun_position(&self, time: &DateTime<Tz>) -> Result<SolarPosition> {
        self.provider.position(
            self.location.latitude(),
            self.location.longitude(),
            time,
            self.sun_override.as_ref(),
        )
    }

    /// Shadows of all walls at a single time.
    ///
    /// Returns an empty list when the sun is below the horizon: the walls
    /// cast no daylight shadows at night.
    pub fn shadows_at(&self, time: &DateTime<Tz>) -> Result<Vec<Shadow>> {
        let position = self.sun_position(time)?;
        if !position.is_above_horizon() {
            debug!(
                time = %time,
                elevation = position.elevation,
                "sun below horizon, no shadows"
            );
            return Ok(Vec::new());
        }
        self.walls
            .iter()
            .map(|wall| self.projector.project(wall, &position))
            .collect()
    }

    /// Shadows of all walls at every timestamp of a specification.
    ///
    /// Night-time entries are kept with empty shadow lists so the series
    /// stays aligned with the requested timestamps.
    pub fn shadow_series(&self, spec: &TimeSpec) -> Result<Vec<(DateTime<Tz>, Vec<Shadow>)>> {
        let (points, summary) = spec.describe();
        debug!(points, %summary, "expanding time specification");
        spec.times()
            .map(|time| {
                let shadows = self.shadows_at(&time)?;
                Ok((time, shadows))
            })
            .collect()
    }
}
