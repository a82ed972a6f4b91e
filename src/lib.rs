//! Wall shadow projection.
//!
//! Given named walls at a geographic location, this crate computes the
//! shadows they cast on flat ground at a point in time or across a time
//! range: solar position from a cached ephemeris, shadow polygons from
//! wall geometry, and overlap with areas of interest.
//!
//! ```
//! use shadowcast::{LengthUnit, Location, ShadowCalculator, SunOverride, Wall};
//! use chrono::TimeZone;
//!
//! # fn main() -> shadowcast::Result<()> {
//! let mut calc = ShadowCalculator::new(Location::new(39.7392, -104.9903)?)
//!     .with_sun_override(SunOverride::fixed(45.0, 180.0)?);
//! calc.add_wall(Wall::from_values(
//!     "garden wall",
//!     3.0,
//!     LengthUnit::Meters,
//!     0.0,
//!     0.0,
//!     10.0,
//!     0.0,
//!     LengthUnit::Meters,
//! )?);
//!
//! let noon = chrono_tz::UTC.with_ymd_and_hms(2024, 6, 1, 19, 0, 0).unwrap();
//! for shadow in calc.shadows_at(&noon)? {
//!     println!("{shadow}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod geom;
pub mod location;
pub mod measure;
pub mod project;
pub mod shadow;
pub mod sun;
pub mod timespec;

pub use error::{Result, ShadowError};
pub use geom::area::Area;
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use geom::wall::Wall;
pub use location::Location;
pub use measure::{LengthUnit, Measurement, SquareMeasure};
pub use project::{ShadowCalculator, ShadowProjector};
pub use shadow::{Shadow, ShadowReport};
pub use sun::ephemeris::{Ephemeris, SolarEphemeris};
pub use sun::provider::{CacheStats, SunPositionProvider};
pub use sun::{SolarPosition, SunOverride};
pub use timespec::{TimeConfig, TimeField, TimeSpec};
