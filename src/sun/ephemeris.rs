//! Astronomical position of the sun.
//!
//! The provider treats the ephemeris as an injectable collaborator: any
//! pure `(latitude, longitude, time) -> (azimuth, elevation)` function
//! works, including closures in tests. [`SolarEphemeris`] is the built-in
//! closed-form implementation.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Degrees the sun travels per hour of solar time.
const DEGREES_PER_HOUR: f64 = 15.0;
/// Obliquity of the ecliptic used by the declination approximation.
const EARTH_AXIAL_TILT: f64 = 23.45;

/// External astronomical position capability.
pub trait Ephemeris: Send + Sync {
    /// Returns `(azimuth, elevation)` in degrees for the given location
    /// and instant. Azimuth is clockwise from north; elevation is above
    /// the horizon (negative at night).
    fn position(&self, latitude: f64, longitude: f64, time: &DateTime<Tz>) -> (f64, f64);
}

impl<F> Ephemeris for F
where
    F: Fn(f64, f64, &DateTime<Tz>) -> (f64, f64) + Send + Sync,
{
    fn position(&self, latitude: f64, longitude: f64, time: &DateTime<Tz>) -> (f64, f64) {
        self(latitude, longitude, time)
    }
}

/// Closed-form solar position from declination, equation of time and hour
/// angle. Accurate to a fraction of a degree, which is plenty for shadow
/// geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarEphemeris;

impl SolarEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Estimates sunrise and sunset on the UTC date of `time`, returned in
    /// the same timezone as the input. `None` during polar day or night.
    pub fn sunrise_sunset(
        &self,
        latitude: f64,
        longitude: f64,
        time: &DateTime<Tz>,
    ) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let utc = time.with_timezone(&Utc);
        let n = utc.ordinal() as i32;
        let decl = solar_declination(n);
        let cos_omega = -latitude.to_radians().tan() * decl.to_radians().tan();
        if !(-1.0..=1.0).contains(&cos_omega) {
            // Sun never rises or never sets on this date
            return None;
        }
        let half_day_deg = cos_omega.acos().to_degrees();
        let correction = utc_solar_time_correction(longitude, equation_of_time(n));
        let sunrise_utc_h = 12.0 - half_day_deg / DEGREES_PER_HOUR - correction;
        let sunset_utc_h = 12.0 + half_day_deg / DEGREES_PER_HOUR - correction;

        let midnight = utc
            .date_naive()
            .and_hms_opt(0, 0, 0)?
            .and_utc();
        let tz = time.timezone();
        // Hours may fall outside [0, 24) for longitudes far from the
        // UTC meridian; the offset from midnight keeps the right instant.
        let at = |hours: f64| {
            let secs = (hours * 3600.0).round() as i64;
            (midnight + Duration::seconds(secs)).with_timezone(&tz)
        };
        Some((at(sunrise_utc_h), at(sunset_utc_h)))
    }
}

impl Ephemeris for SolarEphemeris {
    fn position(&self, latitude: f64, longitude: f64, time: &DateTime<Tz>) -> (f64, f64) {
        let utc = time.with_timezone(&Utc);
        let utc_hours =
            utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
        let n = utc.ordinal() as i32;

        let decl = solar_declination(n);
        let correction = utc_solar_time_correction(longitude, equation_of_time(n));
        let solar_time = (utc_hours + correction).rem_euclid(24.0);
        let hour_angle = DEGREES_PER_HOUR * (solar_time - 12.0);

        let lat = latitude.to_radians();
        let dec = decl.to_radians();
        let ha = hour_angle.to_radians();

        let sin_elevation = lat.sin() * dec.sin() + lat.cos() * dec.cos() * ha.cos();
        let elevation = sin_elevation.clamp(-1.0, 1.0).asin().to_degrees();

        let sin_az = -dec.cos() * ha.sin();
        let cos_az = dec.sin() * lat.cos() - dec.cos() * lat.sin() * ha.cos();
        let azimuth = sin_az.atan2(cos_az).to_degrees().rem_euclid(360.0);

        (azimuth, elevation)
    }
}

/// Solar declination in degrees for day-of-year `n` (Cooper approximation).
fn solar_declination(n: i32) -> f64 {
    EARTH_AXIAL_TILT * (360.0 * (284 + n) as f64 / 365.0).to_radians().sin()
}

/// Equation of time in minutes for day-of-year `n` (Spencer series).
fn equation_of_time(n: i32) -> f64 {
    let b = ((n - 1) as f64 * 360.0 / 365.0).to_radians();
    229.18
        * (0.000075 + 0.001868 * b.cos() - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

/// Hours to add to UTC to obtain local solar time at `longitude`.
fn utc_solar_time_correction(longitude: f64, eot_minutes: f64) -> f64 {
    (4.0 * longitude + eot_minutes) / 60.0
}
