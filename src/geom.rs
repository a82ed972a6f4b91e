pub mod area;
pub mod point;
pub mod polygon;
pub mod vector;
pub mod wall;

/// Geometric precision (in the common unit of the compared values).
const EPS: f64 = 1e-9;

/// Converts a mathematical angle in radians (counter-clockwise from east)
/// to a compass bearing in degrees (clockwise from north, [0, 360)).
pub fn math_angle_to_bearing(theta: f64) -> f64 {
    (90.0 - theta.to_degrees()).rem_euclid(360.0)
}

/// Smallest absolute difference between two bearings, folded into [0, 180].
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 { 360.0 - d } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_math_angle_to_bearing() {
        // East (0 rad) -> 90°, north (pi/2) -> 0°, west (pi) -> 270°
        assert_abs_diff_eq!(math_angle_to_bearing(0.0), 90.0);
        assert_abs_diff_eq!(math_angle_to_bearing(std::f64::consts::FRAC_PI_2), 0.0);
        assert_abs_diff_eq!(math_angle_to_bearing(std::f64::consts::PI), 270.0);
        assert_abs_diff_eq!(math_angle_to_bearing(-std::f64::consts::FRAC_PI_2), 180.0);
    }

    #[test]
    fn test_angular_difference() {
        assert_abs_diff_eq!(angular_difference(10.0, 350.0), 20.0);
        assert_abs_diff_eq!(angular_difference(350.0, 10.0), 20.0);
        assert_abs_diff_eq!(angular_difference(0.0, 180.0), 180.0);
        assert_abs_diff_eq!(angular_difference(90.0, 90.0), 0.0);
    }
}
