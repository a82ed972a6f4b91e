//! Polygon utilities over raw coordinate pairs.
//!
//! These operate on dimensionless `(x, y)` tuples; unit bookkeeping is done
//! by the callers (`Area`, `Shadow`), which normalize their vertices into a
//! single unit before calling in.

use geo::{Area as GeoArea, BooleanOps, LineString, Polygon as GeoPolygon};

/// Polygon area via the shoelace formula.
///
/// `|Σ(x[i]·y[i+1] − x[i+1]·y[i])| / 2` with wraparound. Result is in
/// squared input units. Vertex order affects only the sign, which is
/// discarded.
pub fn shoelace_area(pts: &[(f64, f64)]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let (xi, yi) = pts[i];
        let (xj, yj) = pts[(i + 1) % n];
        acc += xi * yj - xj * yi;
    }
    acc.abs() / 2.0
}

/// Ray-casting point-in-polygon test.
///
/// Casts a horizontal ray from the test point towards +x and counts edge
/// crossings; an odd count means inside. Points exactly on an edge or
/// vertex follow the half-open crossing rule, which is deterministic for
/// identical input but not otherwise specified.
pub fn contains_point(pts: &[(f64, f64)], x: f64, y: f64) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for i in 0..n {
        let (xi, yi) = pts[i];
        let (xj, yj) = pts[(i + 1) % n];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
    }
    inside
}

/// Coordinate extrema of a set of vertices: `((x_min, y_min), (x_max, y_max))`.
///
/// Returns zeros for an empty slice; callers enforce the ≥3 vertex invariant.
pub fn bounding_box(pts: &[(f64, f64)]) -> ((f64, f64), (f64, f64)) {
    if pts.is_empty() {
        return ((0.0, 0.0), (0.0, 0.0));
    }
    let mut xmin = f64::INFINITY;
    let mut ymin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    let mut ymax = f64::NEG_INFINITY;
    for &(x, y) in pts {
        xmin = xmin.min(x);
        xmax = xmax.max(x);
        ymin = ymin.min(y);
        ymax = ymax.max(y);
    }
    ((xmin, ymin), (xmax, ymax))
}

/// Percentage of `interest` covered by `other`.
///
/// Delegates the polygon intersection to the `geo` crate and returns
/// `100 · intersection_area / interest_area`, or 0 when the polygons do not
/// intersect or the region of interest is degenerate. Both polygons must be
/// expressed in the same units.
pub fn overlap_percentage(interest: &[(f64, f64)], other: &[(f64, f64)]) -> f64 {
    if interest.len() < 3 || other.len() < 3 {
        return 0.0;
    }
    let a = GeoPolygon::new(LineString::from(interest.to_vec()), vec![]);
    let b = GeoPolygon::new(LineString::from(other.to_vec()), vec![]);
    let interest_area = a.unsigned_area();
    if interest_area <= 0.0 {
        return 0.0;
    }
    let intersection = a.intersection(&b);
    100.0 * intersection.unsigned_area() / interest_area
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_square() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
    }

    #[test]
    fn test_shoelace_area_square() {
        assert_abs_diff_eq!(shoelace_area(&unit_square()), 100.0);
    }

    #[test]
    fn test_shoelace_area_triangle() {
        let tri = vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        assert_abs_diff_eq!(shoelace_area(&tri), 50.0);
        // Clockwise order gives the same absolute area
        let tri_cw = vec![(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)];
        assert_abs_diff_eq!(shoelace_area(&tri_cw), 50.0);
    }

    #[test]
    fn test_shoelace_degenerate() {
        assert_abs_diff_eq!(shoelace_area(&[(0.0, 0.0), (1.0, 1.0)]), 0.0);
        assert_abs_diff_eq!(shoelace_area(&[]), 0.0);
    }

    #[test]
    fn test_contains_point() {
        let sq = unit_square();
        assert!(contains_point(&sq, 5.0, 5.0));
        assert!(!contains_point(&sq, 15.0, 15.0));
        assert!(!contains_point(&sq, -1.0, 5.0));
    }

    #[test]
    fn test_contains_point_deterministic_on_boundary() {
        let sq = unit_square();
        // Whatever the edge-case answer, repeated calls must agree.
        let first = contains_point(&sq, 0.0, 5.0);
        for _ in 0..10 {
            assert_eq!(contains_point(&sq, 0.0, 5.0), first);
        }
    }

    #[test]
    fn test_contains_point_concave() {
        // L-shape with a cutout at (1.5, 0.5)-ish scaled by 10
        let l = vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (20.0, 10.0),
            (20.0, 20.0),
            (0.0, 20.0),
        ];
        assert!(contains_point(&l, 5.0, 5.0));
        assert!(contains_point(&l, 15.0, 15.0));
        assert!(!contains_point(&l, 15.0, 5.0));
    }

    #[test]
    fn test_bounding_box() {
        let pts = vec![(1.0, 7.0), (-2.0, 3.0), (5.0, -1.0)];
        let (min, max) = bounding_box(&pts);
        assert_eq!(min, (-2.0, -1.0));
        assert_eq!(max, (5.0, 7.0));
    }

    #[test]
    fn test_overlap_percentage_half() {
        let sq = unit_square();
        // Right half of the square
        let half = vec![(5.0, 0.0), (15.0, 0.0), (15.0, 10.0), (5.0, 10.0)];
        assert_abs_diff_eq!(overlap_percentage(&sq, &half), 50.0, epsilon = 1e-6);
    }

    #[test]
    fn test_overlap_percentage_disjoint() {
        let sq = unit_square();
        let far = vec![(100.0, 100.0), (110.0, 100.0), (110.0, 110.0), (100.0, 110.0)];
        assert_abs_diff_eq!(overlap_percentage(&sq, &far), 0.0);
    }

    #[test]
    fn test_overlap_percentage_contained() {
        let sq = unit_square();
        let big = vec![(-10.0, -10.0), (30.0, -10.0), (30.0, 30.0), (-10.0, 30.0)];
        assert_abs_diff_eq!(overlap_percentage(&sq, &big), 100.0, epsilon = 1e-6);
    }
}
