use crate::model::ZonePoint;

/// Ray-casting point-in-polygon test.
///
/// A point is inside when a horizontal ray from it crosses an odd number of
/// edges. The `(yi > y) != (yj > y)` guard rejects horizontal edges before
/// the crossing division, so zero y-span edges contribute no crossing.
/// Polygons with fewer than three vertices never match, and non-finite
/// coordinates short-circuit to "not inside".
pub fn contains(x: f64, y: f64, points: &[ZonePoint]) -> bool {
    if points.len() < 3 || !x.is_finite() || !y.is_finite() {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = (points[i].x, points[i].y);
        let (xj, yj) = (points[j].x, points[j].y);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<ZonePoint> {
        vec![
            ZonePoint::new(0.0, 0.0),
            ZonePoint::new(10.0, 0.0),
            ZonePoint::new(10.0, 10.0),
            ZonePoint::new(0.0, 10.0),
        ]
    }

    #[test]
    fn convex_polygon_membership() {
        let poly = square();
        assert!(contains(5.0, 5.0, &poly));
        assert!(!contains(15.0, 5.0, &poly));
        assert!(!contains(5.0, -1.0, &poly));
    }

    #[test]
    fn non_convex_polygon_membership() {
        // U shape: the notch between the prongs is outside.
        let poly = vec![
            ZonePoint::new(0.0, 0.0),
            ZonePoint::new(10.0, 0.0),
            ZonePoint::new(10.0, 10.0),
            ZonePoint::new(7.0, 10.0),
            ZonePoint::new(7.0, 3.0),
            ZonePoint::new(3.0, 3.0),
            ZonePoint::new(3.0, 10.0),
            ZonePoint::new(0.0, 10.0),
        ];
        assert!(contains(1.5, 8.0, &poly));
        assert!(contains(8.5, 8.0, &poly));
        assert!(!contains(5.0, 8.0, &poly));
        assert!(contains(5.0, 1.5, &poly));
    }

    #[test]
    fn degenerate_polygons_never_match() {
        assert!(!contains(0.0, 0.0, &[]));
        assert!(!contains(
            0.5,
            0.5,
            &[ZonePoint::new(0.0, 0.0), ZonePoint::new(1.0, 1.0)]
        ));
    }

    #[test]
    fn horizontal_edges_contribute_no_crossing() {
        // Triangle with a horizontal base; a ray at the base height must not
        // divide by zero on the base edge.
        let poly = vec![
            ZonePoint::new(0.0, 0.0),
            ZonePoint::new(10.0, 0.0),
            ZonePoint::new(5.0, 10.0),
        ];
        assert!(contains(5.0, 4.0, &poly));
        assert!(!contains(20.0, 0.0, &poly));
    }

    #[test]
    fn non_finite_point_is_not_inside() {
        assert!(!contains(f64::NAN, 5.0, &square()));
        assert!(!contains(5.0, f64::INFINITY, &square()));
    }
}
