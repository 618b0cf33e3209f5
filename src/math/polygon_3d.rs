use super::{Point3, Vector3, TOLERANCE};

/// Newell's vector area of a polygon.
///
/// The result is perpendicular to the best-fit plane, points along the
/// right-hand-rule normal of the winding, and has a length equal to the
/// enclosed area. Open input is treated as implicitly closed.
#[must_use]
pub fn vector_area(points: &[Point3]) -> Vector3 {
    let n = points.len();
    if n < 3 {
        return Vector3::zeros();
    }
    let mut sum = Vector3::zeros();
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        sum.x += (a.y - b.y) * (a.z + b.z);
        sum.y += (a.z - b.z) * (a.x + b.x);
        sum.z += (a.x - b.x) * (a.y + b.y);
    }
    sum * 0.5
}

/// Unit best-fit normal of a polygon, or `None` when it encloses no area.
#[must_use]
pub fn best_fit_normal(points: &[Point3]) -> Option<nalgebra::Unit<Vector3>> {
    nalgebra::Unit::try_new(vector_area(points), TOLERANCE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_square_xy() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn vector_area_ccw_points_up() {
        let area = vector_area(&unit_square_xy());
        assert!((area.z - 1.0).abs() < TOLERANCE);
        assert!(area.x.abs() < TOLERANCE && area.y.abs() < TOLERANCE);
    }

    #[test]
    fn vector_area_cw_points_down() {
        let mut pts = unit_square_xy();
        pts.reverse();
        assert!((vector_area(&pts).z + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn best_fit_normal_of_tilted_square() {
        // Square in the XZ plane, wound so the normal is -Y.
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let n = best_fit_normal(&pts).unwrap();
        assert!((n.y + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn best_fit_normal_collinear_is_none() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ];
        assert!(best_fit_normal(&pts).is_none());
    }
}
