use nalgebra::Unit;

use crate::error::{OffsetError, Result};
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{Point2, Point3, Vector2, Vector3, TOLERANCE};

/// Computes one unit offset normal per segment of a 2D point sequence.
///
/// Each normal is the segment's unit tangent rotated 90° counter-clockwise,
/// so a positive offset moves to the left of the direction of travel. With
/// `cyclic` set, an extra normal is produced for the wrap-around segment
/// from the last point back to the first.
///
/// # Errors
///
/// Returns `OffsetError::DegenerateSegment` for a zero-length segment.
pub fn segment_normals_2d(points: &[Point2], cyclic: bool) -> Result<Vec<Unit<Vector2>>> {
    let count = segment_count(points.len(), cyclic);
    let mut normals = Vec::with_capacity(count);
    for index in 0..count {
        let a = &points[index];
        let b = &points[(index + 1) % points.len()];
        let dir = segment_direction(a, b).ok_or(OffsetError::DegenerateSegment { index })?;
        normals.push(Unit::new_unchecked(left_normal(&dir)));
    }
    Ok(normals)
}

/// Computes one unit offset normal per segment of a 3D point sequence.
///
/// Each normal is `unitize(reference × tangent)`: perpendicular to both the
/// segment and the reference, and equal to the 2D left normal when the
/// reference is +Z. Segments need not lie in a common plane.
///
/// # Errors
///
/// - `OffsetError::DegenerateSegment` for a zero-length segment
/// - `OffsetError::ParallelToReference` when a segment runs along the reference
pub fn segment_normals_3d(
    points: &[Point3],
    reference: &Unit<Vector3>,
    cyclic: bool,
) -> Result<Vec<Unit<Vector3>>> {
    let count = segment_count(points.len(), cyclic);
    let mut normals = Vec::with_capacity(count);
    for index in 0..count {
        let a = &points[index];
        let b = &points[(index + 1) % points.len()];
        let tangent =
            Unit::try_new(b - a, TOLERANCE).ok_or(OffsetError::DegenerateSegment { index })?;
        let normal = Unit::try_new(reference.cross(&*tangent), TOLERANCE)
            .ok_or(OffsetError::ParallelToReference { index })?;
        normals.push(normal);
    }
    Ok(normals)
}

fn segment_count(point_count: usize, cyclic: bool) -> usize {
    if cyclic {
        point_count
    } else {
        point_count.saturating_sub(1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolyoffsetError;

    #[test]
    fn normals_of_open_l() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ];
        let normals = segment_normals_2d(&pts, false).unwrap();
        assert_eq!(normals.len(), 2);
        assert!((normals[0].y - 1.0).abs() < TOLERANCE);
        assert!((normals[1].x + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn cyclic_adds_wrap_segment() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let normals = segment_normals_2d(&pts, true).unwrap();
        assert_eq!(normals.len(), 3);
        // Wrap segment (0,1) -> (0,0) runs down; its left normal is +X.
        assert!((normals[2].x - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn normals_are_unit_length() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 4.0),
            Point2::new(-2.0, 7.5),
        ];
        for n in segment_normals_2d(&pts, false).unwrap() {
            assert!((n.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_length_segment_reports_index() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
        ];
        let err = segment_normals_2d(&pts, false).unwrap_err();
        assert!(matches!(
            err,
            PolyoffsetError::Offset(OffsetError::DegenerateSegment { index: 1 })
        ));
    }

    #[test]
    fn normals_3d_match_2d_for_z_up() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
        ];
        let normals = segment_normals_3d(&pts, &Vector3::z_axis(), false).unwrap();
        assert!((normals[0].y - 1.0).abs() < TOLERANCE);
        assert!((normals[1].x + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn normals_3d_perpendicular_to_reference_for_sloped_segment() {
        let pts = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 1.0)];
        let normals = segment_normals_3d(&pts, &Vector3::z_axis(), false).unwrap();
        assert!(normals[0].z.abs() < TOLERANCE);
        assert!((normals[0].y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn segment_along_reference_fails() {
        let pts = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 2.0)];
        let err = segment_normals_3d(&pts, &Vector3::z_axis(), false).unwrap_err();
        assert!(matches!(
            err,
            PolyoffsetError::Offset(OffsetError::ParallelToReference { index: 0 })
        ));
    }
}
