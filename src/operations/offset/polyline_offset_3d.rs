use nalgebra::Unit;
use tracing::{debug, warn};

use super::directions::segment_normals_3d;
use super::engine::{ensure_not_collapsed, offset_vertices, Layout};
use super::options::{OffsetDistance, OffsetOptions};
use crate::error::{GeometryError, OffsetError, Result};
use crate::geometry::Polyline3D;
use crate::math::polygon_3d::best_fit_normal;
use crate::math::{ReferenceFrame, Vector3, TOLERANCE};

/// Offsets a 3D polyline by an in-plane and a perpendicular distance.
///
/// The offset is split relative to a reference normal `N`:
///
/// - **in-plane**: each segment's normal is `unitize(N × tangent)` and every
///   vertex is miter-solved exactly as in 2D, so the displacement stays
///   perpendicular to `N`
/// - **perpendicular**: every vertex is then translated by `perp · N`
///
/// There is no global plane. Each vertex works in the plane spanned by its
/// own two segment normals, so a non-planar (e.g. helical) polyline is not
/// guaranteed to round-trip through `+d` then `−d`. Planar input offset with
/// its true plane normal does round-trip.
///
/// Without an explicit reference normal the polyline's best-fit normal is
/// used. It follows the winding, so a positive in-plane distance is inward
/// and a positive perpendicular distance points to the side the polygon
/// winds counter-clockwise around, for either orientation.
#[derive(Debug, Clone)]
pub struct PolylineOffset3D {
    polyline: Polyline3D,
    in_plane: OffsetDistance,
    perp: f64,
    reference: Option<Vector3>,
    options: OffsetOptions,
}

impl PolylineOffset3D {
    /// Creates a new 3D offset operation with default options.
    #[must_use]
    pub fn new(polyline: Polyline3D, in_plane: impl Into<OffsetDistance>, perp: f64) -> Self {
        Self {
            polyline,
            in_plane: in_plane.into(),
            perp,
            reference: None,
            options: OffsetOptions::default(),
        }
    }

    /// Uses `normal` as the reference axis instead of the best-fit normal.
    ///
    /// The vector is normalized on execution.
    #[must_use]
    pub fn with_reference_normal(mut self, normal: Vector3) -> Self {
        self.reference = Some(normal);
        self
    }

    /// Sets the options. `check_orientation` has no effect in 3D.
    #[must_use]
    pub fn with_options(mut self, options: OffsetOptions) -> Self {
        self.options = options;
        self
    }

    /// Walks an open polyline as if its ends were joined.
    #[must_use]
    pub fn with_loop(mut self, loop_open: bool) -> Self {
        self.options.loop_open = loop_open;
        self
    }

    /// Executes the offset operation.
    ///
    /// # Errors
    ///
    /// - `OffsetError::TooFewPoints` if fewer than 2 points are provided
    /// - `GeometryError::ZeroVector` if the reference normal has zero length
    /// - `OffsetError::InvalidThreshold` if the U-turn threshold is not in `[-1, 1)`
    /// - `OffsetError::MismatchedDistanceCount` for a wrong-length distance list
    /// - `OffsetError::DegenerateSegment` if two consecutive points coincide
    /// - `OffsetError::ParallelToReference` if a segment runs along the reference
    /// - `OffsetError::SharpTurn` for a U-turn under `UTurnBehavior::Fail`
    /// - `OffsetError::Collapsed` if skipping leaves fewer than 2 points
    pub fn execute(&self) -> Result<Polyline3D> {
        let points = self.polyline.points();
        let n = points.len();
        if n < 2 {
            return Err(OffsetError::TooFewPoints { count: n }.into());
        }
        self.options.validate()?;
        let reference = self.reference_normal()?;

        let layout = Layout::classify(self.polyline.is_closed(), self.options.loop_open);
        let ring = layout.ring(points);
        let distances = self
            .in_plane
            .resolve(layout.segment_count(ring.len()), false)?;

        debug!(
            points = n,
            ?layout,
            reference = ?reference,
            perp = self.perp,
            "offsetting 3D polyline"
        );

        let frame = ReferenceFrame::new(reference);
        let normals = segment_normals_3d(ring, &reference, layout.is_cyclic())?;
        let mut out = offset_vertices(
            ring,
            &normals,
            &distances,
            layout.is_cyclic(),
            &self.options,
            &frame,
        )?;
        ensure_not_collapsed(&out)?;

        let lift = frame.normal() * self.perp;
        for p in &mut out {
            *p += lift;
        }
        if layout == Layout::Closed {
            let first = out[0];
            out.push(first);
        }

        debug!(points = out.len(), "3D offset complete");
        Ok(Polyline3D::new(out))
    }

    fn reference_normal(&self) -> Result<Unit<Vector3>> {
        if let Some(normal) = self.reference {
            return Unit::try_new(normal, TOLERANCE).ok_or_else(|| GeometryError::ZeroVector.into());
        }
        Ok(best_fit_normal(self.polyline.points()).unwrap_or_else(|| {
            warn!("polyline encloses no area; using +Z as the reference normal");
            Vector3::z_axis()
        }))
    }
}

/// Offsets `polyline` with a reference normal taken from its own winding.
///
/// # Errors
///
/// See [`PolylineOffset3D::execute`].
pub fn offset_3d(
    polyline: &Polyline3D,
    in_plane: impl Into<OffsetDistance>,
    perp: f64,
    options: &OffsetOptions,
) -> Result<Polyline3D> {
    PolylineOffset3D::new(polyline.clone(), in_plane, perp)
        .with_options(*options)
        .execute()
}

/// Offsets `polyline` relative to the caller's reference normal.
///
/// # Errors
///
/// See [`PolylineOffset3D::execute`].
pub fn offset_3d_with_reference(
    polyline: &Polyline3D,
    in_plane: impl Into<OffsetDistance>,
    perp: f64,
    reference: Vector3,
    options: &OffsetOptions,
) -> Result<Polyline3D> {
    PolylineOffset3D::new(polyline.clone(), in_plane, perp)
        .with_reference_normal(reference)
        .with_options(*options)
        .execute()
}
