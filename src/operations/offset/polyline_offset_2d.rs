use tracing::debug;

use super::directions::segment_normals_2d;
use super::engine::{ensure_not_collapsed, offset_vertices, Layout};
use super::options::{OffsetDistance, OffsetOptions, UTurnBehavior};
use crate::error::{OffsetError, Result};
use crate::geometry::Polyline2D;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::PlanarFrame;

/// Offsets a 2D polyline by a signed distance with miter joins.
///
/// Every segment is displaced along its left normal; each interior vertex
/// becomes the intersection of its two displaced segments. The result keeps
/// the input's point count and closedness unless a U-turn policy adds
/// (chamfer) or removes (skip) a vertex.
///
/// # Sign Convention
///
/// - Positive distance: left of the walking direction, which is inward for
///   a counter-clockwise polygon
/// - With `check_orientation` (the default), a clockwise closed or looped
///   polyline has its distances negated first, so positive is inward for
///   either winding. Open polylines always offset to the left.
///
/// # Topology
///
/// - **Closed** (first point equals last): corners wrap around and the
///   result's last point is an exact copy of its first
/// - **Open**: each endpoint moves along its only segment's normal
/// - **Open with `loop_open`**: walked as if the ends were joined, so the
///   endpoints get corner joins too; the result stays open
#[derive(Debug, Clone)]
pub struct PolylineOffset2D {
    polyline: Polyline2D,
    distance: OffsetDistance,
    options: OffsetOptions,
}

impl PolylineOffset2D {
    /// Creates a new polyline offset operation with default options.
    #[must_use]
    pub fn new(polyline: Polyline2D, distance: impl Into<OffsetDistance>) -> Self {
        Self {
            polyline,
            distance: distance.into(),
            options: OffsetOptions::default(),
        }
    }

    /// Replaces all options at once.
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

    /// Enables or disables the clockwise distance flip.
    #[must_use]
    pub fn with_check_orientation(mut self, check: bool) -> Self {
        self.options.check_orientation = check;
        self
    }

    /// Sets the U-turn policy and the cosine threshold that triggers it.
    #[must_use]
    pub fn with_u_turn(mut self, behavior: UTurnBehavior, threshold: f64) -> Self {
        self.options.u_turn = behavior;
        self.options.u_turn_threshold = threshold;
        self
    }

    /// Executes the offset operation.
    ///
    /// Per-segment distances must number `n − 1` for `n` points, or `n` for
    /// an open polyline offset with `loop_open`.
    ///
    /// # Errors
    ///
    /// - `OffsetError::TooFewPoints` if fewer than 2 points are provided
    /// - `OffsetError::InvalidThreshold` if the U-turn threshold is not in `[-1, 1)`
    /// - `OffsetError::MismatchedDistanceCount` for a wrong-length distance list
    /// - `OffsetError::DegenerateSegment` if two consecutive points coincide
    /// - `OffsetError::SharpTurn` for a U-turn under [`UTurnBehavior::Fail`]
    /// - `OffsetError::Collapsed` if skipping leaves fewer than 2 points
    pub fn execute(&self) -> Result<Polyline2D> {
        let points = self.polyline.points();
        let n = points.len();
        if n < 2 {
            return Err(OffsetError::TooFewPoints { count: n }.into());
        }
        self.options.validate()?;

        let layout = Layout::classify(self.polyline.is_closed(), self.options.loop_open);
        // Winding only means something for a ring; an open path's implicit
        // closure can change sign under offset and break the round trip.
        let flip = self.options.check_orientation
            && layout.is_cyclic()
            && signed_area_2d(points) < 0.0;
        let ring = layout.ring(points);
        let distances = self
            .distance
            .resolve(layout.segment_count(ring.len()), flip)?;

        debug!(
            points = n,
            ?layout,
            flip,
            u_turn = %self.options.u_turn,
            "offsetting 2D polyline"
        );

        let normals = segment_normals_2d(ring, layout.is_cyclic())?;
        let mut out = offset_vertices(
            ring,
            &normals,
            &distances,
            layout.is_cyclic(),
            &self.options,
            &PlanarFrame,
        )?;
        ensure_not_collapsed(&out)?;

        if layout == Layout::Closed {
            let first = out[0];
            out.push(first);
        }

        debug!(points = out.len(), "2D offset complete");
        Ok(Polyline2D::new(out))
    }
}

/// Offsets `polyline` by `distance` using `options`.
///
/// Shorthand for [`PolylineOffset2D`].
///
/// # Errors
///
/// See [`PolylineOffset2D::execute`].
pub fn offset_2d(
    polyline: &Polyline2D,
    distance: impl Into<OffsetDistance>,
    options: &OffsetOptions,
) -> Result<Polyline2D> {
    PolylineOffset2D::new(polyline.clone(), distance)
        .with_options(*options)
        .execute()
}
