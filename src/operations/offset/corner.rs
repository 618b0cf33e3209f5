use nalgebra::Unit;
use tracing::trace;

use super::options::UTurnBehavior;
use crate::math::{Frame, PointN, UnitVectorN, VectorN, TOLERANCE};

/// `1 - cos` below which two adjacent normals count as collinear and the
/// distance-difference term of the miter is dropped.
const COLLINEAR_EPS: f64 = 1e-12;

/// Offset vertex at the intersection of two offset lines (a miter join).
///
/// The lines are `{x : n_prev·(x − pt) = d_prev}` and
/// `{x : n_next·(x − pt) = d_next}`. Writing `c = n_prev·n_next`,
/// `m = (d_prev + d_next) / 2` and `h = (d_prev − d_next) / 2`:
///
/// ```text
/// x = pt + m·(n_prev + n_next)/(1 + c) + h·(n_prev − n_next)/(1 − c)
/// ```
///
/// With equal distances only the first term remains. For collinear
/// normals the second term is dropped, so the vertex moves by `m` along the
/// shared normal. `c = −1` must be filtered out by the caller.
#[must_use]
pub fn solve_miter<const D: usize>(
    pt: &PointN<D>,
    n_prev: &VectorN<D>,
    n_next: &VectorN<D>,
    d_prev: f64,
    d_next: f64,
) -> PointN<D> {
    let cos = n_prev.dot(n_next);
    let mean = 0.5 * (d_prev + d_next);
    let half_diff = 0.5 * (d_prev - d_next);

    let mut offset = (n_prev + n_next) * (mean / (1.0 + cos));
    if 1.0 - cos > COLLINEAR_EPS {
        offset += (n_prev - n_next) * (half_diff / (1.0 - cos));
    }
    pt + offset
}

/// Diagnostics for a corner rejected under [`UTurnBehavior::Fail`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpTurn {
    /// Angle between the adjacent normals, in degrees.
    pub angle_deg: f64,
    /// Largest angle the threshold admits, in degrees.
    pub max_angle_deg: f64,
}

/// Outcome of resolving one corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerJoin<const D: usize> {
    /// One miter (or clamped) point.
    Regular(PointN<D>),
    /// Two points cutting the corner, in travel order.
    Chamfered(PointN<D>, PointN<D>),
    /// The vertex is dropped.
    Skipped,
    /// The corner is too sharp for the configured policy.
    Failed(SharpTurn),
}

/// A polyline vertex with the normals and distances of its two segments.
#[derive(Debug, Clone, Copy)]
pub struct Corner<const D: usize> {
    point: PointN<D>,
    n_prev: VectorN<D>,
    n_next: VectorN<D>,
    d_prev: f64,
    d_next: f64,
}

impl<const D: usize> Corner<D> {
    /// Creates a corner at `point` between two segments' unit normals.
    #[must_use]
    pub fn new(
        point: PointN<D>,
        n_prev: &UnitVectorN<D>,
        n_next: &UnitVectorN<D>,
        d_prev: f64,
        d_next: f64,
    ) -> Self {
        Self {
            point,
            n_prev: n_prev.into_inner(),
            n_next: n_next.into_inner(),
            d_prev,
            d_next,
        }
    }

    /// Cosine of the angle between the two segment normals.
    #[must_use]
    pub fn cosine(&self) -> f64 {
        self.n_prev.dot(&self.n_next)
    }

    /// Exact miter point, ignoring any U-turn policy.
    #[must_use]
    pub fn miter(&self) -> PointN<D> {
        solve_miter(
            &self.point,
            &self.n_prev,
            &self.n_next,
            self.d_prev,
            self.d_next,
        )
    }

    /// Resolves the corner: a miter when `cosine > threshold`, otherwise
    /// whatever `behavior` prescribes for a U-turn.
    ///
    /// `frame` supplies the in-plane quarter turn used by the chamfer and
    /// by the clamped miter at an exact reversal.
    #[must_use]
    pub fn resolve<F: Frame<D>>(
        &self,
        behavior: UTurnBehavior,
        threshold: f64,
        frame: &F,
    ) -> CornerJoin<D> {
        let cos = self.cosine();
        if cos > threshold {
            return CornerJoin::Regular(self.miter());
        }

        trace!(cos, threshold, %behavior, "U-turn corner");
        match behavior {
            UTurnBehavior::Fail => CornerJoin::Failed(SharpTurn {
                angle_deg: cos.clamp(-1.0, 1.0).acos().to_degrees(),
                max_angle_deg: threshold.clamp(-1.0, 1.0).acos().to_degrees(),
            }),
            UTurnBehavior::Chamfer => self.chamfer(frame),
            UTurnBehavior::UseThreshold => CornerJoin::Regular(self.clamped(threshold, frame)),
            UTurnBehavior::Skip => CornerJoin::Skipped,
        }
    }

    fn mean_distance(&self) -> f64 {
        0.5 * (self.d_prev + self.d_next)
    }

    /// Cuts the corner with a segment whose normal bisects the two normals
    /// (or, at an exact reversal, is perpendicular to both).
    fn chamfer<F: Frame<D>>(&self, frame: &F) -> CornerJoin<D> {
        let Some(tangent) = Unit::try_new(self.n_prev - self.n_next, TOLERANCE) else {
            return CornerJoin::Regular(self.miter());
        };
        let mut normal = frame.quarter_turn(&tangent);
        if normal.dot(&self.n_prev) < 0.0 {
            normal = -normal;
        }
        let mid = self.mean_distance();
        let first = solve_miter(&self.point, &self.n_prev, &normal, self.d_prev, mid);
        let second = solve_miter(&self.point, &normal, &self.n_next, mid, self.d_next);
        CornerJoin::Chamfered(first, second)
    }

    /// Miter point as if the corner were no sharper than the threshold.
    ///
    /// The point sits on the corner bisector at `m / cos(half-angle)`, with
    /// the half-angle cosine taken from the threshold.
    fn clamped<F: Frame<D>>(&self, threshold: f64, frame: &F) -> PointN<D> {
        let dir = match Unit::try_new(self.n_prev + self.n_next, TOLERANCE) {
            Some(bisector) => bisector.into_inner(),
            None => frame.quarter_turn(&self.n_prev),
        };
        let cos_half = ((1.0 + threshold) * 0.5).max(0.0).sqrt();
        if cos_half < TOLERANCE {
            return self.point + self.n_prev * self.d_prev + dir * self.mean_distance();
        }
        self.point + dir * (self.mean_distance() / cos_half)
    }
}
