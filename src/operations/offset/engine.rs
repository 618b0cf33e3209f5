//! Vertex walk shared by the 2D and 3D drivers.

use super::corner::{Corner, CornerJoin};
use super::options::OffsetOptions;
use crate::error::{OffsetError, Result};
use crate::math::{Frame, PointN, UnitVectorN};

/// How the driver walks a polyline's vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    /// Free ends; endpoints are offset along their single segment.
    Open,
    /// Genuinely closed; the repeated last point is left out of the walk.
    Closed,
    /// Open polyline walked as a ring through a virtual closing segment.
    Looped,
}

impl Layout {
    pub(crate) fn classify(closed: bool, loop_open: bool) -> Self {
        if closed {
            Self::Closed
        } else if loop_open {
            Self::Looped
        } else {
            Self::Open
        }
    }

    pub(crate) fn is_cyclic(self) -> bool {
        !matches!(self, Self::Open)
    }

    /// The vertices actually visited.
    pub(crate) fn ring<P>(self, points: &[P]) -> &[P] {
        match self {
            Self::Closed => &points[..points.len() - 1],
            Self::Open | Self::Looped => points,
        }
    }

    /// Number of segments (and distances) the walk needs for `ring`.
    pub(crate) fn segment_count(self, ring_len: usize) -> usize {
        if self.is_cyclic() {
            ring_len
        } else {
            ring_len.saturating_sub(1)
        }
    }
}

/// Offsets every vertex of `ring`.
///
/// `normals[i]` and `distances[i]` belong to the segment leaving vertex `i`.
/// Open rings have one fewer segment than vertices; cyclic rings wrap, so
/// vertex 0 joins the last segment to the first.
pub(crate) fn offset_vertices<const D: usize, F: Frame<D>>(
    ring: &[PointN<D>],
    normals: &[UnitVectorN<D>],
    distances: &[f64],
    cyclic: bool,
    options: &OffsetOptions,
    frame: &F,
) -> Result<Vec<PointN<D>>> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n + 2);

    let corner = |out: &mut Vec<PointN<D>>, index: usize, prev: usize, next: usize| {
        let join = Corner::new(
            ring[index],
            &normals[prev],
            &normals[next],
            distances[prev],
            distances[next],
        )
        .resolve(options.u_turn, options.u_turn_threshold, frame);
        push_join(out, index, join)
    };

    if cyclic {
        for i in 0..n {
            let prev = if i == 0 { n - 1 } else { i - 1 };
            corner(&mut out, i, prev, i)?;
        }
    } else {
        let last = n - 1;
        out.push(ring[0] + normals[0].into_inner() * distances[0]);
        for i in 1..last {
            corner(&mut out, i, i - 1, i)?;
        }
        out.push(ring[last] + normals[last - 1].into_inner() * distances[last - 1]);
    }

    Ok(out)
}

fn push_join<const D: usize>(
    out: &mut Vec<PointN<D>>,
    index: usize,
    join: CornerJoin<D>,
) -> Result<()> {
    match join {
        CornerJoin::Regular(p) => out.push(p),
        CornerJoin::Chamfered(a, b) => {
            out.push(a);
            out.push(b);
        }
        CornerJoin::Skipped => {}
        CornerJoin::Failed(turn) => {
            return Err(OffsetError::SharpTurn {
                index,
                angle_deg: turn.angle_deg,
                max_angle_deg: turn.max_angle_deg,
            }
            .into());
        }
    }
    Ok(())
}

/// Rejects results that lost too many vertices to [`Skip`](super::UTurnBehavior::Skip).
pub(crate) fn ensure_not_collapsed<P>(out: &[P]) -> Result<()> {
    if out.len() < 2 {
        return Err(OffsetError::Collapsed {
            remaining: out.len(),
        }
        .into());
    }
    Ok(())
}
