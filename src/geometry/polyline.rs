use crate::math::{Point2, Point3, PointN, SQ_OPEN_TOLERANCE};

/// An ordered sequence of vertices joined by straight segments.
///
/// A polyline is closed when its first and last points coincide (within
/// [`SQ_OPEN_TOLERANCE`], squared distance); there is no separate flag.
/// Segment `i` runs from `points[i]` to `points[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline<const D: usize> {
    points: Vec<PointN<D>>,
}

/// Polyline in the XY plane.
pub type Polyline2D = Polyline<2>;

/// Polyline in space; not required to be planar.
pub type Polyline3D = Polyline<3>;

impl<const D: usize> Polyline<D> {
    /// Creates a polyline from owned points.
    #[must_use]
    pub fn new(points: Vec<PointN<D>>) -> Self {
        Self { points }
    }

    /// Creates a polyline by copying a point slice.
    #[must_use]
    pub fn from_points(points: &[PointN<D>]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    #[must_use]
    pub fn points(&self) -> &[PointN<D>] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<PointN<D>> {
        self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&PointN<D>> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&PointN<D>> {
        self.points.last()
    }

    /// Returns `true` when the first and last points coincide.
    ///
    /// Fewer than 2 points is never closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() >= 2 => {
                (b - a).norm_squared() <= SQ_OPEN_TOLERANCE
            }
            _ => false,
        }
    }

    /// Number of segments: one fewer than the point count.
    ///
    /// A closed polyline already repeats its first point, so no extra
    /// closing segment is counted.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterates over `(start, end)` pairs of consecutive points.
    pub fn segments(&self) -> impl Iterator<Item = (&PointN<D>, &PointN<D>)> + '_ {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Total length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Returns a copy with the vertex order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Returns a closed copy.
    ///
    /// An open polyline gets its first point appended; an already closed one
    /// has its last point snapped onto the first so the closure is exact.
    #[must_use]
    pub fn closed(&self) -> Self {
        let mut points = self.points.clone();
        if let Some(&first) = points.first() {
            if self.is_closed() {
                if let Some(last) = points.last_mut() {
                    *last = first;
                }
            } else {
                points.push(first);
            }
        }
        Self { points }
    }
}

impl Polyline2D {
    /// Lifts the polyline into 3D at the given height.
    #[must_use]
    pub fn to_3d(&self, z: f64) -> Polyline3D {
        Polyline3D::new(
            self.points
                .iter()
                .map(|p| Point3::new(p.x, p.y, z))
                .collect(),
        )
    }
}

impl Polyline3D {
    /// Projects the polyline onto the XY plane, dropping Z.
    #[must_use]
    pub fn to_2d(&self) -> Polyline2D {
        Polyline2D::new(self.points.iter().map(|p| Point2::new(p.x, p.y)).collect())
    }
}

impl<const D: usize> From<Vec<PointN<D>>> for Polyline<D> {
    fn from(points: Vec<PointN<D>>) -> Self {
        Self::new(points)
    }
}
