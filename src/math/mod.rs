pub mod polygon_2d;
pub mod polygon_3d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Point of arbitrary dimension.
pub type PointN<const D: usize> = nalgebra::Point<f64, D>;

/// Vector of arbitrary dimension.
pub type VectorN<const D: usize> = nalgebra::SVector<f64, D>;

/// Unit-length vector of arbitrary dimension.
pub type UnitVectorN<const D: usize> = nalgebra::Unit<VectorN<D>>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Squared distance under which a polyline's first and last points are
/// considered the same vertex.
pub const SQ_OPEN_TOLERANCE: f64 = 1e-12;

/// Plane in which corner geometry is rotated.
///
/// Offset normals always lie in the frame's plane, so a quarter turn keeps a
/// normal inside it. For 2D that plane is the XY plane itself; for 3D it is
/// the plane perpendicular to the caller's reference normal.
pub trait Frame<const D: usize> {
    /// Rotates `v` by 90° counter-clockwise about the frame's normal.
    fn quarter_turn(&self, v: &VectorN<D>) -> VectorN<D>;
}

/// The XY plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarFrame;

impl Frame<2> for PlanarFrame {
    fn quarter_turn(&self, v: &Vector2) -> Vector2 {
        Vector2::new(-v.y, v.x)
    }
}

/// The plane perpendicular to a unit reference normal.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceFrame {
    normal: nalgebra::Unit<Vector3>,
}

impl ReferenceFrame {
    /// Creates a frame around the given unit normal.
    #[must_use]
    pub fn new(normal: nalgebra::Unit<Vector3>) -> Self {
        Self { normal }
    }

    /// Returns the frame's unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }
}

impl Frame<3> for ReferenceFrame {
    fn quarter_turn(&self, v: &Vector3) -> Vector3 {
        self.normal.cross(v)
    }
}
