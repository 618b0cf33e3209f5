//! Polyline offsetting with exact miter joins.
//!
//! The engine displaces every segment of a 2D or 3D polyline by a signed
//! distance, keeps open/closed topology, and resolves near-180° corners with
//! a configurable [`UTurnBehavior`](operations::offset::UTurnBehavior).

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{GeometryError, OffsetError, PolyoffsetError, Result};
pub use geometry::{Polyline, Polyline2D, Polyline3D};
pub use operations::offset::{
    offset_2d, offset_3d, offset_3d_with_reference, OffsetDistance, OffsetOptions,
    PolylineOffset2D, PolylineOffset3D, UTurnBehavior,
};
