pub mod corner;
pub mod directions;
mod engine;
mod options;
mod polyline_offset_2d;
mod polyline_offset_3d;

pub use corner::{solve_miter, Corner, CornerJoin, SharpTurn};
pub use directions::{segment_normals_2d, segment_normals_3d};
pub use options::{OffsetDistance, OffsetOptions, UTurnBehavior, DEFAULT_U_TURN_COS};
pub use polyline_offset_2d::{offset_2d, PolylineOffset2D};
pub use polyline_offset_3d::{offset_3d, offset_3d_with_reference, PolylineOffset3D};
