pub mod polyline;

pub use polyline::{Polyline, Polyline2D, Polyline3D};
