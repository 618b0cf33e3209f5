use thiserror::Error;

/// Top-level error type for polyoffset.
#[derive(Debug, Error)]
pub enum PolyoffsetError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Offset(#[from] OffsetError),
}

/// Errors related to geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by the polyline offset engine.
#[derive(Debug, Error, PartialEq)]
pub enum OffsetError {
    #[error("at least 2 points are required for polyline offset, got {count}")]
    TooFewPoints { count: usize },

    #[error("segment {index} has zero length")]
    DegenerateSegment { index: usize },

    #[error("segment {index} is parallel to the reference normal")]
    ParallelToReference { index: usize },

    #[error(
        "sharp turn at vertex {index}: corner angle {angle_deg:.3}° exceeds the maximum of {max_angle_deg:.3}°"
    )]
    SharpTurn {
        index: usize,
        angle_deg: f64,
        max_angle_deg: f64,
    },

    #[error("expected {expected} offset distances, got {actual}")]
    MismatchedDistanceCount { expected: usize, actual: usize },

    #[error("unrecognized U-turn policy: {0:?}")]
    UnrecognizedPolicy(String),

    #[error("U-turn threshold {0} is not a cosine in [-1, 1)")]
    InvalidThreshold(f64),

    #[error("offset collapsed to {remaining} point(s)")]
    Collapsed { remaining: usize },
}

/// Convenience type alias for results using [`PolyoffsetError`].
pub type Result<T> = std::result::Result<T, PolyoffsetError>;
