//! Error types for spline operations.

use thiserror::Error;

/// Errors that can occur while building or querying a spline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// A recomputation was requested with fewer than two knots.
    #[error("a spline needs at least 2 knots, got {count}")]
    InsufficientKnots {
        /// Number of knots currently held.
        count: usize,
    },

    /// A segment index outside `[0, segment_count)` was requested.
    #[error("segment index {index} out of bounds for {count} segments")]
    SegmentIndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of segments in the spline.
        count: usize,
    },

    /// A curve parameter outside `[0, 1]` was supplied.
    #[error("curve parameter {t} is outside [0, 1]")]
    InvalidParameter {
        /// The rejected parameter.
        t: f64,
    },

    /// Derived state was queried on a spline that cannot be computed.
    #[error("spline has not been computed")]
    NotComputed,

    /// The derivative of a segment vanished, so no tangent exists.
    #[error("degenerate segment: derivative is zero")]
    DegenerateSegment,

    /// The spline configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
