//! smoothspline - Weighted cubic Bézier splines
//!
//! Fits a smooth curve through an ordered list of knots, in 2D or 3D, open or
//! closed. Each pair of neighbouring knots is joined by a cubic Bézier
//! segment, and the inner control points are chosen so the curve is C1 and C2
//! continuous once derivatives are scaled by the distance between knots. The
//! curve can then be queried by arc length.
//!
//! # Example
//!
//! ```
//! use smoothspline::{Spline, SplineConfig, Vec2};
//!
//! let config = SplineConfig::<f64>::new(1e-3).closed(true);
//! let mut spline = Spline::with_knots(
//!     config,
//!     [
//!         Vec2::new(0.0, 0.0),
//!         Vec2::new(10.0, 0.0),
//!         Vec2::new(10.0, 10.0),
//!         Vec2::new(0.0, 10.0),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(spline.segment_count(), 4);
//! let halfway = spline.coordinates_at(0.5).unwrap();
//! assert!((halfway.x - 10.0).abs() < 1e-6 && (halfway.y - 10.0).abs() < 1e-6);
//! ```

pub mod error;
pub mod io;
pub mod primitives;
#[cfg(feature = "simd")]
pub mod simd;
pub mod spline;

pub use error::SplineError;
pub use primitives::{Vec2, Vec3, Vector};
pub use spline::{CubicSegment, Spline, SplineConfig, SplineState};
