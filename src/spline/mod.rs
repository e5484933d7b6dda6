//! Weighted cubic Bézier splines through knots.
//!
//! The pipeline runs knots → [`compute_weights`] → [`control_points`] (which
//! assembles and solves a [`TridiagonalSystem`]) → [`CubicSegment`]s, all
//! driven lazily by the [`Spline`] facade.

mod bezier_spline;
mod config;
mod control_points;
mod segment;
mod tridiagonal;
mod weights;

pub use bezier_spline::{Spline, SplineState};
pub use config::{SplineConfig, DEFAULT_RESOLUTION};
pub use control_points::control_points;
pub use segment::CubicSegment;
pub use tridiagonal::TridiagonalSystem;
pub use weights::compute_weights;
