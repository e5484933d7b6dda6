//! SIMD-accelerated segment evaluation.
//!
//! Evaluates a 2D `f32` segment at four parameters per instruction, which
//! speeds up sampling and length estimation of long splines.
//!
//! Enable with the `simd` feature flag:
//! ```toml
//! smoothspline = { version = "0.1", features = ["simd"] }
//! ```

mod segment;
mod vec;

pub use segment::{estimate_length, CubicSegment2x4};
pub use vec::Vec2x4;
