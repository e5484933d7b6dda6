//! Knot and control-point value types.
//!
//! The spline machinery is written against the [`Vector`] capability only, so
//! any fixed-dimension vector type can carry knots. [`Vec2`] and [`Vec3`] are
//! the concrete implementations shipped with the crate.

mod vec2;
mod vec3;
mod vector;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vector::Vector;
