//! The vector capability required by the spline solver.

use num_traits::Float;
use std::ops::{Add, Div, Mul, Sub};

/// A point or offset in n-dimensional space over the scalar `F`.
///
/// Knots, control points, and the right-hand sides of the control-point
/// systems are all values of this type. Implementations must be cheap to copy
/// and must treat the arithmetic operators component-wise.
pub trait Vector<F: Float>:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<F, Output = Self>
    + Div<F, Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// Euclidean length.
    fn magnitude(self) -> F;

    /// Euclidean distance between `self` and `other`.
    #[inline]
    fn distance(self, other: Self) -> F {
        (other - self).magnitude()
    }

    /// Linearly interpolates between `self` and `other`.
    ///
    /// Exact at both ends and for equal inputs: each half of the range
    /// interpolates from its nearer endpoint.
    #[inline]
    fn lerp(self, other: Self, t: F) -> Self {
        let half = F::from(0.5).unwrap();
        if t <= half {
            self + (other - self) * t
        } else {
            other - (other - self) * (F::one() - t)
        }
    }

    /// Scales the vector to unit length.
    ///
    /// Returns `None` when the magnitude does not exceed `F::epsilon()`.
    #[inline]
    fn normalize(self) -> Option<Self> {
        let mag = self.magnitude();
        if mag > F::epsilon() {
            Some(self / mag)
        } else {
            None
        }
    }
}
