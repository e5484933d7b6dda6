//! 3D knot/offset type.

use super::Vector;
use num_traits::Float;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D vector, used both for knot positions and for offsets between them.
///
/// Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3<F> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }
}

impl<F: Float> Vector<F> for Vec3<F> {
    #[inline]
    fn zero() -> Self {
        Self::new(F::zero(), F::zero(), F::zero())
    }

    #[inline]
    fn magnitude(self) -> F {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<F: Float> Mul<F> for Vec3<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl<F: Float> Div<F> for Vec3<F> {
    type Output = Self;

    #[inline]
    fn div(self, scalar: F) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<F: Float> Default for Vec3<F> {
    fn default() -> Self {
        <Self as Vector<F>>::zero()
    }
}

impl<F: Float> From<(F, F, F)> for Vec3<F> {
    fn from((x, y, z): (F, F, F)) -> Self {
        Self::new(x, y, z)
    }
}
