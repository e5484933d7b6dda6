//! Batches of four 2D vectors.

use wide::f32x4;

use crate::primitives::Vec2;

/// Four 2D vectors stored as one lane per vector.
#[derive(Clone, Copy, Debug)]
pub struct Vec2x4 {
    pub x: f32x4,
    pub y: f32x4,
}

impl Vec2x4 {
    /// Creates a batch from lane-wise coordinates.
    #[inline]
    pub fn new(x: f32x4, y: f32x4) -> Self {
        Self { x, y }
    }

    /// Creates a batch where all four vectors are `v`.
    #[inline]
    pub fn splat(v: Vec2<f32>) -> Self {
        Self {
            x: f32x4::splat(v.x),
            y: f32x4::splat(v.y),
        }
    }

    /// Linearly interpolates each lane between `self` and `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32x4) -> Self {
        self + (other - self) * t
    }

    /// Euclidean length of each vector.
    #[inline]
    pub fn length(self) -> f32x4 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Extracts the four vectors.
    #[inline]
    pub fn to_array(self) -> [Vec2<f32>; 4] {
        let x = self.x.to_array();
        let y = self.y.to_array();
        [
            Vec2::new(x[0], y[0]),
            Vec2::new(x[1], y[1]),
            Vec2::new(x[2], y[2]),
            Vec2::new(x[3], y[3]),
        ]
    }
}

impl std::ops::Add for Vec2x4 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2x4 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32x4> for Vec2x4 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32x4) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}
