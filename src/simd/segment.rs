//! Four-wide evaluation of cubic segments.

use wide::f32x4;

use crate::primitives::{Vec2, Vector};
use crate::spline::CubicSegment;

use super::vec::Vec2x4;

/// A 2D cubic segment that evaluates four parameters at once.
#[derive(Clone, Copy, Debug)]
pub struct CubicSegment2x4 {
    p0: Vec2x4,
    p1: Vec2x4,
    p2: Vec2x4,
    p3: Vec2x4,
}

impl CubicSegment2x4 {
    /// Broadcasts the four defining points of a segment.
    #[inline]
    pub fn new(p0: Vec2<f32>, p1: Vec2<f32>, p2: Vec2<f32>, p3: Vec2<f32>) -> Self {
        Self {
            p0: Vec2x4::splat(p0),
            p1: Vec2x4::splat(p1),
            p2: Vec2x4::splat(p2),
            p3: Vec2x4::splat(p3),
        }
    }

    /// Creates from a spline segment.
    #[inline]
    pub fn from_segment(segment: &CubicSegment<f32, Vec2<f32>>) -> Self {
        let (p1, p2) = segment.control_points();
        Self::new(segment.start(), p1, p2, segment.end())
    }

    /// Evaluates the segment at four local parameters.
    ///
    /// Uses de Casteljau's algorithm.
    #[inline]
    pub fn position_at(&self, t: f32x4) -> Vec2x4 {
        let q0 = self.p0.lerp(self.p1, t);
        let q1 = self.p1.lerp(self.p2, t);
        let q2 = self.p2.lerp(self.p3, t);

        let r0 = q0.lerp(q1, t);
        let r1 = q1.lerp(q2, t);

        r0.lerp(r1, t)
    }

    /// Evaluates many parameters, four at a time.
    pub fn positions(&self, params: &[f32]) -> Vec<Vec2<f32>> {
        let mut result = Vec::with_capacity(params.len());

        let mut chunks = params.chunks_exact(4);
        for chunk in &mut chunks {
            let t = f32x4::new([chunk[0], chunk[1], chunk[2], chunk[3]]);
            result.extend_from_slice(&self.position_at(t).to_array());
        }

        let rest = chunks.remainder();
        if !rest.is_empty() {
            let mut padded = [0.0; 4];
            padded[..rest.len()].copy_from_slice(rest);
            let points = self.position_at(f32x4::new(padded)).to_array();
            result.extend_from_slice(&points[..rest.len()]);
        }

        result
    }
}

/// Estimates the arc length of a segment with four-wide sampling.
///
/// Samples the same `resolution + 1` parameters as
/// [`CubicSegment::length`] and sums the chord lengths, so the two agree up
/// to rounding. Does not touch the segment's length cache.
pub fn estimate_length(segment: &CubicSegment<f32, Vec2<f32>>) -> f32 {
    let simd = CubicSegment2x4::from_segment(segment);
    let resolution = segment.resolution();
    let step = 1.0 / resolution as f32;

    let mut total = 0.0;
    let mut i = 0;
    while i + 4 <= resolution {
        let base = i as f32;
        let start = f32x4::new([base, base + 1.0, base + 2.0, base + 3.0]) * f32x4::splat(step);
        let end = f32x4::new([base + 1.0, base + 2.0, base + 3.0, base + 4.0]) * f32x4::splat(step);
        let chords = (simd.position_at(end) - simd.position_at(start)).length();
        total += chords.to_array().iter().sum::<f32>();
        i += 4;
    }

    let mut previous = segment.position_at(step * i as f32);
    for j in i + 1..=resolution {
        let current = segment.position_at(step * j as f32);
        total += previous.distance(current);
        previous = current;
    }

    total
}
