//! Per-segment weights derived from knot spacing.

use crate::primitives::Vector;
use num_traits::Float;

/// Computes one weight per consecutive knot pair.
///
/// `weight[i]` is the distance from `knots[i]` to `knots[i + 1]`, floored at
/// `min_weight`. A closed spline gets one additional weight for the pair
/// `(knots[n - 1], knots[0])`, so the result always has one weight per segment.
///
/// The floor keeps every weight strictly positive: the control-point systems
/// divide by weight ratios, and coincident knots would otherwise produce a
/// zero divisor.
pub fn compute_weights<F: Float, V: Vector<F>>(knots: &[V], min_weight: F, closed: bool) -> Vec<F> {
    if knots.len() < 2 {
        return Vec::new();
    }

    let clamp = |index: usize, distance: F| {
        if distance < min_weight {
            log::trace!("weight {index} clamped to the minimum weight");
            min_weight
        } else {
            distance
        }
    };

    let mut weights: Vec<F> = knots
        .windows(2)
        .enumerate()
        .map(|(i, pair)| clamp(i, pair[0].distance(pair[1])))
        .collect();

    if closed {
        let last = knots.len() - 1;
        weights.push(clamp(last, knots[last].distance(knots[0])));
    }

    weights
}
