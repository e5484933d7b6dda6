//! Control-point construction for weighted cubic splines.
//!
//! For every segment `i` running from knot `K[i]` to knot `K[i+1]`, the two
//! inner control points `P1[i]` and `P2[i]` are chosen so that, at each
//! interior knot,
//!
//! - the first derivatives match after scaling by the adjacent weights, and
//! - the second derivatives match after scaling by the squared weights.
//!
//! Eliminating `P2` from these conditions leaves one linear equation per knot
//! in the `P1` unknowns, with a tridiagonal coefficient matrix (periodic for
//! closed splines). Once `P1` is known, `P2[i]` follows from the first
//! derivative condition at `K[i+1]`:
//!
//! ```text
//! P2[i] = K[i+1]·(1 + w[i]/w[i+1]) − P1[i+1]·(w[i]/w[i+1])
//! ```
//!
//! The weights make the control-arm lengths on either side of a knot
//! proportional to the neighbouring knot distances, which keeps the curve from
//! overshooting around closely spaced knots.

use super::TridiagonalSystem;
use crate::primitives::Vector;
use num_traits::Float;

/// Computes `(P1, P2)` for every segment of the spline through `knots`.
///
/// `weights` must hold one positive weight per segment, as produced by
/// [`compute_weights`](super::compute_weights). Returns one pair per segment:
/// `knots.len()` pairs when `closed`, `knots.len() - 1` otherwise, and nothing
/// for fewer than two knots.
pub fn control_points<F: Float, V: Vector<F>>(knots: &[V], weights: &[F], closed: bool) -> Vec<(V, V)> {
    if knots.len() < 2 {
        return Vec::new();
    }
    debug_assert_eq!(
        weights.len(),
        if closed { knots.len() } else { knots.len() - 1 }
    );

    if closed {
        closed_control_points(knots, weights)
    } else {
        open_control_points(knots, weights)
    }
}

fn closed_control_points<F: Float, V: Vector<F>>(knots: &[V], weights: &[F]) -> Vec<(V, V)> {
    let n = knots.len();
    let one = F::one();
    let two = one + one;

    let mut system = TridiagonalSystem::with_capacity(n);
    for i in 0..n {
        let weight = weights[i];
        let prev_weight = weights[(i + n - 1) % n];
        let next_weight = weights[(i + 1) % n];
        let next_knot = knots[(i + 1) % n];

        let ratio = weight / next_weight;
        let span = prev_weight + weight;

        system.push_row(
            weight * weight,
            two * prev_weight * span,
            prev_weight * prev_weight * ratio,
            knots[i] * (span * span) + next_knot * (prev_weight * prev_weight * (one + ratio)),
        );
    }

    let first = system.solve_periodic();

    (0..n)
        .map(|i| {
            let next = (i + 1) % n;
            let ratio = weights[i] / weights[next];
            let p2 = knots[next] * (one + ratio) - first[next] * ratio;
            (first[i], p2)
        })
        .collect()
}

fn open_control_points<F: Float, V: Vector<F>>(knots: &[V], weights: &[F]) -> Vec<(V, V)> {
    let n = knots.len();
    let last = n - 1;
    let one = F::one();
    let two = one + one;
    let three = two + one;

    // The trailing row refers to a virtual segment past the last knot;
    // giving it the last real weight turns its equation into the natural-end
    // condition.
    let mut weights = weights.to_vec();
    weights.push(weights[weights.len() - 1]);

    let mut system = TridiagonalSystem::with_capacity(n);

    let ratio = weights[0] / weights[1];
    system.push_row(
        F::zero(),
        two,
        ratio,
        knots[0] + knots[1] * (one + ratio),
    );

    for i in 1..last {
        let weight = weights[i];
        let prev_weight = weights[i - 1];
        let ratio = weight / weights[i + 1];
        let span = prev_weight + weight;

        system.push_row(
            weight * weight,
            two * prev_weight * span,
            prev_weight * prev_weight * ratio,
            knots[i] * (span * span) + knots[i + 1] * (prev_weight * prev_weight * (one + ratio)),
        );
    }

    system.push_row(one, two, F::zero(), knots[last] * three);

    let first = system.solve();

    (0..last)
        .map(|i| {
            let ratio = weights[i] / weights[i + 1];
            let p2 = knots[i + 1] * (one + ratio) - first[i + 1] * ratio;
            (first[i], p2)
        })
        .collect()
}
