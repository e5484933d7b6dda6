//! Banded linear solvers for the control-point systems.
//!
//! Both solvers work on a system `A·x = r` where `A` is stored as three
//! diagonals and `x`, `r` are sequences of vectors, so one elimination pass
//! solves every spatial dimension at once.
//!
//! - [`TridiagonalSystem::solve`] is the Thomas algorithm for a plain
//!   tridiagonal matrix (open splines).
//! - [`TridiagonalSystem::solve_periodic`] handles the cyclic matrix of a
//!   closed spline, whose two corner entries couple the first and last rows.
//!
//! Neither solver pivots. The control-point matrices have strictly positive
//! diagonals, which is what the elimination order relies on.
//!
//! # Example
//!
//! ```
//! use smoothspline::{spline::TridiagonalSystem, Vec2};
//!
//! // | 2 1 0 |       | 4 |
//! // | 1 2 1 | x  =  | 8 |
//! // | 0 1 2 |       | 8 |
//! let mut system = TridiagonalSystem::<f64, Vec2<f64>>::new();
//! system.push_row(0.0, 2.0, 1.0, Vec2::new(4.0, 0.0));
//! system.push_row(1.0, 2.0, 1.0, Vec2::new(8.0, 0.0));
//! system.push_row(1.0, 2.0, 0.0, Vec2::new(8.0, 0.0));
//!
//! let x = system.solve();
//! assert!((x[0].x - 1.0).abs() < 1e-12);
//! assert!((x[1].x - 2.0).abs() < 1e-12);
//! assert!((x[2].x - 3.0).abs() < 1e-12);
//! ```

use crate::primitives::Vector;
use num_traits::Float;

/// A tridiagonal (or periodic tridiagonal) system with vector-valued unknowns.
///
/// Row `i` reads `a[i]·x[i-1] + b[i]·x[i] + c[i]·x[i+1] = r[i]`. For the open
/// solver `a[0]` and `c[n-1]` are ignored; for the periodic solver they are the
/// corner entries `A[0][n-1]` and `A[n-1][0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem<F, V> {
    a: Vec<F>,
    b: Vec<F>,
    c: Vec<F>,
    r: Vec<V>,
}

impl<F, V> Default for TridiagonalSystem<F, V> {
    fn default() -> Self {
        Self {
            a: Vec::new(),
            b: Vec::new(),
            c: Vec::new(),
            r: Vec::new(),
        }
    }
}

impl<F: Float, V: Vector<F>> TridiagonalSystem<F, V> {
    /// Creates an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty system with room for `rows` rows.
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            a: Vec::with_capacity(rows),
            b: Vec::with_capacity(rows),
            c: Vec::with_capacity(rows),
            r: Vec::with_capacity(rows),
        }
    }

    /// Appends a row with sub-diagonal `a`, diagonal `b`, super-diagonal `c`
    /// and right-hand side `r`.
    pub fn push_row(&mut self, a: F, b: F, c: F, r: V) {
        self.a.push(a);
        self.b.push(b);
        self.c.push(c);
        self.r.push(r);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.r.len()
    }

    /// Returns `true` if the system has no rows.
    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// Solves the system as a plain tridiagonal matrix (Thomas algorithm).
    ///
    /// Runs in O(n).
    pub fn solve(self) -> Vec<V> {
        let Self { a, mut b, c, mut r } = self;
        let n = r.len();
        if n == 0 {
            return Vec::new();
        }

        for i in 1..n {
            let m = a[i] / b[i - 1];
            b[i] = b[i] - m * c[i - 1];
            r[i] = r[i] - r[i - 1] * m;
        }

        let mut x = vec![V::zero(); n];
        x[n - 1] = r[n - 1] / b[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = (r[i] - x[i + 1] * c[i]) / b[i];
        }
        x
    }

    /// Solves the system as a periodic tridiagonal matrix.
    ///
    /// `a[0]` is taken as `A[0][n-1]` and `c[n-1]` as `A[n-1][0]`. The matrix is
    /// never materialized: a single forward sweep eliminates the band while
    /// carrying two accumulators for the fill-in the corners cause, one for
    /// the last column and one for the last row. Two rows before the end the
    /// accumulators meet the band, so they are folded into `c[n-2]` and
    /// `a[n-1]` instead. Back-substitution then corrects every row by the last
    /// unknown times its last-column entry. Runs in O(n).
    pub fn solve_periodic(self) -> Vec<V> {
        let Self {
            mut a,
            mut b,
            mut c,
            mut r,
        } = self;
        let n = r.len();

        match n {
            0 => return Vec::new(),
            // Both corners and the diagonal land on the single unknown.
            1 => return vec![r[0] / (a[0] + b[0] + c[0])],
            // Corners coincide with the off-diagonals.
            2 => {
                c[0] = c[0] + a[0];
                a[1] = a[1] + c[1];
                return Self { a, b, c, r }.solve();
            }
            _ => {}
        }

        let last = n - 1;
        let mut last_column = vec![F::zero(); n];
        last_column[0] = a[0];
        let mut last_row = c[last];

        for i in 0..last - 1 {
            let folding = i + 2 == last;

            // Clear column i of the last row using pivot row i.
            let m = last_row / b[i];
            b[last] = b[last] - m * last_column[i];
            r[last] = r[last] - r[i] * m;
            if folding {
                a[last] = a[last] - m * c[i];
            } else {
                last_row = -(m * c[i]);
            }

            // Clear the sub-diagonal of row i + 1.
            let m = a[i + 1] / b[i];
            b[i + 1] = b[i + 1] - m * c[i];
            r[i + 1] = r[i + 1] - r[i] * m;
            if folding {
                c[i + 1] = c[i + 1] - m * last_column[i];
            } else {
                last_column[i + 1] = -(m * last_column[i]);
            }
        }

        let m = a[last] / b[last - 1];
        b[last] = b[last] - m * c[last - 1];
        r[last] = r[last] - r[last - 1] * m;

        let mut x = vec![V::zero(); n];
        x[last] = r[last] / b[last];
        let tail = x[last];
        for i in (0..last).rev() {
            x[i] = (r[i] - x[i + 1] * c[i] - tail * last_column[i]) / b[i];
        }
        x
    }
}
