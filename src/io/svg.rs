//! SVG path export.
//!
//! A 2D spline maps directly onto SVG path data: one `M` for the first knot,
//! then one `C` command per segment. Closed splines end with `Z`.
//!
//! # Example
//!
//! ```
//! use smoothspline::{io::spline_to_svg_path, Spline, SplineConfig, Vec2};
//!
//! let mut spline = Spline::with_knots(
//!     SplineConfig::new(1e-3),
//!     [Vec2::new(0.0, 0.0), Vec2::new(3.0, 6.0)],
//! )
//! .unwrap();
//!
//! assert_eq!(spline_to_svg_path(&mut spline).unwrap(), "M 0 0 C 1 2 2 4 3 6");
//! ```

use crate::error::SplineError;
use crate::primitives::Vec2;
use crate::spline::Spline;
use num_traits::Float;
use std::fmt;

/// Converts a 2D spline to SVG path data made of cubic Bézier commands.
///
/// The output is exact: every segment becomes one `C` command with its
/// control points.
///
/// # Errors
///
/// [`SplineError::NotComputed`] if the spline has fewer than two knots.
pub fn spline_to_svg_path<F: Float + fmt::Display>(
    spline: &mut Spline<F, Vec2<F>>,
) -> Result<String, SplineError> {
    let closed = spline.is_closed();
    let segments = spline.segments()?;

    let start = segments[0].start();
    let mut result = format!("M {} {}", start.x, start.y);

    for segment in segments {
        let (p1, p2) = segment.control_points();
        let end = segment.end();
        result.push_str(&format!(
            " C {} {} {} {} {} {}",
            p1.x, p1.y, p2.x, p2.y, end.x, end.y
        ));
    }

    if closed {
        result.push_str(" Z");
    }

    Ok(result)
}

/// Converts a 2D spline to SVG path data made of straight lines.
///
/// Each segment is flattened to `samples_per_segment` lines. Useful for
/// consumers that do not understand curve commands.
///
/// # Errors
///
/// [`SplineError::NotComputed`] if the spline has fewer than two knots.
pub fn spline_to_svg_polyline<F: Float + fmt::Display>(
    spline: &mut Spline<F, Vec2<F>>,
    samples_per_segment: usize,
) -> Result<String, SplineError> {
    let closed = spline.is_closed();
    let segments = spline.segments()?;

    let start = segments[0].start();
    let mut result = format!("M {} {}", start.x, start.y);

    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        let points = segment.to_polyline(samples_per_segment);
        // The closing point of a closed spline is implied by `Z`.
        let end = if closed && i == last {
            points.len() - 1
        } else {
            points.len()
        };
        for p in &points[1..end] {
            result.push_str(&format!(" L {} {}", p.x, p.y));
        }
    }

    if closed {
        result.push_str(" Z");
    }

    Ok(result)
}
