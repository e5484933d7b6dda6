//! Export of splines to external formats.

mod svg;

pub use svg::{spline_to_svg_path, spline_to_svg_polyline};
