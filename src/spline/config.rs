//! Spline configuration.

use crate::error::SplineError;
use num_traits::Float;

/// Default number of length samples per segment.
///
/// Coarse but fast; raise it for curves with sharp bends or when arc-length
/// queries need to be accurate to more than a few parts per thousand.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Settings fixed for the lifetime of a [`Spline`](super::Spline).
///
/// `min_weight` has no default: it is the floor applied to the distance
/// between consecutive knots, and a sensible value depends on the scale of
/// the coordinates.
///
/// # Example
///
/// ```
/// use smoothspline::spline::SplineConfig;
///
/// let config = SplineConfig::new(1e-3).closed(true).with_resolution(500);
/// assert!(config.is_closed());
/// assert_eq!(config.resolution(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplineConfig<F> {
    closed: bool,
    resolution: usize,
    min_weight: F,
}

impl<F: Float> SplineConfig<F> {
    /// Creates an open-spline configuration with the default resolution.
    pub fn new(min_weight: F) -> Self {
        Self {
            closed: false,
            resolution: DEFAULT_RESOLUTION,
            min_weight,
        }
    }

    /// Sets whether the spline loops back to its first knot.
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Sets the number of length samples per segment.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Whether the spline is closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of length samples per segment.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Lower bound for every segment weight.
    pub fn min_weight(&self) -> F {
        self.min_weight
    }

    /// Checks that the settings can produce a spline.
    ///
    /// # Errors
    ///
    /// [`SplineError::InvalidConfig`] if `min_weight` is not a finite positive
    /// number or `resolution` is zero.
    pub fn validate(&self) -> Result<(), SplineError> {
        if !(self.min_weight.is_finite() && self.min_weight > F::zero()) {
            return Err(SplineError::InvalidConfig(
                "min_weight must be finite and positive",
            ));
        }
        if self.resolution == 0 {
            return Err(SplineError::InvalidConfig("resolution must be at least 1"));
        }
        Ok(())
    }
}
