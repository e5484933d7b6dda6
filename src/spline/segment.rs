//! Cubic Bézier segments of a spline.

use crate::error::SplineError;
use crate::primitives::Vector;
use num_traits::Float;
use std::cell::OnceCell;

/// One cubic Bézier piece of a spline, running from `from` to `to`.
///
/// The segment owns copies of its endpoints and control points. Its arc length
/// is estimated on first request by sampling `resolution` equally spaced
/// parameters, and cached for the lifetime of the segment.
#[derive(Debug, Clone)]
pub struct CubicSegment<F, V> {
    from: V,
    to: V,
    control_points: (V, V),
    resolution: usize,
    length: OnceCell<F>,
}

impl<F: Float, V: Vector<F>> CubicSegment<F, V> {
    /// Creates a segment. `resolution` is clamped to at least one sample.
    pub fn new(from: V, to: V, control_points: (V, V), resolution: usize) -> Self {
        Self {
            from,
            to,
            control_points,
            resolution: resolution.max(1),
            length: OnceCell::new(),
        }
    }

    /// Start knot.
    #[inline]
    pub fn start(&self) -> V {
        self.from
    }

    /// End knot.
    #[inline]
    pub fn end(&self) -> V {
        self.to
    }

    /// The two inner control points.
    #[inline]
    pub fn control_points(&self) -> (V, V) {
        self.control_points
    }

    /// Number of samples used for the length estimate.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Evaluates the curve at local parameter `t` in `[0, 1]`.
    ///
    /// Uses de Casteljau's algorithm, so the endpoints and a segment whose
    /// defining points are all equal evaluate exactly.
    #[inline]
    pub fn position_at(&self, t: F) -> V {
        let (p1, p2) = self.control_points;

        let q0 = self.from.lerp(p1, t);
        let q1 = p1.lerp(p2, t);
        let q2 = p2.lerp(self.to, t);

        let r0 = q0.lerp(q1, t);
        let r1 = q1.lerp(q2, t);

        r0.lerp(r1, t)
    }

    /// Returns the first derivative at local parameter `t`.
    #[inline]
    pub fn derivative_at(&self, t: F) -> V {
        let one = F::one();
        let three = one + one + one;
        let six = three + three;
        let (p1, p2) = self.control_points;

        let mt = one - t;

        (p1 - self.from) * (three * mt * mt) + (p2 - p1) * (six * mt * t) + (self.to - p2) * (three * t * t)
    }

    /// Returns the unit tangent at local parameter `t`.
    ///
    /// # Errors
    ///
    /// [`SplineError::DegenerateSegment`] when the derivative vanishes, for
    /// example when all four defining points coincide. A derivative counts as
    /// zero when it is within rounding noise of the segment's coordinates.
    pub fn tangent_at(&self, t: F) -> Result<V, SplineError> {
        let derivative = self.derivative_at(t);
        if derivative.magnitude() <= self.zero_tolerance() {
            return Err(SplineError::DegenerateSegment);
        }
        derivative
            .normalize()
            .ok_or(SplineError::DegenerateSegment)
    }

    /// Returns the estimated arc length.
    ///
    /// The estimate is the length of the polyline through `resolution + 1`
    /// equally spaced samples. It is computed once and then cached.
    pub fn length(&self) -> F {
        *self.length.get_or_init(|| self.estimate_length())
    }

    /// Samples the curve at `samples + 1` equally spaced parameters,
    /// endpoints included.
    pub fn to_polyline(&self, samples: usize) -> Vec<V> {
        let samples = samples.max(1);
        let step = F::one() / F::from(samples).unwrap();

        let mut points = Vec::with_capacity(samples + 1);
        points.push(self.from);
        for i in 1..samples {
            points.push(self.position_at(step * F::from(i).unwrap()));
        }
        points.push(self.to);
        points
    }

    /// A few hundred ulps at the magnitude of the largest defining point.
    fn zero_tolerance(&self) -> F {
        let (p1, p2) = self.control_points;
        let scale = [self.from, p1, p2, self.to]
            .iter()
            .fold(F::one(), |scale, p| scale.max(p.magnitude()));
        F::epsilon() * scale * F::from(256).unwrap()
    }

    fn estimate_length(&self) -> F {
        let step = F::one() / F::from(self.resolution).unwrap();

        let mut length = F::zero();
        let mut previous = self.from;
        for i in 1..=self.resolution {
            let current = self.position_at(step * F::from(i).unwrap());
            length = length + previous.distance(current);
            previous = current;
        }
        length
    }
}

impl<F: PartialEq, V: PartialEq> PartialEq for CubicSegment<F, V> {
    /// Segments compare by geometry and resolution; the length cache is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.control_points == other.control_points
            && self.resolution == other.resolution
    }
}
