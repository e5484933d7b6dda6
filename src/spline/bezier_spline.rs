//! The spline facade: knot storage, lazy recomputation and arc-length queries.

use super::{compute_weights, control_points, CubicSegment, SplineConfig};
use crate::error::SplineError;
use crate::primitives::Vector;
use num_traits::Float;

/// Lifecycle of a spline's derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineState {
    /// Fewer than two knots; nothing can be derived.
    Uncomputed,
    /// Knots changed since the last recomputation; derived state is stale.
    Dirty,
    /// Segments, control points and lengths match the current knots.
    Computed,
}

/// A smooth cubic Bézier spline through an ordered list of knots.
///
/// Mutating the knots only marks the spline dirty. Segments, control points
/// and lengths are rebuilt in full on the next query that needs them, which
/// is why queries take `&mut self`.
///
/// Arc-length queries ([`coordinates_at`](Self::coordinates_at),
/// [`tangent_at`](Self::tangent_at)) take a fraction of the total length in
/// `[0, 1]` rather than a per-segment parameter.
///
/// # Example
///
/// ```
/// use smoothspline::{spline::{Spline, SplineConfig}, Vec2};
///
/// let mut spline = Spline::new(SplineConfig::<f64>::new(1e-3)).unwrap();
/// spline.add_knots([
///     Vec2::new(0.0, 0.0),
///     Vec2::new(10.0, 0.0),
///     Vec2::new(10.0, 10.0),
/// ]);
///
/// assert_eq!(spline.segment_count(), 2);
///
/// let end = spline.coordinates_at(1.0).unwrap();
/// assert!((end.x - 10.0).abs() < 1e-9 && (end.y - 10.0).abs() < 1e-9);
/// assert!(spline.length().unwrap() > 20.0);
/// ```
#[derive(Debug, Clone)]
pub struct Spline<F, V> {
    config: SplineConfig<F>,
    knots: Vec<V>,
    state: SplineState,
    segments: Vec<CubicSegment<F, V>>,
    /// Arc length at the end of each segment.
    cumulative: Vec<F>,
}

impl<F: Float, V: Vector<F>> Spline<F, V> {
    /// Creates an empty spline.
    ///
    /// # Errors
    ///
    /// [`SplineError::InvalidConfig`] if the configuration is unusable.
    pub fn new(config: SplineConfig<F>) -> Result<Self, SplineError> {
        config.validate()?;
        Ok(Self {
            config,
            knots: Vec::new(),
            state: SplineState::Uncomputed,
            segments: Vec::new(),
            cumulative: Vec::new(),
        })
    }

    /// Creates a spline holding `knots`.
    ///
    /// # Errors
    ///
    /// [`SplineError::InvalidConfig`] if the configuration is unusable.
    pub fn with_knots<I>(config: SplineConfig<F>, knots: I) -> Result<Self, SplineError>
    where
        I: IntoIterator<Item = V>,
    {
        let mut spline = Self::new(config)?;
        spline.add_knots(knots);
        Ok(spline)
    }

    /// The configuration the spline was created with.
    pub fn config(&self) -> &SplineConfig<F> {
        &self.config
    }

    /// Whether the last segment connects back to the first knot.
    pub fn is_closed(&self) -> bool {
        self.config.is_closed()
    }

    /// The knots, in order.
    pub fn knots(&self) -> &[V] {
        &self.knots
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SplineState {
        self.state
    }

    /// Returns `true` if the spline has at least two knots.
    pub fn is_computable(&self) -> bool {
        self.knots.len() >= 2
    }

    /// Number of segments implied by the current knots.
    ///
    /// Equals the knot count for closed splines and one less for open ones;
    /// zero while the spline is not computable.
    pub fn segment_count(&self) -> usize {
        match self.knots.len() {
            0 | 1 => 0,
            n if self.is_closed() => n,
            n => n - 1,
        }
    }

    /// Appends a knot.
    pub fn add_knot(&mut self, knot: V) {
        self.knots.push(knot);
        self.invalidate();
    }

    /// Appends knots in order.
    pub fn add_knots<I: IntoIterator<Item = V>>(&mut self, knots: I) {
        self.knots.extend(knots);
        self.invalidate();
    }

    /// Removes every knot equal to `knot`, returning how many were removed.
    pub fn remove_knot(&mut self, knot: &V) -> usize {
        self.remove_knots(std::slice::from_ref(knot))
    }

    /// Removes every knot equal to any of `knots`, returning how many were
    /// removed.
    pub fn remove_knots(&mut self, knots: &[V]) -> usize {
        let before = self.knots.len();
        self.knots.retain(|k| !knots.contains(k));
        self.invalidate();
        before - self.knots.len()
    }

    /// Rebuilds segments, control points and lengths from the current knots.
    ///
    /// # Errors
    ///
    /// [`SplineError::InsufficientKnots`] if fewer than two knots are held.
    pub fn recompute(&mut self) -> Result<(), SplineError> {
        let count = self.knots.len();
        if count < 2 {
            return Err(SplineError::InsufficientKnots { count });
        }

        let closed = self.is_closed();
        let resolution = self.config.resolution();
        let weights = compute_weights(&self.knots, self.config.min_weight(), closed);
        let pairs = control_points(&self.knots, &weights, closed);

        let knots = &self.knots;
        self.segments = pairs
            .into_iter()
            .enumerate()
            .map(|(i, pair)| CubicSegment::new(knots[i], knots[(i + 1) % count], pair, resolution))
            .collect();

        let mut total = F::zero();
        self.cumulative = self
            .segments
            .iter()
            .map(|segment| {
                total = total + segment.length();
                total
            })
            .collect();

        self.state = SplineState::Computed;
        log::debug!(
            "recomputed spline: {} knots, closed={}, {} segments, length {:.6}",
            count,
            closed,
            self.segments.len(),
            total.to_f64().unwrap_or(f64::NAN)
        );
        Ok(())
    }

    /// Estimated total arc length.
    ///
    /// # Errors
    ///
    /// [`SplineError::NotComputed`] if the spline has fewer than two knots.
    pub fn length(&mut self) -> Result<F, SplineError> {
        self.ensure_computed()?;
        Ok(self.total_length())
    }

    /// All segments, in order.
    ///
    /// # Errors
    ///
    /// [`SplineError::NotComputed`] if the spline has fewer than two knots.
    pub fn segments(&mut self) -> Result<&[CubicSegment<F, V>], SplineError> {
        self.ensure_computed()?;
        Ok(&self.segments)
    }

    /// The segment at `index`.
    ///
    /// # Errors
    ///
    /// [`SplineError::NotComputed`] if the spline has fewer than two knots,
    /// [`SplineError::SegmentIndexOutOfBounds`] if `index` is not below
    /// [`segment_count`](Self::segment_count).
    pub fn segment(&mut self, index: usize) -> Result<&CubicSegment<F, V>, SplineError> {
        self.ensure_computed()?;
        let count = self.segments.len();
        self.segments
            .get(index)
            .ok_or(SplineError::SegmentIndexOutOfBounds { index, count })
    }

    /// The start and end knot of the segment at `index`.
    ///
    /// # Errors
    ///
    /// As for [`segment`](Self::segment).
    pub fn segment_knots(&mut self, index: usize) -> Result<(V, V), SplineError> {
        let segment = self.segment(index)?;
        Ok((segment.start(), segment.end()))
    }

    /// The two inner control points of the segment at `index`.
    ///
    /// # Errors
    ///
    /// As for [`segment`](Self::segment).
    pub fn control_points(&mut self, index: usize) -> Result<(V, V), SplineError> {
        Ok(self.segment(index)?.control_points())
    }

    /// Maps a fraction `t` of the total arc length to a segment index and a
    /// local parameter within that segment.
    ///
    /// # Errors
    ///
    /// [`SplineError::InvalidParameter`] if `t` is outside `[0, 1]` or NaN,
    /// [`SplineError::NotComputed`] if the spline has fewer than two knots.
    pub fn locate(&mut self, t: F) -> Result<(usize, F), SplineError> {
        if !(t >= F::zero() && t <= F::one()) {
            return Err(SplineError::InvalidParameter {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        self.ensure_computed()?;

        let target = self.total_length() * t;
        let last = self.segments.len() - 1;

        // First segment whose cumulative end reaches the target.
        let index = self.cumulative.partition_point(|&end| end < target);
        if index > last {
            return Ok((last, F::one()));
        }

        let start = if index == 0 {
            F::zero()
        } else {
            self.cumulative[index - 1]
        };
        let length = self.segments[index].length();
        let local = if length > F::zero() {
            ((target - start) / length).max(F::zero()).min(F::one())
        } else {
            F::zero()
        };
        Ok((index, local))
    }

    /// The point at fraction `t` of the total arc length.
    ///
    /// # Errors
    ///
    /// As for [`locate`](Self::locate).
    pub fn coordinates_at(&mut self, t: F) -> Result<V, SplineError> {
        let (index, local) = self.locate(t)?;
        Ok(self.segments[index].position_at(local))
    }

    /// The unit tangent at fraction `t` of the total arc length.
    ///
    /// # Errors
    ///
    /// As for [`locate`](Self::locate), plus
    /// [`SplineError::DegenerateSegment`] where the curve has no direction.
    pub fn tangent_at(&mut self, t: F) -> Result<V, SplineError> {
        let (index, local) = self.locate(t)?;
        self.segments[index].tangent_at(local)
    }

    fn invalidate(&mut self) {
        self.segments.clear();
        self.cumulative.clear();
        self.state = if self.is_computable() {
            SplineState::Dirty
        } else {
            SplineState::Uncomputed
        };
    }

    fn ensure_computed(&mut self) -> Result<(), SplineError> {
        match self.state {
            SplineState::Computed => Ok(()),
            SplineState::Dirty => self.recompute(),
            SplineState::Uncomputed => Err(SplineError::NotComputed),
        }
    }

    fn total_length(&self) -> F {
        self.cumulative.last().copied().unwrap_or_else(F::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Vec2, Vec3};
    use approx::assert_relative_eq;

    fn open(knots: &[Vec2<f64>]) -> Spline<f64, Vec2<f64>> {
        Spline::with_knots(SplineConfig::new(1e-3), knots.iter().copied()).unwrap()
    }

    fn closed(knots: &[Vec2<f64>]) -> Spline<f64, Vec2<f64>> {
        Spline::with_knots(SplineConfig::new(1e-3).closed(true), knots.iter().copied()).unwrap()
    }

    fn l_shape() -> Vec<Vec2<f64>> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ]
    }

    fn square() -> Vec<Vec2<f64>> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    fn wave() -> Vec<Vec2<f64>> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(5.0, 4.5),
            Vec2::new(9.0, -2.0),
            Vec2::new(14.0, 1.0),
        ]
    }

    fn assert_close(a: Vec2<f64>, b: Vec2<f64>, epsilon: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = epsilon);
        assert_relative_eq!(a.y, b.y, epsilon = epsilon);
    }

    #[test]
    fn test_open_endpoints() {
        for knots in [l_shape(), wave(), square()] {
            let mut spline = open(&knots);
            assert_close(spline.coordinates_at(0.0).unwrap(), knots[0], 1e-9);
            assert_close(
                spline.coordinates_at(1.0).unwrap(),
                knots[knots.len() - 1],
                1e-9,
            );
        }
    }

    #[test]
    fn test_closed_loop_closes() {
        for knots in [square(), wave(), l_shape()] {
            let mut spline = closed(&knots);
            let last = spline.segment_count() - 1;
            assert_eq!(spline.segment_knots(last).unwrap().1, knots[0]);
            assert_eq!(spline.segment(last).unwrap().position_at(1.0), knots[0]);

            let start = spline.coordinates_at(0.0).unwrap();
            let end = spline.coordinates_at(1.0).unwrap();
            assert_close(start, end, 1e-9);
            assert_close(start, knots[0], 1e-9);
        }
    }

    #[test]
    fn test_closed_tangent_is_continuous_at_seam() {
        let mut spline = closed(&wave());
        let last = spline.segment_count() - 1;
        let end = spline.segment(last).unwrap().tangent_at(1.0).unwrap();
        let start = spline.segment(0).unwrap().tangent_at(0.0).unwrap();
        assert_close(end, start, 1e-9);
        assert_close(
            spline.tangent_at(0.0).unwrap(),
            spline.tangent_at(1.0).unwrap(),
            1e-9,
        );
    }

    #[test]
    fn test_segment_count() {
        let mut spline = open(&wave());
        assert_eq!(spline.segment_count(), 4);
        assert_eq!(spline.segments().unwrap().len(), 4);

        let mut spline = closed(&wave());
        assert_eq!(spline.segment_count(), 5);
        assert_eq!(spline.segments().unwrap().len(), 5);

        let spline = closed(&[Vec2::new(1.0, 1.0)]);
        assert_eq!(spline.segment_count(), 0);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut spline = closed(&wave());
        spline.recompute().unwrap();
        let segments = spline.segments().unwrap().to_vec();
        let length = spline.length().unwrap();

        spline.recompute().unwrap();
        assert_eq!(spline.segments().unwrap(), segments.as_slice());
        assert_eq!(spline.length().unwrap(), length);
    }

    #[test]
    fn test_length_converges_with_resolution() {
        let length_at = |resolution: usize| {
            let config = SplineConfig::new(1e-3).with_resolution(resolution);
            let mut spline = Spline::with_knots(config, wave()).unwrap();
            spline.length().unwrap()
        };
        let coarse = length_at(10);
        let medium = length_at(100);
        let fine = length_at(1000);
        assert!((fine - medium).abs() < (medium - coarse).abs());
    }

    #[test]
    fn test_duplicate_knots_use_weight_floor() {
        let knots = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(9.0, 2.0),
        ];
        let mut spline = open(&knots);
        spline.recompute().unwrap();
        for i in 0..=20 {
            let p = spline.coordinates_at(i as f64 / 20.0).unwrap();
            assert!(p.x.is_finite() && p.y.is_finite());
        }
        for i in 0..spline.segment_count() {
            let (p1, p2) = spline.control_points(i).unwrap();
            assert!(p1.x.is_finite() && p2.y.is_finite());
        }
    }

    #[test]
    fn test_coincident_knots_are_degenerate() {
        let p = Vec2::new(2.0, 3.0);
        let mut spline = open(&[p, p]);
        assert_relative_eq!(spline.length().unwrap(), 0.0, epsilon = 1e-9);
        assert_close(spline.coordinates_at(0.5).unwrap(), p, 1e-12);
        assert_eq!(spline.tangent_at(0.5), Err(SplineError::DegenerateSegment));
    }

    #[test]
    fn test_closed_coincident_knots_are_degenerate() {
        for p in [Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0), Vec2::new(-40.0, 7.5)] {
            let mut spline = closed(&[p, p, p]);
            assert_eq!(spline.segment_count(), 3);
            assert_relative_eq!(spline.length().unwrap(), 0.0, epsilon = 1e-9);
            for t in [0.0, 0.2, 0.5, 1.0] {
                assert_close(spline.coordinates_at(t).unwrap(), p, 1e-12);
                assert_eq!(spline.tangent_at(t), Err(SplineError::DegenerateSegment));
            }
            for i in 0..3 {
                assert_eq!(
                    spline.segment(i).unwrap().tangent_at(0.2),
                    Err(SplineError::DegenerateSegment)
                );
            }
        }
    }

    #[test]
    fn test_scenario_l_shape() {
        let mut spline = open(&l_shape());
        assert_eq!(spline.segment_count(), 2);
        assert_close(spline.coordinates_at(0.0).unwrap(), Vec2::new(0.0, 0.0), 1e-9);
        assert_close(spline.coordinates_at(1.0).unwrap(), Vec2::new(10.0, 10.0), 1e-9);

        // The curve passes through every knot, so it is at least as long as
        // the knot polyline, but it stays close to it.
        let length = spline.length().unwrap();
        assert!(length >= 20.0 - 1e-9);
        assert!(length < 20.0 * 1.25);
    }

    #[test]
    fn test_scenario_square() {
        let mut spline = closed(&square());
        assert_eq!(spline.segment_count(), 4);

        let center = Vec2::new(5.0, 5.0);
        let rotate = |p: Vec2<f64>| center + (p - center).perpendicular();
        for i in 0..4 {
            let (p1, p2) = spline.control_points(i).unwrap();
            let (q1, q2) = spline.control_points((i + 1) % 4).unwrap();
            assert_close(rotate(p1), q1, 1e-9);
            assert_close(rotate(p2), q2, 1e-9);
        }

        // Equal segments: a quarter of the length reaches the second knot.
        assert_close(spline.coordinates_at(0.25).unwrap(), Vec2::new(10.0, 0.0), 1e-6);
    }

    #[test]
    fn test_scenario_single_knot() {
        let mut spline = open(&[Vec2::new(1.0, 2.0)]);
        assert!(!spline.is_computable());
        assert_eq!(spline.state(), SplineState::Uncomputed);
        assert_eq!(
            spline.recompute(),
            Err(SplineError::InsufficientKnots { count: 1 })
        );
        assert_eq!(spline.length(), Err(SplineError::NotComputed));
        assert_eq!(spline.coordinates_at(0.5), Err(SplineError::NotComputed));
        assert_eq!(spline.tangent_at(0.5), Err(SplineError::NotComputed));
    }

    #[test]
    fn test_mutation_marks_dirty() {
        let mut spline = open(&l_shape());
        assert_eq!(spline.state(), SplineState::Dirty);
        let before = spline.length().unwrap();
        assert_eq!(spline.state(), SplineState::Computed);

        spline.add_knot(Vec2::new(0.0, 10.0));
        assert_eq!(spline.state(), SplineState::Dirty);
        assert_eq!(spline.segment_count(), 3);

        let after = spline.length().unwrap();
        assert_eq!(spline.state(), SplineState::Computed);
        assert!(after > before && after > 30.0);
        assert_close(spline.coordinates_at(1.0).unwrap(), Vec2::new(0.0, 10.0), 1e-9);

        assert_eq!(spline.remove_knot(&Vec2::new(0.0, 10.0)), 1);
        assert_eq!(spline.state(), SplineState::Dirty);
        assert_relative_eq!(spline.length().unwrap(), before, epsilon = 1e-12);
    }

    #[test]
    fn test_removal_below_two_knots() {
        let mut spline = open(&l_shape());
        spline.recompute().unwrap();
        let removed = spline.remove_knots(&[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]);
        assert_eq!(removed, 2);
        assert_eq!(spline.state(), SplineState::Uncomputed);
        assert_eq!(spline.segment(0).err(), Some(SplineError::NotComputed));
    }

    #[test]
    fn test_remove_knots_removes_all_copies() {
        let p = Vec2::new(1.0, 1.0);
        let mut spline = open(&[p, Vec2::new(2.0, 0.0), p, Vec2::new(3.0, 3.0)]);
        assert_eq!(spline.remove_knot(&p), 2);
        assert_eq!(spline.knots(), &[Vec2::new(2.0, 0.0), Vec2::new(3.0, 3.0)]);
        assert_eq!(spline.remove_knot(&p), 0);
    }

    #[test]
    fn test_segment_index_out_of_bounds() {
        let mut spline = open(&l_shape());
        assert_eq!(
            spline.control_points(2),
            Err(SplineError::SegmentIndexOutOfBounds { index: 2, count: 2 })
        );
        assert_eq!(
            spline.segment_knots(7),
            Err(SplineError::SegmentIndexOutOfBounds { index: 7, count: 2 })
        );
        assert_eq!(
            spline.segment_knots(1).unwrap(),
            (Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0))
        );
    }

    #[test]
    fn test_invalid_parameter() {
        let mut spline = open(&l_shape());
        assert_eq!(
            spline.coordinates_at(1.5),
            Err(SplineError::InvalidParameter { t: 1.5 })
        );
        assert_eq!(
            spline.tangent_at(-0.1),
            Err(SplineError::InvalidParameter { t: -0.1 })
        );
        assert!(matches!(
            spline.locate(f64::NAN),
            Err(SplineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let result: Result<Spline<f64, Vec2<f64>>, _> = Spline::new(SplineConfig::new(0.0));
        assert!(matches!(result, Err(SplineError::InvalidConfig(_))));
    }

    #[test]
    fn test_locate_is_arc_length_based() {
        // Segments of length 1 and 3 on a straight line.
        let mut spline = open(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(4.0, 0.0),
        ]);
        let total = spline.length().unwrap();
        let first = spline.segment(0).unwrap().length();
        let fraction = first / total;

        let (index, local) = spline.locate(fraction * 0.5).unwrap();
        assert_eq!(index, 0);
        assert_relative_eq!(local, 0.5, epsilon = 1e-9);

        let (index, local) = spline.locate(fraction + (1.0 - fraction) * 0.5).unwrap();
        assert_eq!(index, 1);
        assert_relative_eq!(local, 0.5, epsilon = 1e-9);

        let (index, local) = spline.locate(1.0).unwrap();
        assert_eq!(index, 1);
        assert_relative_eq!(local, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_coordinates_progress_monotonically_along_line() {
        let mut spline = open(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(8.0, 0.0),
        ]);
        let mut previous = -1.0;
        for i in 0..=50 {
            let p = spline.coordinates_at(i as f64 / 50.0).unwrap();
            assert!(p.x > previous);
            assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
            previous = p.x;
        }
    }

    #[test]
    fn test_tangent_direction() {
        let mut spline = open(&[Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)]);
        assert_close(spline.tangent_at(0.3).unwrap(), Vec2::new(1.0, 0.0), 1e-12);
    }

    #[test]
    fn test_three_dimensional_closed_spline() {
        let knots = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.5),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(0.0, -1.0, 0.5),
        ];
        let config = SplineConfig::new(1e-3).closed(true).with_resolution(200);
        let mut spline = Spline::with_knots(config, knots).unwrap();
        let start = spline.coordinates_at(0.0).unwrap();
        let end = spline.coordinates_at(1.0).unwrap();
        assert_relative_eq!(start.distance(end), 0.0, epsilon = 1e-9);
        assert!(spline.length().unwrap() > 4.0 * 2.0_f64.sqrt());
    }

    #[test]
    fn test_f32_spline() {
        let config = SplineConfig::new(1e-3_f32);
        let mut spline = Spline::with_knots(
            config,
            [
                Vec2::new(0.0_f32, 0.0),
                Vec2::new(1.0, 2.0),
                Vec2::new(3.0, 1.0),
            ],
        )
        .unwrap();
        let end = spline.coordinates_at(1.0).unwrap();
        assert!((end.x - 3.0).abs() < 1e-4 && (end.y - 1.0).abs() < 1e-4);
    }
}
