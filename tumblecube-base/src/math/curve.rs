//! Bezier interpolation for positions and rotations, used to animate rolls.

use arrayvec::ArrayVec;

use crate::math::{FreeCoordinate, FreePoint, Quaternion, slerp_toward};

/// Maximum number of control points in a [`Curve`] or [`QuaternionCurve`].
///
/// Roll arcs are 3-point quadratics; one extra slot leaves room for cubics.
pub const MAX_CONTROLS: usize = 4;

/// A Bezier curve through world-space control points, evaluated by de Casteljau
/// reduction (repeated pairwise linear interpolation).
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    controls: ArrayVec<FreePoint, MAX_CONTROLS>,
}

impl Curve {
    /// Constructs a curve from the given control points.
    ///
    /// Panics if `controls` is empty or longer than [`MAX_CONTROLS`].
    #[inline]
    #[track_caller]
    pub fn new(controls: impl IntoIterator<Item = FreePoint>) -> Self {
        let controls: ArrayVec<FreePoint, MAX_CONTROLS> = controls.into_iter().collect();
        assert!(!controls.is_empty(), "Curve requires at least one control point");
        Self { controls }
    }

    /// Constructs the quadratic `start → via → end`, the shape of every roll arc.
    #[inline]
    pub fn quadratic(start: FreePoint, via: FreePoint, end: FreePoint) -> Self {
        Self {
            controls: ArrayVec::from_iter([start, via, end]),
        }
    }

    /// Evaluates the curve at `t`, where `t == 0.0` is the first control point and
    /// `t == 1.0` the last. Values outside that range extrapolate.
    #[inline]
    pub fn evaluate(&self, t: FreeCoordinate) -> FreePoint {
        let mut points = self.controls.clone();
        while points.len() > 1 {
            for i in 0..points.len() - 1 {
                points[i] = points[i].lerp(points[i + 1], t);
            }
            points.truncate(points.len() - 1);
        }
        points[0]
    }
}

/// A Bezier curve through rotations, evaluated like [`Curve`] but with each pairwise
/// interpolation a shortest-arc slerp (renormalized at every step).
///
/// Half rolls animate through one of these: current orientation, the quarter-turned
/// orientation, and the half-turned orientation as controls.
#[derive(Clone, Debug, PartialEq)]
pub struct QuaternionCurve {
    controls: ArrayVec<Quaternion, MAX_CONTROLS>,
}

impl QuaternionCurve {
    /// Constructs a curve from the given control rotations.
    ///
    /// Panics if `controls` is empty or longer than [`MAX_CONTROLS`].
    #[inline]
    #[track_caller]
    pub fn new(controls: impl IntoIterator<Item = Quaternion>) -> Self {
        let controls: ArrayVec<Quaternion, MAX_CONTROLS> = controls.into_iter().collect();
        assert!(
            !controls.is_empty(),
            "QuaternionCurve requires at least one control rotation"
        );
        Self { controls }
    }

    /// Evaluates the curve at `t ∈ 0.0..=1.0`.
    #[inline]
    pub fn evaluate(&self, t: FreeCoordinate) -> Quaternion {
        let mut rotations = self.controls.clone();
        while rotations.len() > 1 {
            for i in 0..rotations.len() - 1 {
                rotations[i] = slerp_toward(&rotations[i], &rotations[i + 1], t);
            }
            rotations.truncate(rotations.len() - 1);
        }
        rotations[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::orientation_distance_squared;
    use euclid::{Angle, point3};

    #[test]
    fn quadratic_hits_endpoints() {
        let curve = Curve::quadratic(
            point3(0.0, 0.0, 0.0),
            point3(10.0, 0.0, 0.0),
            point3(10.0, -10.0, 0.0),
        );
        assert_eq!(curve.evaluate(0.0), point3(0.0, 0.0, 0.0));
        assert_eq!(curve.evaluate(1.0), point3(10.0, -10.0, 0.0));
    }

    #[test]
    fn quadratic_midpoint_weights() {
        // B(1/2) = P0/4 + P1/2 + P2/4, and halving is exact in binary floats.
        let curve = Curve::quadratic(
            point3(0.0, 0.0, 0.0),
            point3(4.0, 8.0, 0.0),
            point3(8.0, 0.0, 4.0),
        );
        assert_eq!(curve.evaluate(0.5), point3(4.0, 4.0, 1.0));
    }

    #[test]
    fn collinear_controls_stay_on_the_line() {
        let curve = Curve::quadratic(
            point3(0.0, 0.0, 0.0),
            point3(5.0, 0.0, 0.0),
            point3(10.0, 0.0, 0.0),
        );
        for i in 0..=10 {
            let t = FreeCoordinate::from(i) / 10.0;
            let p = curve.evaluate(t);
            assert!((p.x - 10.0 * t).abs() < 1e-9, "t={t}: {p:?}");
            assert_eq!((p.y, p.z), (0.0, 0.0), "t={t}");
        }
    }

    #[test]
    fn single_control_is_constant() {
        let curve = Curve::new([point3(1.0, 2.0, 3.0)]);
        assert_eq!(curve.evaluate(0.7), point3(1.0, 2.0, 3.0));
    }

    #[test]
    #[should_panic(expected = "at least one control point")]
    fn empty_curve_rejected() {
        let _ = Curve::new([]);
    }

    /// The chained-turn curve a half roll enqueues must pass from start to finish
    /// through the intermediate orientation.
    #[test]
    fn quaternion_curve_chains_turns() {
        let quarter = Quaternion::around_z(Angle::frac_pi_2());
        let half = Quaternion::around_z(Angle::pi());
        let curve = QuaternionCurve::new([Quaternion::identity(), quarter, half]);

        assert!(orientation_distance_squared(&curve.evaluate(0.0), &Quaternion::identity()) < 1e-12);
        assert!(orientation_distance_squared(&curve.evaluate(0.5), &quarter) < 1e-9);
        assert!(orientation_distance_squared(&curve.evaluate(1.0), &half) < 1e-12);
    }

    #[test]
    fn quaternion_curve_output_is_normalized() {
        let curve = QuaternionCurve::new([
            Quaternion::identity(),
            Quaternion::around_x(Angle::frac_pi_2()),
            Quaternion::around_x(Angle::pi()),
        ]);
        for i in 0..=8 {
            assert!(curve.evaluate(FreeCoordinate::from(i) / 8.0).is_normalized());
        }
    }
}
