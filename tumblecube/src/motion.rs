//! Movement tasks: little animations which carry an entity's visual position
//! and rotation toward targets chosen by the rules in [`crate::roll`] and
//! [`crate::world`].

use core::fmt;

use manyfmt::Refmt as _;

use crate::math::{
    Curve, FreeCoordinate, FreePoint, Quaternion, QuaternionCurve, orientation_distance_squared,
    slerp_toward,
};
use crate::time::Tick;
use crate::util::ConciseDebug;

/// A linear task completes when the squared distance to its target drops below
/// this many world units².
const LINEAR_SNAP_DISTANCE_SQUARED: FreeCoordinate = 0.5;

/// A rotation task completes when [`orientation_distance_squared`] to its
/// target drops below this value.
const ROTATION_SNAP_DISTANCE_SQUARED: FreeCoordinate = 1e-4;

/// One in-flight animation of an entity's position or rotation.
///
/// Tasks are held in a [`MovementQueue`] and advanced by [`World::step()`].
/// Each task eases toward a fixed target and, on completion, snaps exactly to
/// it, so accumulated floating-point error never leaks into the final state.
///
/// [`World::step()`]: crate::world::World::step
#[derive(Clone, PartialEq)]
#[non_exhaustive]
pub enum Movement {
    /// Ease the position toward `target` by linear interpolation.
    Linear {
        /// Final position.
        target: FreePoint,
        /// Interpolation rate in fraction-of-remaining-distance per second.
        speed: FreeCoordinate,
    },
    /// Carry the position along a Bezier arc.
    Bezier {
        /// Control points of the arc.
        curve: Curve,
        /// Current curve time, advanced by `Δt × speed` each tick.
        t: FreeCoordinate,
        /// Curve time at which the task completes; 1.0 unless the arc was
        /// truncated by a swept-collision test.
        target_t: FreeCoordinate,
        /// Curve time advance rate per second.
        speed: FreeCoordinate,
    },
    /// Ease the rotation toward `target` by spherical interpolation.
    Rotate {
        /// Final rotation.
        target: Quaternion,
        /// Interpolation rate in fraction-of-remaining-arc per second.
        speed: FreeCoordinate,
    },
    /// Carry the rotation through a chain of control quaternions.
    BezierRotate {
        /// Control quaternions.
        curve: QuaternionCurve,
        /// Current curve time, advanced by `Δt × speed` each tick.
        t: FreeCoordinate,
        /// Curve time at which the task completes.
        target_t: FreeCoordinate,
        /// Curve time advance rate per second.
        speed: FreeCoordinate,
    },
}

impl Movement {
    /// Advances this task by `dt` seconds, updating `position` and `rotation`
    /// in place. Returns whether the task completed (and has snapped the
    /// entity exactly onto its target).
    fn advance(
        &mut self,
        position: &mut FreePoint,
        rotation: &mut Quaternion,
        dt: FreeCoordinate,
    ) -> bool {
        match self {
            Movement::Linear { target, speed } => {
                *position = position.lerp(*target, (dt * *speed).clamp(0.0, 1.0));
                if (*target - *position).square_length() < LINEAR_SNAP_DISTANCE_SQUARED {
                    *position = *target;
                    true
                } else {
                    false
                }
            }
            Movement::Bezier {
                curve,
                t,
                target_t,
                speed,
            } => {
                *t += dt * *speed;
                *position = curve.evaluate(t.min(*target_t));
                *t >= *target_t
            }
            Movement::Rotate { target, speed } => {
                *rotation = slerp_toward(rotation, target, dt * *speed);
                if orientation_distance_squared(rotation, target) < ROTATION_SNAP_DISTANCE_SQUARED {
                    *rotation = *target;
                    true
                } else {
                    false
                }
            }
            Movement::BezierRotate {
                curve,
                t,
                target_t,
                speed,
            } => {
                *t += dt * *speed;
                *rotation = curve.evaluate(t.min(*target_t));
                *t >= *target_t
            }
        }
    }
}

impl fmt::Debug for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Movement::Linear { target, speed } => f
                .debug_struct("Linear")
                .field("target", &target.refmt(&ConciseDebug))
                .field("speed", speed)
                .finish(),
            Movement::Bezier {
                curve,
                t,
                target_t,
                speed,
            } => f
                .debug_struct("Bezier")
                .field("curve", curve)
                .field("t", t)
                .field("target_t", target_t)
                .field("speed", speed)
                .finish(),
            Movement::Rotate { target, speed } => f
                .debug_struct("Rotate")
                .field("target", &target.refmt(&ConciseDebug))
                .field("speed", speed)
                .finish(),
            Movement::BezierRotate {
                curve,
                t,
                target_t,
                speed,
            } => f
                .debug_struct("BezierRotate")
                .field("curve", curve)
                .field("t", t)
                .field("target_t", target_t)
                .field("speed", speed)
                .finish(),
        }
    }
}

/// The set of in-flight [`Movement`] tasks belonging to one entity.
///
/// The queue is an unordered multiset: all tasks advance concurrently each
/// tick (a roll, for example, runs a position arc and a rotation at the same
/// time), and a task is removed in the same tick it completes. No FIFO
/// ordering is implied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovementQueue(Vec<Movement>);

impl MovementQueue {
    pub(crate) const fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, task: Movement) {
        self.0.push(task);
    }

    /// Whether any task is still in flight.
    #[inline]
    pub fn is_moving(&self) -> bool {
        !self.0.is_empty()
    }

    /// Number of tasks currently in flight.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Equivalent to `!self.is_moving()`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read access to the tasks, in unspecified order.
    #[inline]
    pub fn tasks(&self) -> &[Movement] {
        &self.0
    }

    /// Advances every task by the tick's duration; completed tasks snap their
    /// entity onto their targets and are dropped.
    pub(crate) fn advance(
        &mut self,
        position: &mut FreePoint,
        rotation: &mut Quaternion,
        tick: Tick,
    ) {
        let dt = tick.delta_t_f64();
        self.0.retain_mut(|task| {
            let completed = task.advance(position, rotation, dt);
            if completed {
                log::trace!("movement task completed: {task:?}");
            }
            !completed
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::turned;
    use euclid::Angle;
    use pretty_assertions::assert_eq;

    fn run_until_idle(
        queue: &mut MovementQueue,
        position: &mut FreePoint,
        rotation: &mut Quaternion,
    ) -> usize {
        let mut ticks = 0;
        while queue.is_moving() {
            queue.advance(position, rotation, Tick::from_seconds(0.1));
            ticks += 1;
            assert!(ticks < 10_000, "playback failed to converge");
        }
        ticks
    }

    #[test]
    fn linear_converges_and_snaps() {
        let mut queue = MovementQueue::new();
        let mut position = FreePoint::new(0.0, 0.0, 0.0);
        let mut rotation = Quaternion::identity();
        let target = FreePoint::new(10.0, 0.0, -10.0);
        queue.push(Movement::Linear { target, speed: 2.0 });

        assert!(queue.is_moving());
        run_until_idle(&mut queue, &mut position, &mut rotation);
        assert_eq!(position, target);
        assert!(!queue.is_moving());
    }

    #[test]
    fn bezier_converges_and_snaps() {
        let start = FreePoint::new(0.0, 0.0, 0.0);
        let via = FreePoint::new(10.0, 0.0, 0.0);
        let end = FreePoint::new(10.0, -10.0, 0.0);
        let curve = Curve::quadratic(start, via, end);

        let mut queue = MovementQueue::new();
        let mut position = start;
        let mut rotation = Quaternion::identity();
        queue.push(Movement::Bezier {
            curve: curve.clone(),
            t: 0.0,
            target_t: 1.0,
            speed: 2.0,
        });

        run_until_idle(&mut queue, &mut position, &mut rotation);
        assert_eq!(position, end);
    }

    #[test]
    fn bezier_truncated_target() {
        let curve = Curve::quadratic(
            FreePoint::new(0.0, 0.0, 0.0),
            FreePoint::new(10.0, 0.0, 0.0),
            FreePoint::new(10.0, -10.0, 0.0),
        );
        let mut queue = MovementQueue::new();
        let mut position = FreePoint::new(0.0, 0.0, 0.0);
        let mut rotation = Quaternion::identity();
        queue.push(Movement::Bezier {
            curve: curve.clone(),
            t: 0.0,
            target_t: 0.5,
            speed: 2.0,
        });

        run_until_idle(&mut queue, &mut position, &mut rotation);
        assert_eq!(position, curve.evaluate(0.5));
    }

    #[test]
    fn rotate_converges_and_snaps() {
        let mut queue = MovementQueue::new();
        let mut position = FreePoint::new(0.0, 0.0, 0.0);
        let mut rotation = Quaternion::identity();
        let target = Quaternion::around_z(Angle::frac_pi_2());
        queue.push(Movement::Rotate { target, speed: 2.0 });

        run_until_idle(&mut queue, &mut position, &mut rotation);
        assert_eq!(rotation, target);
    }

    #[test]
    fn bezier_rotate_converges_and_snaps() {
        let quarter = Quaternion::around_x(Angle::frac_pi_2());
        let start = Quaternion::identity();
        let mid = turned(&start, &quarter);
        let end = turned(&mid, &quarter);
        let curve = QuaternionCurve::new([start, mid, end]);

        let mut queue = MovementQueue::new();
        let mut position = FreePoint::new(0.0, 0.0, 0.0);
        let mut rotation = start;
        queue.push(Movement::BezierRotate {
            curve: curve.clone(),
            t: 0.0,
            target_t: 1.0,
            speed: 2.0,
        });

        run_until_idle(&mut queue, &mut position, &mut rotation);
        assert_eq!(rotation, curve.evaluate(1.0));
    }

    /// Tasks in one queue advance in the same tick, and each is removed in
    /// the tick it completes regardless of insertion order.
    #[test]
    fn queue_advances_concurrently() {
        let mut queue = MovementQueue::new();
        let mut position = FreePoint::new(0.0, 0.0, 0.0);
        let mut rotation = Quaternion::identity();

        // The rotate task is pushed first but takes far longer than the
        // bezier task, which has a tiny target_t.
        queue.push(Movement::Rotate {
            target: Quaternion::around_y(Angle::pi() * 0.9),
            speed: 0.5,
        });
        queue.push(Movement::Bezier {
            curve: Curve::quadratic(
                FreePoint::new(0.0, 0.0, 0.0),
                FreePoint::new(5.0, 5.0, 0.0),
                FreePoint::new(10.0, 0.0, 0.0),
            ),
            t: 0.0,
            target_t: 0.05,
            speed: 1.0,
        });
        assert_eq!(queue.len(), 2);

        // One tick is enough to finish the bezier task but not the rotation,
        // and both must have made progress.
        queue.advance(&mut position, &mut rotation, Tick::from_seconds(0.1));
        assert_eq!(queue.len(), 1);
        assert!(matches!(queue.tasks()[0], Movement::Rotate { .. }));
        assert_ne!(position, FreePoint::new(0.0, 0.0, 0.0));
        assert_ne!(rotation, Quaternion::identity());

        run_until_idle(&mut queue, &mut position, &mut rotation);
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_length_tick_makes_no_linear_progress() {
        let mut queue = MovementQueue::new();
        let mut position = FreePoint::new(0.0, 0.0, 0.0);
        let mut rotation = Quaternion::identity();
        queue.push(Movement::Linear {
            target: FreePoint::new(10.0, 0.0, 0.0),
            speed: 2.0,
        });

        queue.advance(&mut position, &mut rotation, Tick::from_seconds(0.0));
        assert_eq!(position, FreePoint::new(0.0, 0.0, 0.0));
        assert!(queue.is_moving());
    }
}
