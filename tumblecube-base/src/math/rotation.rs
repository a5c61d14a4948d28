//! Quaternion operations shared by roll planning and movement playback.

use euclid::Rotation3D;

use crate::math::{Cube, FreeCoordinate, FreeVector};

/// A rotation in world space, represented as a unit quaternion.
///
/// The unit tags are both [`Cube`] because every rotation here maps world space to
/// world space; composition of a turn `q` onto an orientation `o` is `o.then(&q)`
/// (Hamilton product `q * o`, applying the turn about world-fixed axes). Use
/// [`turned()`] rather than calling [`Rotation3D::then()`] directly, so that the
/// result stays normalized.
pub type Quaternion = Rotation3D<FreeCoordinate, Cube, Cube>;

/// Reference vector for [`orientation_distance_squared()`]: an exact unit vector
/// aligned with no axis, so no single-axis turn leaves it fixed.
const ORIENTATION_PROBE: FreeVector = FreeVector::new(0.36, 0.48, 0.8);

/// Applies the world-space turn `turn` to `orientation` and renormalizes.
///
/// Quaternion products accumulate floating-point drift; renormalizing after every
/// composition keeps long chains of rolls well-formed.
#[inline]
#[must_use]
pub fn turned(orientation: &Quaternion, turn: &Quaternion) -> Quaternion {
    orientation.then(turn).normalize()
}

/// One interpolation step from `current` toward `target` by `fraction` (clamped to
/// `0.0..=1.0`), along the shortest arc, renormalized.
///
/// Shortest-arc handling (negating one operand when the quaternions' dot product is
/// negative, and clamping the dot before `acos`) is performed up front by
/// [`Rotation3D::slerp`].
#[inline]
#[must_use]
pub fn slerp_toward(current: &Quaternion, target: &Quaternion, fraction: FreeCoordinate) -> Quaternion {
    current.slerp(target, fraction.clamp(0.0, 1.0)).normalize()
}

/// A measure of how differently two rotations act: the squared distance between a
/// fixed probe vector rotated by each. Zero for equal rotations (and for `q` versus
/// `−q`, which act identically); used to decide when a rotation animation has
/// converged on its target.
#[inline]
pub fn orientation_distance_squared(a: &Quaternion, b: &Quaternion) -> FreeCoordinate {
    (a.transform_vector3d(ORIENTATION_PROBE) - b.transform_vector3d(ORIENTATION_PROBE))
        .square_length()
}
