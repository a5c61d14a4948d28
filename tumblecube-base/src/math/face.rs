//! [`Face`] type and related items.

use core::ops;

use euclid::Vector3D;
use exhaust::Exhaust;
use num_traits::{One, Zero};

use crate::math::{Axis, FreeVector, GridCoordinate, GridVector, Quaternion};

/// Identifies a face of a [`Cube`](crate::math::Cube), or equivalently a unit vector
/// along a coordinate axis of the grid.
///
/// The names are those of the puzzle's fixed viewpoint: `Right` is +x, `Top` is +y,
/// and `Front` is +z **in grid space**. Render space mirrors the z axis (see
/// [`Face::world_normal()`]), so `Front` points toward the camera; this mirroring is a
/// deliberate, load-bearing convention and is corrected for in [`forward_vector()`].
#[derive(Clone, Copy, Debug, Eq, Exhaust, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
#[repr(u8)]
pub enum Face {
    /// Negative x; the face whose normal vector is `(-1, 0, 0)`.
    Left,
    /// Negative y; the face whose normal vector is `(0, -1, 0)`; downward.
    Bottom,
    /// Negative z; the face whose normal vector is `(0, 0, -1)` in grid space,
    /// pointing away from the camera.
    Back,
    /// Positive x; the face whose normal vector is `(1, 0, 0)`.
    Right,
    /// Positive y; the face whose normal vector is `(0, 1, 0)`; upward.
    Top,
    /// Positive z; the face whose normal vector is `(0, 0, 1)` in grid space,
    /// pointing toward the camera.
    Front,
}

impl Face {
    /// All the values of [`Face`].
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Bottom,
        Face::Back,
        Face::Right,
        Face::Top,
        Face::Front,
    ];

    /// Returns which face is the opposite of this one.
    ///
    /// ```
    /// # extern crate tumblecube_base as tumblecube;
    /// use tumblecube::math::Face;
    ///
    /// assert_eq!(Face::Top.opposite(), Face::Bottom);
    /// assert_eq!(Face::Front.opposite(), Face::Back);
    /// ```
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Face {
        match self {
            Face::Left => Face::Right,
            Face::Bottom => Face::Top,
            Face::Back => Face::Front,
            Face::Right => Face::Left,
            Face::Top => Face::Bottom,
            Face::Front => Face::Back,
        }
    }

    /// Returns the coordinate axis this face's normal lies along.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::X,
            Face::Bottom | Face::Top => Axis::Y,
            Face::Back | Face::Front => Axis::Z,
        }
    }

    /// Returns whether this face lies along the positive direction of its axis.
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Face::Right | Face::Top | Face::Front)
    }

    /// Returns whether this face lies along the negative direction of its axis.
    #[inline]
    pub const fn is_negative(self) -> bool {
        !self.is_positive()
    }

    /// Returns the face's normal as a unit vector in grid space: its “relative up”,
    /// the single-cell offset from a cube to its neighbor through this face.
    ///
    /// The result type is generic so that it may be used as either a [`GridVector`]
    /// or a [`FreeVector`].
    #[inline]
    pub fn normal_vector<S, U>(self) -> Vector3D<S, U>
    where
        S: Zero + One + ops::Neg<Output = S>,
    {
        match self {
            Face::Left => Vector3D::new(-S::one(), S::zero(), S::zero()),
            Face::Bottom => Vector3D::new(S::zero(), -S::one(), S::zero()),
            Face::Back => Vector3D::new(S::zero(), S::zero(), -S::one()),
            Face::Right => Vector3D::new(S::one(), S::zero(), S::zero()),
            Face::Top => Vector3D::new(S::zero(), S::one(), S::zero()),
            Face::Front => Vector3D::new(S::zero(), S::zero(), S::one()),
        }
    }

    /// Returns the face's normal as a unit vector in world (render) space, which
    /// mirrors the grid's z axis: `Front` points toward world −z.
    #[inline]
    pub fn world_normal(self) -> FreeVector {
        let mut v: FreeVector = self.normal_vector();
        v.z = -v.z;
        v
    }

    /// Returns the canonical orientation of a body standing on (or a cube resting
    /// with its top toward) this face: the rotation carrying world up, `(0, 1, 0)`,
    /// onto [`Face::world_normal()`].
    ///
    /// [`Face::Top`] is the identity. The choice of twist about the normal is
    /// arbitrary, but convenient to have the arbitrary choice already made.
    #[inline]
    pub fn orientation(self) -> Quaternion {
        use euclid::Angle;
        match self {
            Face::Top => Quaternion::identity(),
            Face::Bottom => Quaternion::around_x(Angle::pi()),
            Face::Right => Quaternion::around_z(-Angle::frac_pi_2()),
            Face::Left => Quaternion::around_z(Angle::frac_pi_2()),
            // Remember that world z is mirrored: Back faces toward world +z.
            Face::Back => Quaternion::around_x(Angle::frac_pi_2()),
            Face::Front => Quaternion::around_x(-Angle::frac_pi_2()),
        }
    }

    /// Dot product of this face (considered as a unit vector) and a vector.
    #[inline]
    pub fn dot<S, U>(self, vector: Vector3D<S, U>) -> S
    where
        S: Zero + One + ops::Neg<Output = S> + ops::Add<Output = S> + ops::Mul<Output = S>,
    {
        self.normal_vector::<S, U>().dot(vector)
    }
}

/// The [`Face::opposite`].
impl ops::Neg for Face {
    type Output = Face;
    #[inline]
    fn neg(self) -> Self::Output {
        self.opposite()
    }
}

impl TryFrom<GridVector> for Face {
    /// Returns the original vector on failure.
    /// (An error message would probably be too lacking context to be helpful.)
    type Error = GridVector;

    /// Recovers a [`Face`] from its [`normal_vector`](Face::normal_vector), provided
    /// that it is a unit vector along a grid axis.
    #[inline]
    fn try_from(value: GridVector) -> Result<Self, Self::Error> {
        use Face::*;
        match value {
            v if v == Left.normal_vector() => Ok(Left),
            v if v == Bottom.normal_vector() => Ok(Bottom),
            v if v == Back.normal_vector() => Ok(Back),
            v if v == Right.normal_vector() => Ok(Right),
            v if v == Top.normal_vector() => Ok(Top),
            v if v == Front.normal_vector() => Ok(Front),
            not_unit_vector => Err(not_unit_vector),
        }
    }
}

/// Computes the direction a body faces from the faces its up and right sides point
/// toward, as a cross product corrected for the mirrored z axis: the result is a grid
/// vector even though handedness is defined in world space.
///
/// ```
/// # extern crate tumblecube_base as tumblecube;
/// use tumblecube::math::{Face, forward_vector};
///
/// // Standing on top with your right hand toward +x, you face the camera.
/// assert_eq!(forward_vector(Face::Top, Face::Right), Face::Front.normal_vector());
/// ```
#[inline]
pub fn forward_vector(up: Face, right: Face) -> GridVector {
    let mut v = up
        .normal_vector::<GridCoordinate, _>()
        .cross(right.normal_vector());
    v.z = -v.z;
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::vec3;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn assert_free_vectors_close(a: FreeVector, b: FreeVector, context: &dyn core::fmt::Debug) {
        assert!(
            (a - b).square_length() < 1e-12,
            "{a:?} != {b:?} for {context:?}"
        );
    }

    #[test]
    fn opposite_is_an_involution() {
        for face in Face::exhaust() {
            assert_ne!(face, face.opposite());
            assert_eq!(face, face.opposite().opposite());
            assert_eq!(face, -(-face));
        }
    }

    #[test]
    fn axis_matches_normal() {
        for face in Face::exhaust() {
            let normal = face.normal_vector::<i32, ()>().to_array();
            assert_eq!(normal[face.axis()].abs(), 1, "{face:?}");
            assert_eq!(face.axis(), face.opposite().axis());
        }
    }

    #[test]
    fn opposite_negates_normal() {
        for face in Face::exhaust() {
            assert_eq!(
                face.normal_vector::<i32, ()>(),
                -face.opposite().normal_vector::<i32, ()>(),
                "{face:?}"
            );
        }
    }

    #[test]
    fn try_from_round_trip() {
        for face in Face::exhaust() {
            assert_eq!(Ok(face), Face::try_from(face.normal_vector::<i32, _>()));
        }
        assert_eq!(Err(vec3(0, 0, 0)), Face::try_from(vec3(0, 0, 0)));
        assert_eq!(Err(vec3(0, 2, 0)), Face::try_from(vec3(0, 2, 0)));
        assert_eq!(Err(vec3(1, 1, 0)), Face::try_from(vec3(1, 1, 0)));
    }

    /// The world normal differs from the grid normal exactly on the z axis.
    #[rstest]
    #[case(Face::Left, vec3(-1.0, 0.0, 0.0))]
    #[case(Face::Bottom, vec3(0.0, -1.0, 0.0))]
    #[case(Face::Back, vec3(0.0, 0.0, 1.0))]
    #[case(Face::Right, vec3(1.0, 0.0, 0.0))]
    #[case(Face::Top, vec3(0.0, 1.0, 0.0))]
    #[case(Face::Front, vec3(0.0, 0.0, -1.0))]
    fn world_normal_mirrors_z(#[case] face: Face, #[case] expected: FreeVector) {
        assert_eq!(face.world_normal(), expected);
    }

    /// `orientation()` must carry world up onto the face's world normal.
    #[test]
    fn orientation_carries_up_onto_normal() {
        for face in Face::exhaust() {
            let rotated = face.orientation().transform_vector3d(vec3(0.0, 1.0, 0.0));
            assert_free_vectors_close(rotated, face.world_normal(), &face);
        }
    }

    #[test]
    fn orientations_are_normalized() {
        for face in Face::exhaust() {
            assert!(face.orientation().is_normalized(), "{face:?}");
        }
    }

    #[rstest]
    #[case(Face::Top, Face::Right, Face::Front)]
    #[case(Face::Top, Face::Front, Face::Right)]
    #[case(Face::Top, Face::Left, Face::Back)]
    #[case(Face::Bottom, Face::Right, Face::Back)]
    #[case(Face::Right, Face::Top, Face::Back)]
    // The z sign correction makes this Top, not the Bottom a plain world-space
    // cross product would give; the convention is load-bearing, not a bug.
    #[case(Face::Front, Face::Right, Face::Top)]
    fn forward_vector_cases(#[case] up: Face, #[case] right: Face, #[case] forward: Face) {
        assert_eq!(
            forward_vector(up, right),
            forward.normal_vector::<i32, _>(),
            "up {up:?} right {right:?}"
        );
    }
}
