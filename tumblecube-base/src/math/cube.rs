use core::fmt;

use crate::math::{Face, GridCoordinate, GridPoint, GridVector};
use crate::util::ConciseDebug;

/// “A cube”, in this documentation, is a unit cube in the puzzle grid, identified by
/// its integer coordinates.
///
/// The valid coordinate range is that of [`GridCoordinate`]. In practice, cubes live
/// inside some grid's bounds, which are much smaller; use the grid to validate a cube
/// produced by arithmetic before acting on it.
///
/// # Why have a dedicated type for this?
///
/// * Primarily, to avoid confusion between displacements ([`GridVector`]) and cells,
///   which causes off-by-one errors when pivoting structures.
/// * To provide convenient methods for operations on cells that aren't natural
///   operations on points.
#[derive(Clone, Copy, Eq, PartialEq)]
#[allow(missing_docs, clippy::exhaustive_structs)]
pub struct Cube {
    pub x: GridCoordinate,
    pub y: GridCoordinate,
    pub z: GridCoordinate,
}

impl core::hash::Hash for Cube {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        // Hashers work on 64-bit quantities.
        // Therefore, it may be more efficient to provide fewer inputs by packing the data into
        // chunks of at most 64 bits.
        (u64::from(self.x.cast_unsigned()) ^ (u64::from(self.y.cast_unsigned()) << 32)).hash(state);
        self.z.hash(state);
    }
}

impl Cube {
    /// Equal to `Cube::new(0, 0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Construct `Cube { x, y, z }` from the given coordinates.
    #[inline]
    pub const fn new(x: GridCoordinate, y: GridCoordinate, z: GridCoordinate) -> Self {
        Self { x, y, z }
    }

    /// Returns the sum of the absolute coordinate differences between `self` and `other`;
    /// the number of single-cell steps needed to travel between them.
    ///
    /// This is the distance measure used to decide which cubes roll together: a cube
    /// joins a moving structure only if it is strictly closer, by this measure, to the
    /// pushed cube than to the pivot.
    ///
    /// ```
    /// # extern crate tumblecube_base as tumblecube;
    /// use tumblecube::math::Cube;
    ///
    /// assert_eq!(Cube::new(1, 0, 0).manhattan_distance(Cube::new(0, -1, 0)), 2);
    /// ```
    ///
    /// Overflows (for distances exceeding [`GridCoordinate::MAX`]) are not handled;
    /// grid bounds keep real coordinates far smaller than that.
    #[inline]
    pub fn manhattan_distance(self, other: Self) -> GridCoordinate {
        let v = self - other;
        v.x.abs() + v.y.abs() + v.z.abs()
    }

    /// Componentwise [`GridCoordinate::checked_add()`].
    #[must_use]
    #[inline]
    pub fn checked_add(self, v: GridVector) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(v.x)?,
            y: self.y.checked_add(v.y)?,
            z: self.z.checked_add(v.z)?,
        })
    }
}

impl fmt::Debug for Cube {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { x, y, z } = self;
        write!(f, "({x:+.3?}, {y:+.3?}, {z:+.3?})")
    }
}
impl manyfmt::Fmt<ConciseDebug> for Cube {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

mod arithmetic {
    use super::*;
    use core::ops;

    impl ops::Add<GridVector> for Cube {
        type Output = Self;
        #[inline]
        fn add(self, rhs: GridVector) -> Self::Output {
            Self::from(GridPoint::from(self) + rhs)
        }
    }
    impl ops::AddAssign<GridVector> for Cube {
        #[inline]
        fn add_assign(&mut self, rhs: GridVector) {
            *self = *self + rhs
        }
    }

    impl ops::Sub<GridVector> for Cube {
        type Output = Self;
        #[inline]
        fn sub(self, rhs: GridVector) -> Self::Output {
            Self::from(GridPoint::from(self) - rhs)
        }
    }

    impl ops::Sub<Cube> for Cube {
        type Output = GridVector;
        #[inline]
        fn sub(self, rhs: Cube) -> Self::Output {
            GridPoint::from(self) - GridPoint::from(rhs)
        }
    }

    impl ops::Add<Face> for Cube {
        type Output = Self;
        #[inline]
        fn add(self, rhs: Face) -> Self::Output {
            self + rhs.normal_vector()
        }
    }
    impl ops::AddAssign<Face> for Cube {
        #[inline]
        fn add_assign(&mut self, rhs: Face) {
            *self += rhs.normal_vector()
        }
    }
}

mod conversion {
    use super::*;

    impl From<Cube> for [GridCoordinate; 3] {
        #[inline]
        fn from(Cube { x, y, z }: Cube) -> [GridCoordinate; 3] {
            [x, y, z]
        }
    }
    impl From<Cube> for GridPoint {
        #[inline]
        fn from(Cube { x, y, z }: Cube) -> GridPoint {
            GridPoint::new(x, y, z)
        }
    }

    impl From<[GridCoordinate; 3]> for Cube {
        #[inline]
        fn from([x, y, z]: [GridCoordinate; 3]) -> Self {
            Self { x, y, z }
        }
    }
    impl From<GridPoint> for Cube {
        #[inline]
        fn from(GridPoint { x, y, z, _unit }: GridPoint) -> Self {
            Self { x, y, z }
        }
    }
}
