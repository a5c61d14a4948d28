//! Axis-aligned integer-coordinate bounds ([`GridBounds`]) and the dense
//! cell-to-block occupancy map ([`Grid`]) inside them.

use core::fmt;
use core::ops::Range;

use itertools::iproduct;
use manyfmt::Refmt as _;

use crate::block::BlockId;
use crate::math::{Cube, GridCoordinate, GridPoint, GridSize};
use crate::util::ConciseDebug;

// -------------------------------------------------------------------------------------------------

/// Specifies the coordinate extent of a [`World`](crate::world::World), as an
/// axis-aligned box with integer coordinates.
///
/// When we refer to “a cube” in bounds, that is a unit cube which is identified
/// by the integer coordinates of its most negative corner. Hence, coordinate
/// bounds are always half-open intervals: lower inclusive and upper exclusive.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct GridBounds {
    lower_bounds: GridPoint,
    /// Constructor checks ensure this is not smaller than `lower_bounds`.
    upper_bounds: GridPoint,
}

impl GridBounds {
    /// Constructs a [`GridBounds`] from inclusive lower bounds and exclusive
    /// upper bounds.
    ///
    /// For example, if on one axis the lower bound is 5 and the upper bound is
    /// 10, then the positions where cubes can exist are numbered 5 through 9
    /// (inclusive) and the occupied volume (from a perspective of continuous
    /// rather than discrete coordinates) spans 5 to 10.
    ///
    /// Panics if any of the `upper_bounds` are less than the `lower_bounds`.
    #[track_caller]
    pub fn from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> GridBounds {
        match Self::checked_from_lower_upper(lower_bounds.into(), upper_bounds.into()) {
            Ok(bounds) => bounds,
            Err(e) => panic!("GridBounds::from_lower_upper: {e}"),
        }
    }

    /// Constructs a [`GridBounds`] from inclusive lower bounds and exclusive
    /// upper bounds.
    ///
    /// Returns [`Err`] if any of the `upper_bounds` are less than the
    /// `lower_bounds`.
    pub fn checked_from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Result<GridBounds, GridOverflowError> {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        if upper_bounds.x < lower_bounds.x
            || upper_bounds.y < lower_bounds.y
            || upper_bounds.z < lower_bounds.z
        {
            return Err(GridOverflowError(OverflowKind::Inverted {
                lower_bounds,
                upper_bounds,
            }));
        }
        Ok(GridBounds {
            lower_bounds,
            upper_bounds,
        })
    }

    /// Constructs a [`GridBounds`] from coordinate lower bounds and sizes.
    ///
    /// Panics if the sizes overflow the coordinate range.
    #[track_caller]
    pub fn from_lower_size(
        lower_bounds: impl Into<GridPoint>,
        size: impl Into<GridSize>,
    ) -> GridBounds {
        match Self::checked_from_lower_size(lower_bounds.into(), size.into()) {
            Ok(bounds) => bounds,
            Err(e) => panic!("GridBounds::from_lower_size: {e}"),
        }
    }

    /// Constructs a [`GridBounds`] from coordinate lower bounds and sizes.
    ///
    /// Returns [`Err`] if the sizes overflow the coordinate range.
    pub fn checked_from_lower_size(
        lower_bounds: impl Into<GridPoint>,
        size: impl Into<GridSize>,
    ) -> Result<GridBounds, GridOverflowError> {
        fn add_size(lower_bounds: GridPoint, size: GridSize) -> Option<GridPoint> {
            Some(GridPoint::new(
                lower_bounds.x.checked_add_unsigned(size.width)?,
                lower_bounds.y.checked_add_unsigned(size.height)?,
                lower_bounds.z.checked_add_unsigned(size.depth)?,
            ))
        }
        let lower_bounds = lower_bounds.into();
        let size = size.into();
        let upper_bounds = add_size(lower_bounds, size)
            .ok_or(GridOverflowError(OverflowKind::OverflowedSize {
                lower_bounds,
                size,
            }))?;
        Ok(GridBounds {
            lower_bounds,
            upper_bounds,
        })
    }

    /// Inclusive lower bounds on cube coordinates, or the most negative corner.
    #[inline]
    pub fn lower_bounds(&self) -> GridPoint {
        self.lower_bounds
    }

    /// Exclusive upper bounds on cube coordinates, or the most positive corner.
    #[inline]
    pub fn upper_bounds(&self) -> GridPoint {
        self.upper_bounds
    }

    /// Size of the bounds in each axis; equivalent to
    /// `self.upper_bounds() - self.lower_bounds()`, except that the result is
    /// unsigned (which is necessary so that it cannot overflow).
    #[inline]
    pub fn size(&self) -> GridSize {
        // Two’s complement trick: if the subtraction wraps, the conversion to u32
        // still yields the true extent, which a plain `-` under overflow checks
        // would not. Naming `i32` here ties this to the numeric type of
        // `GridCoordinate`, so changing that type fails to compile rather than
        // silently wrapping differently.
        GridSize::new(
            i32::wrapping_sub(self.upper_bounds.x, self.lower_bounds.x).cast_unsigned(),
            i32::wrapping_sub(self.upper_bounds.y, self.lower_bounds.y).cast_unsigned(),
            i32::wrapping_sub(self.upper_bounds.z, self.lower_bounds.z).cast_unsigned(),
        )
    }

    /// The number of cubes in the bounds, or [`None`] if it is greater than
    /// [`usize::MAX`].
    pub fn volume(&self) -> Option<usize> {
        let size = self.size();
        let mut volume = 1usize;
        for dim in [size.width, size.height, size.depth] {
            volume = volume.checked_mul(usize::try_from(dim).ok()?)?;
        }
        Some(volume)
    }

    /// The range of X coordinates for cubes within the bounds.
    #[inline]
    pub fn x_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.x..self.upper_bounds.x
    }

    /// The range of Y coordinates for cubes within the bounds.
    #[inline]
    pub fn y_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.y..self.upper_bounds.y
    }

    /// The range of Z coordinates for cubes within the bounds.
    #[inline]
    pub fn z_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.z..self.upper_bounds.z
    }

    /// Returns whether the bounds include the given cube in their volume.
    ///
    /// ```
    /// use tumblecube::grid::GridBounds;
    /// use tumblecube::math::Cube;
    ///
    /// let bounds = GridBounds::from_lower_upper([4, 4, 4], [10, 10, 10]);
    /// assert!(!bounds.contains_cube(Cube::new(3, 5, 5)));
    /// assert!(bounds.contains_cube(Cube::new(4, 5, 5)));
    /// assert!(bounds.contains_cube(Cube::new(9, 5, 5)));
    /// assert!(!bounds.contains_cube(Cube::new(10, 5, 5)));
    /// ```
    #[inline]
    pub fn contains_cube(&self, cube: Cube) -> bool {
        self.index(cube).is_some()
    }

    /// Iterates over all cubes in the bounds, in the same order as
    /// [`Self::index()`] (x major, z minor).
    pub fn interior_iter(self) -> impl Iterator<Item = Cube> {
        iproduct!(self.x_range(), self.y_range(), self.z_range())
            .map(|(x, y, z)| Cube::new(x, y, z))
    }

    /// Determines whether the cube lies within the bounds and, if it does,
    /// returns the flattened array index for it.
    pub(crate) fn index(&self, cube: Cube) -> Option<usize> {
        let size = self.size();

        // This might overflow and wrap, but if it does, the result will still be out
        // of bounds, just in the other direction, because wrapping subtraction is an
        // injective mapping of integers, and every in-bounds maps to in-bounds, so
        // every out-of-bounds must also map to out-of-bounds.
        let deoffsetted = GridPoint::new(
            cube.x.wrapping_sub(self.lower_bounds.x),
            cube.y.wrapping_sub(self.lower_bounds.y),
            cube.z.wrapping_sub(self.lower_bounds.z),
        );

        // Bounds check, expressed as a single unsigned comparison per axis.
        if (deoffsetted.x as u32 >= size.width)
            | (deoffsetted.y as u32 >= size.height)
            | (deoffsetted.z as u32 >= size.depth)
        {
            return None;
        }

        // Wrapping arithmetic is correct here because the factors were all
        // checked to fit when the grid's storage was allocated.
        Some(
            ((deoffsetted.x as usize)
                .wrapping_mul(size.height as usize)
                .wrapping_add(deoffsetted.y as usize))
            .wrapping_mul(size.depth as usize)
            .wrapping_add(deoffsetted.z as usize),
        )
    }
}

impl fmt::Debug for GridBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GridBounds")
            .field(&self.x_range())
            .field(&self.y_range())
            .field(&self.z_range())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// Error when a [`GridBounds`] or [`Grid`] cannot be constructed from the given input.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[displaydoc("{0}")]
pub struct GridOverflowError(OverflowKind);

impl std::error::Error for GridOverflowError {}

/// Error details for [`GridOverflowError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OverflowKind {
    Inverted {
        lower_bounds: GridPoint,
        upper_bounds: GridPoint,
    },
    OverflowedSize {
        lower_bounds: GridPoint,
        size: GridSize,
    },
    OverflowedVolume {
        bounds: GridBounds,
    },
}

impl fmt::Display for OverflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowKind::Inverted {
                lower_bounds,
                upper_bounds,
            } => {
                write!(
                    f,
                    "GridBounds's lower bounds {} were greater than upper bounds {}",
                    lower_bounds.refmt(&ConciseDebug),
                    upper_bounds.refmt(&ConciseDebug),
                )
            }
            OverflowKind::OverflowedSize { lower_bounds, size } => {
                write!(
                    f,
                    "GridBounds's size {size} plus lower bounds {lower_bounds} overflows",
                    lower_bounds = lower_bounds.refmt(&ConciseDebug),
                    size = size.refmt(&ConciseDebug),
                )
            }
            OverflowKind::OverflowedVolume { bounds } => {
                write!(f, "volume of {bounds:?} is too large to allocate")
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Dense map from cube cells to the blocks occupying them.
///
/// Probes outside the bounds read as vacant; writes outside the bounds are a
/// programming error.
#[derive(Clone, Eq, PartialEq)]
pub(crate) struct Grid {
    bounds: GridBounds,
    contents: Box<[Option<BlockId>]>,
}

impl Grid {
    pub(crate) fn new(bounds: GridBounds) -> Result<Self, GridOverflowError> {
        let volume = bounds
            .volume()
            .ok_or(GridOverflowError(OverflowKind::OverflowedVolume { bounds }))?;
        Ok(Self {
            bounds,
            contents: vec![None; volume].into_boxed_slice(),
        })
    }

    pub(crate) fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Returns the block occupying `cube`, or [`None`] if the cell is vacant
    /// or out of bounds.
    #[inline]
    pub(crate) fn get(&self, cube: Cube) -> Option<BlockId> {
        self.bounds.index(cube).and_then(|index| self.contents[index])
    }

    #[inline]
    pub(crate) fn is_occupied(&self, cube: Cube) -> bool {
        self.get(cube).is_some()
    }

    /// Writes the occupancy of an in-bounds cell.
    ///
    /// An out-of-bounds write indicates a bookkeeping bug in the caller and is
    /// fatal in debug builds.
    pub(crate) fn set(&mut self, cube: Cube, contents: Option<BlockId>) {
        match self.bounds.index(cube) {
            Some(index) => self.contents[index] = contents,
            None => debug_assert!(false, "Grid::set out of bounds: {cube:?}"),
        }
    }

    /// Iterates over all occupied cells, in index order.
    pub(crate) fn iter_occupied(&self) -> impl Iterator<Item = (Cube, BlockId)> {
        self.bounds
            .interior_iter()
            .zip(self.contents.iter())
            .filter_map(|(cube, &contents)| contents.map(|id| (cube, id)))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("bounds", &self.bounds)
            .field("occupied", &self.iter_occupied().count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_bounds() -> GridBounds {
        GridBounds::from_lower_upper([-2, -2, -2], [3, 3, 3])
    }

    #[test]
    fn bounds_debug() {
        assert_eq!(format!("{:?}", test_bounds()), "GridBounds(-2..3, -2..3, -2..3)");
    }

    #[test]
    fn bounds_from_lower_size() {
        assert_eq!(
            GridBounds::from_lower_size([-2, -2, -2], [5, 5, 5]),
            test_bounds()
        );
    }

    #[test]
    fn bounds_inverted_rejected() {
        let e = GridBounds::checked_from_lower_upper([0, 0, 0], [1, -1, 1]).unwrap_err();
        assert_eq!(
            e.to_string(),
            "GridBounds's lower bounds (+0, +0, +0) were greater than upper bounds (+1, -1, +1)"
        );
    }

    #[test]
    fn bounds_size_overflow_rejected() {
        GridBounds::checked_from_lower_size([i32::MAX - 1, 0, 0], [5, 5, 5]).unwrap_err();
    }

    #[test]
    fn size_survives_extent_beyond_i32_max() {
        // The checked constructor accepts this, so size() must not trap on the
        // wrapped subtraction; the unsigned result still has room for it.
        let bounds =
            GridBounds::checked_from_lower_upper([-2_000_000_000, 0, 0], [2_000_000_000, 1, 1])
                .unwrap();
        assert_eq!(bounds.size(), GridSize::new(4_000_000_000, 1, 1));
        assert_eq!(bounds.volume(), Some(4_000_000_000));
    }

    #[test]
    fn volume_overflow_is_a_grid_error() {
        let bounds = GridBounds::checked_from_lower_upper(
            [-2_000_000_000, -2_000_000_000, -2_000_000_000],
            [2_000_000_000, 2_000_000_000, 2_000_000_000],
        )
        .unwrap();
        assert_eq!(bounds.volume(), None);
        let e = Grid::new(bounds).unwrap_err();
        assert_eq!(
            e.to_string(),
            "volume of GridBounds(-2000000000..2000000000, -2000000000..2000000000, \
             -2000000000..2000000000) is too large to allocate"
        );
    }

    #[test]
    fn index_matches_iteration_order() {
        let bounds = GridBounds::from_lower_upper([0, 0, 0], [2, 2, 2]);
        let in_iteration_order: Vec<Cube> = bounds.interior_iter().collect();
        for (expected_index, cube) in in_iteration_order.iter().enumerate() {
            assert_eq!(bounds.index(*cube), Some(expected_index), "index of {cube:?}");
        }
        // z varies fastest, then y, then x.
        assert_eq!(
            in_iteration_order[..3],
            [Cube::new(0, 0, 0), Cube::new(0, 0, 1), Cube::new(0, 1, 0)]
        );
    }

    #[test]
    fn out_of_bounds_reads_vacant() {
        let grid = Grid::new(test_bounds()).unwrap();
        assert_eq!(grid.get(Cube::new(100, 0, 0)), None);
        assert_eq!(grid.get(Cube::new(0, -100, 0)), None);
        assert!(!grid.is_occupied(Cube::new(100, 0, 0)));
    }

    #[test]
    fn set_then_get() {
        let mut grid = Grid::new(test_bounds()).unwrap();
        let cube = Cube::new(-2, 0, 2);
        assert_eq!(grid.get(cube), None);
        grid.set(cube, Some(BlockId(3)));
        assert_eq!(grid.get(cube), Some(BlockId(3)));
        grid.set(cube, None);
        assert_eq!(grid.get(cube), None);
    }

    #[test]
    fn iter_occupied_in_order() {
        let mut grid = Grid::new(test_bounds()).unwrap();
        grid.set(Cube::new(1, 1, 1), Some(BlockId(1)));
        grid.set(Cube::new(-2, -2, -2), Some(BlockId(0)));
        assert_eq!(
            grid.iter_occupied().collect::<Vec<_>>(),
            vec![
                (Cube::new(-2, -2, -2), BlockId(0)),
                (Cube::new(1, 1, 1), BlockId(1)),
            ]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Grid::set out of bounds")]
    fn set_out_of_bounds_is_debug_fatal() {
        let mut grid = Grid::new(test_bounds()).unwrap();
        grid.set(Cube::new(100, 100, 100), Some(BlockId(0)));
    }
}
