//! Movable cubes and the handles used to refer to them.

use core::fmt;

use arcstr::ArcStr;
use manyfmt::Refmt as _;

use crate::math::{Cube, FreePoint, Quaternion, Rgba};
use crate::motion::MovementQueue;
use crate::util::ConciseDebug;

/// Stable handle to a [`Block`] within one [`World`](crate::world::World)'s arena.
///
/// Handles are never invalidated: blocks move between cells but are not
/// deleted. A `BlockId` is only meaningful to the world that issued it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BlockId(pub(crate) u32);

impl BlockId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A movable cube: one grid cell of solid matter, with the visual state a
/// renderer needs to draw it mid-roll.
///
/// The `cell` is the block's logical position, updated atomically when a roll
/// commits; `position` and `rotation` are its animated visual state, which
/// trail the logical position while the movement queue drains.
#[derive(Clone, PartialEq)]
pub struct Block {
    pub(crate) cell: Cube,
    pub(crate) position: FreePoint,
    pub(crate) rotation: Quaternion,
    pub(crate) texture: ArcStr,
    pub(crate) color: Rgba,
    pub(crate) queue: MovementQueue,
}

impl Block {
    pub(crate) fn new(cell: Cube, position: FreePoint, texture: ArcStr, color: Rgba) -> Self {
        Self {
            cell,
            position,
            rotation: Quaternion::identity(),
            texture,
            color,
            queue: MovementQueue::new(),
        }
    }

    /// The grid cell this block logically occupies.
    #[inline]
    pub fn cell(&self) -> Cube {
        self.cell
    }

    /// The block's animated world-space center.
    #[inline]
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// The block's animated orientation.
    #[inline]
    pub fn rotation(&self) -> Quaternion {
        self.rotation
    }

    /// Name of the texture a renderer should apply to this block.
    #[inline]
    pub fn texture(&self) -> &ArcStr {
        &self.texture
    }

    /// Tint color for this block.
    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// The block's in-flight animation tasks.
    #[inline]
    pub fn queue(&self) -> &MovementQueue {
        &self.queue
    }

    /// Whether this block is still animating toward its logical position.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.queue.is_moving()
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            cell,
            position,
            rotation,
            texture,
            color,
            queue,
        } = self;
        f.debug_struct("Block")
            .field("cell", cell)
            .field("position", &position.refmt(&ConciseDebug))
            .field("rotation", &rotation.refmt(&ConciseDebug))
            .field("texture", texture)
            .field("color", color)
            .field("queue", queue)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcstr::literal;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_block_is_at_rest() {
        let block = Block::new(
            Cube::new(1, 2, 3),
            FreePoint::new(10.0, 20.0, -30.0),
            literal!("stone"),
            Rgba::WHITE,
        );
        assert_eq!(block.cell(), Cube::new(1, 2, 3));
        assert_eq!(block.position(), FreePoint::new(10.0, 20.0, -30.0));
        assert_eq!(block.rotation(), Quaternion::identity());
        assert!(!block.is_moving());
    }

    #[test]
    fn block_id_is_compact() {
        assert_eq!(size_of::<BlockId>(), 4);
        assert_eq!(BlockId(7).index(), 7);
    }
}
