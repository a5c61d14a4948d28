//! The agent who stands on cubes and pushes them around.

use core::fmt;

use manyfmt::Refmt as _;

use crate::block::BlockId;
use crate::math::{Face, FreeCoordinate, FreePoint, Quaternion};
use crate::motion::MovementQueue;
use crate::util::ConciseDebug;

/// The single agent in a [`World`](crate::world::World).
///
/// An actor always rides exactly one block, standing on one of its faces. Its
/// `position` and `rotation` are animated visual state, like a block's; the
/// logical state is the (`block`, `face`) pair.
#[derive(Clone, PartialEq)]
pub struct Actor {
    pub(crate) block: BlockId,
    pub(crate) face: Face,
    pub(crate) position: FreePoint,
    pub(crate) rotation: Quaternion,
    pub(crate) speed: FreeCoordinate,
    pub(crate) queue: MovementQueue,
}

impl Actor {
    pub(crate) fn new(block: BlockId, face: Face, position: FreePoint, speed: FreeCoordinate) -> Self {
        Self {
            block,
            face,
            position,
            rotation: face.orientation(),
            speed,
            queue: MovementQueue::new(),
        }
    }

    /// The block the actor is riding.
    #[inline]
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// The face of the ridden block the actor stands on.
    #[inline]
    pub fn face(&self) -> Face {
        self.face
    }

    /// The actor's animated world-space position (at the center of the face it
    /// stands on).
    #[inline]
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// The actor's animated orientation.
    #[inline]
    pub fn rotation(&self) -> Quaternion {
        self.rotation
    }

    /// Speed applied to the movement tasks this actor enqueues.
    #[inline]
    pub fn speed(&self) -> FreeCoordinate {
        self.speed
    }

    /// The actor's in-flight animation tasks.
    #[inline]
    pub fn queue(&self) -> &MovementQueue {
        &self.queue
    }

    /// Whether this actor is still animating toward its logical position.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.queue.is_moving()
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            block,
            face,
            position,
            rotation,
            speed,
            queue,
        } = self;
        f.debug_struct("Actor")
            .field("block", block)
            .field("face", face)
            .field("position", &position.refmt(&ConciseDebug))
            .field("rotation", &rotation.refmt(&ConciseDebug))
            .field("speed", speed)
            .field("queue", queue)
            .finish()
    }
}
