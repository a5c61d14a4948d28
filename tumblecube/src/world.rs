//! The [`World`]: grid, blocks, and actor together, and every operation that
//! changes them.

use core::fmt;

use arcstr::ArcStr;
use euclid::point3;

use crate::actor::Actor;
use crate::block::{Block, BlockId};
use crate::grid::{Grid, GridBounds, GridOverflowError};
use crate::math::{Cube, Face, FreeCoordinate, FreePoint, GridCoordinate, GridVector, Rgba};
use crate::motion::Movement;
use crate::roll;
use crate::time::Tick;

/// Default edge length of one grid cell in world units.
const DEFAULT_CUBE_EDGE: FreeCoordinate = 10.0;
/// Default sampling interval for swept-collision tests.
const DEFAULT_SWEEP_STEP: FreeCoordinate = 0.05;
/// Default actor movement-task speed, in task units per second.
const DEFAULT_ACTOR_SPEED: FreeCoordinate = 2.0;

// -------------------------------------------------------------------------------------------------

/// The complete state of one puzzle: a bounded grid of cubes and the actor
/// standing on one of them.
///
/// All reads and writes go through `&World` / `&mut World`; there is no
/// global registry. The two mutating entry points that implement play are
/// [`World::roll_cube()`] and [`World::move_actor()`], plus the per-tick
/// [`World::step()`] that advances animation. Both play operations are
/// best-effort: a request the geometry does not permit changes nothing.
#[derive(Clone, PartialEq)]
pub struct World {
    pub(crate) grid: Grid,
    /// Arena of all blocks; a [`BlockId`] is an index here. Blocks are never
    /// removed, so ids stay valid for the world's lifetime.
    pub(crate) blocks: Vec<Block>,
    pub(crate) actor: Actor,
    /// Edge length of one grid cell in world units.
    pub(crate) cube_edge: FreeCoordinate,
    /// Sampling interval for swept-collision tests, in curve time.
    pub(crate) sweep_step: FreeCoordinate,
}

impl World {
    /// Starts building a world with the given bounds.
    pub fn builder(bounds: GridBounds) -> WorldBuilder {
        WorldBuilder {
            bounds,
            cube_edge: DEFAULT_CUBE_EDGE,
            sweep_step: DEFAULT_SWEEP_STEP,
            actor_speed: DEFAULT_ACTOR_SPEED,
            spawns: Vec::new(),
            actor: None,
        }
    }

    /// The coordinate extent cubes may occupy.
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.grid.bounds()
    }

    /// Edge length of one grid cell in world units.
    #[inline]
    pub fn cube_edge(&self) -> FreeCoordinate {
        self.cube_edge
    }

    /// Sampling interval for swept-collision tests, in curve time.
    #[inline]
    pub fn sweep_step(&self) -> FreeCoordinate {
        self.sweep_step
    }

    /// The block occupying `cube`, or [`None`] if the cell is vacant or
    /// outside the bounds.
    #[inline]
    pub fn occupant(&self, cube: Cube) -> Option<BlockId> {
        self.grid.get(cube)
    }

    /// The block with the given id.
    ///
    /// Panics if `id` came from a different [`World`].
    #[inline]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// All blocks with their ids, in creation order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, block)| (BlockId(index as u32), block))
    }

    /// The actor.
    #[inline]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Whether the actor or any block still has animation tasks in flight.
    ///
    /// Callers driving play from input should not issue a roll or walk while
    /// this is true; the request would pile more tasks onto moving entities.
    pub fn is_moving(&self) -> bool {
        self.actor.is_moving() || self.blocks.iter().any(Block::is_moving)
    }

    /// The world-space position of the center of `cube`.
    ///
    /// World space scales grid space by [`Self::cube_edge()`] and mirrors the
    /// z axis.
    #[inline]
    pub fn cell_to_world(&self, cube: Cube) -> FreePoint {
        point3(
            FreeCoordinate::from(cube.x) * self.cube_edge,
            FreeCoordinate::from(cube.y) * self.cube_edge,
            -FreeCoordinate::from(cube.z) * self.cube_edge,
        )
    }

    /// The cell enclosing a world-space position; inverse of
    /// [`Self::cell_to_world()`] up to rounding.
    #[inline]
    pub fn world_to_cell(&self, position: FreePoint) -> Cube {
        Cube::new(
            (position.x / self.cube_edge).round() as GridCoordinate,
            (position.y / self.cube_edge).round() as GridCoordinate,
            (-position.z / self.cube_edge).round() as GridCoordinate,
        )
    }

    /// Where the actor's anchor sits when standing on the given face of the
    /// given cell: the center of that face.
    #[inline]
    pub fn standing_position(&self, cell: Cube, face: Face) -> FreePoint {
        self.cell_to_world(cell) + face.world_normal() * (self.cube_edge / 2.0)
    }

    /// Attempts to roll the cube the actor rides toward `direction`, together
    /// with everything rigidly attached to it.
    ///
    /// On success the grid and every moved block's cell change immediately,
    /// and animation tasks carry the visuals over the following ticks. A roll
    /// the geometry does not permit is a silent no-op, observable only
    /// through the unchanged state; the reason is logged at debug level.
    pub fn roll_cube(&mut self, direction: Face) {
        match roll::plan_roll(self, direction) {
            Ok(plan) => {
                log::trace!(
                    "rolling {kind:?} toward {roll:?}, landing at {landing:?}",
                    kind = plan.kind(),
                    roll = plan.roll(),
                    landing = plan.active_landing(),
                );
                roll::commit(self, &plan);
            }
            Err(reason) => log::debug!("roll toward {direction:?} rejected: {reason}"),
        }
    }

    /// Attempts to walk the actor by one grid step, keeping its standing
    /// face.
    ///
    /// The destination cell must hold a cube to stand on, and the cell beyond
    /// it along the standing face must be vacant (headroom for the actor's
    /// body). An impossible step is a silent no-op, logged at debug level.
    pub fn move_actor(&mut self, delta: GridVector) {
        let standing = self.actor.face;
        let from = self.blocks[self.actor.block.index()].cell;
        let dest = from + delta;
        let Some(dest_id) = self.grid.get(dest) else {
            log::debug!("walk by {delta:?} rejected: nothing to stand on at {dest:?}");
            return;
        };
        if self.grid.is_occupied(dest + standing) {
            log::debug!("walk by {delta:?} rejected: no headroom over {dest:?}");
            return;
        }
        let target = self.standing_position(dest, standing);
        let speed = self.actor.speed;
        self.actor.block = dest_id;
        self.actor.queue.push(Movement::Linear { target, speed });
    }

    /// Advances all in-flight movement tasks by the tick's duration.
    ///
    /// Call once per simulation tick. All entities' tasks advance together;
    /// none waits on another.
    pub fn step(&mut self, tick: Tick) {
        for block in &mut self.blocks {
            let Block {
                position,
                rotation,
                queue,
                ..
            } = block;
            queue.advance(position, rotation, tick);
        }
        let Actor {
            position,
            rotation,
            queue,
            ..
        } = &mut self.actor;
        queue.advance(position, rotation, tick);
    }

    /// Asserts the internal invariants: the grid and the blocks' cells agree
    /// exactly, and the actor rides a real block.
    ///
    /// Called after every grid mutation in debug builds.
    pub(crate) fn consistency_check(&self) {
        let mut occupied = 0;
        for (cell, id) in self.grid.iter_occupied() {
            let block = &self.blocks[id.index()];
            assert!(
                block.cell == cell,
                "grid cell {cell:?} held by the block at {:?}",
                block.cell
            );
            occupied += 1;
        }
        assert!(
            occupied == self.blocks.len(),
            "{} blocks but {occupied} occupied cells",
            self.blocks.len()
        );
        let ridden = &self.blocks[self.actor.block.index()];
        assert!(
            self.grid.get(ridden.cell) == Some(self.actor.block),
            "actor rides a block the grid does not place at {:?}",
            ridden.cell
        );
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("bounds", &self.grid.bounds())
            .field("blocks", &self.blocks.len())
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------

/// Tool for constructing new [`World`]s.
///
/// Specify the grid bounds up front, then any tuning constants, the initial
/// cubes, and the actor's starting perch; [`WorldBuilder::build()`] validates
/// the lot.
#[derive(Clone, Debug)]
#[must_use]
pub struct WorldBuilder {
    bounds: GridBounds,
    cube_edge: FreeCoordinate,
    sweep_step: FreeCoordinate,
    actor_speed: FreeCoordinate,
    spawns: Vec<(Cube, ArcStr, Rgba)>,
    actor: Option<(Cube, Face)>,
}

impl WorldBuilder {
    /// Sets the edge length of one grid cell in world units (default 10.0).
    pub fn cube_edge(mut self, cube_edge: FreeCoordinate) -> Self {
        self.cube_edge = cube_edge;
        self
    }

    /// Sets the sampling interval for swept-collision tests (default 0.05).
    ///
    /// Smaller values catch obstructions earlier along the arc at
    /// proportionally more probes per roll.
    pub fn sweep_step(mut self, sweep_step: FreeCoordinate) -> Self {
        self.sweep_step = sweep_step;
        self
    }

    /// Sets the actor's movement-task speed (default 2.0), which also governs
    /// how fast rolled cubes animate.
    pub fn actor_speed(mut self, actor_speed: FreeCoordinate) -> Self {
        self.actor_speed = actor_speed;
        self
    }

    /// Adds a cube at `cell`.
    pub fn spawn(mut self, cell: Cube, texture: impl Into<ArcStr>, color: Rgba) -> Self {
        self.spawns.push((cell, texture.into(), color));
        self
    }

    /// Places the actor standing on the given face of the cube at `cell`,
    /// which must be spawned.
    pub fn actor_on(mut self, cell: Cube, face: Face) -> Self {
        self.actor = Some((cell, face));
        self
    }

    /// Validates the configuration and constructs the [`World`].
    pub fn build(self) -> Result<World, WorldBuildError> {
        let WorldBuilder {
            bounds,
            cube_edge,
            sweep_step,
            actor_speed,
            spawns,
            actor,
        } = self;

        for (name, value) in [
            ("cube_edge", cube_edge),
            ("sweep_step", sweep_step),
            ("actor_speed", actor_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(WorldBuildError::Tuning { name, value });
            }
        }
        if u32::try_from(spawns.len()).is_err() {
            return Err(WorldBuildError::SpawnLimit);
        }

        let mut grid = Grid::new(bounds).map_err(WorldBuildError::Bounds)?;
        let cell_to_world = |cube: Cube| -> FreePoint {
            point3(
                FreeCoordinate::from(cube.x) * cube_edge,
                FreeCoordinate::from(cube.y) * cube_edge,
                -FreeCoordinate::from(cube.z) * cube_edge,
            )
        };

        let mut blocks = Vec::with_capacity(spawns.len());
        for (cell, texture, color) in spawns {
            if !bounds.contains_cube(cell) {
                return Err(WorldBuildError::SpawnOutOfBounds(cell));
            }
            if grid.is_occupied(cell) {
                return Err(WorldBuildError::SpawnOverlap(cell));
            }
            let id = BlockId(blocks.len() as u32);
            grid.set(cell, Some(id));
            blocks.push(Block::new(cell, cell_to_world(cell), texture, color));
        }

        let (perch, face) = actor.ok_or(WorldBuildError::NoActor)?;
        let Some(ridden) = grid.get(perch) else {
            return Err(WorldBuildError::ActorUnsupported(perch));
        };
        let body = perch + face;
        if grid.is_occupied(body) {
            return Err(WorldBuildError::ActorBlocked { perch, body });
        }
        let anchor = cell_to_world(perch) + face.world_normal() * (cube_edge / 2.0);
        let actor = Actor::new(ridden, face, anchor, actor_speed);

        let world = World {
            grid,
            blocks,
            actor,
            cube_edge,
            sweep_step,
        };
        #[cfg(debug_assertions)]
        world.consistency_check();
        Ok(world)
    }
}

/// Error from [`WorldBuilder::build()`]: the configuration does not describe
/// a valid world.
#[derive(Clone, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum WorldBuildError {
    /// The grid bounds could not be allocated.
    #[displaydoc("grid bounds rejected: {0}")]
    Bounds(GridOverflowError),
    /// A tuning constant was zero, negative, or not finite.
    #[displaydoc("{name} must be finite and positive, but is {value}")]
    Tuning {
        /// Which tuning constant was rejected.
        name: &'static str,
        /// The offending value.
        value: FreeCoordinate,
    },
    /// More cubes were spawned than block ids can address.
    #[displaydoc("more cubes than block ids can address")]
    SpawnLimit,
    /// A cube was spawned outside the grid bounds.
    #[displaydoc("cube at {0:?} is outside the grid bounds")]
    SpawnOutOfBounds(Cube),
    /// Two cubes were spawned in the same cell.
    #[displaydoc("two cubes share the cell {0:?}")]
    SpawnOverlap(Cube),
    /// No [`WorldBuilder::actor_on()`] call was made.
    #[displaydoc("no actor placement was given")]
    NoActor,
    /// The actor was placed on a cell with no cube in it.
    #[displaydoc("actor placed on the vacant cell {0:?}")]
    ActorUnsupported(Cube),
    /// The cell the actor's body occupies holds a cube.
    #[displaydoc("actor on {perch:?} has no headroom: {body:?} is occupied")]
    ActorBlocked {
        /// The cube the actor was to stand on.
        perch: Cube,
        /// The occupied cell the actor's body would share.
        body: Cube,
    },
}

impl std::error::Error for WorldBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldBuildError::Bounds(e) => Some(e),
            WorldBuildError::Tuning { .. } => None,
            WorldBuildError::SpawnLimit => None,
            WorldBuildError::SpawnOutOfBounds(_) => None,
            WorldBuildError::SpawnOverlap(_) => None,
            WorldBuildError::NoActor => None,
            WorldBuildError::ActorUnsupported(_) => None,
            WorldBuildError::ActorBlocked { .. } => None,
        }
    }
}
