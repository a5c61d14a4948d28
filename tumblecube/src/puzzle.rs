//! Puzzle layouts: a declarative description of a cube arrangement together
//! with the goal the player is aiming for.
//!
//! The engine consumes only the layout itself, via
//! [`PuzzleData::build_world()`]. The goal and move limit are carried for an
//! eventual rules layer; nothing here evaluates them.

use arcstr::ArcStr;

use crate::grid::GridBounds;
use crate::math::{Cube, Face, Rgba};
use crate::world::{World, WorldBuildError};

// -------------------------------------------------------------------------------------------------

/// A puzzle description: grid bounds, the cubes filling them, and the cell and
/// face the player must reach within the move limit.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct PuzzleData {
    name: ArcStr,
    bounds: GridBounds,
    /// Filled cells, with the texture drawn on each.
    cubes: Vec<(Cube, ArcStr)>,
    goal_cell: Cube,
    goal_face: Face,
    move_limit: u32,
}

impl PuzzleData {
    /// Begins an empty layout with the given bounds and goal.
    pub fn new(
        name: impl Into<ArcStr>,
        bounds: GridBounds,
        goal_cell: Cube,
        goal_face: Face,
        move_limit: u32,
    ) -> Self {
        Self {
            name: name.into(),
            bounds,
            cubes: Vec::new(),
            goal_cell,
            goal_face,
            move_limit,
        }
    }

    /// Adds a cube showing `texture` at `cell`.
    ///
    /// Placement is not checked here; a cell outside the bounds, or filled
    /// twice, is reported by [`Self::build_world()`].
    pub fn cube(mut self, cell: Cube, texture: impl Into<ArcStr>) -> Self {
        self.cubes.push((cell, texture.into()));
        self
    }

    /// The puzzle's display name.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The grid extent of the puzzle.
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// The filled cells in insertion order, with their textures.
    pub fn cubes(&self) -> impl Iterator<Item = (Cube, &ArcStr)> {
        self.cubes.iter().map(|(cell, texture)| (*cell, texture))
    }

    /// The cell and face the player must stand on to solve the puzzle.
    #[inline]
    pub fn goal(&self) -> (Cube, Face) {
        (self.goal_cell, self.goal_face)
    }

    /// How many moves the player may make before the puzzle resets.
    #[inline]
    pub fn move_limit(&self) -> u32 {
        self.move_limit
    }

    /// Instantiates a [`World`] holding this layout, with the actor starting
    /// on `face` of the cube at `start`.
    ///
    /// Every cube is spawned plain white; layouts carry texture names only.
    pub fn build_world(&self, start: Cube, face: Face) -> Result<World, WorldBuildError> {
        let mut builder = World::builder(self.bounds);
        for (cell, texture) in &self.cubes {
            builder = builder.spawn(*cell, texture.clone(), Rgba::WHITE);
        }
        builder.actor_on(start, face).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pedestal() -> PuzzleData {
        PuzzleData::new(
            "pedestal",
            GridBounds::from_lower_upper([-4, -4, -4], [5, 5, 5]),
            Cube::new(1, -1, 0),
            Face::Top,
            12,
        )
        .cube(Cube::new(0, 0, 0), "stone")
        .cube(Cube::new(0, -1, 0), "stone")
        .cube(Cube::new(1, -1, 0), "goal")
    }

    #[test]
    fn layout_round_trips_through_accessors() {
        let puzzle = pedestal();
        assert_eq!(puzzle.name(), "pedestal");
        assert_eq!(
            puzzle.bounds(),
            GridBounds::from_lower_upper([-4, -4, -4], [5, 5, 5])
        );
        assert_eq!(puzzle.goal(), (Cube::new(1, -1, 0), Face::Top));
        assert_eq!(puzzle.move_limit(), 12);
        assert_eq!(
            puzzle.cubes().map(|(cell, _)| cell).collect::<Vec<_>>(),
            vec![Cube::new(0, 0, 0), Cube::new(0, -1, 0), Cube::new(1, -1, 0)]
        );
    }

    #[test]
    fn layout_builds_a_world() {
        let world = pedestal()
            .build_world(Cube::new(0, 0, 0), Face::Top)
            .unwrap();
        assert_eq!(world.bounds(), pedestal().bounds());
        assert_eq!(world.blocks().count(), 3);
        assert_eq!(world.actor().face(), Face::Top);
        let goal_block = world.occupant(Cube::new(1, -1, 0)).unwrap();
        assert_eq!(world.block(goal_block).texture(), "goal");
        world.consistency_check(); // bonus testing
    }

    #[test]
    fn layout_errors_surface_from_the_builder() {
        assert_eq!(
            pedestal()
                .cube(Cube::new(9, 9, 9), "stone")
                .build_world(Cube::new(0, 0, 0), Face::Top)
                .unwrap_err(),
            WorldBuildError::SpawnOutOfBounds(Cube::new(9, 9, 9)),
        );
        assert_eq!(
            pedestal()
                .build_world(Cube::new(2, 2, 2), Face::Top)
                .unwrap_err(),
            WorldBuildError::ActorUnsupported(Cube::new(2, 2, 2)),
        );
    }
}
