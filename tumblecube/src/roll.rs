//! Planning and committing rolls: tipping the cube the actor rides, together
//! with everything rigidly attached to it, over a pivot edge.
//!
//! Planning ([`plan_roll()`]) is read-only and deterministic; committing
//! (`World::roll_cube()`) applies a finished [`RollPlan`] to the grid and
//! enqueues the matching animation tasks. A plan that cannot be formed aborts
//! with a [`RollBlocked`] reason and leaves the world untouched.

use std::collections::VecDeque;

use euclid::Angle;
use hashbrown::HashSet;

use crate::block::BlockId;
use crate::math::{
    Cube, Curve, Face, FreeCoordinate, FreeVector, GridVector, Quaternion, QuaternionCurve,
    slerp_toward, turned,
};
use crate::motion::Movement;
use crate::world::World;

// -------------------------------------------------------------------------------------------------

/// Reasons a requested roll does not happen.
///
/// Every value here is a routine consequence of pushing against the puzzle
/// geometry, not a programming error; [`World::roll_cube()`] reduces all of
/// them to a logged no-op, leaving the world unchanged.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum RollBlocked {
    /// Neither the cube under the actor nor the cube behind the push exists
    /// to pivot on.
    #[displaydoc("no fulcrum to pivot on")]
    NoPivot,
    /// The cubes attached to the pushed one cannot move as a rigid body.
    #[displaydoc("attached structure cannot move")]
    Infeasible,
    /// The cell the cube would turn into, or the headroom above it, or the
    /// cell the actor would end in, is occupied.
    #[displaydoc("there's something in the way")]
    Blocked,
    /// Neither a support cube nor an anchor cube gives the roll somewhere to
    /// land.
    #[displaydoc("nowhere to land")]
    NoLanding,
    /// The swept path is obstructed before any progress could be made.
    #[displaydoc("obstructed immediately")]
    NoProgress,
}

impl std::error::Error for RollBlocked {}

// -------------------------------------------------------------------------------------------------

/// The connected set of cubes that moves together in one roll.
///
/// Always contains the active cube (the one the actor rides); never contains
/// the fulcrum. Produced by [`determine_structure()`].
#[derive(Clone, Debug)]
pub struct Structure {
    /// Same cells as in `members`; for O(1) membership probes.
    cells: HashSet<Cube>,
    /// In admission order: the active cube first, then flood-fill order.
    members: Vec<(Cube, BlockId)>,
}

impl Structure {
    /// Returns whether `cube` is part of the moving set.
    #[inline]
    pub fn contains(&self, cube: Cube) -> bool {
        self.cells.contains(&cube)
    }

    /// The member cells and the blocks occupying them, the active cube first.
    #[inline]
    pub fn members(&self) -> &[(Cube, BlockId)] {
        &self.members
    }

    /// Number of cubes in the set; at least 1.
    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Collects the set of cubes that must move together when the cube at
/// `active` is rolled toward `roll`, pivoting on the cube at `fulcrum`.
///
/// The flood fill is seeded with the cell ahead of the active cube in the
/// roll direction and spreads through 6-connected occupied neighbors, but a
/// cube is admitted only if it is strictly closer (by grid distance) to the
/// active cube than to the fulcrum — cubes the pivot holds in place stay
/// behind. The active cube itself is always a member.
///
/// Returns [`None`] — rejecting the whole roll — when the set cannot move as
/// a rigid body: when more than 2 members trail in a straight run from the
/// active cube on any axis other than the roll direction (the set is wedged
/// around the pivot), or when any member's landing cell would fall outside
/// the grid. Also returns [`None`] if `fulcrum` is not adjacent to `active`
/// or `active` is vacant, which callers rule out.
pub fn determine_structure(
    world: &World,
    active: Cube,
    fulcrum: Cube,
    roll: Face,
) -> Option<Structure> {
    let fulcrum_face = Face::try_from(fulcrum - active).ok()?;
    let turn = quarter_turn(fulcrum_face.opposite(), roll);
    let active_id = world.grid.get(active)?;

    let mut cells = HashSet::new();
    cells.insert(active);
    let mut members = vec![(active, active_id)];

    // FIFO frontier, so admission order is reproducible.
    let mut frontier = VecDeque::new();
    let seed = active + roll;
    if let Some(id) = world.grid.get(seed) {
        // The seed always passes the distance rule: 1 from the active cube,
        // 2 from the fulcrum.
        cells.insert(seed);
        members.push((seed, id));
        frontier.push_back(seed);
    }
    while let Some(cell) = frontier.pop_front() {
        for face in Face::ALL {
            let neighbor = cell + face;
            if cells.contains(&neighbor) {
                continue;
            }
            let Some(id) = world.grid.get(neighbor) else {
                continue;
            };
            if neighbor.manhattan_distance(active) < neighbor.manhattan_distance(fulcrum) {
                cells.insert(neighbor);
                members.push((neighbor, id));
                frontier.push_back(neighbor);
            }
        }
    }

    // A run of more than 2 members on any non-roll axis wedges the set.
    for face in Face::ALL {
        if face == roll {
            continue;
        }
        let mut run = 0;
        let mut cell = active + face;
        while cells.contains(&cell) {
            run += 1;
            cell += face;
        }
        if run > 2 {
            return None;
        }
    }

    // Every member must land inside the grid. (Whether the landing is vacant
    // is the swept-collision pass's concern, not ours: a landing onto rock
    // truncates the roll rather than rejecting it.)
    let bounds = world.grid.bounds();
    for &(cell, _) in &members {
        let landing = active + roll + rotate_offset(&turn, cell - active);
        if !bounds.contains_cube(landing) {
            return None;
        }
    }

    Some(Structure { cells, members })
}

// -------------------------------------------------------------------------------------------------

/// Whether a roll turns 90° onto a supported cell or 180° over a wall edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum RollKind {
    /// One 90° turn; the structure lands beside its old position.
    Quarter,
    /// Two chained 90° turns wrapping around the fulcrum; single cubes only.
    Half,
}

/// Planned motion for one [`Structure`] member.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberPlan {
    pub(crate) id: BlockId,
    pub(crate) start: Cube,
    pub(crate) landing: Cube,
    /// Full planned arc; playback stops at the plan's `min_t`.
    pub(crate) arc: Curve,
}

impl MemberPlan {
    /// The block this plan moves.
    #[inline]
    pub fn block(&self) -> BlockId {
        self.id
    }

    /// Cell the member occupies before the roll.
    #[inline]
    pub fn start(&self) -> Cube {
        self.start
    }

    /// Cell the member will occupy after the roll. Equal to [`Self::start()`]
    /// when an obstruction truncated the roll before it left its cell.
    #[inline]
    pub fn landing(&self) -> Cube {
        self.landing
    }
}

/// A fully validated roll, ready to commit.
///
/// Produced by [`plan_roll()`] without modifying the world; all the decisions
/// (fulcrum, structure, landing, truncation) are already made.
#[derive(Clone, Debug, PartialEq)]
pub struct RollPlan {
    kind: RollKind,
    /// Resolved roll direction: the requested one, or its redirection when
    /// pivoting over a wall edge.
    roll: Face,
    /// Face the actor stands on once the roll completes.
    landing_face: Face,
    /// Largest collision-free fraction of the planned arcs, `0.0..=1.0`.
    min_t: FreeCoordinate,
    fulcrum: Cube,
    /// One 90° turn about the pivot edge, unscaled.
    turn: Quaternion,
    /// The active cube's plan first, then the rest of the structure.
    members: Vec<MemberPlan>,
    actor_arc: Curve,
}

impl RollPlan {
    /// Whether this is a quarter or half roll.
    #[inline]
    pub fn kind(&self) -> RollKind {
        self.kind
    }

    /// The direction the structure actually moves, which differs from the
    /// requested direction when the fulcrum is a wall rather than the floor.
    #[inline]
    pub fn roll(&self) -> Face {
        self.roll
    }

    /// The face the actor will stand on after the roll.
    #[inline]
    pub fn landing_face(&self) -> Face {
        self.landing_face
    }

    /// The cell of the cube the structure pivots on.
    #[inline]
    pub fn fulcrum(&self) -> Cube {
        self.fulcrum
    }

    /// Largest collision-free fraction of the planned arcs. `1.0` for an
    /// unobstructed roll; less when the roll was truncated mid-arc.
    #[inline]
    pub fn min_t(&self) -> FreeCoordinate {
        self.min_t
    }

    /// Per-member plans, the active cube's first.
    #[inline]
    pub fn members(&self) -> &[MemberPlan] {
        &self.members
    }

    /// The cell the active cube ends up in.
    #[inline]
    pub fn active_landing(&self) -> Cube {
        self.members[0].landing
    }
}

// -------------------------------------------------------------------------------------------------

/// Plans a roll of the actor's ridden cube toward `direction`, without
/// modifying the world.
///
/// Planning resolves, in order: the fulcrum (the neighbor cube the structure
/// pivots on, probed first under the actor and then behind the push), the
/// moving [`Structure`], the landing cell (a quarter roll onto a supported
/// neighbor, or a half roll wrapping a single cube around the fulcrum), and
/// finally the swept-collision truncation of the arcs. Given identical world
/// state and direction, the result is identical.
pub fn plan_roll(world: &World, direction: Face) -> Result<RollPlan, RollBlocked> {
    let actor = &world.actor;
    let standing = actor.face;
    let active = world.blocks[actor.block.index()].cell;

    // A push along the standing axis has no pivot edge to turn about.
    if direction.axis() == standing.axis() {
        return Err(RollBlocked::NoPivot);
    }

    // Steps 1–2: find the fulcrum. Preference order: the cube under the
    // actor's feet, then the cube behind the push — in the latter case the
    // structure swings down the actor's column instead of onward.
    let (fulcrum_face, roll) = if world.grid.is_occupied(active + standing.opposite()) {
        (standing.opposite(), direction)
    } else if world.grid.is_occupied(active + direction.opposite()) {
        (direction.opposite(), standing.opposite())
    } else {
        return Err(RollBlocked::NoPivot);
    };
    let fulcrum = active + fulcrum_face;
    let pivot_up = fulcrum_face.opposite();

    // Step 3: collect what moves.
    let structure =
        determine_structure(world, active, fulcrum, roll).ok_or(RollBlocked::Infeasible)?;
    let outside_occupied =
        |cube: Cube| world.grid.is_occupied(cube) && !structure.contains(cube);

    // Step 4: fast rejects. The cell ahead must be vacant outright, even when
    // the flood admitted its occupant; the diagonal headroom above it only
    // counts cubes outside the structure (in the wall-pivot case that cell is
    // the active cube itself).
    if world.grid.is_occupied(active + roll) || outside_occupied(active + roll + standing) {
        return Err(RollBlocked::Blocked);
    }

    // Step 5: landing selection, as offsets from the active cube.
    let (kind, landing_face, full_landing) = if world.grid.is_occupied(fulcrum + roll) {
        // A support cube holds up the cell beside the landing: tip onto it.
        (RollKind::Quarter, pivot_up, active + roll)
    } else if world.grid.is_occupied(active + fulcrum_face.normal_vector() * 2)
        && structure.member_count() == 1
    {
        // No support, but an anchor one past the fulcrum: wrap around it.
        (RollKind::Half, roll, fulcrum + roll)
    } else {
        return Err(RollBlocked::NoLanding);
    };
    if !world.grid.bounds().contains_cube(full_landing) {
        return Err(RollBlocked::NoLanding);
    }
    // Crush check: the cell the actor ends standing in.
    if outside_occupied(full_landing + landing_face) {
        return Err(RollBlocked::Blocked);
    }

    let turn = quarter_turn(pivot_up, roll);
    let roll_world = roll.world_normal() * world.cube_edge;

    // Per-member full landings and arcs. Nonzero offsets from the active cube
    // turn rigidly with it; the formulas agree on the active cube itself.
    let full_landings: Vec<Cube> = match kind {
        RollKind::Quarter => structure
            .members()
            .iter()
            .map(|&(cell, _)| active + roll + rotate_offset(&turn, cell - active))
            .collect(),
        RollKind::Half => vec![full_landing],
    };
    let arcs: Vec<Curve> = structure
        .members()
        .iter()
        .zip(&full_landings)
        .map(|(&(cell, _), &landing)| {
            let start = world.cell_to_world(cell);
            Curve::quadratic(start, start + roll_world, world.cell_to_world(landing))
        })
        .collect();

    // Step 6: swept collision. Sample every arc on a fixed time grid; the
    // roll proceeds up to the last sample where all members are in cells free
    // of foreign cubes. (A half roll's arc hugs the fulcrum it wraps, so that
    // one cell is exempt.)
    let exempt = match kind {
        RollKind::Half => Some(fulcrum),
        RollKind::Quarter => None,
    };
    let sample_blocked = |cell: Cube| {
        exempt != Some(cell) && !structure.contains(cell) && world.grid.is_occupied(cell)
    };
    let step = world.sweep_step;
    let mut clear_samples: Option<u32> = None;
    let mut k: u32 = 1;
    loop {
        let t = (FreeCoordinate::from(k) * step).min(1.0);
        if arcs
            .iter()
            .any(|arc| sample_blocked(world.world_to_cell(arc.evaluate(t))))
        {
            clear_samples = Some(k - 1);
            break;
        }
        if t >= 1.0 {
            break;
        }
        k += 1;
    }

    let (min_t, landings) = match clear_samples {
        // Unobstructed: exact full landings.
        None => (1.0, full_landings),
        Some(0) => return Err(RollBlocked::NoProgress),
        // Truncated: wherever the arcs got to. Rounding can collapse two
        // members into one cell; back off further samples until distinct.
        Some(mut k) => loop {
            let t = FreeCoordinate::from(k) * step;
            let landings: Vec<Cube> = arcs
                .iter()
                .map(|arc| world.world_to_cell(arc.evaluate(t)))
                .collect();
            if all_distinct(&landings) {
                break (t, landings);
            }
            if k == 1 {
                return Err(RollBlocked::NoProgress);
            }
            k -= 1;
        },
    };

    let members: Vec<MemberPlan> = itertools::izip!(structure.members(), landings, arcs)
        .map(|(&(start, id), landing, arc)| MemberPlan {
            id,
            start,
            landing,
            arc,
        })
        .collect();

    let actor_arc = {
        let start = actor.position;
        let end = world.standing_position(
            match kind {
                RollKind::Quarter => active + roll,
                RollKind::Half => full_landing,
            },
            landing_face,
        );
        Curve::quadratic(start, start + roll_world, end)
    };

    Ok(RollPlan {
        kind,
        roll,
        landing_face,
        min_t,
        fulcrum,
        turn,
        members,
        actor_arc,
    })
}

/// Applies a finished plan: rewrites the grid, then enqueues the animation
/// tasks. The grid and every member's cell change immediately; positions and
/// rotations ease over the following ticks.
pub(crate) fn commit(world: &mut World, plan: &RollPlan) {
    let speed = world.actor.speed;

    // Two phases, so members can move through each other's vacated cells.
    for member in &plan.members {
        world.grid.set(member.start, None);
    }
    for member in &plan.members {
        world.grid.set(member.landing, Some(member.id));
    }

    // The enqueued turn covers only the fraction of the arc actually rolled.
    let increment = if plan.min_t < 1.0 {
        slerp_toward(&Quaternion::identity(), &plan.turn, plan.min_t)
    } else {
        plan.turn
    };

    for member in &plan.members {
        let block = &mut world.blocks[member.id.index()];
        block.cell = member.landing;
        block.queue.push(Movement::Bezier {
            curve: member.arc.clone(),
            t: 0.0,
            target_t: plan.min_t,
            speed,
        });
        match plan.kind {
            RollKind::Quarter => {
                block.queue.push(Movement::Rotate {
                    target: turned(&block.rotation, &increment),
                    speed,
                });
            }
            RollKind::Half => {
                let quarter = turned(&block.rotation, &plan.turn);
                let half = turned(&quarter, &plan.turn);
                block.queue.push(Movement::BezierRotate {
                    curve: QuaternionCurve::new([block.rotation, quarter, half]),
                    t: 0.0,
                    target_t: plan.min_t,
                    speed,
                });
            }
        }
    }

    let actor = &mut world.actor;
    actor.face = plan.landing_face;
    actor.queue.push(Movement::Bezier {
        curve: plan.actor_arc.clone(),
        t: 0.0,
        target_t: plan.min_t,
        speed,
    });
    actor.queue.push(Movement::Rotate {
        target: plan.landing_face.orientation(),
        speed,
    });

    #[cfg(debug_assertions)]
    world.consistency_check();
}

// -------------------------------------------------------------------------------------------------

/// The 90° turn of a roll: about the world-space axis perpendicular to both
/// the pivot direction and the roll direction.
fn quarter_turn(pivot_up: Face, roll: Face) -> Quaternion {
    let axis: FreeVector = pivot_up.world_normal().cross(roll.world_normal());
    Quaternion::around_axis(axis, Angle::frac_pi_2())
}

/// Carries a member's grid offset from the active cube through the turn:
/// into world space (mirrored z), rotated, and re-projected onto the grid.
fn rotate_offset(turn: &Quaternion, offset: GridVector) -> GridVector {
    let mut world = offset.to_f64();
    world.z = -world.z;
    let mut rotated = turn.transform_vector3d(world);
    rotated.z = -rotated.z;
    rotated.round().to_i32()
}

fn all_distinct(cells: &[Cube]) -> bool {
    cells
        .iter()
        .enumerate()
        .all(|(i, cell)| !cells[..i].contains(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBounds;
    use crate::math::Rgba;
    use crate::world::World;
    use euclid::vec3;
    use pretty_assertions::assert_eq;

    /// A world spanning `-4..5` on every axis, with stone cubes at the given
    /// cells and the actor atop the first of them.
    fn world_with(cells: &[Cube]) -> World {
        let mut builder = World::builder(GridBounds::from_lower_upper([-4, -4, -4], [5, 5, 5]));
        for &cell in cells {
            builder = builder.spawn(cell, "stone", Rgba::WHITE);
        }
        builder
            .actor_on(cells[0], Face::Top)
            .build()
            .unwrap()
    }

    #[test]
    fn structure_is_active_alone_without_a_seed() {
        // A neighbor behind the push is not dragged along.
        let world = world_with(&[
            Cube::new(0, 0, 0),
            Cube::new(0, -1, 0),
            Cube::new(-1, 0, 0),
        ]);
        let structure =
            determine_structure(&world, Cube::new(0, 0, 0), Cube::new(0, -1, 0), Face::Right)
                .unwrap();
        assert_eq!(
            structure.members().iter().map(|&(c, _)| c).collect::<Vec<_>>(),
            vec![Cube::new(0, 0, 0)]
        );
    }

    #[test]
    fn structure_chains_through_the_seed() {
        let world = world_with(&[
            Cube::new(0, 0, 0),
            Cube::new(0, -1, 0),
            Cube::new(1, 0, 0),
            Cube::new(2, 0, 0),
        ]);
        let structure =
            determine_structure(&world, Cube::new(0, 0, 0), Cube::new(0, -1, 0), Face::Right)
                .unwrap();
        assert_eq!(structure.member_count(), 3);
        assert!(structure.contains(Cube::new(2, 0, 0)));
        assert!(!structure.contains(Cube::new(0, -1, 0)), "fulcrum admitted");
    }

    #[test]
    fn structure_never_crosses_the_distance_boundary() {
        // A slab at the fulcrum's level is held in place by the pivot even
        // though it is 6-connected to the seed.
        let world = world_with(&[
            Cube::new(0, 0, 0),
            Cube::new(0, -1, 0),
            Cube::new(1, 0, 0),
            Cube::new(1, -1, 0),
            Cube::new(2, -1, 0),
        ]);
        let structure =
            determine_structure(&world, Cube::new(0, 0, 0), Cube::new(0, -1, 0), Face::Right)
                .unwrap();
        for &(cell, _) in structure.members() {
            assert!(
                cell.manhattan_distance(Cube::new(0, 0, 0))
                    <= cell.manhattan_distance(Cube::new(0, -1, 0)),
                "{cell:?}"
            );
        }
        assert!(!structure.contains(Cube::new(1, -1, 0)));
        assert!(!structure.contains(Cube::new(2, -1, 0)));
    }

    #[test]
    fn structure_rejects_a_long_lateral_run() {
        // Three cubes hanging off the active cube's flank cannot swing.
        let world = world_with(&[
            Cube::new(0, 0, 0),
            Cube::new(0, -1, 0),
            Cube::new(1, 0, 0),
            Cube::new(1, 0, 1),
            Cube::new(0, 0, 1),
            Cube::new(0, 0, 2),
            Cube::new(0, 0, 3),
        ]);
        assert_eq!(
            determine_structure(&world, Cube::new(0, 0, 0), Cube::new(0, -1, 0), Face::Right)
                .map(|s| s.member_count()),
            None
        );
    }

    #[test]
    fn structure_accepts_a_short_lateral_run() {
        let world = world_with(&[
            Cube::new(0, 0, 0),
            Cube::new(0, -1, 0),
            Cube::new(1, 0, 0),
            Cube::new(1, 0, 1),
            Cube::new(0, 0, 1),
            Cube::new(0, 0, 2),
        ]);
        assert_eq!(
            determine_structure(&world, Cube::new(0, 0, 0), Cube::new(0, -1, 0), Face::Right)
                .map(|s| s.member_count()),
            Some(5)
        );
    }

    #[test]
    fn structure_rejects_landings_outside_the_grid() {
        // The active cube sits at the +x edge; its landing would leave the
        // grid entirely.
        let world = world_with(&[Cube::new(4, 0, 0), Cube::new(4, -1, 0)]);
        assert!(
            determine_structure(&world, Cube::new(4, 0, 0), Cube::new(4, -1, 0), Face::Right)
                .is_none()
        );
    }

    #[test]
    fn rotate_offset_turns_grid_offsets_exactly() {
        // Tipping toward +x about the bottom edge: up goes to +x, +x goes down.
        let turn = quarter_turn(Face::Top, Face::Right);
        assert_eq!(rotate_offset(&turn, vec3(0, 1, 0)), vec3(1, 0, 0));
        assert_eq!(rotate_offset(&turn, vec3(1, 0, 0)), vec3(0, -1, 0));
        // The turn axis is along z; z offsets ride along unchanged.
        assert_eq!(rotate_offset(&turn, vec3(0, 0, 2)), vec3(0, 0, 2));
        assert_eq!(rotate_offset(&turn, vec3(0, 0, 0)), vec3(0, 0, 0));
    }

    #[test]
    fn quarter_turn_composes_to_identity_in_four() {
        for (pivot_up, roll) in [
            (Face::Top, Face::Right),
            (Face::Top, Face::Back),
            (Face::Right, Face::Bottom),
            (Face::Front, Face::Left),
        ] {
            let turn = quarter_turn(pivot_up, roll);
            let mut q = Quaternion::identity();
            for _ in 0..4 {
                q = turned(&q, &turn);
            }
            assert!(
                crate::math::orientation_distance_squared(&q, &Quaternion::identity()) < 1e-9,
                "pivot_up {pivot_up:?} roll {roll:?}"
            );
        }
    }

    #[test]
    fn all_distinct_detects_duplicates() {
        assert!(all_distinct(&[Cube::new(0, 0, 0), Cube::new(1, 0, 0)]));
        assert!(!all_distinct(&[
            Cube::new(0, 0, 0),
            Cube::new(1, 0, 0),
            Cube::new(0, 0, 0),
        ]));
        assert!(all_distinct(&[]));
    }
}
