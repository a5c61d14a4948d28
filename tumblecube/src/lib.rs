//! Tumblecube is a puzzle-game engine mechanic: an actor stands on a face of a
//! unit cube in a sparse 3D grid, and pushes tip the cube — together with any
//! rigidly connected structure of neighboring cubes — by 90° or 180° onto
//! adjacent cells.
//!
//! ## Data model
//!
//! * A [`World`](world::World) owns a bounded [grid](grid) of cube cells, an
//!   arena of [`Block`](block::Block)s (the movable cubes), and the single
//!   [`Actor`](actor::Actor) riding one of them.
//! * Orientation is tracked with quaternions ([`math::Quaternion`]); animation
//!   is interpolated along Bezier arcs ([`math::Curve`]), and rolls are
//!   collision-checked by swept sampling of those arcs.
//! * All mutation goes through `&mut World`; there is no global state.
//!
//! ## What this crate does not do
//!
//! Rendering, input mapping, audio, win-condition evaluation, gravity,
//! pathfinding, networking, and save files are all out of scope. The crate is
//! a reusable simulation library: read accessors expose everything a renderer
//! needs, and [`World::step()`](world::World::step) advances animation given a
//! caller-driven clock.
//!
//! ## Dependencies and global state
//!
//! `tumblecube` avoids having any global state. However, it does write log
//! messages using the [`log`] crate and is therefore subject to that global
//! configuration.
//!
//! `tumblecube` depends on and re-exports the following crates as part of its
//! public API:
//!
//! * [`euclid`] for vector math (as `tumblecube::euclid`).
//! * [`ordered_float`](math::NotNan) (as `tumblecube::math::NotNan`).
//! * [`arcstr`] for shared texture name strings.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![warn(missing_docs)]
// Lenience for tests.
#![cfg_attr(test,
    allow(clippy::float_cmp), // deterministic tests
    allow(clippy::redundant_clone), // prefer regularity over efficiency
)]

pub mod actor;
pub mod block;
pub mod grid;
pub mod math;
pub mod motion;
pub mod puzzle;
pub mod roll;
pub mod time;
pub mod util;
pub mod world;

pub use world::World;

/// Re-export the version of the `arcstr` string library we're using.
pub use arcstr;
/// Re-export the version of the `euclid` vector math library we're using.
pub use tumblecube_base::euclid;

pub use tumblecube_base::{notnan, rgba_const};
