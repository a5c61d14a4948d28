//! This library is an internal component of [`tumblecube`],
//! which defines the core mathematical types and functions of the engine.
//! Do not depend on this library; use only [`tumblecube`] instead.
//!
//! [`tumblecube`]: https://crates.io/crates/tumblecube/

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![warn(clippy::missing_inline_in_public_items)]
#![cfg_attr(test, allow(clippy::missing_inline_in_public_items))]

/// Do not use this module directly; its contents are re-exported from `tumblecube`.
#[macro_use]
pub mod math;

/// Do not use this module directly; its contents are re-exported from `tumblecube`.
pub mod time;

/// Do not use this module directly; its contents are re-exported from `tumblecube`.
pub mod util;

// reexport for convenience of our tests and dependents
#[doc(hidden)]
pub use euclid;
