//! Time passing “in game”.
//!
//! The types here are defined in [`tumblecube_base`] and re-exported for use
//! with this crate.

pub use tumblecube_base::time::*;
