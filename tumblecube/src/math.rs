//! Mathematical utilities and decisions.
//!
//! The types here are defined in [`tumblecube_base`] and re-exported for use
//! with this crate.

pub use tumblecube_base::math::{
    Axis, Cube, Curve, Face, FloatIsNan, FreeCoordinate, FreePoint, FreeVector, GridCoordinate,
    GridPoint, GridSize, GridSizeCoord, GridVector, MAX_CONTROLS, NotNan, Quaternion,
    QuaternionCurve, Rgba, forward_vector, orientation_distance_squared, slerp_toward, turned,
};
