//! 3x3x3 cube state and quarter-turn engine.
//!
//! The cube is stored as a grid of [`CubieId`]s plus a flat list of
//! [`Cubie`]s. All coordinates are small integers, so slice membership and
//! ordering never depend on floating-point comparisons.

#[macro_use]
mod error;

mod cubie;
mod engine;
mod facelets;
mod math;
pub mod matrix;
mod select;
mod state;

pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use crate::cubie::{Cubie, CubieId, GridCoord};
    pub use crate::engine::{CubieMotion, TurnDelta, apply_turn, turn_layer};
    pub use crate::error::{CubeError, Result};
    pub use crate::facelets::Facelets;
    pub use crate::math::{Axis, Face, Orientation, Position, QuarterTurn, Sign, SignedAxis};
    pub use crate::matrix::rotate_matrix;
    pub use crate::select::{Selection, select_slice};
    pub use crate::state::{CubeSnapshot, CubeState};
}

/// Number of layers along each axis.
pub const LAYER_COUNT: usize = 3;

/// Number of cubies in the cube, including the hidden core.
pub const CUBIE_COUNT: usize = LAYER_COUNT * LAYER_COUNT * LAYER_COUNT;

/// Number of cubies in a single slice.
pub const SLICE_LEN: usize = LAYER_COUNT * LAYER_COUNT;
