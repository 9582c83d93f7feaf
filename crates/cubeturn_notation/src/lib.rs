//! Move notation for the 3x3x3 cube.
//!
//! Each move is a single character from `FfBbRrLlUuDd`. Uppercase turns the
//! face clockwise as seen looking at it, and lowercase turns it
//! counterclockwise.

mod errors;
mod moves;
mod sequence;

pub use errors::ParseMoveError;
pub use moves::{ALL_MOVES, Direction, Move};
pub use sequence::MoveSequence;
