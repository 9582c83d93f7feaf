//! Move sequencing, animation, and picking for an interactive cube.
//!
//! The renderer is an external collaborator: it receives each committed turn
//! through an [`Animator`] and reports back when the animation is done.

pub mod animation;
pub mod picking;
mod sequencer;

pub use animation::{AnimationPreferences, InterpolateFn, TurnAnimation};
pub use sequencer::{
    Animator, Completion, DEFAULT_SCRAMBLE_LENGTH, InstantAnimator, Sequencer, Submission,
};
