use thiserror::Error;

/// Error produced when strictly parsing a move sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseMoveError {
    /// Character is not a move symbol
    #[error("unknown move {ch:?} at index {index}")]
    UnknownMove {
        /// Offending character.
        ch: char,
        /// Byte index of the character in the input.
        index: usize,
    },
}
