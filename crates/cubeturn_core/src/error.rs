use thiserror::Error;

use crate::CubieId;

/// Result type for cube operations.
pub type Result<T, E = CubeError> = std::result::Result<T, E>;

/// Error produced by cube state operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// The cube state is corrupted and cannot safely be used any further.
    ///
    /// This indicates a bug in cube assembly or in the turn engine.
    #[error("cube invariant violated: {0}")]
    InvariantViolation(String),
    /// The cubie is not part of the cube.
    #[error("{0} is not part of the cube")]
    NotFound(CubieId),
}

impl CubeError {
    /// Returns whether the error means that the cube state can no longer be
    /// trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

macro_rules! invariant_violation {
    ($($tok:tt)*) => {
        $crate::CubeError::InvariantViolation(format!($($tok)*))
    };
}
