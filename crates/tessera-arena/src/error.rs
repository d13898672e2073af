//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during grid buffer operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Supplied cell data does not match the shape's cell count.
    LengthMismatch {
        /// Cell count implied by the shape.
        expected: usize,
        /// Number of cells supplied.
        got: usize,
    },
    /// `publish()` was called without a matching `begin_tick()`.
    NoTickInProgress,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, got } => {
                write!(f, "expected {expected} cells, got {got}")
            }
            Self::NoTickInProgress => write!(f, "publish called with no tick in progress"),
        }
    }
}

impl Error for ArenaError {}
