//! Error types for the state encoding.

use std::error::Error;
use std::fmt;

/// Errors from [`StateEncoding::new`](crate::StateEncoding::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodingError {
    /// Dimensionality must be at least 1.
    ZeroDimensionality,
    /// At least one state is required.
    NoStates,
    /// More axes than [`MAX_DIMENSIONALITY`](crate::encoding::MAX_DIMENSIONALITY).
    DimensionTooLarge {
        /// Requested dimensionality.
        dimensionality: usize,
        /// The supported maximum.
        max: usize,
    },
    /// `3^(dimensionality * state_count)` does not fit in a 64-bit code,
    /// so aggregated neighbor sums could overflow.
    CapacityOverflow {
        /// Requested dimensionality.
        dimensionality: usize,
        /// Requested number of states.
        state_count: usize,
    },
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimensionality => write!(f, "dimensionality must be at least 1"),
            Self::NoStates => write!(f, "state_count must be at least 1"),
            Self::DimensionTooLarge {
                dimensionality,
                max,
            } => write!(f, "{dimensionality}D exceeds the maximum of {max} axes"),
            Self::CapacityOverflow {
                dimensionality,
                state_count,
            } => write!(
                f,
                "{state_count} states in {dimensionality}D exceed the 64-bit code capacity"
            ),
        }
    }
}

impl Error for EncodingError {}
