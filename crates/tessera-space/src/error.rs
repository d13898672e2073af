//! Error types for grid shapes and neighborhood offsets.

use std::fmt;

use tessera_core::Coord;

/// Errors arising from shape construction, offset validation, or
/// coordinate lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// A grid needs at least one axis.
    ZeroDimensionality,
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// The product of the extents does not fit in `usize`.
    CellCountOverflow {
        /// The requested extents.
        extents: Vec<usize>,
    },
    /// More axes than the Moore neighborhood can be enumerated for.
    DimensionTooLarge {
        /// The requested dimensionality.
        dimensionality: usize,
        /// The supported maximum.
        max: usize,
    },
    /// A coordinate or offset has the wrong number of components.
    DimensionMismatch {
        /// Expected component count.
        expected: usize,
        /// Actual component count.
        got: usize,
    },
    /// An explicit offset list contains the zero vector.
    ZeroOffset {
        /// Position of the zero vector in the list.
        index: usize,
    },
    /// An explicit offset list contains the same vector twice.
    DuplicateOffset {
        /// Position of the repeated entry.
        index: usize,
        /// Position of its first occurrence.
        first: usize,
    },
    /// More offsets than a single encoding digit can count (`3^n - 1`).
    TooManyOffsets {
        /// Number of offsets supplied.
        count: usize,
        /// Maximum allowed for this dimensionality.
        max: usize,
    },
    /// A coordinate is outside the bounds of the grid.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimensionality => write!(f, "grid must have at least one axis"),
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::CellCountOverflow { extents } => {
                write!(f, "cell count of extents {extents:?} overflows usize")
            }
            Self::DimensionTooLarge {
                dimensionality,
                max,
            } => write!(
                f,
                "{dimensionality}D neighborhood is too large to enumerate (max {max})"
            ),
            Self::DimensionMismatch { expected, got } => {
                write!(f, "expected {expected} components, got {got}")
            }
            Self::ZeroOffset { index } => write!(f, "offset {index} is the zero vector"),
            Self::DuplicateOffset { index, first } => {
                write!(f, "offset {index} duplicates offset {first}")
            }
            Self::TooManyOffsets { count, max } => {
                write!(f, "{count} offsets exceed the maximum of {max}")
            }
            Self::CoordOutOfBounds { coord, bounds } => {
                write!(f, "coordinate {coord:?} out of bounds: {bounds}")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
