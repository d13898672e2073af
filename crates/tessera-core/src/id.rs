//! Strongly-typed identifiers and the [`Coord`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Logical index of a cell state, in `0..state_count`.
///
/// This is what rules consume and produce. The value actually stored in a
/// grid cell is the matching [`StateCode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateIndex(pub u32);

impl StateIndex {
    /// The index as a `usize`, for slicing count vectors and tables.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StateIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Raw value stored in a grid cell: `B^index` for a valid state.
///
/// Zero is never a valid code; the aggregator uses it as boundary padding.
pub type StateCode = u64;

/// Monotonically increasing step counter.
///
/// Incremented each time the simulation advances one generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A coordinate (or relative offset) in grid space.
///
/// Uses `SmallVec<[i32; 4]>` to avoid heap allocation for grids up to
/// 4 dimensions. Higher-dimensional grids spill to the heap transparently.
pub type Coord = SmallVec<[i32; 4]>;
