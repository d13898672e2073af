//! Mixed-radix state encoding.
//!
//! State `i` is stored in the grid as `B^i` where `B = 3^n`. A cell has at
//! most `3^n - 1` neighbors, so the count of any one state never reaches
//! `B` and summing the codes of a neighborhood never carries into the next
//! digit. One integer addition per neighbor therefore tallies every state
//! at once, and [`StateEncoding::decode_into`] reads the tallies back out
//! digit by digit.
//!
//! ```text
//! n = 2, B = 9, codes = [1, 9, 81]
//! neighbors: 5 × state0, 2 × state1, 1 × state2
//! aggregate = 5·1 + 2·9 + 1·81 = 104  →  decode  →  [5, 2, 1]
//! ```

use smallvec::SmallVec;

use crate::error::EncodingError;
use crate::id::{StateCode, StateIndex};

/// Largest supported dimensionality.
///
/// The Moore neighborhood of an `n`-D grid has `3^n - 1` offsets, each
/// materialized for the aggregator. At 12 axes that is 531 440 offsets.
pub const MAX_DIMENSIONALITY: usize = 12;

/// Decoded per-state neighbor tallies, indexed by state.
///
/// Inline storage covers up to 8 states without touching the heap.
pub type NeighborCounts = SmallVec<[u32; 8]>;

/// Bijection between state indices and grid codes for one
/// `(dimensionality, state_count)` pair.
///
/// Immutable after construction. Codes are strictly increasing, which
/// makes [`index_of`](Self::index_of) a binary search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateEncoding {
    dimensionality: usize,
    base: u64,
    codes: Vec<StateCode>,
}

impl StateEncoding {
    /// Per-axis extent of the Moore neighborhood.
    pub const AXIS_SPAN: u64 = 3;

    /// Build the encoding for `state_count` states on an `dimensionality`-D grid.
    ///
    /// Fails if either argument is zero, if `dimensionality` exceeds
    /// [`MAX_DIMENSIONALITY`], or if `B^state_count` does not fit in a `u64`
    /// (the largest possible aggregate is just below it).
    pub fn new(dimensionality: usize, state_count: usize) -> Result<Self, EncodingError> {
        if dimensionality == 0 {
            return Err(EncodingError::ZeroDimensionality);
        }
        if dimensionality > MAX_DIMENSIONALITY {
            return Err(EncodingError::DimensionTooLarge {
                dimensionality,
                max: MAX_DIMENSIONALITY,
            });
        }
        if state_count == 0 {
            return Err(EncodingError::NoStates);
        }
        let overflow = EncodingError::CapacityOverflow {
            dimensionality,
            state_count,
        };
        let exp = u32::try_from(dimensionality).map_err(|_| overflow.clone())?;
        let base = Self::AXIS_SPAN
            .checked_pow(exp)
            .ok_or_else(|| overflow.clone())?;

        let mut codes = Vec::with_capacity(state_count);
        let mut code: u64 = 1;
        for _ in 0..state_count {
            codes.push(code);
            code = code.checked_mul(base).ok_or_else(|| overflow.clone())?;
        }

        Ok(Self {
            dimensionality,
            base,
            codes,
        })
    }

    /// Grid dimensionality this encoding was built for.
    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// The radix `B = 3^n`.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Largest number of neighbors a single digit can hold (`3^n - 1`).
    pub fn max_neighbors(&self) -> u64 {
        self.base - 1
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.codes.len()
    }

    /// All state codes in index order.
    pub fn codes(&self) -> &[StateCode] {
        &self.codes
    }

    /// Code for a state index, or `None` if the index is out of range.
    pub fn encode(&self, index: StateIndex) -> Option<StateCode> {
        self.codes.get(index.as_usize()).copied()
    }

    /// Reverse lookup from a raw grid value to its state index.
    ///
    /// Returns `None` for padding (`0`) or any non-code value.
    pub fn index_of(&self, code: StateCode) -> Option<StateIndex> {
        self.codes
            .binary_search(&code)
            .ok()
            .map(|i| StateIndex(i as u32))
    }

    /// Decode an aggregate into `counts`, which must hold `state_count` slots.
    ///
    /// `aggregate` must be a sum of at most `3^n - 1` state codes. This is
    /// guaranteed by the aggregator and never checked here.
    pub fn decode_into(&self, aggregate: u64, counts: &mut [u32]) {
        debug_assert_eq!(counts.len(), self.codes.len());
        let last = self.codes.len() - 1;
        let mut rest = aggregate;
        for i in 0..last {
            let digit = rest % self.codes[i + 1];
            counts[i] = (digit / self.codes[i]) as u32;
            rest -= digit;
        }
        counts[last] = (rest / self.codes[last]) as u32;
    }

    /// Decode an aggregate into a freshly allocated count vector.
    pub fn decode(&self, aggregate: u64) -> NeighborCounts {
        let mut counts: NeighborCounts = SmallVec::from_elem(0, self.codes.len());
        self.decode_into(aggregate, &mut counts);
        counts
    }

    /// Inverse of [`decode`](Self::decode): `Σ codes[i] * counts[i]`.
    ///
    /// Extra trailing counts beyond `state_count` are ignored.
    pub fn compose(&self, counts: &[u32]) -> u64 {
        self.codes
            .iter()
            .zip(counts)
            .map(|(&code, &n)| code * u64::from(n))
            .sum()
    }
}
