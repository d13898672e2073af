//! Read-only grid views for renderers and analysis.

use tessera_core::{StateCode, StateEncoding, StateIndex, TickId};
use tessera_space::GridShape;

/// Borrowed view of the published generation.
///
/// Holding a snapshot borrows the [`Simulation`](crate::Simulation), so it
/// can never observe a half-written step.
#[derive(Clone, Copy, Debug)]
pub struct GridSnapshot<'a> {
    cells: &'a [StateCode],
    shape: &'a GridShape,
    encoding: &'a StateEncoding,
    tick: TickId,
}

impl<'a> GridSnapshot<'a> {
    pub(crate) fn new(
        cells: &'a [StateCode],
        shape: &'a GridShape,
        encoding: &'a StateEncoding,
        tick: TickId,
    ) -> Self {
        Self {
            cells,
            shape,
            encoding,
            tick,
        }
    }

    /// Raw state codes, row-major.
    pub fn cells(&self) -> &'a [StateCode] {
        self.cells
    }

    /// Grid shape.
    pub fn shape(&self) -> &'a GridShape {
        self.shape
    }

    /// Tick at which this generation was published.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Raw code at `coord`, if in bounds.
    pub fn code_at(&self, coord: &[i32]) -> Option<StateCode> {
        self.shape.flat_index(coord).map(|i| self.cells[i])
    }

    /// State index at `coord`, if in bounds.
    pub fn state_at(&self, coord: &[i32]) -> Option<StateIndex> {
        self.code_at(coord)
            .and_then(|code| self.encoding.index_of(code))
    }

    /// State index of every cell, row-major.
    ///
    /// Yields `None` only for a value that is not a state code, which the
    /// engine never stores.
    pub fn state_indices(&self) -> impl Iterator<Item = Option<StateIndex>> + 'a {
        let encoding = self.encoding;
        self.cells.iter().map(move |&code| encoding.index_of(code))
    }

    /// Number of cells in each state.
    pub fn population(&self) -> Vec<u64> {
        let mut counts = vec![0u64; self.encoding.state_count()];
        for state in self.state_indices().flatten() {
            counts[state.as_usize()] += 1;
        }
        counts
    }
}
