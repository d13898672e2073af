//! Read-only positional view of one cell's neighborhood.

use tessera_core::{StateCode, StateEncoding, StateIndex};
use tessera_space::{BoundaryPolicy, GridShape};

/// One cell of the pre-step grid, with access to its neighbors by offset.
///
/// Threshold rules only need decoded counts. Rules that care about *where*
/// a neighbor sits (left versus right in 1-D tables) read it through this
/// view. The view borrows the generation being read, never the one being
/// written.
#[derive(Clone, Copy, Debug)]
pub struct CellView<'a> {
    grid: &'a [StateCode],
    shape: &'a GridShape,
    boundary: BoundaryPolicy,
    encoding: &'a StateEncoding,
    index: usize,
}

impl<'a> CellView<'a> {
    /// View the cell at flat `index` of `grid`.
    pub fn new(
        grid: &'a [StateCode],
        shape: &'a GridShape,
        boundary: BoundaryPolicy,
        encoding: &'a StateEncoding,
        index: usize,
    ) -> Self {
        debug_assert_eq!(grid.len(), shape.cell_count());
        debug_assert!(index < grid.len());
        Self {
            grid,
            shape,
            boundary,
            encoding,
            index,
        }
    }

    /// Flat index of the viewed cell.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of states in the automaton.
    pub fn state_count(&self) -> usize {
        self.encoding.state_count()
    }

    /// Raw code of the neighbor at `offset`; `0` in the padding.
    pub fn neighbor_code(&self, offset: &[i32]) -> StateCode {
        self.shape
            .neighbor_index(self.index, offset, self.boundary)
            .map_or(0, |i| self.grid[i])
    }

    /// State of the neighbor at `offset`, or `None` in the padding.
    pub fn neighbor_state(&self, offset: &[i32]) -> Option<StateIndex> {
        self.encoding.index_of(self.neighbor_code(offset))
    }
}
