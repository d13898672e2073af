//! Recorded per-state population counts.

use tessera_core::StateIndex;

/// Append-only table of per-state populations, one row per recorded step.
///
/// Rows are stored flat, `state_count` entries each, so the whole table is
/// one allocation that external analysis can borrow as a matrix.
///
/// ```
/// use tessera_engine::History;
///
/// let mut history = History::new(2);
/// history.record(&[90, 10]);
/// history.record(&[85, 15]);
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.row(1), Some(&[85, 15][..]));
/// assert_eq!(history.series(1u32.into()).collect::<Vec<_>>(), vec![10, 15]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    state_count: usize,
    data: Vec<u64>,
}

impl History {
    /// Empty history for `state_count` states.
    pub fn new(state_count: usize) -> Self {
        Self {
            state_count,
            data: Vec::new(),
        }
    }

    /// Width of every row.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Append one row. `populations` must hold `state_count` entries.
    pub fn record(&mut self, populations: &[u64]) {
        debug_assert_eq!(populations.len(), self.state_count);
        self.data.extend_from_slice(populations);
    }

    /// Number of recorded rows.
    pub fn len(&self) -> usize {
        self.data.len() / self.state_count.max(1)
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop every row.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Row `step` (0 = first recorded step).
    pub fn row(&self, step: usize) -> Option<&[u64]> {
        let start = step.checked_mul(self.state_count)?;
        self.data.get(start..start + self.state_count)
    }

    /// The most recent row.
    pub fn latest(&self) -> Option<&[u64]> {
        self.len().checked_sub(1).and_then(|last| self.row(last))
    }

    /// All rows in recording order.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u64> {
        self.data.chunks_exact(self.state_count.max(1))
    }

    /// One state's population over time.
    pub fn series(&self, state: StateIndex) -> impl Iterator<Item = u64> + '_ {
        let column = state.as_usize();
        self.rows().filter_map(move |row| row.get(column).copied())
    }

    /// Flat row-major view, `len() * state_count()` entries.
    pub fn as_flat(&self) -> &[u64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_latest() {
        let mut h = History::new(3);
        assert!(h.is_empty());
        assert_eq!(h.latest(), None);
        h.record(&[1, 2, 3]);
        h.record(&[4, 5, 6]);
        assert_eq!(h.rows().collect::<Vec<_>>(), vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
        assert_eq!(h.latest(), Some(&[4, 5, 6][..]));
        assert_eq!(h.row(2), None);
        assert_eq!(h.as_flat().len(), 6);
    }

    #[test]
    fn clear_empties() {
        let mut h = History::new(2);
        h.record(&[1, 1]);
        h.clear();
        assert_eq!(h.len(), 0);
        assert_eq!(h.rows().count(), 0);
    }

    #[test]
    fn series_out_of_range_is_empty() {
        let mut h = History::new(2);
        h.record(&[1, 1]);
        assert_eq!(h.series(StateIndex(5)).count(), 0);
    }
}
