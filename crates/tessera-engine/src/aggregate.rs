//! Per-cell neighbor-code sums.
//!
//! The aggregate of a cell is the sum of the state codes of every cell at
//! one of the neighborhood offsets. Under [`BoundaryPolicy::Zero`] a
//! neighbor outside the grid contributes `0`, which adds nothing to any
//! digit. Under [`BoundaryPolicy::Wrap`] it is read from the opposite side.
//!
//! Work is organized as shifted adds over contiguous rows of the last axis:
//! for each output row and each offset, the source row is located once and
//! added in with a slice shift. No per-cell coordinate math is done for the
//! contiguous axis.

use tessera_core::{Coord, StateCode};
use tessera_space::{BoundaryPolicy, GridShape, NeighborOffsets};

/// Computes neighbor aggregates for a whole grid.
#[derive(Clone, Debug)]
pub struct NeighborAggregator {
    offsets: Vec<Coord>,
    boundary: BoundaryPolicy,
}

impl NeighborAggregator {
    /// Aggregator over `offsets` with the given boundary policy.
    pub fn new(offsets: &NeighborOffsets, boundary: BoundaryPolicy) -> Self {
        Self {
            offsets: offsets.as_slice().to_vec(),
            boundary,
        }
    }

    /// Boundary policy in use.
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Number of offsets summed per cell.
    pub fn neighbor_count(&self) -> usize {
        self.offsets.len()
    }

    /// Fill `out` with the aggregate of every cell of `grid`.
    ///
    /// `grid` and `out` must both hold `shape.cell_count()` entries and the
    /// offsets must have `shape.ndim()` components.
    pub fn aggregate(&self, grid: &[StateCode], shape: &GridShape, out: &mut [u64]) {
        debug_assert_eq!(grid.len(), shape.cell_count());
        debug_assert_eq!(out.len(), shape.cell_count());
        self.aggregate_rows(grid, shape, out);
    }

    #[cfg(not(feature = "parallel"))]
    fn aggregate_rows(&self, grid: &[StateCode], shape: &GridShape, out: &mut [u64]) {
        for (row, dst) in out.chunks_mut(shape.row_len()).enumerate() {
            self.aggregate_row(grid, shape, row, dst);
        }
    }

    #[cfg(feature = "parallel")]
    fn aggregate_rows(&self, grid: &[StateCode], shape: &GridShape, out: &mut [u64]) {
        use rayon::prelude::*;
        out.par_chunks_mut(shape.row_len())
            .enumerate()
            .for_each(|(row, dst)| self.aggregate_row(grid, shape, row, dst));
    }

    /// Allocating form of [`aggregate`](Self::aggregate).
    pub fn aggregate_to_vec(&self, grid: &[StateCode], shape: &GridShape) -> Vec<u64> {
        let mut out = vec![0; shape.cell_count()];
        self.aggregate(grid, shape, &mut out);
        out
    }

    /// Aggregate one contiguous row (index `row` of `shape.row_count()`).
    fn aggregate_row(&self, grid: &[StateCode], shape: &GridShape, row: usize, out: &mut [u64]) {
        out.fill(0);
        let len = shape.row_len();
        let base = row * len;
        let last = shape.ndim() - 1;
        let extents = &shape.extents()[..last];
        let strides = &shape.strides()[..last];

        'offsets: for offset in &self.offsets {
            let mut src_base = 0;
            for ((&extent, &stride), &delta) in extents.iter().zip(strides).zip(offset.iter()) {
                let c = ((base / stride) % extent) as i64;
                match self.boundary.resolve_axis(c + i64::from(delta), extent) {
                    Some(resolved) => src_base += resolved * stride,
                    None => continue 'offsets,
                }
            }
            let src = &grid[src_base..src_base + len];
            add_shifted(out, src, offset[last], self.boundary);
        }
    }
}

/// `out[j] += src[j + shift]` along one row, resolving overhang per policy.
fn add_shifted(out: &mut [u64], src: &[StateCode], shift: i32, boundary: BoundaryPolicy) {
    let len = src.len();
    match boundary {
        BoundaryPolicy::Zero => {
            let s = shift.unsigned_abs() as usize;
            if s >= len {
                return;
            }
            if shift >= 0 {
                add_into(&mut out[..len - s], &src[s..]);
            } else {
                add_into(&mut out[s..], &src[..len - s]);
            }
        }
        BoundaryPolicy::Wrap => {
            let s = i64::from(shift).rem_euclid(len as i64) as usize;
            add_into(&mut out[..len - s], &src[s..]);
            add_into(&mut out[len - s..], &src[..s]);
        }
    }
}

fn add_into(dst: &mut [u64], src: &[StateCode]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d += s;
    }
}
