//! Double-buffered ping-pong grid.
//!
//! [`GridBuffer`] keeps two cell buffers that alternate between staging
//! (writable) and published (readable) roles. The lifecycle per step is:
//! 1. `begin_tick()`: borrow the published buffer for reading and the
//!    staging buffer for writing, as a [`TickGuard`]
//! 2. the caller fills every staging cell
//! 3. `publish()`: swap roles, bump the generation
//!
//! Because the guard holds both borrows, no cell of the generation being
//! read can change while the next one is written.

use tessera_core::StateCode;
use tessera_space::GridShape;

use crate::error::ArenaError;

/// Split borrow of a [`GridBuffer`] for the duration of one step.
///
/// Created by [`GridBuffer::begin_tick()`] and dropped before
/// [`GridBuffer::publish()`].
#[must_use]
pub struct TickGuard<'a> {
    /// The current generation, read-only.
    pub published: &'a [StateCode],
    /// The next generation, write-only by convention. Every cell must be
    /// written before publishing.
    pub staging: &'a mut [StateCode],
}

/// Double-buffered n-dimensional grid of state codes.
///
/// # Buffer layout
///
/// ```text
/// b_is_staging = true:   buffer_a published, buffer_b staging
/// b_is_staging = false:  buffer_b published, buffer_a staging
/// ```
#[derive(Clone, Debug)]
pub struct GridBuffer {
    buffer_a: Vec<StateCode>,
    buffer_b: Vec<StateCode>,
    /// Which buffer is currently staging.
    b_is_staging: bool,
    /// Incremented on every publish.
    generation: u64,
    /// Whether `begin_tick()` was called and `publish()` not yet.
    tick_in_progress: bool,
    shape: GridShape,
}

impl GridBuffer {
    /// Create a grid with every cell set to `fill`.
    pub fn new(shape: GridShape, fill: StateCode) -> Self {
        let cells = shape.cell_count();
        Self {
            buffer_a: vec![fill; cells],
            buffer_b: vec![fill; cells],
            b_is_staging: true,
            generation: 0,
            tick_in_progress: false,
            shape,
        }
    }

    /// Create a grid from explicit row-major cell data.
    ///
    /// Returns `Err(ArenaError::LengthMismatch)` if `cells` does not have
    /// exactly `shape.cell_count()` entries.
    pub fn from_cells(shape: GridShape, cells: Vec<StateCode>) -> Result<Self, ArenaError> {
        if cells.len() != shape.cell_count() {
            return Err(ArenaError::LengthMismatch {
                expected: shape.cell_count(),
                got: cells.len(),
            });
        }
        let staging = cells.clone();
        Ok(Self {
            buffer_a: cells,
            buffer_b: staging,
            b_is_staging: true,
            generation: 0,
            tick_in_progress: false,
            shape,
        })
    }

    /// Grid shape.
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Number of publishes since construction or the last resize.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a tick is in progress.
    pub fn is_tick_in_progress(&self) -> bool {
        self.tick_in_progress
    }

    /// The current (published) generation.
    pub fn published(&self) -> &[StateCode] {
        if self.b_is_staging {
            &self.buffer_a
        } else {
            &self.buffer_b
        }
    }

    /// Mutable access to the published generation, for edits between steps.
    pub fn published_mut(&mut self) -> &mut [StateCode] {
        if self.b_is_staging {
            &mut self.buffer_a
        } else {
            &mut self.buffer_b
        }
    }

    /// Borrow the published buffer for reading and the staging buffer for
    /// writing.
    pub fn begin_tick(&mut self) -> TickGuard<'_> {
        self.tick_in_progress = true;
        let (published, staging) = if self.b_is_staging {
            (&self.buffer_a, &mut self.buffer_b)
        } else {
            (&self.buffer_b, &mut self.buffer_a)
        };
        TickGuard {
            published: published.as_slice(),
            staging: staging.as_mut_slice(),
        }
    }

    /// Make the staging buffer the published one.
    ///
    /// Returns `Err(ArenaError::NoTickInProgress)` if `begin_tick()` was not
    /// called first.
    pub fn publish(&mut self) -> Result<(), ArenaError> {
        if !self.tick_in_progress {
            return Err(ArenaError::NoTickInProgress);
        }
        self.b_is_staging = !self.b_is_staging;
        self.generation += 1;
        self.tick_in_progress = false;
        Ok(())
    }

    /// Reshape the grid, keeping the cells whose coordinates exist in both
    /// shapes.
    ///
    /// Cells outside the old extents are produced by `fresh`, called once
    /// per new cell in row-major order. Cells outside the new extents are
    /// dropped. Both buffers are reallocated and the generation resets.
    pub fn resize_with<F>(&mut self, shape: GridShape, mut fresh: F)
    where
        F: FnMut() -> StateCode,
    {
        let old_shape = &self.shape;
        let old = self.published();
        let cells: Vec<StateCode> = (0..shape.cell_count())
            .map(|index| {
                let coord = shape.coord_of(index);
                match old_shape.flat_index(&coord) {
                    Some(old_index) => old[old_index],
                    None => fresh(),
                }
            })
            .collect();

        self.buffer_b = cells.clone();
        self.buffer_a = cells;
        self.b_is_staging = true;
        self.generation = 0;
        self.tick_in_progress = false;
        self.shape = shape;
    }

    /// Heap bytes held by both buffers.
    pub fn memory_bytes(&self) -> usize {
        (self.buffer_a.capacity() + self.buffer_b.capacity()) * std::mem::size_of::<StateCode>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(extents: &[usize]) -> GridShape {
        GridShape::new(extents).unwrap()
    }

    #[test]
    fn new_fills_both_buffers() {
        let mut grid = GridBuffer::new(shape(&[2, 2]), 7);
        assert_eq!(grid.published(), &[7, 7, 7, 7]);
        let guard = grid.begin_tick();
        assert_eq!(guard.staging, &[7, 7, 7, 7]);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        assert_eq!(
            GridBuffer::from_cells(shape(&[3]), vec![1, 1]).unwrap_err(),
            ArenaError::LengthMismatch {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn publish_swaps_without_touching_published() {
        let mut grid = GridBuffer::from_cells(shape(&[3]), vec![1, 3, 1]).unwrap();
        {
            let guard = grid.begin_tick();
            for (out, &cur) in guard.staging.iter_mut().zip(guard.published) {
                *out = if cur == 1 { 3 } else { 1 };
            }
            assert_eq!(guard.published, &[1, 3, 1]);
        }
        grid.publish().unwrap();
        assert_eq!(grid.published(), &[3, 1, 3]);
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn publish_without_begin_fails() {
        let mut grid = GridBuffer::new(shape(&[4]), 1);
        assert_eq!(grid.publish(), Err(ArenaError::NoTickInProgress));
        let _ = grid.begin_tick();
        assert!(grid.is_tick_in_progress());
        assert!(grid.publish().is_ok());
        assert_eq!(grid.publish(), Err(ArenaError::NoTickInProgress));
    }

    #[test]
    fn alternating_publishes_reuse_buffers() {
        let mut grid = GridBuffer::new(shape(&[2]), 1);
        for generation in 1..=4u64 {
            let guard = grid.begin_tick();
            guard.staging.fill(generation);
            grid.publish().unwrap();
            assert_eq!(grid.published(), &[generation, generation]);
        }
    }

    #[test]
    fn published_mut_edits_current_generation() {
        let mut grid = GridBuffer::new(shape(&[3]), 1);
        grid.published_mut()[1] = 3;
        assert_eq!(grid.published(), &[1, 3, 1]);
    }

    #[test]
    fn resize_larger_keeps_prefix_and_pads_fresh() {
        let mut grid = GridBuffer::from_cells(shape(&[2, 2]), vec![1, 3, 9, 27]).unwrap();
        grid.resize_with(shape(&[3, 3]), || 0);
        assert_eq!(grid.published(), &[1, 3, 0, 9, 27, 0, 0, 0, 0]);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn resize_smaller_truncates() {
        let cells: Vec<StateCode> = (1..=9).collect();
        let mut grid = GridBuffer::from_cells(shape(&[3, 3]), cells).unwrap();
        grid.resize_with(shape(&[2, 2]), || unreachable!("no new cells"));
        assert_eq!(grid.published(), &[1, 2, 4, 5]);
    }

    proptest::proptest! {
        #[test]
        fn resize_keeps_every_shared_coordinate(
            from in proptest::collection::vec(1usize..6, 2),
            to in proptest::collection::vec(1usize..6, 2),
        ) {
            let old = shape(&from);
            let cells: Vec<StateCode> = (0..old.cell_count() as u64).map(|i| i + 1).collect();
            let mut grid = GridBuffer::from_cells(old.clone(), cells.clone()).unwrap();
            grid.resize_with(shape(&to), || 0);
            let new = grid.shape().clone();
            for (index, &value) in grid.published().iter().enumerate() {
                let coord = new.coord_of(index);
                let expected = old.flat_index(&coord).map_or(0, |i| cells[i]);
                proptest::prop_assert_eq!(value, expected);
            }
        }
    }
}
