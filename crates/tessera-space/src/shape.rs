//! Row-major n-dimensional grid shape.

use smallvec::SmallVec;
use tessera_core::Coord;

use crate::edge::BoundaryPolicy;
use crate::error::SpaceError;

/// Extents and strides of an n-dimensional grid.
///
/// Cells are stored row-major: the last axis is contiguous, and the flat
/// index of `[c0, c1, …, c(n-1)]` is `Σ c_k * stride_k`.
///
/// # Examples
///
/// ```
/// use tessera_space::GridShape;
///
/// let shape = GridShape::cube(2, 10).unwrap();
/// assert_eq!(shape.cell_count(), 100);
/// assert_eq!(shape.flat_index(&[3, 4]), Some(34));
/// assert_eq!(shape.coord_of(34).as_slice(), &[3, 4]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridShape {
    extents: SmallVec<[usize; 4]>,
    strides: SmallVec<[usize; 4]>,
    cell_count: usize,
}

impl GridShape {
    /// Build a shape from per-axis extents.
    ///
    /// Returns `Err(SpaceError::ZeroDimensionality)` for no axes,
    /// `Err(SpaceError::EmptySpace)` if any extent is zero, and
    /// `Err(SpaceError::CellCountOverflow)` if the cell count overflows.
    pub fn new(extents: &[usize]) -> Result<Self, SpaceError> {
        if extents.is_empty() {
            return Err(SpaceError::ZeroDimensionality);
        }
        if extents.contains(&0) {
            return Err(SpaceError::EmptySpace);
        }
        // Extents must also fit in i32 so coordinates and offsets stay signed.
        if extents.iter().any(|&e| e > i32::MAX as usize) {
            return Err(SpaceError::CellCountOverflow {
                extents: extents.to_vec(),
            });
        }

        let mut strides: SmallVec<[usize; 4]> = SmallVec::from_elem(0, extents.len());
        let mut acc: usize = 1;
        for axis in (0..extents.len()).rev() {
            strides[axis] = acc;
            acc = acc
                .checked_mul(extents[axis])
                .ok_or_else(|| SpaceError::CellCountOverflow {
                    extents: extents.to_vec(),
                })?;
        }

        Ok(Self {
            extents: SmallVec::from_slice(extents),
            strides,
            cell_count: acc,
        })
    }

    /// A hypercube with `size` cells along each of `dimensionality` axes.
    pub fn cube(dimensionality: usize, size: usize) -> Result<Self, SpaceError> {
        let extents: SmallVec<[usize; 4]> = SmallVec::from_elem(size, dimensionality);
        Self::new(&extents)
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    /// Per-axis extents.
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Per-axis strides in flat-index units.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Length of the contiguous last axis.
    pub fn row_len(&self) -> usize {
        self.extents[self.extents.len() - 1]
    }

    /// Number of contiguous rows (`cell_count / row_len`).
    pub fn row_count(&self) -> usize {
        self.cell_count / self.row_len()
    }

    /// Whether `coord` has the right arity and lies inside the grid.
    pub fn contains(&self, coord: &[i32]) -> bool {
        self.flat_index(coord).is_some()
    }

    /// Flat index of an in-bounds coordinate.
    pub fn flat_index(&self, coord: &[i32]) -> Option<usize> {
        if coord.len() != self.extents.len() {
            return None;
        }
        let mut index = 0;
        for ((&c, &extent), &stride) in coord.iter().zip(&self.extents).zip(&self.strides) {
            if c < 0 || c as usize >= extent {
                return None;
            }
            index += c as usize * stride;
        }
        Some(index)
    }

    /// Checked variant of [`flat_index`](Self::flat_index) that explains
    /// the failure.
    pub fn checked_index(&self, coord: &[i32]) -> Result<usize, SpaceError> {
        if coord.len() != self.extents.len() {
            return Err(SpaceError::DimensionMismatch {
                expected: self.extents.len(),
                got: coord.len(),
            });
        }
        self.flat_index(coord)
            .ok_or_else(|| SpaceError::CoordOutOfBounds {
                coord: SmallVec::from_slice(coord),
                bounds: format!("extents {:?}", self.extents.as_slice()),
            })
    }

    /// Coordinate of a flat index. `index` must be below `cell_count`.
    pub fn coord_of(&self, index: usize) -> Coord {
        debug_assert!(index < self.cell_count);
        self.extents
            .iter()
            .zip(&self.strides)
            .map(|(&extent, &stride)| ((index / stride) % extent) as i32)
            .collect()
    }

    /// The central cell (`extent / 2` on every axis).
    pub fn center(&self) -> Coord {
        self.extents.iter().map(|&e| (e / 2) as i32).collect()
    }

    /// Flat index of the cell at `offset` from the cell at flat `index`.
    ///
    /// Returns `None` when the neighbor falls in the padding under
    /// [`BoundaryPolicy::Zero`].
    pub fn neighbor_index(
        &self,
        index: usize,
        offset: &[i32],
        policy: BoundaryPolicy,
    ) -> Option<usize> {
        debug_assert_eq!(offset.len(), self.extents.len());
        let mut result = 0;
        for ((&extent, &stride), &delta) in self.extents.iter().zip(&self.strides).zip(offset) {
            let c = ((index / stride) % extent) as i64;
            let resolved = policy.resolve_axis(c + i64::from(delta), extent)?;
            result += resolved * stride;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_shapes() {
        assert_eq!(GridShape::new(&[]), Err(SpaceError::ZeroDimensionality));
        assert_eq!(GridShape::new(&[4, 0]), Err(SpaceError::EmptySpace));
        assert!(matches!(
            GridShape::new(&[usize::MAX / 2, 4]),
            Err(SpaceError::CellCountOverflow { .. })
        ));
    }

    #[test]
    fn strides_are_row_major() {
        let shape = GridShape::new(&[2, 3, 4]).unwrap();
        assert_eq!(shape.strides(), &[12, 4, 1]);
        assert_eq!(shape.cell_count(), 24);
        assert_eq!(shape.row_len(), 4);
        assert_eq!(shape.row_count(), 6);
    }

    #[test]
    fn flat_index_bounds() {
        let shape = GridShape::cube(2, 3).unwrap();
        assert_eq!(shape.flat_index(&[2, 2]), Some(8));
        assert_eq!(shape.flat_index(&[3, 0]), None);
        assert_eq!(shape.flat_index(&[-1, 0]), None);
        assert_eq!(shape.flat_index(&[1]), None);
    }

    #[test]
    fn checked_index_explains() {
        let shape = GridShape::cube(2, 3).unwrap();
        assert_eq!(
            shape.checked_index(&[1]),
            Err(SpaceError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
        assert!(matches!(
            shape.checked_index(&[0, 5]),
            Err(SpaceError::CoordOutOfBounds { .. })
        ));
    }

    #[test]
    fn center_of_odd_and_even() {
        assert_eq!(GridShape::cube(1, 63).unwrap().center().as_slice(), &[31]);
        assert_eq!(GridShape::cube(2, 10).unwrap().center().as_slice(), &[5, 5]);
    }

    #[test]
    fn neighbor_index_zero_and_wrap() {
        let shape = GridShape::cube(2, 3).unwrap();
        // Corner (0, 0) looking up-left.
        assert_eq!(shape.neighbor_index(0, &[-1, -1], BoundaryPolicy::Zero), None);
        assert_eq!(
            shape.neighbor_index(0, &[-1, -1], BoundaryPolicy::Wrap),
            Some(8)
        );
        assert_eq!(
            shape.neighbor_index(4, &[0, 1], BoundaryPolicy::Zero),
            Some(5)
        );
    }

    proptest! {
        #[test]
        fn coord_round_trip(
            extents in proptest::collection::vec(1usize..6, 1..4),
            seed in 0usize..10_000,
        ) {
            let shape = GridShape::new(&extents).unwrap();
            let index = seed % shape.cell_count();
            let coord = shape.coord_of(index);
            prop_assert_eq!(shape.flat_index(&coord), Some(index));
        }
    }
}
