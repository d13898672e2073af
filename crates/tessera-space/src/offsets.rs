//! Neighborhood offsets: Moore enumeration and explicit lists.

use std::collections::HashMap;

use smallvec::SmallVec;
use tessera_core::{Coord, MAX_DIMENSIONALITY};

use crate::error::SpaceError;

/// Every vector of `{-1, 0, 1}^n` except the zero vector.
///
/// Order is lexicographic over the `{0, 1, 2}^n` index with a `-1` shift,
/// last axis fastest. The result always has `3^n - 1` entries. More than
/// [`MAX_DIMENSIONALITY`] axes is rejected before anything is allocated.
///
/// ```
/// use tessera_space::enumerate_offsets;
///
/// let expected: Vec<tessera_core::Coord> = vec![vec![-1].into(), vec![1].into()];
/// assert_eq!(enumerate_offsets(1).unwrap(), expected);
/// assert_eq!(enumerate_offsets(3).unwrap().len(), 26);
/// ```
pub fn enumerate_offsets(dimensionality: usize) -> Result<Vec<Coord>, SpaceError> {
    if dimensionality == 0 {
        return Err(SpaceError::ZeroDimensionality);
    }
    if dimensionality > MAX_DIMENSIONALITY {
        return Err(SpaceError::DimensionTooLarge {
            dimensionality,
            max: MAX_DIMENSIONALITY,
        });
    }
    let total = 3usize.pow(dimensionality as u32);

    let mut offsets = Vec::with_capacity(total - 1);
    let mut digits: Coord = SmallVec::from_elem(0, dimensionality);
    for _ in 0..total {
        if digits.iter().any(|&d| d != 1) {
            offsets.push(digits.iter().map(|&d| d - 1).collect());
        }
        // Odometer increment, last axis fastest.
        for d in digits.iter_mut().rev() {
            *d += 1;
            if *d < 3 {
                break;
            }
            *d = 0;
        }
    }
    Ok(offsets)
}

/// The relative offsets that define a cell's neighborhood.
///
/// Immutable after construction. Either the full Moore neighborhood
/// ([`moore`](Self::moore)) or a caller-supplied list validated by
/// [`explicit`](Self::explicit).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborOffsets {
    dimensionality: usize,
    offsets: Vec<Coord>,
}

impl NeighborOffsets {
    /// The Moore neighborhood: all `3^n - 1` unit-step vectors.
    pub fn moore(dimensionality: usize) -> Result<Self, SpaceError> {
        Ok(Self {
            dimensionality,
            offsets: enumerate_offsets(dimensionality)?,
        })
    }

    /// A caller-supplied neighborhood.
    ///
    /// Every offset must have `dimensionality` components, none may be the
    /// zero vector, none may repeat, and there may be at most `3^n - 1` of
    /// them so that no encoding digit can overflow.
    pub fn explicit(dimensionality: usize, offsets: Vec<Coord>) -> Result<Self, SpaceError> {
        if dimensionality == 0 {
            return Err(SpaceError::ZeroDimensionality);
        }
        let max = u32::try_from(dimensionality)
            .ok()
            .and_then(|exp| 3usize.checked_pow(exp))
            .map(|n| n - 1)
            .unwrap_or(usize::MAX);
        if offsets.len() > max {
            return Err(SpaceError::TooManyOffsets {
                count: offsets.len(),
                max,
            });
        }

        {
            let mut seen: HashMap<&[i32], usize> = HashMap::with_capacity(offsets.len());
            for (index, offset) in offsets.iter().enumerate() {
                if offset.len() != dimensionality {
                    return Err(SpaceError::DimensionMismatch {
                        expected: dimensionality,
                        got: offset.len(),
                    });
                }
                if offset.iter().all(|&d| d == 0) {
                    return Err(SpaceError::ZeroOffset { index });
                }
                if let Some(&first) = seen.get(offset.as_slice()) {
                    return Err(SpaceError::DuplicateOffset { index, first });
                }
                seen.insert(offset.as_slice(), index);
            }
        }

        Ok(Self {
            dimensionality,
            offsets,
        })
    }

    /// Number of components per offset.
    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Number of offsets.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the neighborhood is empty (possible only for explicit lists).
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The offsets in evaluation order.
    pub fn as_slice(&self) -> &[Coord] {
        &self.offsets
    }

    /// Iterate over the offsets.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.offsets.iter()
    }
}

impl<'a> IntoIterator for &'a NeighborOffsets {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn moore_sizes() {
        for n in 1..=4 {
            let offsets = NeighborOffsets::moore(n).unwrap();
            assert_eq!(offsets.len(), 3usize.pow(n as u32) - 1);
            assert!(offsets.iter().all(|o| o.len() == n));
        }
    }

    #[test]
    fn moore_2d_order() {
        let offsets = enumerate_offsets(2).unwrap();
        let expected: Vec<Coord> = vec![
            smallvec![-1, -1],
            smallvec![-1, 0],
            smallvec![-1, 1],
            smallvec![0, -1],
            smallvec![0, 1],
            smallvec![1, -1],
            smallvec![1, 0],
            smallvec![1, 1],
        ];
        assert_eq!(offsets, expected);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(enumerate_offsets(0), Err(SpaceError::ZeroDimensionality));
    }

    #[test]
    fn oversized_dimensionality_rejected_without_allocating() {
        assert_eq!(
            enumerate_offsets(21),
            Err(SpaceError::DimensionTooLarge {
                dimensionality: 21,
                max: MAX_DIMENSIONALITY
            })
        );
        assert!(NeighborOffsets::moore(usize::MAX).is_err());
    }

    #[test]
    fn explicit_von_neumann_accepted() {
        let offsets = NeighborOffsets::explicit(
            2,
            vec![
                smallvec![-1, 0],
                smallvec![1, 0],
                smallvec![0, -1],
                smallvec![0, 1],
            ],
        )
        .unwrap();
        assert_eq!(offsets.len(), 4);
    }

    #[test]
    fn explicit_rejects_zero_vector() {
        let err = NeighborOffsets::explicit(2, vec![smallvec![1, 0], smallvec![0, 0]]);
        assert_eq!(err, Err(SpaceError::ZeroOffset { index: 1 }));
    }

    #[test]
    fn explicit_rejects_duplicates() {
        let err = NeighborOffsets::explicit(
            2,
            vec![smallvec![1, 0], smallvec![0, 1], smallvec![1, 0]],
        );
        assert_eq!(err, Err(SpaceError::DuplicateOffset { index: 2, first: 0 }));
    }

    #[test]
    fn explicit_rejects_wrong_arity() {
        let err = NeighborOffsets::explicit(2, vec![smallvec![1]]);
        assert_eq!(
            err,
            Err(SpaceError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn explicit_rejects_more_than_a_digit_holds() {
        let offsets: Vec<Coord> = vec![smallvec![-2], smallvec![-1], smallvec![1]];
        assert_eq!(
            NeighborOffsets::explicit(1, offsets),
            Err(SpaceError::TooManyOffsets { count: 3, max: 2 })
        );
    }
}
