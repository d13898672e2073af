//! Spatial structures for Tessera automata.
//!
//! - [`GridShape`]: row-major n-dimensional extents with flat-index arithmetic
//! - [`BoundaryPolicy`]: what a neighbor lookup sees past the grid edge
//! - [`NeighborOffsets`]: the relative offsets that make up a neighborhood,
//!   either the Moore neighborhood or a validated explicit list

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod offsets;
pub mod shape;

pub use edge::BoundaryPolicy;
pub use error::SpaceError;
pub use offsets::{enumerate_offsets, NeighborOffsets};
pub use shape::GridShape;
