//! Core types for the Tessera cellular automaton engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! state identifiers, the [`Coord`] alias, and [`StateEncoding`], the
//! mixed-radix scheme that lets a whole neighborhood be summed into one
//! integer and split back into per-state counts.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod id;

pub use encoding::{NeighborCounts, StateEncoding, MAX_DIMENSIONALITY};
pub use error::EncodingError;
pub use id::{Coord, StateCode, StateIndex, TickId};
