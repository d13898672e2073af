//! Double-buffered grid storage for Tessera automata.
//!
//! The grid lives in two same-shaped buffers that alternate between
//! "published" (readable, the current generation) and "staging"
//! (writable, the next generation):
//!
//! ```text
//! GridBuffer
//! ├── buffer_a: Vec<StateCode>  ←── published (even generations) / staging (odd)
//! └── buffer_b: Vec<StateCode>  ←── staging (even generations) / published (odd)
//! ```
//!
//! A step reads only the published buffer and writes only the staging
//! buffer; [`GridBuffer::publish`] flips the roles without copying.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pingpong;

pub use error::ArenaError;
pub use pingpong::{GridBuffer, TickGuard};
