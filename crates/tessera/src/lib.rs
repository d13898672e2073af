//! Tessera: n-dimensional cellular automata with ordered rule chains.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tessera sub-crates. For most users, adding `tessera` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! // Conway's Life: birth on 3, survival on 2 or 3.
//! let setup = SimulationSetup::builder(2, 2)
//!     .rule(Rule::classic(0u32, 1u32, true, Membership::new().with(1u32, [3])))
//!     .rule(Rule::classic(1u32, 0u32, false, Membership::new().with(1u32, [2, 3])))
//!     .build()
//!     .unwrap();
//!
//! let mut sim = Simulation::builder(setup, 16).seed(42).build().unwrap();
//! sim.fill(StateIndex(0)).unwrap();
//! for x in 6..9 {
//!     sim.set_cell(&[8, x], StateIndex(1)).unwrap();
//! }
//! sim.step();
//! assert_eq!(sim.cell_state(&[7, 7]), Ok(StateIndex(1)));
//! assert_eq!(sim.tick(), TickId(1));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | IDs, `Coord`, state encoding |
//! | [`space`] | `tessera-space` | Grid shapes, boundary policy, neighbor offsets |
//! | [`arena`] | `tessera-arena` | Double-buffered grid storage |
//! | [`rules`] | `tessera-rules` | Rule variants, membership sets, rule chains |
//! | [`engine`] | `tessera-engine` | Setup, aggregation, history, the step loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the state encoding (`tessera-core`).
pub use tessera_core as types;

/// Grid shapes, boundary policy and neighbor offsets (`tessera-space`).
pub use tessera_space as space;

/// Double-buffered grid storage (`tessera-arena`).
pub use tessera_arena as arena;

/// Transition rules and rule chains (`tessera-rules`).
///
/// [`rules::Rule`] is the closed set of rule variants;
/// [`rules::RuleChain`] evaluates them with first-match-wins semantics.
pub use tessera_rules as rules;

/// The simulation engine (`tessera-engine`).
pub use tessera_engine as engine;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tessera_core::{Coord, StateCode, StateEncoding, StateIndex, TickId};

    // Space
    pub use tessera_space::{BoundaryPolicy, GridShape, NeighborOffsets};

    // Rules
    pub use tessera_rules::{CountSet, Membership, Rule, RuleChain};

    // Engine
    pub use tessera_engine::{
        CellError, ConfigError, GridSnapshot, History, Simulation, SimulationSetup, StepMetrics,
    };
}
