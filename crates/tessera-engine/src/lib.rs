//! Step engine for Tessera cellular automata.
//!
//! [`Simulation`] owns a double-buffered grid and advances it one
//! generation per [`step()`](Simulation::step): aggregate neighbor codes,
//! decode them per cell, run the [`RuleChain`](tessera_rules::RuleChain),
//! write into the staging buffer, publish, and optionally record
//! per-state populations into [`History`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod history;
pub mod metrics;
pub mod simulation;
pub mod snapshot;

mod stream;

pub use aggregate::NeighborAggregator;
pub use config::{ConfigError, SimulationSetup, SimulationSetupBuilder};
pub use history::History;
pub use metrics::StepMetrics;
pub use simulation::{CellError, Simulation, SimulationBuilder};
pub use snapshot::GridSnapshot;
