//! Test fixtures for Tessera development.
//!
//! Ready-made [`SimulationSetup`](tessera_engine::SimulationSetup)s for
//! well-known automata, pattern placement helpers, and reference
//! implementations to check the engine against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    duel_setup, life_3d_setup, life_setup, place_glider, prey_predator_setup, rps_setup,
    rule90_reference, rule90_setup, sierpinski_setup, GLIDER,
};
