//! Benchmark profiles for the Tessera engine.
//!
//! Provides pre-built [`Simulation`]s for benchmarking:
//!
//! - [`reference_profile`]: Life on a 100x100 grid (10K cells)
//! - [`stress_profile`]: prey-predator on a 316x316 grid (~100K cells)
//! - [`volume_profile`]: 3-D Life on a 30x30x30 grid (27K cells)

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessera_engine::{ConfigError, Simulation};
use tessera_test_utils::{life_3d_setup, life_setup, prey_predator_setup};

/// Life on 100x100, randomly seeded.
pub fn reference_profile(seed: u64) -> Result<Simulation, ConfigError> {
    Simulation::builder(life_setup(), 100).seed(seed).build()
}

/// Prey-predator on 316x316 with history recording. Every step draws
/// random numbers for most cells.
pub fn stress_profile(seed: u64) -> Result<Simulation, ConfigError> {
    Simulation::builder(prey_predator_setup(), 316)
        .record_history(true)
        .seed(seed)
        .build()
}

/// 3-D Life on 30x30x30 (26 neighbors per cell).
pub fn volume_profile(seed: u64) -> Result<Simulation, ConfigError> {
    Simulation::builder(life_3d_setup(), 30).seed(seed).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_build() {
        assert_eq!(reference_profile(42).unwrap().shape().cell_count(), 10_000);
        assert_eq!(stress_profile(42).unwrap().shape().cell_count(), 99_856);
        assert_eq!(volume_profile(42).unwrap().shape().cell_count(), 27_000);
    }

    #[test]
    fn profiles_are_seeded() {
        let a = stress_profile(7).unwrap();
        let b = stress_profile(7).unwrap();
        assert_eq!(a.snapshot_grid().cells(), b.snapshot_grid().cells());
    }
}
