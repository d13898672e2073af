//! Setups, patterns and reference rows.

use tessera_core::StateIndex;
use tessera_engine::{CellError, Simulation, SimulationSetup};
use tessera_rules::{Membership, Rule};

const DEAD: StateIndex = StateIndex(0);
const ALIVE: StateIndex = StateIndex(1);

/// Conway's Life: B3/S23 on a 2-D Moore neighborhood.
pub fn life_setup() -> SimulationSetup {
    SimulationSetup::builder(2, 2)
        .rule(Rule::classic(DEAD, ALIVE, true, Membership::new().with(ALIVE, [3])))
        .rule(Rule::classic(ALIVE, DEAD, false, Membership::new().with(ALIVE, [2, 3])))
        .display_names(["dead", "alive"])
        .display_colors([[0, 0, 0], [255, 255, 255]])
        .build()
        .expect("life setup is valid")
}

/// 3-D Life variant: B5/S45 on the 26-cell Moore neighborhood.
pub fn life_3d_setup() -> SimulationSetup {
    SimulationSetup::builder(3, 2)
        .rule(Rule::classic(DEAD, ALIVE, true, Membership::new().with(ALIVE, [5])))
        .rule(Rule::classic(ALIVE, DEAD, false, Membership::new().with(ALIVE, [4, 5])))
        .display_colors([[0, 0, 0], [255, 0, 0]])
        .build()
        .expect("3d life setup is valid")
}

/// Rock-paper-scissors: each state yields to the one that beats it when
/// that state has at least three neighbors.
pub fn rps_setup() -> SimulationSetup {
    let few = [0, 1, 2];
    SimulationSetup::builder(2, 3)
        .rule(Rule::classic(0u32, 0u32, true, Membership::new().with(2u32, few)))
        .rule(Rule::classic(0u32, 2u32, true, Membership::new().with(1u32, few)))
        .rule(Rule::classic(1u32, 1u32, true, Membership::new().with(0u32, few)))
        .rule(Rule::classic(1u32, 0u32, true, Membership::new().with(2u32, few)))
        .rule(Rule::classic(2u32, 2u32, true, Membership::new().with(1u32, few)))
        .rule(Rule::classic(2u32, 1u32, true, Membership::new().with(0u32, few)))
        .display_names(["rock", "paper", "scissors"])
        .build()
        .expect("rps setup is valid")
}

/// Two states, each cell adopting a neighbor's state weighted by count.
pub fn duel_setup() -> SimulationSetup {
    SimulationSetup::builder(2, 2)
        .rule(Rule::WeightedRandom)
        .display_colors([[255, 255, 0], [0, 255, 255]])
        .build()
        .expect("duel setup is valid")
}

/// Empty, prey and predator, with probabilistic growth and predation.
pub fn prey_predator_setup() -> SimulationSetup {
    SimulationSetup::builder(2, 3)
        .rule(Rule::probabilistic(0u32, 1u32, 0.7, Membership::new().with(1u32, [2, 3, 4])))
        .rule(Rule::probabilistic(1u32, 2u32, 0.5, Membership::new().with(2u32, 1..=8)))
        .rule(Rule::probabilistic(2u32, 0u32, 0.85, Membership::new().with(1u32, [0])))
        .rule(Rule::probabilistic(2u32, 0u32, 0.85, Membership::new().with(2u32, 4..=8)))
        .rule(Rule::probabilistic(2u32, 2u32, 0.8, Membership::new().with(1u32, 1..=8)))
        .display_names(["empty", "prey", "predator"])
        .display_colors([[0, 0, 0], [0, 200, 0], [200, 0, 0]])
        .build()
        .expect("prey-predator setup is valid")
}

/// Wolfram rule 90 via the table rule.
pub fn rule90_setup() -> SimulationSetup {
    SimulationSetup::builder(1, 2)
        .rule(Rule::elementary(90))
        .build()
        .expect("rule 90 setup is valid")
}

/// Rule 90 via the parity rule.
pub fn sierpinski_setup() -> SimulationSetup {
    SimulationSetup::builder(1, 2)
        .rule(Rule::Parity)
        .build()
        .expect("sierpinski setup is valid")
}

/// Glider cells as `[row, col]`, heading down-right (+1, +1 every 4 steps).
pub const GLIDER: [[i32; 2]; 5] = [[0, 1], [1, 2], [2, 0], [2, 1], [2, 2]];

/// Clear `sim` and place a glider with its bounding box at `origin`.
pub fn place_glider(sim: &mut Simulation, origin: [i32; 2]) -> Result<(), CellError> {
    sim.fill(DEAD)?;
    for [row, col] in GLIDER {
        sim.set_cell(&[origin[0] + row, origin[1] + col], ALIVE)?;
    }
    Ok(())
}

/// Direct row-by-row rule 90 from a single live center cell with zero
/// padding. Returns `steps + 1` rows, the seed row first.
pub fn rule90_reference(width: usize, steps: usize) -> Vec<Vec<u8>> {
    let mut row = vec![0u8; width];
    row[width / 2] = 1;
    let mut rows = vec![row.clone()];
    for _ in 0..steps {
        let next = (0..width)
            .map(|i| {
                let left = if i == 0 { 0 } else { row[i - 1] };
                let right = row.get(i + 1).copied().unwrap_or(0);
                left ^ right
            })
            .collect::<Vec<_>>();
        rows.push(next.clone());
        row = next;
    }
    rows
}
