//! Integration test: known automata reproduce their textbook behavior.
//!
//! A Life glider translates one cell diagonally every four steps, and a
//! single seed under rule 90 grows the Sierpinski triangle.

use tessera_core::{StateIndex, TickId};
use tessera_engine::Simulation;
use tessera_test_utils::{
    life_setup, place_glider, rule90_reference, rule90_setup, sierpinski_setup, GLIDER,
};

const ALIVE: StateIndex = StateIndex(1);

fn live_cells(sim: &Simulation) -> Vec<[i32; 2]> {
    let snap = sim.snapshot_grid();
    let mut cells = Vec::new();
    for row in 0..sim.size() as i32 {
        for col in 0..sim.size() as i32 {
            if snap.state_at(&[row, col]) == Some(ALIVE) {
                cells.push([row, col]);
            }
        }
    }
    cells
}

#[test]
fn glider_translates_diagonally() {
    let mut sim = Simulation::builder(life_setup(), 10)
        .record_history(true)
        .seed(0)
        .build()
        .unwrap();
    place_glider(&mut sim, [1, 1]).unwrap();
    assert_eq!(sim.population(), vec![95, 5]);

    for period in 1..=5 {
        sim.run(4);
        let mut expected: Vec<[i32; 2]> = GLIDER
            .iter()
            .map(|[r, c]| [1 + period + r, 1 + period + c])
            .collect();
        expected.sort_unstable();
        assert_eq!(live_cells(&sim), expected, "after {} steps", period * 4);
        assert_eq!(sim.population(), vec![95, 5]);
    }
    assert_eq!(sim.tick(), TickId(20));
    assert_eq!(sim.history().len(), 20);
    assert!(sim.history().rows().all(|row| row[1] == 5));
}

fn assert_sierpinski(mut sim: Simulation) {
    const WIDTH: usize = 63;
    const STEPS: usize = 31;
    sim.seed_center(ALIVE).unwrap();
    let reference = rule90_reference(WIDTH, STEPS);

    for (step, expected) in reference.iter().enumerate() {
        let row: Vec<u8> = sim
            .snapshot_grid()
            .state_indices()
            .map(|s| s.map_or(0, |s| s.0 as u8))
            .collect();
        assert_eq!(&row, expected, "row {step}");
        let mirrored: Vec<u8> = row.iter().rev().copied().collect();
        assert_eq!(row, mirrored, "row {step} is not symmetric");
        if step < STEPS {
            sim.step();
        }
    }
    // Step 31 of a single seed fills every other cell.
    let last = &reference[STEPS];
    assert_eq!(last.iter().filter(|&&b| b == 1).count(), 32);
}

#[test]
fn rule_90_table_draws_sierpinski() {
    let sim = Simulation::builder(rule90_setup(), 63).seed(0).build().unwrap();
    assert_sierpinski(sim);
}

#[test]
fn parity_rule_draws_sierpinski() {
    let sim = Simulation::builder(sierpinski_setup(), 63)
        .seed(0)
        .build()
        .unwrap();
    assert_sierpinski(sim);
}
