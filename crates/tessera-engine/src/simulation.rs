//! The step loop.
//!
//! [`Simulation`] is the user-facing API. Each [`step()`](Simulation::step)
//! runs one complete generation:
//!
//! 1. aggregate neighbor codes over the published grid
//! 2. per cell: decode counts, look up the current state, run the chain
//! 3. write next codes into the staging buffer
//! 4. publish (buffer role flip, no copy)
//! 5. if recording, append populations to [`History`]
//!
//! # Ownership model
//!
//! All mutating methods take `&mut self` and [`snapshot_grid()`](Simulation::snapshot_grid)
//! borrows from `self`, so a snapshot cannot be held across a step.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tessera_arena::GridBuffer;
use tessera_core::{NeighborCounts, StateCode, StateEncoding, StateIndex, TickId};
use tessera_rules::{CellView, RuleChain};
use tessera_space::{BoundaryPolicy, GridShape, SpaceError};
use tracing::{debug, info, trace};

use crate::aggregate::NeighborAggregator;
use crate::config::{ConfigError, SimulationSetup};
use crate::history::History;
use crate::metrics::StepMetrics;
use crate::snapshot::GridSnapshot;
use crate::stream::{chunk_stream, init_stream, CHUNK_CELLS};

// Compile-time assertion: Simulation can move between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── CellError ───────────────────────────────────────────────────

/// Errors from single-cell reads and writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellError {
    /// The coordinate has the wrong arity or lies outside the grid.
    Space(SpaceError),
    /// The state does not exist in this automaton.
    StateOutOfRange {
        /// The offending state.
        state: StateIndex,
        /// Number of states.
        state_count: usize,
    },
    /// The cell holds a value that is not a state code.
    NotAState {
        /// The raw cell value.
        code: StateCode,
    },
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "{e}"),
            Self::StateOutOfRange { state, state_count } => {
                write!(f, "state {state} out of range (state_count {state_count})")
            }
            Self::NotAState { code } => write!(f, "cell holds non-state value {code}"),
        }
    }
}

impl Error for CellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::StateOutOfRange { .. } | Self::NotAState { .. } => None,
        }
    }
}

impl From<SpaceError> for CellError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── SimulationBuilder ───────────────────────────────────────────

/// Construction parameters for a [`Simulation`].
#[derive(Clone, Debug)]
pub struct SimulationBuilder {
    setup: SimulationSetup,
    size: usize,
    record_history: bool,
    seed: Option<u64>,
}

impl SimulationBuilder {
    /// Record per-state populations after every step. Default: off.
    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Fix the seed. Default: drawn from the thread-local generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the setup and build a randomized simulation.
    pub fn build(self) -> Result<Simulation, ConfigError> {
        let (encoding, offsets) = self.setup.resolve()?;
        let shape = GridShape::cube(self.setup.dimensionality, self.size)?;
        let seed = self.seed.unwrap_or_else(rand::random);
        let aggregator = NeighborAggregator::new(&offsets, self.setup.boundary);

        let mut sim = Simulation {
            aggregates: vec![0; shape.cell_count()],
            grid: GridBuffer::new(shape, encoding.codes()[0]),
            history: History::new(encoding.state_count()),
            init_rng: init_stream(seed),
            record_history: self.record_history,
            tick: TickId::default(),
            last_metrics: StepMetrics::default(),
            seed,
            aggregator,
            encoding,
            setup: self.setup,
        };
        sim.randomize();
        info!(
            dimensionality = sim.setup.dimensionality,
            state_count = sim.setup.state_count,
            size = self.size,
            cells = sim.grid.shape().cell_count(),
            neighbors = sim.aggregator.neighbor_count(),
            rules = sim.setup.rules.len(),
            seed,
            "simulation constructed"
        );
        Ok(sim)
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// A running automaton on a `size^n` grid.
///
/// # Example
///
/// ```
/// use tessera_engine::{Simulation, SimulationSetup};
/// use tessera_rules::{Membership, Rule};
///
/// let setup = SimulationSetup::builder(2, 2)
///     .rule(Rule::classic(0u32, 1u32, true, Membership::new().with(1u32, [3])))
///     .rule(Rule::classic(1u32, 0u32, false, Membership::new().with(1u32, [2, 3])))
///     .build()
///     .unwrap();
/// let mut sim = Simulation::builder(setup, 32)
///     .record_history(true)
///     .seed(7)
///     .build()
///     .unwrap();
/// sim.run(10);
/// assert_eq!(sim.history().len(), 10);
/// assert_eq!(sim.population().iter().sum::<u64>(), 32 * 32);
/// ```
pub struct Simulation {
    setup: SimulationSetup,
    encoding: StateEncoding,
    aggregator: NeighborAggregator,
    grid: GridBuffer,
    /// Scratch for neighbor sums, reused every step.
    aggregates: Vec<u64>,
    history: History,
    record_history: bool,
    seed: u64,
    init_rng: ChaCha8Rng,
    tick: TickId,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Start building a simulation of `setup` on a grid with `size` cells
    /// per axis.
    pub fn builder(setup: SimulationSetup, size: usize) -> SimulationBuilder {
        SimulationBuilder {
            setup,
            size,
            record_history: false,
            seed: None,
        }
    }

    /// Validate `setup` and build a randomly seeded simulation.
    pub fn new(
        setup: SimulationSetup,
        size: usize,
        record_history: bool,
    ) -> Result<Self, ConfigError> {
        Self::builder(setup, size)
            .record_history(record_history)
            .build()
    }

    // ── stepping ────────────────────────────────────────────────

    /// Advance one generation.
    pub fn step(&mut self) {
        let start = Instant::now();
        let Self {
            setup,
            encoding,
            aggregator,
            grid,
            aggregates,
            seed,
            tick,
            ..
        } = self;

        let shape = grid.shape().clone();
        let guard = grid.begin_tick();

        let t = Instant::now();
        aggregator.aggregate(guard.published, &shape, aggregates);
        let aggregate_us = t.elapsed().as_micros() as u64;

        let t = Instant::now();
        let ctx = StepContext {
            rules: &setup.rules,
            encoding,
            shape: &shape,
            boundary: setup.boundary,
            published: guard.published,
            aggregates,
            seed: *seed,
            tick: tick.0,
        };
        let changed_cells = ctx.evaluate(guard.staging);
        let evaluate_us = t.elapsed().as_micros() as u64;

        let published = grid.publish();
        debug_assert!(published.is_ok(), "publish follows begin_tick");
        self.tick = TickId(self.tick.0 + 1);

        let mut record_us = 0;
        if self.record_history {
            let t = Instant::now();
            let populations = self.population();
            self.history.record(&populations);
            record_us = t.elapsed().as_micros() as u64;
        }

        self.last_metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            aggregate_us,
            evaluate_us,
            record_us,
            changed_cells,
            memory_bytes: self.grid.memory_bytes(),
        };
        debug!(
            tick = self.tick.0,
            changed = changed_cells,
            total_us = self.last_metrics.total_us,
            "step"
        );
    }

    /// Advance `steps` generations.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Advance `steps` generations, then discard the history they recorded.
    pub fn warm_up(&mut self, steps: u64) {
        self.run(steps);
        self.clear_history();
    }

    // ── read access ─────────────────────────────────────────────

    /// Read-only view of the current generation.
    pub fn snapshot_grid(&self) -> GridSnapshot<'_> {
        GridSnapshot::new(
            self.grid.published(),
            self.grid.shape(),
            &self.encoding,
            self.tick,
        )
    }

    /// State index for a raw cell code, or `None` for a non-code.
    pub fn state_index_of(&self, code: StateCode) -> Option<StateIndex> {
        self.encoding.index_of(code)
    }

    /// Raw code for a state index, or `None` if out of range.
    pub fn code_of(&self, state: StateIndex) -> Option<StateCode> {
        self.encoding.encode(state)
    }

    /// State of the cell at `coord`.
    ///
    /// Returns `Err(CellError::NotAState)` if the cell holds a value that is
    /// not a state code.
    pub fn cell_state(&self, coord: &[i32]) -> Result<StateIndex, CellError> {
        let index = self.grid.shape().checked_index(coord)?;
        let code = self.grid.published()[index];
        self.encoding
            .index_of(code)
            .ok_or(CellError::NotAState { code })
    }

    /// Number of cells in each state right now.
    pub fn population(&self) -> Vec<u64> {
        self.snapshot_grid().population()
    }

    /// Recorded populations.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether steps append to history.
    pub fn is_recording(&self) -> bool {
        self.record_history
    }

    /// Number of steps since construction, reseed or resize.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Seed of the current run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Cells per axis of a cubic grid, or the first extent otherwise.
    pub fn size(&self) -> usize {
        self.grid.shape().extents()[0]
    }

    /// Grid shape.
    pub fn shape(&self) -> &GridShape {
        self.grid.shape()
    }

    /// The setup this simulation was built from.
    pub fn setup(&self) -> &SimulationSetup {
        &self.setup
    }

    /// The state encoding.
    pub fn encoding(&self) -> &StateEncoding {
        &self.encoding
    }

    /// Per-state labels, if the setup has them.
    pub fn display_names(&self) -> Option<&[String]> {
        self.setup.display_names.as_deref()
    }

    /// Per-state RGB colors, if the setup has them.
    pub fn display_colors(&self) -> Option<&[[u8; 3]]> {
        self.setup.display_colors.as_deref()
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    // ── mutation between steps ──────────────────────────────────

    /// Empty the history. The grid is untouched.
    pub fn clear_history(&mut self) {
        trace!(rows = self.history.len(), "history cleared");
        self.history.clear();
    }

    /// Turn history recording on or off.
    pub fn set_record_history(&mut self, record: bool) {
        self.record_history = record;
    }

    /// Resample every cell uniformly over the states.
    pub fn randomize(&mut self) {
        let Self {
            encoding,
            grid,
            init_rng,
            ..
        } = self;
        for cell in grid.published_mut() {
            *cell = random_code(encoding, init_rng);
        }
    }

    /// Set every cell to `state`.
    pub fn fill(&mut self, state: StateIndex) -> Result<(), CellError> {
        let code = self.checked_code(state)?;
        self.grid.published_mut().fill(code);
        Ok(())
    }

    /// Set the cell at `coord` to `state`.
    pub fn set_cell(&mut self, coord: &[i32], state: StateIndex) -> Result<(), CellError> {
        let code = self.checked_code(state)?;
        let index = self.grid.shape().checked_index(coord)?;
        self.grid.published_mut()[index] = code;
        Ok(())
    }

    /// Clear to state 0 and place a single `state` cell at the center.
    pub fn seed_center(&mut self, state: StateIndex) -> Result<(), CellError> {
        let code = self.checked_code(state)?;
        let center = self.grid.shape().center();
        let index = self.grid.shape().checked_index(&center)?;
        let cells = self.grid.published_mut();
        cells.fill(self.encoding.codes()[0]);
        cells[index] = code;
        Ok(())
    }

    /// Change the grid to `size` cells per axis.
    ///
    /// Cells whose coordinates exist in both grids keep their state; new
    /// cells are randomized. The tick keeps counting, so later steps never
    /// reuse the random streams of earlier ones. History is kept.
    pub fn resize(&mut self, size: usize) -> Result<(), ConfigError> {
        let shape = GridShape::cube(self.setup.dimensionality, size)?;
        let old_cells = self.grid.shape().cell_count();
        let Self {
            encoding,
            grid,
            init_rng,
            ..
        } = self;
        grid.resize_with(shape, || random_code(encoding, init_rng));
        self.aggregates = vec![0; self.grid.shape().cell_count()];
        info!(
            size,
            old_cells,
            cells = self.grid.shape().cell_count(),
            "grid resized"
        );
        Ok(())
    }

    /// Restart with a new seed: tick 0, empty history, fresh random grid.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.init_rng = init_stream(seed);
        self.tick = TickId::default();
        self.history.clear();
        self.last_metrics = StepMetrics::default();
        self.randomize();
        info!(seed, "simulation reseeded");
    }

    fn checked_code(&self, state: StateIndex) -> Result<StateCode, CellError> {
        self.encoding
            .encode(state)
            .ok_or(CellError::StateOutOfRange {
                state,
                state_count: self.encoding.state_count(),
            })
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("dimensionality", &self.setup.dimensionality)
            .field("state_count", &self.setup.state_count)
            .field("extents", &self.grid.shape().extents())
            .field("tick", &self.tick)
            .field("seed", &self.seed)
            .field("history_rows", &self.history.len())
            .finish()
    }
}

fn random_code(encoding: &StateEncoding, rng: &mut ChaCha8Rng) -> StateCode {
    let codes = encoding.codes();
    codes[rng.random_range(0..codes.len())]
}

// ── per-step evaluation ─────────────────────────────────────────

/// Everything a chunk needs to compute its slice of the next generation.
struct StepContext<'a> {
    rules: &'a RuleChain,
    encoding: &'a StateEncoding,
    shape: &'a GridShape,
    boundary: BoundaryPolicy,
    published: &'a [StateCode],
    aggregates: &'a [u64],
    seed: u64,
    tick: u64,
}

impl StepContext<'_> {
    /// Fill `staging`; returns the number of changed cells.
    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, staging: &mut [StateCode]) -> usize {
        staging
            .chunks_mut(CHUNK_CELLS)
            .enumerate()
            .map(|(chunk, out)| self.evaluate_chunk(chunk, out))
            .sum()
    }

    /// Fill `staging`; returns the number of changed cells.
    #[cfg(feature = "parallel")]
    fn evaluate(&self, staging: &mut [StateCode]) -> usize {
        use rayon::prelude::*;
        staging
            .par_chunks_mut(CHUNK_CELLS)
            .enumerate()
            .map(|(chunk, out)| self.evaluate_chunk(chunk, out))
            .sum()
    }

    fn evaluate_chunk(&self, chunk: usize, out: &mut [StateCode]) -> usize {
        let mut rng = chunk_stream(self.seed, self.tick, chunk);
        let mut counts: NeighborCounts = smallvec::smallvec![0; self.encoding.state_count()];
        let first = chunk * CHUNK_CELLS;
        let mut changed = 0;

        for (offset, slot) in out.iter_mut().enumerate() {
            let index = first + offset;
            let code = self.published[index];
            // A non-code is never shown to the rules.
            let Some(current) = self.encoding.index_of(code) else {
                *slot = code;
                continue;
            };
            self.encoding
                .decode_into(self.aggregates[index], &mut counts);
            let cell = CellView::new(
                self.published,
                self.shape,
                self.boundary,
                self.encoding,
                index,
            );
            let next = self.rules.evaluate(current, &counts, &cell, &mut rng);
            *slot = self.encoding.encode(next).unwrap_or(code);
            if *slot != code {
                changed += 1;
            }
        }
        changed
    }
}
