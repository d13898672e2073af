//! Per-step performance metrics.

/// Timing data collected during a single [`step()`](crate::Simulation::step).
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Time spent summing neighbor codes.
    pub aggregate_us: u64,
    /// Time spent decoding and running the rule chain.
    pub evaluate_us: u64,
    /// Time spent counting populations into history. Zero when not recording.
    pub record_us: u64,
    /// Number of cells whose state changed.
    pub changed_cells: usize,
    /// Heap bytes held by the grid buffers after the step.
    pub memory_bytes: usize,
}
