//! Scenario runs, weighted aggregation and scenario comparison

mod runner;
mod aggregate;
mod compare;

pub use runner::{SimulationResult, ScenarioOutcome, run, run_parallel, run_scenario};
pub use aggregate::{
    AggregateSummary, DescriptiveStats, BracketSummary,
    summarize, descriptive_stats, bracket_means, weighted_bracket_means,
};
pub use compare::{ComparisonReport, ScenarioStats, PairedBracket, compare};

// ============================================================================
// Parallel Threshold
// ============================================================================
// Below this many records the rayon split costs more than the map itself,
// so `run_scenario` stays sequential even when parallel runs are requested.

/// Minimum batch size for a parallel run
pub const PARALLEL_MIN_RECORDS: usize = 4_096;
