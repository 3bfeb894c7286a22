//! Leave Microsim - paid-leave reimbursement microsimulation over survey extracts
//!
//! This library provides:
//! - Survey record loading and income codebook lookups
//! - Validated policy parameter sets (counterfactual and adjusted presets)
//! - Eligibility and piecewise benefit rules
//! - Per-record simulation runs (sequential or parallel)
//! - Survey-weighted population summaries and income breakdowns
//! - Side-by-side scenario comparison

pub mod error;
pub mod survey;
pub mod policy;
pub mod simulation;

// Re-export commonly used types
pub use error::{ConfigError, SimError};
pub use survey::{IndividualRecord, Codebook, InvalidRecordPolicy};
pub use policy::{PolicyParams, PolicySpec, is_eligible, reimbursement};
pub use simulation::{SimulationResult, ScenarioOutcome, AggregateSummary, ComparisonReport};
