//! Policy parameter sets
//!
//! `PolicySpec` is the loose, deserializable description of a scenario.
//! `PolicyParams` is the validated, immutable form the rules consume.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Weekly benefit rate used in both studied scenarios
pub const DEFAULT_WEEKLY_RATE: f64 = 1194.0;

/// Poverty code admitted under the adjusted policy despite sitting above the ceiling
pub const ADJUSTED_CARVE_OUT_CODE: u16 = 38;

/// Unvalidated scenario description (JSON config surface)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySpec {
    /// Scenario label
    #[serde(default = "default_name")]
    pub name: String,

    /// Work-loss days must strictly exceed this to be eligible
    #[serde(default)]
    pub min_eligible_days: u32,

    /// Exclusive upper bound on the poverty ratio code (None = no means test)
    #[serde(default)]
    pub poverty_ceiling: Option<u16>,

    /// Poverty codes treated as eligible regardless of the ceiling
    #[serde(default)]
    pub poverty_carve_outs: Vec<u16>,

    /// At or below this many days the benefit is proportional, above it is capped
    #[serde(default = "default_threshold")]
    pub day_threshold_for_cap: u32,

    /// Dollars reimbursed per week
    #[serde(default = "default_weekly_rate")]
    pub weekly_rate: f64,

    /// Cap on reimbursed weeks
    #[serde(default = "default_max_weeks")]
    pub max_weeks: u32,

    /// Unpaid waiting period subtracted before proportional reimbursement
    #[serde(default)]
    pub offset_days: u32,
}

fn default_name() -> String { "counterfactual".to_string() }
fn default_threshold() -> u32 { 84 }
fn default_weekly_rate() -> f64 { DEFAULT_WEEKLY_RATE }
fn default_max_weeks() -> u32 { 12 }

impl Default for PolicySpec {
    fn default() -> Self {
        Self {
            name: default_name(),
            min_eligible_days: 0,
            poverty_ceiling: None,
            poverty_carve_outs: Vec::new(),
            day_threshold_for_cap: default_threshold(),
            weekly_rate: DEFAULT_WEEKLY_RATE,
            max_weeks: default_max_weeks(),
            offset_days: 0,
        }
    }
}

impl PolicySpec {
    /// Universal baseline: any work loss is reimbursed, 12 weeks max
    pub fn counterfactual() -> Self {
        Self::default()
    }

    /// Targeted scenario: 28-day waiting period, means test, 9 weeks max
    pub fn adjusted() -> Self {
        Self {
            name: "adjusted".to_string(),
            min_eligible_days: 28,
            poverty_ceiling: Some(37),
            poverty_carve_outs: vec![ADJUSTED_CARVE_OUT_CODE],
            day_threshold_for_cap: 91,
            weekly_rate: DEFAULT_WEEKLY_RATE,
            max_weeks: 9,
            offset_days: 28,
        }
    }

    /// Check invariants and freeze into a parameter set
    pub fn validate(self) -> Result<PolicyParams, ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if !self.weekly_rate.is_finite() || self.weekly_rate < 0.0 {
            return Err(ConfigError::InvalidRate {
                name: self.name,
                value: self.weekly_rate,
            });
        }
        if self.offset_days > self.day_threshold_for_cap {
            return Err(ConfigError::OffsetAboveThreshold {
                name: self.name,
                offset: self.offset_days,
                threshold: self.day_threshold_for_cap,
            });
        }
        // Keeps (days - offset) non-negative for every eligible record
        if self.offset_days > self.min_eligible_days {
            return Err(ConfigError::OffsetAboveMinDays {
                name: self.name,
                offset: self.offset_days,
                min_days: self.min_eligible_days,
            });
        }

        Ok(PolicyParams { spec: self })
    }
}

/// Validated, immutable policy parameter set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PolicyParams {
    spec: PolicySpec,
}

impl PolicyParams {
    pub fn counterfactual() -> Self {
        Self { spec: PolicySpec::counterfactual() }
    }

    pub fn adjusted() -> Self {
        Self { spec: PolicySpec::adjusted() }
    }

    pub fn name(&self) -> &str { &self.spec.name }
    pub fn min_eligible_days(&self) -> u32 { self.spec.min_eligible_days }
    pub fn poverty_ceiling(&self) -> Option<u16> { self.spec.poverty_ceiling }
    pub fn poverty_carve_outs(&self) -> &[u16] { &self.spec.poverty_carve_outs }
    pub fn day_threshold_for_cap(&self) -> u32 { self.spec.day_threshold_for_cap }
    pub fn weekly_rate(&self) -> f64 { self.spec.weekly_rate }
    pub fn max_weeks(&self) -> u32 { self.spec.max_weeks }
    pub fn offset_days(&self) -> u32 { self.spec.offset_days }

    /// Per-day reimbursement in the proportional band
    pub fn daily_rate(&self) -> f64 {
        self.spec.weekly_rate / 7.0
    }

    /// Flat benefit paid above the day threshold
    pub fn max_benefit(&self) -> f64 {
        self.spec.weekly_rate * self.spec.max_weeks as f64
    }

    pub fn spec(&self) -> &PolicySpec {
        &self.spec
    }
}

impl TryFrom<PolicySpec> for PolicyParams {
    type Error = ConfigError;

    fn try_from(spec: PolicySpec) -> Result<Self, Self::Error> {
        spec.validate()
    }
}

/// Parse and validate a JSON array of scenario specs
pub fn parse_policies(json: &str) -> Result<Vec<PolicyParams>, ConfigError> {
    let specs: Vec<PolicySpec> = serde_json::from_str(json)?;
    specs.into_iter().map(PolicySpec::validate).collect()
}

/// Load scenario specs from a JSON file
pub fn load_policies<P: AsRef<Path>>(path: P) -> Result<Vec<PolicyParams>, ConfigError> {
    let text = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    parse_policies(&text)
}
