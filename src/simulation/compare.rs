//! Side-by-side comparison of scenario outcomes
//!
//! Descriptive only: no significance testing. The first outcome is the
//! baseline; bracket differences are last minus first.

use super::aggregate::{bracket_means, descriptive_stats, summarize};
use super::{AggregateSummary, DescriptiveStats, ScenarioOutcome};
use crate::error::SimError;
use crate::survey::Codebook;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioStats {
    pub scenario: String,
    /// Unweighted reimbursement distribution
    pub stats: Option<DescriptiveStats>,
    /// Weighted headline figures
    pub summary: AggregateSummary,
}

/// One income bracket across every scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedBracket {
    pub code: u16,
    pub label: String,
    /// Unweighted mean per scenario, in scenario order
    pub means: Vec<Option<f64>>,
    /// Last scenario minus first, when both have records in this bracket
    pub difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub scenarios: Vec<ScenarioStats>,
    pub brackets: Vec<PairedBracket>,
}

/// Compare scenarios that were run over the same record set
pub fn compare(
    outcomes: &[ScenarioOutcome],
    codebook: &Codebook,
) -> Result<ComparisonReport, SimError> {
    let first = outcomes.first().ok_or(SimError::NoScenarios)?;
    let expected = first.results.len();
    for outcome in outcomes {
        if outcome.results.len() != expected {
            return Err(SimError::MismatchedScenarios {
                scenario: outcome.name().to_string(),
                expected,
                found: outcome.results.len(),
            });
        }
    }

    let scenarios = outcomes
        .iter()
        .map(|o| ScenarioStats {
            scenario: o.name().to_string(),
            stats: descriptive_stats(&o.results),
            summary: summarize(o.name(), &o.results),
        })
        .collect();

    // code -> (label, mean per scenario)
    let mut table: BTreeMap<u16, (String, Vec<Option<f64>>)> = BTreeMap::new();
    for (idx, outcome) in outcomes.iter().enumerate() {
        for bracket in bracket_means(&outcome.results, codebook) {
            let row = table
                .entry(bracket.code)
                .or_insert_with(|| (bracket.label.clone(), vec![None; outcomes.len()]));
            row.1[idx] = Some(bracket.mean_reimbursement);
        }
    }

    let brackets = table
        .into_iter()
        .map(|(code, (label, means))| {
            let difference = match (means.first(), means.last()) {
                (Some(Some(a)), Some(Some(b))) => Some(b - a),
                _ => None,
            };
            PairedBracket { code, label, means, difference }
        })
        .collect();

    Ok(ComparisonReport { scenarios, brackets })
}

impl ComparisonReport {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioStats> {
        self.scenarios.iter().find(|s| s.scenario == name)
    }
}
