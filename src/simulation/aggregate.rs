//! Population-level reductions over simulation results
//!
//! The headline summary uses survey weights throughout. The income bracket
//! breakdown in `bracket_means` is deliberately unweighted, matching the
//! illustrative table of the source analysis; `weighted_bracket_means` is
//! the survey-weighted counterpart over the same partition.

use super::SimulationResult;
use crate::survey::Codebook;
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;

/// Survey-weighted summary of one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub scenario: String,
    /// Sample size
    pub records: usize,
    /// Unweighted count of records with a positive reimbursement
    pub eligible_records: usize,
    /// Sum of survey weights (estimated population)
    pub population: f64,
    /// Weighted mean reimbursement over the whole population
    pub mean_reimbursement: f64,
    /// Weighted count of people with a positive reimbursement
    pub total_eligible: f64,
    /// Weighted sum of reimbursements (estimated program cost)
    pub total_cost: f64,
}

/// Unweighted distribution statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub sd: f64,
    pub min: f64,
    pub max: f64,
}

/// Per income bracket reimbursement summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketSummary {
    pub code: u16,
    pub label: String,
    pub records: usize,
    pub mean_reimbursement: f64,
    /// Weighted count of people with a positive reimbursement
    pub total_eligible: f64,
}

/// Weighted headline statistics for a scenario
pub fn summarize(scenario: &str, results: &[SimulationResult]) -> AggregateSummary {
    let mut population = 0.0;
    let mut total_cost = 0.0;
    let mut total_eligible = 0.0;
    let mut eligible_records = 0usize;

    for result in results {
        population += result.survey_weight;
        total_cost += result.survey_weight * result.reimbursement;
        if result.reimbursement > 0.0 {
            total_eligible += result.survey_weight;
            eligible_records += 1;
        }
    }

    let mean_reimbursement = if population > 0.0 {
        total_cost / population
    } else {
        if !results.is_empty() {
            warn!("Scenario '{}': survey weights sum to zero", scenario);
        }
        0.0
    };

    AggregateSummary {
        scenario: scenario.to_string(),
        records: results.len(),
        eligible_records,
        population,
        mean_reimbursement,
        total_eligible,
        total_cost,
    }
}

/// Unweighted mean, sd, min and max of reimbursements
pub fn descriptive_stats(results: &[SimulationResult]) -> Option<DescriptiveStats> {
    if results.is_empty() {
        return None;
    }

    let count = results.len();
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for r in results {
        sum += r.reimbursement;
        min = min.min(r.reimbursement);
        max = max.max(r.reimbursement);
    }
    let mean = sum / count as f64;

    let sd = if count > 1 {
        let ss: f64 = results
            .iter()
            .map(|r| (r.reimbursement - mean).powi(2))
            .sum();
        (ss / (count - 1) as f64).sqrt()
    } else {
        0.0
    };

    Some(DescriptiveStats { count, mean, sd, min, max })
}

#[derive(Default)]
struct BracketAccumulator {
    records: usize,
    sum: f64,
    weighted_sum: f64,
    weight: f64,
    total_eligible: f64,
}

fn accumulate_brackets(
    results: &[SimulationResult],
    codebook: &Codebook,
) -> BTreeMap<u16, BracketAccumulator> {
    let mut brackets: BTreeMap<u16, BracketAccumulator> = BTreeMap::new();

    for result in results {
        if !codebook.is_bracket(result.income_category) {
            continue;
        }
        let acc = brackets.entry(result.income_category).or_default();
        acc.records += 1;
        acc.sum += result.reimbursement;
        acc.weighted_sum += result.survey_weight * result.reimbursement;
        acc.weight += result.survey_weight;
        if result.reimbursement > 0.0 {
            acc.total_eligible += result.survey_weight;
        }
    }

    brackets
}

fn build_summaries<F>(
    results: &[SimulationResult],
    codebook: &Codebook,
    mean_of: F,
) -> Vec<BracketSummary>
where
    F: Fn(&BracketAccumulator) -> f64,
{
    accumulate_brackets(results, codebook)
        .into_iter()
        .map(|(code, acc)| BracketSummary {
            code,
            label: codebook.bracket_label(code).unwrap_or_default().to_string(),
            records: acc.records,
            mean_reimbursement: mean_of(&acc),
            total_eligible: acc.total_eligible,
        })
        .collect()
}

/// Unweighted mean reimbursement per usable income bracket, ordered by code
///
/// Sentinel, aggregate and unknown income codes are left out.
pub fn bracket_means(results: &[SimulationResult], codebook: &Codebook) -> Vec<BracketSummary> {
    build_summaries(results, codebook, |acc| acc.sum / acc.records as f64)
}

/// Survey-weighted mean reimbursement per usable income bracket
pub fn weighted_bracket_means(
    results: &[SimulationResult],
    codebook: &Codebook,
) -> Vec<BracketSummary> {
    build_summaries(results, codebook, |acc| {
        if acc.weight > 0.0 { acc.weighted_sum / acc.weight } else { 0.0 }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn result(id: usize, reimbursement: f64, weight: f64, income: u16) -> SimulationResult {
        SimulationResult {
            id,
            eligible: reimbursement > 0.0,
            reimbursement,
            survey_weight: weight,
            income_category: income,
        }
    }

    #[test]
    fn test_weighted_mean() {
        let results = vec![result(0, 100.0, 2.0, 22), result(1, 200.0, 1.0, 22)];
        let summary = summarize("test", &results);

        assert_relative_eq!(summary.mean_reimbursement, 400.0 / 3.0);
        assert_eq!(summary.population, 3.0);
        assert_eq!(summary.total_cost, 400.0);
    }

    #[test]
    fn test_total_eligible_is_weighted() {
        let results = vec![
            result(0, 0.0, 1000.0, 22),
            result(1, 500.0, 250.0, 11),
            result(2, 14_328.0, 750.0, 97),
        ];
        let summary = summarize("test", &results);

        assert_eq!(summary.records, 3);
        assert_eq!(summary.eligible_records, 2);
        assert_eq!(summary.total_eligible, 1000.0);
        // Sentinel income codes still count toward population totals
        assert_eq!(summary.population, 2000.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize("empty", &[]);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.mean_reimbursement, 0.0);
        assert!(descriptive_stats(&[]).is_none());
    }

    #[test]
    fn test_descriptive_stats() {
        let results = vec![
            result(0, 2.0, 5.0, 22),
            result(1, 4.0, 1.0, 22),
            result(2, 4.0, 1.0, 22),
            result(3, 6.0, 1.0, 22),
        ];
        let stats = descriptive_stats(&results).expect("non-empty");

        // Unweighted despite the uneven weights
        assert_eq!(stats.count, 4);
        assert_relative_eq!(stats.mean, 4.0);
        assert_relative_eq!(stats.sd, (8.0f64 / 3.0).sqrt());
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);

        let single = descriptive_stats(&results[..1]).expect("non-empty");
        assert_eq!(single.sd, 0.0);
    }

    #[test]
    fn test_bracket_exclusions() {
        let codebook = Codebook::default();
        let results = vec![
            result(0, 100.0, 1.0, 11),
            result(1, 300.0, 1.0, 10),
            result(2, 300.0, 1.0, 21),
            result(3, 300.0, 1.0, 96),
            result(4, 300.0, 1.0, 99),
            result(5, 300.0, 1.0, 55),
            result(6, 200.0, 1.0, 24),
        ];
        let brackets = bracket_means(&results, &codebook);

        let codes: Vec<u16> = brackets.iter().map(|b| b.code).collect();
        assert_eq!(codes, vec![11, 24]);
        assert_eq!(brackets[0].label, "$0 - $14,999");
        assert_eq!(brackets[1].mean_reimbursement, 200.0);
    }

    #[test]
    fn test_unweighted_vs_weighted_brackets() {
        let codebook = Codebook::default();
        let results = vec![
            result(0, 100.0, 3.0, 12),
            result(1, 300.0, 1.0, 12),
            result(2, 0.0, 2.0, 12),
            result(3, 600.0, 5.0, 23),
        ];

        let plain = bracket_means(&results, &codebook);
        let weighted = weighted_bracket_means(&results, &codebook);

        assert_relative_eq!(plain[0].mean_reimbursement, 400.0 / 3.0);
        assert_relative_eq!(weighted[0].mean_reimbursement, 600.0 / 6.0);
        assert_eq!(plain[0].records, 3);
        assert_eq!(plain[0].total_eligible, 4.0);
        assert_eq!(weighted[0].total_eligible, 4.0);

        // Single-record bracket agrees under both
        assert_eq!(plain[1].mean_reimbursement, weighted[1].mean_reimbursement);
    }
}
