//! Apply the eligibility and benefit rules across a record batch

use super::PARALLEL_MIN_RECORDS;
use crate::policy::{is_eligible, reimbursement, PolicyParams};
use crate::survey::IndividualRecord;
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

/// Outcome for one (record, policy) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub id: usize,
    pub eligible: bool,
    pub reimbursement: f64,
    pub survey_weight: f64,
    pub income_category: u16,
}

impl SimulationResult {
    fn evaluate(record: &IndividualRecord, params: &PolicyParams) -> Self {
        Self {
            id: record.id,
            eligible: is_eligible(record, params),
            reimbursement: reimbursement(record, params),
            survey_weight: record.survey_weight,
            income_category: record.income_category,
        }
    }
}

/// Results of one policy over the full record set
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub params: PolicyParams,
    pub results: Vec<SimulationResult>,
}

impl ScenarioOutcome {
    pub fn name(&self) -> &str {
        self.params.name()
    }
}

/// One result per record, in input order
pub fn run(records: &[IndividualRecord], params: &PolicyParams) -> Vec<SimulationResult> {
    records
        .iter()
        .map(|record| SimulationResult::evaluate(record, params))
        .collect()
}

/// Same as [`run`], split across the rayon pool; output order is preserved
pub fn run_parallel(records: &[IndividualRecord], params: &PolicyParams) -> Vec<SimulationResult> {
    records
        .par_iter()
        .map(|record| SimulationResult::evaluate(record, params))
        .collect()
}

/// Run one scenario and keep its parameters alongside the results
pub fn run_scenario(
    records: &[IndividualRecord],
    params: &PolicyParams,
    parallel: bool,
) -> ScenarioOutcome {
    let start = Instant::now();
    let use_pool = parallel && records.len() >= PARALLEL_MIN_RECORDS;
    debug!(
        "Scenario '{}': {} records, parallel={}",
        params.name(),
        records.len(),
        use_pool
    );

    let results = if use_pool {
        run_parallel(records, params)
    } else {
        run(records, params)
    };

    let eligible = results.iter().filter(|r| r.eligible).count();
    info!(
        "Scenario '{}' complete in {:?}: {} of {} records eligible",
        params.name(),
        start.elapsed(),
        eligible,
        results.len()
    );

    ScenarioOutcome {
        params: params.clone(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<IndividualRecord> {
        vec![
            IndividualRecord::new(0, 0, 1200.0, 22, 31),
            IndividualRecord::new(1, 50, 900.0, 11, 20),
            IndividualRecord::new(2, 84, 1500.0, 12, 38),
            IndividualRecord::new(3, 200, 700.0, 97, 40),
            IndividualRecord::new(4, 29, 1100.0, 10, 36),
        ]
    }

    #[test]
    fn test_one_result_per_record() {
        let records = sample_records();
        let results = run(&records, &PolicyParams::counterfactual());

        assert_eq!(results.len(), records.len());
        for (record, result) in records.iter().zip(&results) {
            assert_eq!(record.id, result.id);
            assert_eq!(record.survey_weight, result.survey_weight);
            assert_eq!(record.income_category, result.income_category);
        }
        assert!(!results[0].eligible);
        assert_eq!(results[3].reimbursement, 14_328.0);
    }

    #[test]
    fn test_order_follows_input_permutation() {
        let params = PolicyParams::adjusted();
        let mut records = sample_records();
        records.reverse();
        records.swap(1, 3);

        let results = run(&records, &params);
        let ids: Vec<usize> = results.iter().map(|r| r.id).collect();
        let expected: Vec<usize> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);

        for (record, result) in records.iter().zip(&results) {
            assert_eq!(result.reimbursement, reimbursement(record, &params));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records: Vec<IndividualRecord> = (0..10_000)
            .map(|i| {
                IndividualRecord::new(
                    i,
                    (i % 250) as u32,
                    100.0 + (i % 17) as f64,
                    [11, 12, 13, 20, 21, 22, 23, 24, 98][i % 9],
                    (i % 45) as u16,
                )
            })
            .collect();

        for params in [PolicyParams::counterfactual(), PolicyParams::adjusted()] {
            assert_eq!(run(&records, &params), run_parallel(&records, &params));
            let outcome = run_scenario(&records, &params, true);
            assert_eq!(outcome.results, run(&records, &params));
            assert_eq!(outcome.name(), params.name());
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(run(&[], &PolicyParams::counterfactual()).is_empty());
        assert!(run_parallel(&[], &PolicyParams::adjusted()).is_empty());
    }
}
