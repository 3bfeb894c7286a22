//! Eligibility rules

use super::PolicyParams;
use crate::survey::IndividualRecord;

/// Whether a record qualifies for any reimbursement under `params`
///
/// Work loss must strictly exceed the minimum days. When the policy carries
/// a poverty ceiling, the poverty code must also sit below it or be one of
/// the carve-out codes. Out-of-range poverty codes fail the ceiling.
pub fn is_eligible(record: &IndividualRecord, params: &PolicyParams) -> bool {
    record.work_loss_days > params.min_eligible_days() && passes_means_test(record.poverty_ratio, params)
}

fn passes_means_test(poverty_ratio: u16, params: &PolicyParams) -> bool {
    match params.poverty_ceiling() {
        None => true,
        Some(ceiling) => {
            poverty_ratio < ceiling || params.poverty_carve_outs().contains(&poverty_ratio)
        }
    }
}
