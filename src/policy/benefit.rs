//! Piecewise reimbursement formula

use super::{is_eligible, PolicyParams};
use crate::survey::IndividualRecord;

/// Reimbursement owed to one record under `params`
///
/// Ineligible records get 0. At or below the day threshold the benefit is
/// `(days - offset) * weekly_rate / 7`; above it the flat cap
/// `weekly_rate * max_weeks` applies, however far above. The jump at the
/// threshold is part of the policy design.
pub fn reimbursement(record: &IndividualRecord, params: &PolicyParams) -> f64 {
    if !is_eligible(record, params) {
        return 0.0;
    }

    if record.work_loss_days <= params.day_threshold_for_cap() {
        let paid_days = record.work_loss_days as f64 - params.offset_days() as f64;
        // Negative only if offset exceeds the eligibility floor, which validation forbids
        (paid_days * params.daily_rate()).max(0.0)
    } else {
        params.max_benefit()
    }
}
