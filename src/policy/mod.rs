//! Policy parameter sets and benefit rules

pub mod params;
mod eligibility;
mod benefit;

pub use params::{PolicySpec, PolicyParams, load_policies, parse_policies, DEFAULT_WEEKLY_RATE};
pub use eligibility::is_eligible;
pub use benefit::reimbursement;
