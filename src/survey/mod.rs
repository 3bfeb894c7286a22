//! Survey record structures, extract loading and income codebook

mod data;
pub mod loader;
pub mod codebook;

pub use data::{IndividualRecord, SurveyRow};
pub use loader::{load_records, load_records_from_reader, InvalidRecordPolicy};
pub use codebook::{Codebook, CodeClass, SENTINEL_FLOOR};
