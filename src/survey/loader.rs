//! Load survey records from a cleaned CSV extract
//!
//! Required columns: WLDAYR, PERWEIGHT, INCFAM07ON, POVERTY.
//! Any other columns in the extract are ignored.

use super::{IndividualRecord, SurveyRow};
use crate::error::SimError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// What to do with a row that fails required-field checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvalidRecordPolicy {
    /// Fail the whole batch on the first bad row
    #[default]
    Reject,
    /// Log the row and leave it out; later rows keep their source position as id
    Skip,
}

/// Load records from a CSV file on disk
pub fn load_records<P: AsRef<Path>>(
    path: P,
    policy: InvalidRecordPolicy,
) -> Result<Vec<IndividualRecord>, SimError> {
    let file = File::open(path.as_ref())?;
    info!("Loading survey records from {}", path.as_ref().display());
    load_records_from_reader(file, policy)
}

/// Load records from any CSV reader
pub fn load_records_from_reader<R: Read>(
    reader: R,
    policy: InvalidRecordPolicy,
) -> Result<Vec<IndividualRecord>, SimError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row, parsed) in csv_reader.deserialize::<SurveyRow>().enumerate() {
        let converted = parsed
            .map_err(SimError::from)
            .and_then(|raw| raw.into_record(row));

        match (converted, policy) {
            (Ok(record), _) => records.push(record),
            (Err(e), InvalidRecordPolicy::Reject) => return Err(e),
            (Err(e), InvalidRecordPolicy::Skip) => {
                warn!("Skipping row {}: {}", row, e);
                skipped += 1;
            }
        }
    }

    info!("Loaded {} records ({} skipped)", records.len(), skipped);
    Ok(records)
}
