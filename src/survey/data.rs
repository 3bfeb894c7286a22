//! Survey record structures matching the cleaned NHIS extract

use serde::{Deserialize, Serialize};
use crate::error::SimError;

/// One survey respondent, already cleaned upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    /// Row position in the source table (not a survey identifier)
    pub id: usize,

    /// Self-reported missed workdays in the reference year
    pub work_loss_days: u32,

    /// Person-level sampling weight; only used when aggregating
    pub survey_weight: f64,

    /// Family-income category code (INCFAM07ON coding)
    pub income_category: u16,

    /// Family income as a multiple of the poverty threshold (POVERTY coding)
    pub poverty_ratio: u16,
}

impl IndividualRecord {
    pub fn new(
        id: usize,
        work_loss_days: u32,
        survey_weight: f64,
        income_category: u16,
        poverty_ratio: u16,
    ) -> Self {
        Self {
            id,
            work_loss_days,
            survey_weight,
            income_category,
            poverty_ratio,
        }
    }
}

/// Raw extract row before required-field checks
///
/// Every field is optional so that an empty cell surfaces as a
/// `MissingField` error instead of a generic parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyRow {
    #[serde(rename = "WLDAYR", default)]
    pub work_loss_days: Option<u32>,

    #[serde(rename = "PERWEIGHT", default)]
    pub survey_weight: Option<f64>,

    #[serde(rename = "INCFAM07ON", default)]
    pub income_category: Option<u16>,

    #[serde(rename = "POVERTY", default)]
    pub poverty_ratio: Option<u16>,
}

impl SurveyRow {
    /// Convert to a record, checking every required field is present
    pub fn into_record(self, id: usize) -> Result<IndividualRecord, SimError> {
        let missing = |field| SimError::MissingField { row: id, field };

        let work_loss_days = self.work_loss_days.ok_or_else(|| missing("WLDAYR"))?;
        let survey_weight = self.survey_weight.ok_or_else(|| missing("PERWEIGHT"))?;
        let income_category = self.income_category.ok_or_else(|| missing("INCFAM07ON"))?;
        let poverty_ratio = self.poverty_ratio.ok_or_else(|| missing("POVERTY"))?;

        if !survey_weight.is_finite() || survey_weight <= 0.0 {
            return Err(SimError::InvalidRecord {
                row: id,
                reason: format!("survey weight must be positive, found {}", survey_weight),
            });
        }

        Ok(IndividualRecord {
            id,
            work_loss_days,
            survey_weight,
            income_category,
            poverty_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> SurveyRow {
        SurveyRow {
            work_loss_days: Some(12),
            survey_weight: Some(2500.0),
            income_category: Some(22),
            poverty_ratio: Some(31),
        }
    }

    #[test]
    fn test_complete_row_converts() {
        let record = full_row().into_record(7).expect("complete row");
        assert_eq!(record, IndividualRecord::new(7, 12, 2500.0, 22, 31));
    }

    #[test]
    fn test_missing_field_is_named() {
        let row = SurveyRow { poverty_ratio: None, ..full_row() };
        match row.into_record(3) {
            Err(SimError::MissingField { row, field }) => {
                assert_eq!(row, 3);
                assert_eq!(field, "POVERTY");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_zero_weight_rejected() {
        let row = SurveyRow { survey_weight: Some(0.0), ..full_row() };
        assert!(matches!(row.into_record(0), Err(SimError::InvalidRecord { row: 0, .. })));
    }
}
