//! Candidate record shared by the console, JSON, and CSV outputs

use crate::ai::CandidateFields;
use crate::experience::ExperienceSummary;
use serde::{Deserialize, Serialize};

/// Column order of the candidate ledger
pub const FIELDS_ORDER: [&str; 10] = [
    "Name",
    "Nationality",
    "Qualification",
    "Experience",
    "Current Salary",
    "Expected Salary",
    "Position",
    "Source",
    "Status",
    "Remark",
];

/// One candidate row in the ledger.
///
/// Salary, status, and remark columns are reserved for manual
/// bookkeeping and stay blank during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub nationality: String,
    pub qualification: String,
    pub experience: String,
    pub current_salary: String,
    pub expected_salary: String,
    pub position: String,
    pub source: String,
    pub status: String,
    pub remark: String,
}

impl CandidateRecord {
    /// Assemble a record from extracted fields and the experience total
    pub fn from_extraction(
        fields: &CandidateFields,
        experience_total: &str,
        position: Option<&str>,
        source: Option<&str>,
    ) -> Self {
        Self {
            name: fields.name.clone(),
            nationality: fields.nationality.clone(),
            qualification: fields.qualification.clone(),
            experience: experience_total.to_string(),
            position: position.unwrap_or("").to_string(),
            source: source.unwrap_or("").to_string(),
            ..Self::default()
        }
    }

    /// Field values in ledger column order
    pub fn to_row(&self) -> [&str; 10] {
        [
            &self.name,
            &self.nationality,
            &self.qualification,
            &self.experience,
            &self.current_salary,
            &self.expected_salary,
            &self.position,
            &self.source,
            &self.status,
            &self.remark,
        ]
    }
}

/// Full result of processing one CV
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub file: String,
    pub record: CandidateRecord,
    pub experience: ExperienceSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> CandidateFields {
        CandidateFields {
            name: "Jane Doe".to_string(),
            nationality: "Irish".to_string(),
            qualification: "BSc Computer Science".to_string(),
        }
    }

    #[test]
    fn row_follows_ledger_column_order() {
        let record = CandidateRecord::from_extraction(
            &sample_fields(),
            "3 years 5 months",
            Some("Teacher"),
            Some("Referral"),
        );
        let row = record.to_row();

        assert_eq!(row.len(), FIELDS_ORDER.len());
        assert_eq!(row[0], "Jane Doe");
        assert_eq!(row[1], "Irish");
        assert_eq!(row[2], "BSc Computer Science");
        assert_eq!(row[3], "3 years 5 months");
        assert_eq!(row[6], "Teacher");
        assert_eq!(row[7], "Referral");
    }

    #[test]
    fn bookkeeping_columns_stay_blank() {
        let record =
            CandidateRecord::from_extraction(&sample_fields(), "0 years 6 months", None, None);

        assert_eq!(record.current_salary, "");
        assert_eq!(record.expected_salary, "");
        assert_eq!(record.status, "");
        assert_eq!(record.remark, "");
        assert_eq!(record.position, "");
        assert_eq!(record.source, "");
    }
}
