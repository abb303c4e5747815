#![deny(unsafe_code)]

pub mod error;
pub mod grade;
pub mod issue;
pub mod merged;
pub mod types;

pub use error::{Result, ResultsError};
pub use grade::Grade;
pub use issue::{IssueSeverity, ValidationIssue};
pub use merged::{MergedRecord, ResultStatus};
pub use types::{
    AuthoritativeResult, BulkResultRecord, ExtractedRow, PendingResult, RosterEntry,
    normalize_matric,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_severity_ordering() {
        let fatal = ValidationIssue::FileFormatError {
            message: "no headers".to_string(),
        };
        let warning = ValidationIssue::ExistingResultOverwrite {
            matric_no: "CSC/001".to_string(),
            existing_score: 55.0,
            existing_grade: Grade::C,
            new_score: 80.0,
            new_grade: Grade::A,
        };
        assert_eq!(fatal.severity(), IssueSeverity::Fatal);
        assert_eq!(warning.severity(), IssueSeverity::Warning);
        assert!(fatal.severity().rank() > warning.severity().rank());
    }

    #[test]
    fn issue_serializes_tagged() {
        let issue = ValidationIssue::MissingMatricNo { row: 4 };
        let json = serde_json::to_string(&issue).expect("serialize issue");
        let round: ValidationIssue = serde_json::from_str(&json).expect("deserialize issue");
        assert_eq!(issue, round);
        assert!(json.contains("missing_matric_no"));
    }
}
