//! Row classification against the roster and the committed result set.

use std::collections::BTreeMap;

use results_ingest::ExtractOutcome;
use results_model::{
    AuthoritativeResult, ExtractedRow, PendingResult, RosterEntry, normalize_matric,
};

/// Lookup context for one import batch. Both inputs are immutable for the
/// duration of the batch.
#[derive(Debug)]
pub struct BatchContext<'a> {
    roster: BTreeMap<String, &'a RosterEntry>,
    existing: BTreeMap<String, &'a AuthoritativeResult>,
}

impl<'a> BatchContext<'a> {
    pub fn new(roster: &'a [RosterEntry], existing: &'a [AuthoritativeResult]) -> Self {
        Self {
            roster: roster
                .iter()
                .map(|entry| (normalize_matric(&entry.matric_no), entry))
                .collect(),
            existing: existing
                .iter()
                .map(|result| (normalize_matric(&result.matric_no), result))
                .collect(),
        }
    }

    pub fn roster_entry(&self, matric_no: &str) -> Option<&'a RosterEntry> {
        self.roster.get(&normalize_matric(matric_no)).copied()
    }

    pub fn existing_result(&self, matric_no: &str) -> Option<&'a AuthoritativeResult> {
        self.existing.get(&normalize_matric(matric_no)).copied()
    }
}

/// Final classification of one data row. Exactly one variant per row, so
/// match sites are checked exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Staged. Carries the overwrite annotation when a committed result
    /// already exists for the student.
    Accepted(Box<PendingResult>),
    MissingMatricNo {
        row: usize,
    },
    StudentNotFound {
        matric_no: String,
        row: usize,
    },
    InvalidScore {
        matric_no: String,
        raw_value: String,
        row: usize,
    },
}

/// Lift an extraction outcome into a final row outcome.
pub fn classify_outcome(outcome: ExtractOutcome, context: &BatchContext<'_>) -> RowOutcome {
    match outcome {
        ExtractOutcome::Extracted(extracted) => classify_row(extracted, context),
        ExtractOutcome::MissingMatricNo { row } => RowOutcome::MissingMatricNo { row },
        ExtractOutcome::InvalidScore {
            matric_no,
            raw_value,
            row,
        } => RowOutcome::InvalidScore {
            matric_no,
            raw_value,
            row,
        },
    }
}

/// Classify one extracted row. Decision order: roster membership first,
/// then overwrite detection; an existing committed result is a warning,
/// never a rejection.
pub fn classify_row(extracted: ExtractedRow, context: &BatchContext<'_>) -> RowOutcome {
    let Some(entry) = context.roster_entry(&extracted.matric_no) else {
        return RowOutcome::StudentNotFound {
            matric_no: extracted.matric_no,
            row: extracted.row,
        };
    };

    let existing = context.existing_result(&extracted.matric_no);
    RowOutcome::Accepted(Box::new(PendingResult {
        // The roster spelling of the matric number is canonical.
        matric_no: entry.matric_no.clone(),
        score: extracted.score,
        grade: extracted.grade,
        remark: extracted.remark,
        student_id: entry.student_id.clone(),
        student_name: entry.name.clone(),
        department: entry.department.clone(),
        level: entry.level.clone(),
        existing_score: existing.map(|result| result.score),
        existing_grade: existing.map(|result| result.grade),
        validation_errors: Vec::new(),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use results_model::Grade;

    use super::*;

    fn roster() -> Vec<RosterEntry> {
        vec![RosterEntry {
            student_id: "stu-1".to_string(),
            matric_no: "CSC/001".to_string(),
            name: "Jane Doe".to_string(),
            department: "Computer Science".to_string(),
            level: "300".to_string(),
        }]
    }

    fn committed() -> Vec<AuthoritativeResult> {
        vec![AuthoritativeResult {
            student_id: "stu-1".to_string(),
            matric_no: "CSC/001".to_string(),
            score: 55.0,
            grade: Grade::C,
            remark: None,
            uploaded_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        }]
    }

    fn extracted(matric_no: &str, score: f64, row: usize) -> ExtractedRow {
        ExtractedRow {
            matric_no: matric_no.to_string(),
            score,
            grade: Grade::from_score(score),
            remark: String::new(),
            row,
        }
    }

    #[test]
    fn unknown_matric_is_not_staged() {
        let roster = roster();
        let context = BatchContext::new(&roster, &[]);
        let outcome = classify_row(extracted("CSC/999", 60.0, 5), &context);
        assert_eq!(
            outcome,
            RowOutcome::StudentNotFound {
                matric_no: "CSC/999".to_string(),
                row: 5,
            }
        );
    }

    #[test]
    fn overwrite_is_annotated_but_still_accepted() {
        let roster = roster();
        let committed = committed();
        let context = BatchContext::new(&roster, &committed);
        let outcome = classify_row(extracted("CSC/001", 80.0, 2), &context);
        let RowOutcome::Accepted(pending) = outcome else {
            panic!("expected accepted row, got {outcome:?}");
        };
        assert_eq!(pending.score, 80.0);
        assert_eq!(pending.grade, Grade::A);
        assert_eq!(pending.existing_score, Some(55.0));
        assert_eq!(pending.existing_grade, Some(Grade::C));
        assert!(pending.has_overwrite_warning());
        assert!(pending.is_submittable());
    }

    #[test]
    fn clean_row_has_no_annotations() {
        let roster = roster();
        let context = BatchContext::new(&roster, &[]);
        let RowOutcome::Accepted(pending) = classify_row(extracted("CSC/001", 72.0, 2), &context)
        else {
            panic!("expected accepted row");
        };
        assert_eq!(pending.existing_score, None);
        assert!(!pending.has_overwrite_warning());
        assert_eq!(pending.student_name, "Jane Doe");
    }

    #[test]
    fn matric_matching_ignores_case_and_whitespace() {
        let roster = roster();
        let context = BatchContext::new(&roster, &[]);
        let RowOutcome::Accepted(pending) = classify_row(extracted(" csc/001 ", 50.0, 3), &context)
        else {
            panic!("expected accepted row");
        };
        // Staged under the roster's canonical spelling.
        assert_eq!(pending.matric_no, "CSC/001");
    }
}
