//! Whole-batch classification and per-category issue accumulation.

use results_ingest::ExtractOutcome;
use results_model::{
    AuthoritativeResult, PendingResult, Result, ResultsError, RosterEntry, ValidationIssue,
};
use tracing::info;

use crate::classify::{BatchContext, RowOutcome, classify_outcome};

/// Issues for one batch, grouped the way the reviewer sees them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueBuckets {
    pub missing_matric: Vec<ValidationIssue>,
    pub invalid_score: Vec<ValidationIssue>,
    pub not_found: Vec<ValidationIssue>,
    pub overwrites: Vec<ValidationIssue>,
    pub general: Vec<ValidationIssue>,
}

impl IssueBuckets {
    pub fn push(&mut self, issue: ValidationIssue) {
        match &issue {
            ValidationIssue::MissingMatricNo { .. } => self.missing_matric.push(issue),
            ValidationIssue::InvalidScore { .. } => self.invalid_score.push(issue),
            ValidationIssue::StudentNotFound { .. } => self.not_found.push(issue),
            ValidationIssue::ExistingResultOverwrite { .. } => self.overwrites.push(issue),
            ValidationIssue::FileFormatError { .. } | ValidationIssue::GeneralError { .. } => {
                self.general.push(issue)
            }
        }
    }

    /// Row-excluding issues only; overwrite warnings are not counted.
    pub fn error_count(&self) -> usize {
        self.missing_matric.len() + self.invalid_score.len() + self.not_found.len()
            + self.general.len()
    }

    pub fn warning_count(&self) -> usize {
        self.overwrites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.error_count() == 0 && self.warning_count() == 0
    }

    /// All issues, most severe first, then by sheet row.
    pub fn iter_sorted(&self) -> Vec<&ValidationIssue> {
        let mut issues: Vec<&ValidationIssue> = self
            .general
            .iter()
            .chain(&self.missing_matric)
            .chain(&self.invalid_score)
            .chain(&self.not_found)
            .chain(&self.overwrites)
            .collect();
        issues.sort_by(|a, b| {
            b.severity()
                .rank()
                .cmp(&a.severity().rank())
                .then(a.row().cmp(&b.row()))
        });
        issues
    }
}

/// Result of classifying one whole import batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Rows accepted into staging, in sheet order.
    pub accepted: Vec<PendingResult>,
    pub issues: IssueBuckets,
}

impl ImportReport {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}

/// Classify every extracted outcome against the roster and committed
/// results.
///
/// A batch that produced neither accepted rows nor issues means the sheet
/// held no usable data at all; that is a terminal condition distinct from
/// a format error, and no review should open for it.
pub fn classify_batch(
    outcomes: Vec<ExtractOutcome>,
    roster: &[RosterEntry],
    existing: &[AuthoritativeResult],
) -> Result<ImportReport> {
    let context = BatchContext::new(roster, existing);
    let mut report = ImportReport::default();

    for outcome in outcomes {
        match classify_outcome(outcome, &context) {
            RowOutcome::Accepted(pending) => {
                if pending.has_overwrite_warning() {
                    report.issues.push(ValidationIssue::ExistingResultOverwrite {
                        matric_no: pending.matric_no.clone(),
                        existing_score: pending.existing_score.unwrap_or_default(),
                        existing_grade: pending.existing_grade.unwrap_or(pending.grade),
                        new_score: pending.score,
                        new_grade: pending.grade,
                    });
                }
                report.accepted.push(*pending);
            }
            RowOutcome::MissingMatricNo { row } => {
                report.issues.push(ValidationIssue::MissingMatricNo { row });
            }
            RowOutcome::StudentNotFound { matric_no, row } => {
                report
                    .issues
                    .push(ValidationIssue::StudentNotFound { matric_no, row });
            }
            RowOutcome::InvalidScore {
                matric_no,
                raw_value,
                row,
            } => {
                report.issues.push(ValidationIssue::InvalidScore {
                    matric_no,
                    raw_value,
                    row,
                });
            }
        }
    }

    if report.accepted.is_empty() && report.issues.is_empty() {
        return Err(ResultsError::NoValidData);
    }

    info!(
        accepted = report.accepted.len(),
        errors = report.issues.error_count(),
        warnings = report.issues.warning_count(),
        "batch classified"
    );
    Ok(report)
}
