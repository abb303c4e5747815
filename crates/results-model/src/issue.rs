//! Typed validation issues reported by the import pipeline.

use serde::{Deserialize, Serialize};

use crate::Grade;

/// How severe an issue is for the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Aborts the entire import before any row is staged.
    Fatal,
    /// Excludes the affected row from staging; the batch continues.
    Error,
    /// Informational; the affected row is still staged and submittable.
    Warning,
}

impl IssueSeverity {
    /// Sort rank; higher sorts first in issue tables.
    pub fn rank(self) -> u8 {
        match self {
            IssueSeverity::Fatal => 3,
            IssueSeverity::Error => 2,
            IssueSeverity::Warning => 1,
        }
    }
}

/// One validation issue found while importing a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// The matric number was not found on the course roster.
    StudentNotFound { matric_no: String, row: usize },
    /// The row would replace an already-committed result. Non-blocking.
    ExistingResultOverwrite {
        matric_no: String,
        existing_score: f64,
        existing_grade: Grade,
        new_score: f64,
        new_grade: Grade,
    },
    /// No usable score could be resolved, or it fell outside [0, 100].
    InvalidScore {
        matric_no: String,
        raw_value: String,
        row: usize,
    },
    /// The matric cell was blank.
    MissingMatricNo { row: usize },
    /// The file could not be interpreted at all. Aborts the import.
    FileFormatError { message: String },
    /// Anything else that stopped the import.
    GeneralError { message: String },
}

impl ValidationIssue {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            ValidationIssue::FileFormatError { .. } | ValidationIssue::GeneralError { .. } => {
                IssueSeverity::Fatal
            }
            ValidationIssue::StudentNotFound { .. }
            | ValidationIssue::InvalidScore { .. }
            | ValidationIssue::MissingMatricNo { .. } => IssueSeverity::Error,
            ValidationIssue::ExistingResultOverwrite { .. } => IssueSeverity::Warning,
        }
    }

    /// Sheet row the issue points at, when row-local.
    pub fn row(&self) -> Option<usize> {
        match self {
            ValidationIssue::StudentNotFound { row, .. }
            | ValidationIssue::InvalidScore { row, .. }
            | ValidationIssue::MissingMatricNo { row } => Some(*row),
            _ => None,
        }
    }

    /// Short label for grouping issues into display buckets.
    pub fn category(&self) -> &'static str {
        match self {
            ValidationIssue::StudentNotFound { .. } => "student not found",
            ValidationIssue::ExistingResultOverwrite { .. } => "overwrite",
            ValidationIssue::InvalidScore { .. } => "invalid score",
            ValidationIssue::MissingMatricNo { .. } => "missing matric no",
            ValidationIssue::FileFormatError { .. } => "file format",
            ValidationIssue::GeneralError { .. } => "error",
        }
    }

    /// Human-readable description for tables and logs.
    pub fn message(&self) -> String {
        match self {
            ValidationIssue::StudentNotFound { matric_no, row } => {
                format!("row {row}: matric number {matric_no} is not on the course roster")
            }
            ValidationIssue::ExistingResultOverwrite {
                matric_no,
                existing_score,
                existing_grade,
                new_score,
                new_grade,
            } => format!(
                "{matric_no}: replaces committed result \
                 {existing_score} ({existing_grade}) with {new_score} ({new_grade})"
            ),
            ValidationIssue::InvalidScore {
                matric_no,
                raw_value,
                row,
            } => {
                if raw_value.is_empty() {
                    format!("row {row}: no usable score for {matric_no}")
                } else {
                    format!("row {row}: invalid score {raw_value:?} for {matric_no}")
                }
            }
            ValidationIssue::MissingMatricNo { row } => {
                format!("row {row}: matric number is blank")
            }
            ValidationIssue::FileFormatError { message }
            | ValidationIssue::GeneralError { message } => message.clone(),
        }
    }
}
