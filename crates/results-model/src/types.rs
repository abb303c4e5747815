//! Core record types shared across the import pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Grade;

/// Canonical matric-number key used for roster and result lookups.
///
/// Matric numbers arrive from spreadsheets with inconsistent casing and
/// stray whitespace; lookups always go through this normalization.
pub fn normalize_matric(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// One student on the course roster. Supplied externally, read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub student_id: String,
    pub matric_no: String,
    pub name: String,
    pub department: String,
    pub level: String,
}

/// A previously committed result, used as a comparison baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeResult {
    pub student_id: String,
    pub matric_no: String,
    pub score: f64,
    pub grade: Grade,
    #[serde(default)]
    pub remark: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// A candidate row accepted by classification but not yet committed.
///
/// Keyed uniquely by `matric_no` within one staging batch. `existing_score`
/// and `existing_grade` are set when the row would overwrite a committed
/// result, so a reviewer sees the delta. `validation_errors` holds blocking
/// problems introduced after staging (a manual edit gone wrong); a row with
/// entries here stays staged but is never submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingResult {
    pub matric_no: String,
    pub score: f64,
    pub grade: Grade,
    #[serde(default)]
    pub remark: String,
    pub student_id: String,
    pub student_name: String,
    pub department: String,
    pub level: String,
    #[serde(default)]
    pub existing_score: Option<f64>,
    #[serde(default)]
    pub existing_grade: Option<Grade>,
    #[serde(default)]
    pub validation_errors: Vec<String>,
}

impl PendingResult {
    /// True when the row would replace a committed result if submitted.
    pub fn has_overwrite_warning(&self) -> bool {
        self.existing_score.is_some()
    }

    /// True when no blocking validation error is outstanding. Overwrite
    /// warnings never block.
    pub fn is_submittable(&self) -> bool {
        self.validation_errors.is_empty()
    }
}

/// One record of the bulk commit body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResultRecord {
    pub matric_no: String,
    pub score: f64,
    pub grade: Grade,
    pub remark: String,
    pub course_id: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A row successfully extracted from the spreadsheet, before
/// classification against roster and committed results.
///
/// `row` is the human-facing 1-based sheet row number.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRow {
    pub matric_no: String,
    pub score: f64,
    pub grade: Grade,
    pub remark: String,
    pub row: usize,
}
