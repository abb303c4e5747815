//! Per-student merged projection of roster, committed and pending results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Grade;

/// Which source supplied the score shown for a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// A committed result exists; it always wins over a pending one.
    Uploaded,
    /// Only a staged, not-yet-committed result exists.
    Pending,
    /// No result from either source.
    None,
}

impl ResultStatus {
    /// Display label used in review tables and audit exports.
    pub fn label(self) -> &'static str {
        match self {
            ResultStatus::Uploaded => "Uploaded",
            ResultStatus::Pending => "Pending Upload",
            ResultStatus::None => "Not Uploaded",
        }
    }
}

/// One display-ready row of the merged view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub student_id: String,
    pub matric_no: String,
    pub name: String,
    pub department: String,
    pub level: String,
    pub score: Option<f64>,
    pub grade: Option<Grade>,
    pub remark: Option<String>,
    pub status: ResultStatus,
    pub uploaded_at: Option<DateTime<Utc>>,
}
