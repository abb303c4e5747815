//! Pure merged-view derivation.
//!
//! Recomputed by the caller whenever any input changes; no hidden state,
//! no recomputation-order bugs.

use std::collections::BTreeMap;

use results_model::{
    AuthoritativeResult, MergedRecord, PendingResult, ResultStatus, RosterEntry, normalize_matric,
};

/// Project one record per roster entry, in roster order.
///
/// Precedence per student: authoritative result, then pending result, then
/// nothing. A student with both simultaneously shows the authoritative one.
pub fn merge_view(
    roster: &[RosterEntry],
    authoritative: &[AuthoritativeResult],
    pending: &[PendingResult],
) -> Vec<MergedRecord> {
    let committed: BTreeMap<String, &AuthoritativeResult> = authoritative
        .iter()
        .map(|result| (normalize_matric(&result.matric_no), result))
        .collect();
    let staged: BTreeMap<String, &PendingResult> = pending
        .iter()
        .map(|row| (normalize_matric(&row.matric_no), row))
        .collect();

    roster
        .iter()
        .map(|entry| {
            let key = normalize_matric(&entry.matric_no);
            if let Some(result) = committed.get(&key) {
                MergedRecord {
                    student_id: entry.student_id.clone(),
                    matric_no: entry.matric_no.clone(),
                    name: entry.name.clone(),
                    department: entry.department.clone(),
                    level: entry.level.clone(),
                    score: Some(result.score),
                    grade: Some(result.grade),
                    remark: result.remark.clone(),
                    status: ResultStatus::Uploaded,
                    uploaded_at: Some(result.uploaded_at),
                }
            } else if let Some(row) = staged.get(&key) {
                MergedRecord {
                    student_id: entry.student_id.clone(),
                    matric_no: entry.matric_no.clone(),
                    name: entry.name.clone(),
                    department: entry.department.clone(),
                    level: entry.level.clone(),
                    score: Some(row.score),
                    grade: Some(row.grade),
                    remark: (!row.remark.is_empty()).then(|| row.remark.clone()),
                    status: ResultStatus::Pending,
                    uploaded_at: None,
                }
            } else {
                MergedRecord {
                    student_id: entry.student_id.clone(),
                    matric_no: entry.matric_no.clone(),
                    name: entry.name.clone(),
                    department: entry.department.clone(),
                    level: entry.level.clone(),
                    score: None,
                    grade: None,
                    remark: None,
                    status: ResultStatus::None,
                    uploaded_at: None,
                }
            }
        })
        .collect()
}
