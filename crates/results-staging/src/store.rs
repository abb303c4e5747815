//! In-session store for the current batch of pending results.

use results_model::{Grade, PendingResult, normalize_matric};
use tracing::debug;

/// Fields a manual single-row edit may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingPatch {
    pub score: Option<f64>,
    pub remark: Option<String>,
}

/// Holds the accepted-but-unsubmitted rows of the current import.
///
/// A new import replaces the whole batch; nothing is ever appended across
/// imports. Within a batch, matric numbers are unique: a duplicate row
/// keeps its first position but takes the later values.
#[derive(Debug, Clone, Default)]
pub struct StagingStore {
    pending: Vec<PendingResult>,
}

impl StagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire batch with a freshly classified one.
    pub fn replace_all(&mut self, rows: Vec<PendingResult>) {
        self.pending.clear();
        for row in rows {
            match self.position(&row.matric_no) {
                Some(index) => self.pending[index] = row,
                None => self.pending.push(row),
            }
        }
        debug!(rows = self.pending.len(), "staging batch replaced");
    }

    pub fn rows(&self) -> &[PendingResult] {
        &self.pending
    }

    pub fn get(&self, matric_no: &str) -> Option<&PendingResult> {
        self.position(matric_no).map(|index| &self.pending[index])
    }

    /// Remove one row. Returns false when the matric number is not staged.
    pub fn remove(&mut self, matric_no: &str) -> bool {
        match self.position(matric_no) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Apply a manual edit to one staged row.
    ///
    /// A patched score is re-validated: out of [0, 100] records a blocking
    /// validation error, so the row stays visible for correction but is
    /// never submitted. A valid score clears previous errors and
    /// recomputes the grade.
    pub fn update(&mut self, matric_no: &str, patch: &PendingPatch) -> bool {
        let Some(index) = self.position(matric_no) else {
            return false;
        };
        let row = &mut self.pending[index];
        if let Some(score) = patch.score {
            row.score = score;
            row.grade = Grade::from_score(score);
            row.validation_errors.clear();
            if !(0.0..=100.0).contains(&score) {
                row.validation_errors
                    .push(format!("score {score} is outside the valid range 0-100"));
            }
        }
        if let Some(remark) = &patch.remark {
            row.remark = remark.clone();
        }
        true
    }

    /// Rows eligible for submission: no blocking validation error.
    /// Overwrite warnings do not block.
    pub fn submittable(&self) -> Vec<&PendingResult> {
        self.pending
            .iter()
            .filter(|row| row.is_submittable())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn position(&self, matric_no: &str) -> Option<usize> {
        let key = normalize_matric(matric_no);
        self.pending
            .iter()
            .position(|row| normalize_matric(&row.matric_no) == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(matric_no: &str, score: f64) -> PendingResult {
        PendingResult {
            matric_no: matric_no.to_string(),
            score,
            grade: Grade::from_score(score),
            remark: String::new(),
            student_id: format!("stu-{matric_no}"),
            student_name: "Student".to_string(),
            department: "Computer Science".to_string(),
            level: "300".to_string(),
            existing_score: None,
            existing_grade: None,
            validation_errors: Vec::new(),
        }
    }

    #[test]
    fn reimport_replaces_the_whole_batch() {
        let mut store = StagingStore::new();
        store.replace_all(vec![pending("CSC/001", 72.0), pending("CSC/002", 50.0)]);
        assert_eq!(store.len(), 2);

        store.replace_all(vec![pending("CSC/003", 60.0)]);
        assert_eq!(store.len(), 1);
        assert!(store.get("CSC/001").is_none());
        assert!(store.get("CSC/003").is_some());
    }

    #[test]
    fn duplicate_matric_keeps_last_values() {
        let mut store = StagingStore::new();
        store.replace_all(vec![pending("CSC/001", 40.0), pending("csc/001", 65.0)]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("CSC/001").expect("row").score, 65.0);
    }

    #[test]
    fn remove_and_clear() {
        let mut store = StagingStore::new();
        store.replace_all(vec![pending("CSC/001", 72.0), pending("CSC/002", 50.0)]);
        assert!(store.remove("CSC/001"));
        assert!(!store.remove("CSC/001"));
        assert_eq!(store.len(), 1);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn valid_edit_recomputes_grade() {
        let mut store = StagingStore::new();
        store.replace_all(vec![pending("CSC/001", 40.0)]);
        assert!(store.update(
            "CSC/001",
            &PendingPatch {
                score: Some(71.0),
                remark: Some("rechecked".to_string()),
            },
        ));
        let row = store.get("CSC/001").expect("row");
        assert_eq!(row.score, 71.0);
        assert_eq!(row.grade, Grade::A);
        assert_eq!(row.remark, "rechecked");
        assert!(row.is_submittable());
    }

    #[test]
    fn out_of_range_edit_blocks_submission_but_stays_staged() {
        let mut store = StagingStore::new();
        store.replace_all(vec![pending("CSC/001", 60.0)]);
        store.update(
            "CSC/001",
            &PendingPatch {
                score: Some(140.0),
                remark: None,
            },
        );
        let row = store.get("CSC/001").expect("row");
        assert!(!row.is_submittable());
        assert_eq!(store.submittable().len(), 0);
        assert_eq!(store.len(), 1);

        // A corrected edit clears the error again.
        store.update(
            "CSC/001",
            &PendingPatch {
                score: Some(90.0),
                remark: None,
            },
        );
        assert_eq!(store.submittable().len(), 1);
    }

    #[test]
    fn update_unknown_matric_is_a_noop() {
        let mut store = StagingStore::new();
        assert!(!store.update("CSC/404", &PendingPatch::default()));
    }
}
