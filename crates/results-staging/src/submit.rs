//! Bulk submission of the staged batch.

use chrono::{DateTime, Utc};
use results_model::BulkResultRecord;
use thiserror::Error;
use tracing::{info, warn};

use crate::store::StagingStore;

/// Commit collaborator. One call commits the whole batch atomically from
/// this side's perspective; partial commits do not exist.
pub trait ResultSink {
    fn submit_bulk(&self, records: &[BulkResultRecord]) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("no submittable rows in staging")]
    NothingToSubmit,
    #[error("bulk commit failed: {0}")]
    Commit(anyhow::Error),
}

/// What a successful submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Rows committed.
    pub submitted: usize,
    /// Staged rows dropped because a blocking validation error remained.
    pub skipped: usize,
}

/// Build the commit records for the currently submittable rows without
/// touching anything. Shared by the real submission and dry runs.
pub fn plan_submission(
    staging: &StagingStore,
    course_id: &str,
    uploaded_at: DateTime<Utc>,
) -> Vec<BulkResultRecord> {
    staging
        .submittable()
        .into_iter()
        .map(|row| BulkResultRecord {
            matric_no: row.matric_no.clone(),
            score: row.score,
            grade: row.grade,
            remark: row.remark.clone(),
            course_id: course_id.to_string(),
            uploaded_at,
        })
        .collect()
}

/// Serializes submissions: one in flight at a time per staging store.
#[derive(Debug, Default)]
pub struct SubmissionCoordinator {
    in_flight: bool,
}

impl SubmissionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Commit every submittable row in one bulk call.
    ///
    /// On success the staging store is cleared entirely, including rows
    /// that were skipped for blocking errors; the caller is expected to
    /// reload roster and committed results afterwards. On failure staging
    /// is left untouched so the submission can be retried without
    /// re-parsing the file.
    pub fn submit(
        &mut self,
        staging: &mut StagingStore,
        course_id: &str,
        uploaded_at: DateTime<Utc>,
        sink: &dyn ResultSink,
    ) -> Result<SubmissionOutcome, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }
        let records = plan_submission(staging, course_id, uploaded_at);
        if records.is_empty() {
            return Err(SubmitError::NothingToSubmit);
        }

        self.in_flight = true;
        let result = sink.submit_bulk(&records);
        self.in_flight = false;

        match result {
            Ok(()) => {
                let skipped = staging.len() - records.len();
                staging.clear();
                info!(
                    course_id,
                    submitted = records.len(),
                    skipped,
                    "bulk submission committed"
                );
                Ok(SubmissionOutcome {
                    submitted: records.len(),
                    skipped,
                })
            }
            Err(error) => {
                warn!(course_id, %error, "bulk submission failed; staging preserved");
                Err(SubmitError::Commit(error))
            }
        }
    }

    #[cfg(test)]
    fn force_in_flight(&mut self) {
        self.in_flight = true;
    }
}
