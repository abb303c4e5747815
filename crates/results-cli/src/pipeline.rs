//! Import pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Read**: decode the spreadsheet into raw rows
//! 2. **Locate**: find the header row heuristically
//! 3. **Map**: resolve matric/score/component columns
//! 4. **Extract**: per-row matric, score and grade
//! 5. **Classify**: cross-reference roster and committed results
//! 6. **Stage**: replace the staging batch wholesale
//!
//! Stages 1-3 fail the whole import; everything after degrades to per-row
//! issues.

use std::path::Path;
use std::time::Instant;

use results_ingest::{ExtractOutcome, extract_rows, locate_header_row, read_sheet, resolve_columns};
use results_model::{AuthoritativeResult, Result, RosterEntry};
use results_staging::StagingStore;
use results_validate::{ImportReport, classify_batch};
use tracing::{debug, info, info_span};

/// Parse a spreadsheet into per-row extraction outcomes.
///
/// Fatal conditions (unreadable file, no header row, no matric column, no
/// score column) surface here, before any row is interpreted.
pub fn parse_sheet(path: &Path) -> Result<Vec<ExtractOutcome>> {
    let span = info_span!("parse_sheet", file = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let rows = read_sheet(path)?;
    let header_index = locate_header_row(&rows)?;
    let columns = resolve_columns(&rows[header_index])?;
    let outcomes = extract_rows(&rows, header_index, &columns);

    debug!(
        rows = rows.len(),
        header_index,
        outcomes = outcomes.len(),
        duration_ms = start.elapsed().as_millis(),
        "sheet parsed"
    );
    Ok(outcomes)
}

/// Run one full import: parse, classify, and replace the staging batch.
///
/// On any fatal error staging is left exactly as it was.
pub fn run_import(
    path: &Path,
    roster: &[RosterEntry],
    existing: &[AuthoritativeResult],
    staging: &mut StagingStore,
) -> Result<ImportReport> {
    let span = info_span!("import", file = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let outcomes = parse_sheet(path)?;
    let report = classify_batch(outcomes, roster, existing)?;
    staging.replace_all(report.accepted.clone());

    info!(
        staged = staging.len(),
        errors = report.issues.error_count(),
        warnings = report.issues.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "import complete"
    );
    Ok(report)
}
