//! Per-row extraction: matric number, score resolution, grade.

use results_model::{ExtractedRow, Grade};
use tracing::trace;

use crate::columns::HeaderMap;
use crate::table::{RawCell, RawRow, format_number};

/// Outcome of extracting one data row, before roster classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractOutcome {
    Extracted(ExtractedRow),
    MissingMatricNo {
        row: usize,
    },
    InvalidScore {
        matric_no: String,
        raw_value: String,
        row: usize,
    },
}

/// Extract every data row after the header. All-blank rows are skipped
/// silently; every other row produces exactly one outcome.
///
/// Row numbers in outcomes are 1-based sheet positions, which the caller
/// shows in error messages.
pub fn extract_rows(rows: &[RawRow], header_index: usize, columns: &HeaderMap) -> Vec<ExtractOutcome> {
    let mut outcomes = Vec::new();
    for (index, row) in rows.iter().enumerate().skip(header_index + 1) {
        let row_number = index + 1;
        if row.iter().all(RawCell::is_blank) {
            continue;
        }

        let matric_no = match cell_display(row, columns.matric) {
            Some(value) => value,
            None => {
                outcomes.push(ExtractOutcome::MissingMatricNo { row: row_number });
                continue;
            }
        };

        let (score, raw_value) = match resolve_score(row, columns) {
            Some(resolved) => resolved,
            None => {
                outcomes.push(ExtractOutcome::InvalidScore {
                    matric_no,
                    raw_value: first_candidate_display(row, columns),
                    row: row_number,
                });
                continue;
            }
        };

        if !(0.0..=100.0).contains(&score) {
            outcomes.push(ExtractOutcome::InvalidScore {
                matric_no,
                raw_value,
                row: row_number,
            });
            continue;
        }

        let grade = Grade::from_score(score);
        let remark = columns
            .remark
            .and_then(|index| cell_display(row, index))
            .unwrap_or_default();
        trace!(row = row_number, %matric_no, score, %grade, "row extracted");
        outcomes.push(ExtractOutcome::Extracted(ExtractedRow {
            matric_no,
            score,
            grade,
            remark,
            row: row_number,
        }));
    }
    outcomes
}

/// Resolve the score for one row: the first score-candidate cell that
/// parses as a finite number wins, in header order. When none parse, fall
/// back to summing the component columns; a partial sum counts as long as
/// at least one component parses.
///
/// Two rows in the same file can legitimately source their score from two
/// different columns. Observed behavior, kept as-is.
fn resolve_score(row: &RawRow, columns: &HeaderMap) -> Option<(f64, String)> {
    for &index in &columns.score_candidates {
        if let Some(cell) = row.get(index) {
            if let Some(value) = cell.as_number() {
                return Some((value, cell.display()));
            }
        }
    }

    let mut sum = 0.0;
    let mut parsed = 0usize;
    for &index in &columns.components {
        if let Some(value) = row.get(index).and_then(RawCell::as_number) {
            sum += value;
            parsed += 1;
        }
    }
    if parsed > 0 {
        Some((sum, format_number(sum)))
    } else {
        None
    }
}

fn cell_display(row: &RawRow, index: usize) -> Option<String> {
    let cell = row.get(index)?;
    if cell.is_blank() {
        None
    } else {
        Some(cell.display())
    }
}

/// Content of the first non-blank score candidate, for error messages when
/// nothing parsed.
fn first_candidate_display(row: &RawRow, columns: &HeaderMap) -> String {
    columns
        .score_candidates
        .iter()
        .filter_map(|&index| cell_display(row, index))
        .next()
        .unwrap_or_default()
}
