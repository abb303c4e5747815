//! Header row location heuristics.
//!
//! Score sheets rarely start at row 0: title rows, course codes and blank
//! padding come first. The header is found by ordered heuristics, first
//! match wins.

use results_model::{Result, ResultsError};
use tracing::debug;

use crate::table::RawRow;

/// Tokens that mark a plain header row when no component columns exist.
const HEADER_TOKENS: [&str; 4] = ["matric", "reg", "score", "total"];

/// Find the header row index.
///
/// Component-score sheets are targeted first: a row with a `q1` cell whose
/// concatenated text also mentions `q2`. Failing that, the first row
/// mentioning any of matric/reg/score/total. No match aborts the import.
pub fn locate_header_row(rows: &[RawRow]) -> Result<usize> {
    for (index, row) in rows.iter().enumerate() {
        let has_q1_cell = row
            .iter()
            .any(|cell| cell.display().to_lowercase().contains("q1"));
        if has_q1_cell && concatenated_text(row).contains("q2") {
            debug!(index, "header located via component columns");
            return Ok(index);
        }
    }

    for (index, row) in rows.iter().enumerate() {
        let text = concatenated_text(row);
        if HEADER_TOKENS.iter().any(|token| text.contains(token)) {
            debug!(index, "header located via header tokens");
            return Ok(index);
        }
    }

    Err(ResultsError::FileFormat(
        "Could not find headers: no row mentions matric, reg, score or total".to_string(),
    ))
}

fn concatenated_text(row: &RawRow) -> String {
    let mut text = String::new();
    for cell in row {
        text.push_str(&cell.display().to_lowercase());
        text.push(' ');
    }
    text
}
