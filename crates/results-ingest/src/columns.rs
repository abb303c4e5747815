//! Header cell normalization and semantic column resolution.

use results_model::{Result, ResultsError};
use tracing::debug;

use crate::table::{RawCell, RawRow};

/// Keywords that identify the matric column, in priority order.
const MATRIC_TOKENS: [&str; 4] = ["matric", "reg", "student", "id"];

/// Keywords that identify score-like columns.
const SCORE_TOKENS: [&str; 4] = ["score", "total", "mark", "grade"];

/// Keywords that identify component-score columns.
const COMPONENT_TOKENS: [&str; 5] = ["q1", "q2", "q3", "q4", "q5"];

/// Keywords that identify an optional remark column.
const REMARK_TOKENS: [&str; 2] = ["remark", "comment"];

/// Resolved column indices for one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    /// Column holding the matric number.
    pub matric: usize,
    /// All score-like columns, in header order. A row's score comes from
    /// the first of these that parses for that row.
    pub score_candidates: Vec<usize>,
    /// Component columns (q1..q5), in header order. Fallback only.
    pub components: Vec<usize>,
    /// Optional remark column.
    pub remark: Option<usize>,
}

/// Normalize a header cell: lowercase, collapse every run of
/// non-alphanumerics into one underscore, trim underscores.
pub fn normalize_header(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for ch in raw.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            normalized.push(ch);
        } else if !normalized.is_empty() && !normalized.ends_with('_') {
            normalized.push('_');
        }
    }
    if normalized.ends_with('_') {
        normalized.pop();
    }
    normalized
}

/// Resolve the columns needed for extraction from the header row.
///
/// A missing matric column or an empty score-candidate list is fatal; the
/// component and remark columns are optional.
pub fn resolve_columns(header_row: &RawRow) -> Result<HeaderMap> {
    let normalized: Vec<String> = header_row
        .iter()
        .map(|cell: &RawCell| normalize_header(&cell.display()))
        .collect();

    let matric = MATRIC_TOKENS
        .iter()
        .find_map(|token| normalized.iter().position(|header| header.contains(token)))
        .ok_or_else(|| {
            ResultsError::FileFormat(
                "no matric number column found (expected matric/reg/student/id)".to_string(),
            )
        })?;

    let score_candidates: Vec<usize> = normalized
        .iter()
        .enumerate()
        .filter(|(_, header)| SCORE_TOKENS.iter().any(|token| header.contains(token)))
        .map(|(index, _)| index)
        .collect();
    if score_candidates.is_empty() {
        return Err(ResultsError::FileFormat(
            "no score or total column found".to_string(),
        ));
    }

    let components: Vec<usize> = normalized
        .iter()
        .enumerate()
        .filter(|(_, header)| COMPONENT_TOKENS.iter().any(|token| header.contains(token)))
        .map(|(index, _)| index)
        .collect();

    let remark = normalized
        .iter()
        .position(|header| REMARK_TOKENS.iter().any(|token| header.contains(token)));

    debug!(
        matric,
        score_candidates = score_candidates.len(),
        components = components.len(),
        "columns resolved"
    );
    Ok(HeaderMap {
        matric,
        score_candidates,
        components,
        remark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(cells: &[&str]) -> RawRow {
        cells
            .iter()
            .map(|cell| RawCell::Text((*cell).to_string()))
            .collect()
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("Matric No."), "matric_no");
        assert_eq!(normalize_header("  TOTAL SCORE (%) "), "total_score");
        assert_eq!(normalize_header("Q1"), "q1");
        assert_eq!(normalize_header("REG--NUMBER"), "reg_number");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn resolves_matric_by_priority() {
        let map =
            resolve_columns(&text_row(&["S/N", "Reg No", "Matric No", "Score"])).expect("columns");
        // "matric" beats "reg" even though reg appears first.
        assert_eq!(map.matric, 2);
    }

    #[test]
    fn collects_all_score_candidates_in_order() {
        let map = resolve_columns(&text_row(&["Matric", "CA Mark", "Exam Score", "Total", "Grade"]))
            .expect("columns");
        assert_eq!(map.score_candidates, vec![1, 2, 3, 4]);
    }

    #[test]
    fn collects_component_columns() {
        let map = resolve_columns(&text_row(&["Matric", "Q1", "Q2", "Q3", "Q4", "Q5", "Total"]))
            .expect("columns");
        assert_eq!(map.components, vec![1, 2, 3, 4, 5]);
        assert_eq!(map.score_candidates, vec![6]);
    }

    #[test]
    fn missing_matric_column_is_fatal() {
        let error = resolve_columns(&text_row(&["Name", "Score"])).unwrap_err();
        assert!(error.to_string().contains("matric"));
    }

    #[test]
    fn missing_score_column_is_fatal() {
        let error = resolve_columns(&text_row(&["Matric No", "Name"])).unwrap_err();
        assert!(error.to_string().contains("score"));
    }

    #[test]
    fn remark_column_is_optional() {
        let with = resolve_columns(&text_row(&["Matric", "Score", "Remark"])).expect("columns");
        assert_eq!(with.remark, Some(2));
        let without = resolve_columns(&text_row(&["Matric", "Score"])).expect("columns");
        assert_eq!(without.remark, None);
    }
}
