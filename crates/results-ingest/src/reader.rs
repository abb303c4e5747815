//! Tabular readers: file bytes to ordered raw rows.
//!
//! Both readers honor the same contract: rows come back in original sheet
//! order, blank rows included, because human-facing row numbers are derived
//! from sheet position.

use std::path::Path;

use excelstream::{CellValue, ExcelReader};
use results_model::{Result, ResultsError};
use tracing::debug;

use crate::table::{RawCell, RawRow};

/// Read a sheet, choosing the reader by file extension.
pub fn read_sheet(path: &Path) -> Result<Vec<RawRow>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => read_csv_sheet(path),
        "xlsx" | "xls" => read_excel_sheet(path),
        _ => Err(ResultsError::FileFormat(format!(
            "unsupported file type: {} (expected .csv, .xlsx or .xls)",
            path.display()
        ))),
    }
}

/// Read a CSV file into raw rows.
///
/// The csv parser silently drops fully blank lines, so gaps in record line
/// numbers are padded back in as empty rows to keep sheet positions stable.
pub fn read_csv_sheet(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| ResultsError::FileFormat(format!("read csv: {error}")))?;

    let mut rows: Vec<RawRow> = Vec::new();
    let mut expected_line = 1u64;
    for record in reader.records() {
        let record =
            record.map_err(|error| ResultsError::FileFormat(format!("read csv record: {error}")))?;
        if let Some(position) = record.position() {
            while expected_line < position.line() {
                rows.push(Vec::new());
                expected_line += 1;
            }
        }
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(field.to_string())
                    }
                })
                .collect(),
        );
        expected_line += 1;
    }
    debug!(path = %path.display(), rows = rows.len(), "csv sheet read");
    Ok(rows)
}

/// Read the first worksheet of an Excel file into raw rows.
///
/// The streaming reader reports each row's sheet index; missing indices are
/// padded with empty rows.
pub fn read_excel_sheet(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = ExcelReader::open(path)
        .map_err(|error| ResultsError::FileFormat(format!("open workbook: {error}")))?;
    let mut rows: Vec<RawRow> = Vec::new();
    let iter = reader
        .rows_by_index(0)
        .map_err(|error| ResultsError::FileFormat(format!("read worksheet: {error}")))?;
    for row in iter {
        let row =
            row.map_err(|error| ResultsError::FileFormat(format!("read worksheet row: {error}")))?;
        while rows.len() < row.index as usize {
            rows.push(Vec::new());
        }
        rows.push(row.cells.into_iter().map(convert_cell).collect());
    }
    debug!(path = %path.display(), rows = rows.len(), "excel sheet read");
    Ok(rows)
}

fn convert_cell(cell: CellValue) -> RawCell {
    match cell {
        CellValue::Empty | CellValue::Error(_) => RawCell::Empty,
        CellValue::String(text) => RawCell::Text(text),
        CellValue::Int(value) => RawCell::Number(value as f64),
        CellValue::Float(value) | CellValue::DateTime(value) => RawCell::Number(value),
        CellValue::Bool(value) => RawCell::Text(value.to_string()),
        CellValue::Formula(text) => RawCell::Text(text),
    }
}
