//! Audit export: the merged view as a flat table for download.

#![deny(unsafe_code)]

use std::path::Path;

use excelstream::{CellValue, ExcelWriter};
use results_ingest::format_number;
use results_model::{MergedRecord, Result, ResultsError};
use tracing::info;

/// Column order of the audit table.
pub const AUDIT_HEADERS: [&str; 9] = [
    "Matric No",
    "Name",
    "Department",
    "Level",
    "Score",
    "Grade",
    "Remark",
    "Status",
    "Uploaded At",
];

/// Render one merged record as audit table cells.
pub fn audit_row(record: &MergedRecord) -> Vec<String> {
    vec![
        record.matric_no.clone(),
        record.name.clone(),
        record.department.clone(),
        record.level.clone(),
        record.score.map(format_number).unwrap_or_default(),
        record
            .grade
            .map(|grade| grade.to_string())
            .unwrap_or_default(),
        record.remark.clone().unwrap_or_default(),
        record.status.label().to_string(),
        record
            .uploaded_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
    ]
}

/// Write the audit table, choosing the format by file extension.
pub fn write_audit(path: &Path, records: &[MergedRecord]) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => write_audit_csv(path, records),
        "xlsx" => write_audit_xlsx(path, records),
        _ => Err(ResultsError::FileFormat(format!(
            "unsupported export format: {} (expected .csv or .xlsx)",
            path.display()
        ))),
    }
}

/// Write the audit table as CSV.
pub fn write_audit_csv(path: &Path, records: &[MergedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|error| ResultsError::Message(format!("create export: {error}")))?;
    writer
        .write_record(AUDIT_HEADERS)
        .map_err(|error| ResultsError::Message(format!("write export header: {error}")))?;
    for record in records {
        writer
            .write_record(audit_row(record))
            .map_err(|error| ResultsError::Message(format!("write export row: {error}")))?;
    }
    writer
        .flush()
        .map_err(|error| ResultsError::Message(format!("flush export: {error}")))?;
    info!(path = %path.display(), rows = records.len(), "audit csv written");
    Ok(())
}

/// Write the audit table as a single-sheet workbook with a bold header.
pub fn write_audit_xlsx(path: &Path, records: &[MergedRecord]) -> Result<()> {
    let mut writer = ExcelWriter::new(path)
        .map_err(|error| ResultsError::Message(format!("create workbook: {error}")))?;
    writer
        .write_header_bold(AUDIT_HEADERS)
        .map_err(|error| ResultsError::Message(format!("write workbook header: {error}")))?;
    for record in records {
        writer
            .write_row_typed(&workbook_row(record))
            .map_err(|error| ResultsError::Message(format!("write workbook row: {error}")))?;
    }
    writer
        .save()
        .map_err(|error| ResultsError::Message(format!("save workbook: {error}")))?;
    info!(path = %path.display(), rows = records.len(), "audit workbook written");
    Ok(())
}

fn workbook_row(record: &MergedRecord) -> Vec<CellValue> {
    vec![
        CellValue::String(record.matric_no.clone()),
        CellValue::String(record.name.clone()),
        CellValue::String(record.department.clone()),
        CellValue::String(record.level.clone()),
        record.score.map_or(CellValue::Empty, CellValue::Float),
        record.grade.map_or(CellValue::Empty, |grade| {
            CellValue::String(grade.to_string())
        }),
        record
            .remark
            .clone()
            .map_or(CellValue::Empty, CellValue::String),
        CellValue::String(record.status.label().to_string()),
        record.uploaded_at.map_or(CellValue::Empty, |at| {
            CellValue::String(at.format("%Y-%m-%d %H:%M:%S").to_string())
        }),
    ]
}
