//! Human-facing tables for import reports, staging and the merged view.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use results_ingest::format_number;
use results_model::{BulkResultRecord, IssueSeverity, MergedRecord, PendingResult, ResultStatus};
use results_validate::ImportReport;

pub fn print_import_summary(report: &ImportReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Accepted into staging")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Cell::new(report.accepted_count()),
    ]);
    table.add_row(vec![
        Cell::new("Overwrite warnings").fg(Color::Yellow),
        count_cell(report.issues.overwrites.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Student not found").fg(Color::Red),
        count_cell(report.issues.not_found.len(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Invalid score").fg(Color::Red),
        count_cell(report.issues.invalid_score.len(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Missing matric number").fg(Color::Red),
        count_cell(report.issues.missing_matric.len(), Color::Red),
    ]);
    println!("{table}");
    print_issue_table(report);
}

fn print_issue_table(report: &ImportReport) {
    let issues = report.issues.iter_sorted();
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Category"),
        header_cell("Row"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity()),
            Cell::new(issue.category()),
            match issue.row() {
                Some(row) => Cell::new(row),
                None => dim_cell("-"),
            },
            Cell::new(issue.message()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_staging_table(rows: &[PendingResult]) {
    if rows.is_empty() {
        println!("Staging is empty.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Matric No"),
        header_cell("Name"),
        header_cell("Score"),
        header_cell("Grade"),
        header_cell("Replaces"),
        header_cell("Blocked"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in rows {
        let replaces = match (row.existing_score, row.existing_grade) {
            (Some(score), Some(grade)) => {
                Cell::new(format!("{} ({grade})", format_number(score))).fg(Color::Yellow)
            }
            _ => dim_cell("-"),
        };
        let blocked = if row.is_submittable() {
            dim_cell("-")
        } else {
            Cell::new(row.validation_errors.join("; ")).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&row.matric_no),
            Cell::new(&row.student_name),
            Cell::new(format_number(row.score)),
            Cell::new(row.grade),
            replaces,
            blocked,
        ]);
    }
    println!("{table}");
}

pub fn print_merged_table(records: &[MergedRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Matric No"),
        header_cell("Name"),
        header_cell("Department"),
        header_cell("Level"),
        header_cell("Score"),
        header_cell("Grade"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.matric_no),
            Cell::new(&record.name),
            Cell::new(&record.department),
            Cell::new(&record.level),
            match record.score {
                Some(score) => Cell::new(format_number(score)),
                None => dim_cell("-"),
            },
            match record.grade {
                Some(grade) => Cell::new(grade),
                None => dim_cell("-"),
            },
            status_cell(record),
        ]);
    }
    println!("{table}");
}

pub fn print_submission_plan(records: &[BulkResultRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Matric No"),
        header_cell("Score"),
        header_cell("Grade"),
        header_cell("Remark"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.matric_no),
            Cell::new(format_number(record.score)),
            Cell::new(record.grade),
            if record.remark.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(&record.remark)
            },
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(record: &MergedRecord) -> Cell {
    match record.status {
        ResultStatus::Uploaded => Cell::new(record.status.label()).fg(Color::Green),
        ResultStatus::Pending => Cell::new(record.status.label()).fg(Color::Yellow),
        ResultStatus::None => dim_cell(record.status.label()),
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Fatal => Cell::new("FATAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
