//! End-to-end import pipeline tests over temp spreadsheet files.

use std::io::Write;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use results_cli::pipeline::{parse_sheet, run_import};
use results_model::{AuthoritativeResult, Grade, ResultsError, RosterEntry, ValidationIssue};
use results_staging::StagingStore;

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create csv");
    file.write_all(content.as_bytes()).expect("write csv");
    path
}

fn roster() -> Vec<RosterEntry> {
    ["CSC/001", "CSC/002", "CSC/003"]
        .iter()
        .enumerate()
        .map(|(index, matric_no)| RosterEntry {
            student_id: format!("stu-{index}"),
            matric_no: (*matric_no).to_string(),
            name: format!("Student {index}"),
            department: "Computer Science".to_string(),
            level: "300".to_string(),
        })
        .collect()
}

fn committed(matric_no: &str, score: f64) -> AuthoritativeResult {
    AuthoritativeResult {
        student_id: "stu-0".to_string(),
        matric_no: matric_no.to_string(),
        score,
        grade: Grade::from_score(score),
        remark: None,
        uploaded_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    }
}

#[test]
fn clean_import_stages_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_csv(
        &dir,
        "results.csv",
        "Name,Matric,Score\nJane,CSC/001,72\nJohn,CSC/002,45\n",
    );

    let mut staging = StagingStore::new();
    let report = run_import(&path, &roster(), &[], &mut staging).expect("import");

    assert_eq!(report.accepted_count(), 2);
    assert!(report.issues.is_empty());
    let first = staging.get("CSC/001").expect("staged row");
    assert_eq!(first.score, 72.0);
    assert_eq!(first.grade, Grade::A);
    assert_eq!(staging.get("CSC/002").expect("staged row").grade, Grade::D);
}

#[test]
fn component_scores_are_summed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_csv(
        &dir,
        "components.csv",
        "Matric,Q1,Q2,Q3,Q4,Q5,Total\nCSC/001,10,10,10,0,0,\n",
    );

    let mut staging = StagingStore::new();
    run_import(&path, &roster(), &[], &mut staging).expect("import");
    let row = staging.get("CSC/001").expect("staged row");
    assert_eq!(row.score, 30.0);
    assert_eq!(row.grade, Grade::F);
}

#[test]
fn unknown_student_is_reported_not_staged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_csv(&dir, "results.csv", "Matric,Score\nCSC/999,60\n");

    let mut staging = StagingStore::new();
    let report = run_import(&path, &roster(), &[], &mut staging).expect("import");

    assert!(staging.is_empty());
    assert_eq!(
        report.issues.not_found,
        vec![ValidationIssue::StudentNotFound {
            matric_no: "CSC/999".to_string(),
            row: 2,
        }]
    );
}

#[test]
fn overwrite_is_staged_with_annotation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_csv(&dir, "results.csv", "Matric,Score\nCSC/001,80\n");

    let mut staging = StagingStore::new();
    let report = run_import(
        &path,
        &roster(),
        &[committed("CSC/001", 55.0)],
        &mut staging,
    )
    .expect("import");

    let row = staging.get("CSC/001").expect("staged row");
    assert_eq!(row.score, 80.0);
    assert_eq!(row.grade, Grade::A);
    assert_eq!(row.existing_score, Some(55.0));
    assert_eq!(row.existing_grade, Some(Grade::C));
    assert_eq!(report.issues.warning_count(), 1);
    // Warnings never block staging.
    assert!(row.is_submittable());
}

#[test]
fn unrecognizable_sheet_is_fatal_with_nothing_staged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_csv(&dir, "junk.csv", "Name,Phone\nJane,080-000\n");

    let mut staging = StagingStore::new();
    staging.replace_all(Vec::new());
    let error = run_import(&path, &roster(), &[], &mut staging).unwrap_err();
    assert!(matches!(error, ResultsError::FileFormat(_)));
    assert!(staging.is_empty());
}

#[test]
fn header_only_sheet_has_no_valid_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_csv(&dir, "empty.csv", "Matric,Score\n");

    let mut staging = StagingStore::new();
    let error = run_import(&path, &roster(), &[], &mut staging).unwrap_err();
    assert!(matches!(error, ResultsError::NoValidData));
}

#[test]
fn reimport_replaces_previous_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = write_csv(&dir, "first.csv", "Matric,Score\nCSC/001,72\nCSC/002,45\n");
    let second = write_csv(&dir, "second.csv", "Matric,Score\nCSC/003,66\n");

    let mut staging = StagingStore::new();
    run_import(&first, &roster(), &[], &mut staging).expect("first import");
    assert_eq!(staging.len(), 2);

    run_import(&second, &roster(), &[], &mut staging).expect("second import");
    assert_eq!(staging.len(), 1);
    assert!(staging.get("CSC/001").is_none());
    assert!(staging.get("CSC/003").is_some());
}

#[test]
fn fatal_import_leaves_previous_staging_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = write_csv(&dir, "good.csv", "Matric,Score\nCSC/001,72\n");
    let bad = write_csv(&dir, "bad.csv", "Name,Phone\nJane,080\n");

    let mut staging = StagingStore::new();
    run_import(&good, &roster(), &[], &mut staging).expect("import");
    run_import(&bad, &roster(), &[], &mut staging).unwrap_err();
    assert_eq!(staging.len(), 1);
}

#[test]
fn parse_sheet_reports_title_rows_before_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_csv(
        &dir,
        "titled.csv",
        "Faculty of Science,,\n,,\nMatric,Name,Score\nCSC/001,Jane,\n",
    );

    let outcomes = parse_sheet(&path).expect("parse");
    // Row numbers are sheet positions: header is row 3, data starts at 4.
    assert_eq!(outcomes.len(), 1);
    match &outcomes[0] {
        results_ingest::ExtractOutcome::InvalidScore { row, .. } => assert_eq!(*row, 4),
        other => panic!("expected invalid score, got {other:?}"),
    }
}
