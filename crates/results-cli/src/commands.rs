//! Command implementations.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use results_cli::config::{Overrides, Settings, resolve_settings};
use results_cli::pipeline::run_import;
use results_cli::staging_file::{load_staging, save_staging};
use results_client::{CourseResultSink, ResultsApi};
use results_model::{AuthoritativeResult, RosterEntry};
use results_staging::{
    PendingPatch, StagingStore, SubmissionCoordinator, merge_view, plan_submission,
};
use tracing::info;

use crate::cli::{CommonArgs, EditArgs, ExportArgs, ImportArgs, RemoveArgs, SubmitArgs};
use crate::summary::{
    print_import_summary, print_merged_table, print_staging_table, print_submission_plan,
};

fn settings_for(common: &CommonArgs) -> Result<Settings> {
    let overrides = Overrides {
        api_url: common.api_url.clone(),
        course_id: common.course_id.clone(),
        staging_file: common.staging_file.clone(),
    };
    resolve_settings(common.config.as_deref(), &overrides)
}

struct CourseData {
    roster: Vec<RosterEntry>,
    existing: Vec<AuthoritativeResult>,
}

/// Load the two read-only inputs of an import cycle.
fn load_course_data(settings: &Settings) -> Result<CourseData> {
    let api = ResultsApi::new(&settings.api_url, settings.timeout).context("build api client")?;
    let roster = api
        .fetch_roster(&settings.course_id)
        .context("fetch roster")?;
    let existing = api
        .fetch_results(&settings.course_id)
        .context("fetch committed results")?;
    info!(
        course_id = %settings.course_id,
        roster = roster.len(),
        committed = existing.len(),
        "course data loaded"
    );
    Ok(CourseData { roster, existing })
}

pub fn run_import_command(args: &ImportArgs) -> Result<()> {
    let settings = settings_for(&args.common)?;
    let data = load_course_data(&settings)?;

    let mut staging = StagingStore::new();
    let report = run_import(&args.file, &data.roster, &data.existing, &mut staging)
        .with_context(|| format!("import {}", args.file.display()))?;
    save_staging(&settings.staging_file, &staging)?;

    print_import_summary(&report);
    println!();
    print_staging_table(staging.rows());
    println!(
        "Staged {} row(s) for course {}. Review, then run `submit`.",
        staging.len(),
        settings.course_id
    );
    Ok(())
}

pub fn run_preview(common: &CommonArgs) -> Result<()> {
    let settings = settings_for(common)?;
    let data = load_course_data(&settings)?;
    let staging = load_staging(&settings.staging_file)?;

    let view = merge_view(&data.roster, &data.existing, staging.rows());
    print_merged_table(&view);
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let settings = settings_for(&args.common)?;
    let data = load_course_data(&settings)?;
    let staging = load_staging(&settings.staging_file)?;

    let view = merge_view(&data.roster, &data.existing, staging.rows());
    results_report::write_audit(&args.output, &view)
        .with_context(|| format!("export {}", args.output.display()))?;
    println!("Audit export written: {}", args.output.display());
    Ok(())
}

pub fn run_submit(args: &SubmitArgs) -> Result<()> {
    let settings = settings_for(&args.common)?;
    let mut staging = load_staging(&settings.staging_file)?;

    if args.dry_run {
        let plan = plan_submission(&staging, &settings.course_id, Utc::now());
        if plan.is_empty() {
            println!("Nothing to submit.");
            return Ok(());
        }
        print_submission_plan(&plan);
        println!("Dry run: {} row(s) would be committed.", plan.len());
        return Ok(());
    }

    let api = ResultsApi::new(&settings.api_url, settings.timeout).context("build api client")?;
    let sink = CourseResultSink::new(&api, &settings.course_id);
    let mut coordinator = SubmissionCoordinator::new();
    let outcome = coordinator.submit(&mut staging, &settings.course_id, Utc::now(), &sink)?;
    save_staging(&settings.staging_file, &staging)?;

    println!(
        "Committed {} row(s) for course {} ({} skipped for validation errors).",
        outcome.submitted, settings.course_id, outcome.skipped
    );
    println!("Staging cleared; re-run `preview` to see the refreshed view.");
    Ok(())
}

pub fn run_edit(args: &EditArgs) -> Result<()> {
    if args.score.is_none() && args.remark.is_none() {
        bail!("nothing to change; pass --score and/or --remark");
    }
    let settings = settings_for(&args.common)?;
    let mut staging = load_staging(&settings.staging_file)?;

    let patch = PendingPatch {
        score: args.score,
        remark: args.remark.clone(),
    };
    if !staging.update(&args.matric_no, &patch) {
        bail!("{} is not in the staged batch", args.matric_no);
    }
    save_staging(&settings.staging_file, &staging)?;
    print_staging_table(staging.rows());
    Ok(())
}

pub fn run_remove(args: &RemoveArgs) -> Result<()> {
    let settings = settings_for(&args.common)?;
    let mut staging = load_staging(&settings.staging_file)?;

    if !staging.remove(&args.matric_no) {
        bail!("{} is not in the staged batch", args.matric_no);
    }
    save_staging(&settings.staging_file, &staging)?;
    println!("Removed {} from staging.", args.matric_no);
    print_staging_table(staging.rows());
    Ok(())
}

pub fn run_clear(common: &CommonArgs) -> Result<()> {
    let settings = settings_for(common)?;
    let mut staging = load_staging(&settings.staging_file)?;
    let dropped = staging.len();
    staging.clear();
    save_staging(&settings.staging_file, &staging)?;
    println!("Discarded {dropped} staged row(s).");
    Ok(())
}
