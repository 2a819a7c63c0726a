//! Score command - non-interactive scoring of an answers file

use super::setup;
use crate::answers::Answers;
use crate::models::AuditReport;
use crate::reporters::{self, OutputFormat};
use crate::scoring::ScoreBreakdown;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub(super) struct ScoreArgs<'a> {
    pub answers: &'a Path,
    pub checklist: Option<&'a Path>,
    pub format: Option<&'a str>,
    pub output: Option<&'a Path>,
    pub explain_score: bool,
    pub fail_under: Option<u8>,
}

pub(super) fn run(args: ScoreArgs<'_>) -> Result<()> {
    let project = setup::project_config();

    let answers = Answers::load(args.answers)
        .with_context(|| format!("Cannot score {}", args.answers.display()))?;
    let checklist = setup::resolve_checklist(
        args.checklist,
        Some((&answers, args.answers)),
        answers.variant,
        &project,
    )?;
    setup::warn_unknown_answers(&answers, &checklist);

    let format = setup::resolve_format(args.format, args.output, &project)?;
    let report = AuditReport::build(&checklist, &answers);
    info!(
        "Scored {}: overall {:?} ({} of {} checks answered)",
        args.answers.display(),
        report.overall_score,
        report.summary.answered(),
        report.summary.total
    );

    let output = reporters::report_with_format(&report, format)?;
    setup::emit(&output, args.output, format)?;

    if args.explain_score {
        let explanation = ScoreBreakdown::calculate(&checklist.categories, &answers.statuses).explain();
        // stdout stays parseable for machine formats
        if matches!(format, OutputFormat::Json | OutputFormat::Csv) || args.output.is_some() {
            eprintln!("\n{}", explanation);
        } else {
            println!("\n{}", explanation);
        }
    }

    let fail_under = args.fail_under.or(project.defaults.fail_under);
    if let Some(threshold) = fail_under {
        check_fail_under(report.overall_score, threshold);
    }

    Ok(())
}

/// Exit 1 when the overall score is missing or below the threshold
fn check_fail_under(score: Option<u8>, threshold: u8) {
    if !passes_threshold(score, threshold) {
        match score {
            Some(s) => eprintln!("Failing: overall score {} is below --fail-under={}", s, threshold),
            None => eprintln!("Failing: no overall score yet (--fail-under={})", threshold),
        }
        std::process::exit(1);
    }
}

fn passes_threshold(score: Option<u8>, threshold: u8) -> bool {
    score.is_some_and(|s| s >= threshold)
}
