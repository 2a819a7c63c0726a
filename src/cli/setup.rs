//! Shared command setup: config, checklist and output resolution

use crate::answers::Answers;
use crate::checklist::{Checklist, Variant};
use crate::config::{load_project_config, ProjectConfig};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use indicatif::ProgressStyle;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Project config from the working directory
pub(super) fn project_config() -> ProjectConfig {
    match std::env::current_dir() {
        Ok(dir) => load_project_config(&dir),
        Err(e) => {
            warn!("Cannot read working directory, using default config: {}", e);
            ProjectConfig::default()
        }
    }
}

/// Which checklist to score against, most specific source first:
/// `--checklist`, the answers file, the project config, then the built-in
/// catalogue for the resolved variant. Project weight overrides apply last.
pub(super) fn resolve_checklist(
    flag: Option<&Path>,
    answers: Option<(&Answers, &Path)>,
    variant: Variant,
    project: &ProjectConfig,
) -> Result<Checklist> {
    let from_answers = answers.and_then(|(a, answers_path)| {
        a.checklist.as_ref().map(|p| relative_to_file(p, answers_path))
    });

    let path = flag
        .map(Path::to_path_buf)
        .or(from_answers)
        .or_else(|| project.defaults.checklist.clone());

    let mut checklist = match path {
        Some(path) => Checklist::load(&path)
            .with_context(|| format!("Failed to load checklist {}", path.display()))?,
        None => Checklist::builtin(variant),
    };

    if project.has_weight_overrides() {
        checklist.apply_weight_overrides(&project.weights);
    }
    debug!(
        "Using checklist '{}' ({} categories, {} checks)",
        checklist.name,
        checklist.categories.len(),
        checklist.check_count()
    );
    Ok(checklist)
}

/// `--variant` flag, then the project default, then `general`
pub(super) fn resolve_variant(flag: Option<&str>, project: &ProjectConfig) -> Result<Variant> {
    match flag.or(project.defaults.variant.as_deref()) {
        Some(v) => Variant::from_str(v),
        None => Ok(Variant::default()),
    }
}

/// `--format` flag, then the output file extension, then the project default, then text
pub(super) fn resolve_format(
    flag: Option<&str>,
    output: Option<&Path>,
    project: &ProjectConfig,
) -> Result<OutputFormat> {
    if let Some(f) = flag {
        return OutputFormat::from_str(f);
    }
    if let Some(fmt) = output.and_then(reporters::format_for_path) {
        return Ok(fmt);
    }
    match project.defaults.format.as_deref() {
        Some(f) => OutputFormat::from_str(f),
        None => Ok(OutputFormat::Text),
    }
}

fn relative_to_file(path: &Path, file: &Path) -> PathBuf {
    if path.is_relative() {
        file.parent()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

/// Warn about answers that the checklist does not know
pub(super) fn warn_unknown_answers(answers: &Answers, checklist: &Checklist) {
    let unknown: Vec<&str> = answers
        .statuses
        .iter()
        .map(|(id, _)| id)
        .filter(|id| checklist.find_check(id).is_none())
        .collect();
    if !unknown.is_empty() {
        warn!(
            "{} answer(s) refer to checks not in '{}' and are ignored: {}",
            unknown.len(),
            checklist.name,
            unknown.join(", ")
        );
    }
}

/// Print to stdout, or write to a file and say so on stderr
pub(super) fn emit(output: &str, path: Option<&Path>, format: OutputFormat) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "\n{}Report written to: {}",
                style("📄 ").bold(),
                style(path.display()).cyan()
            );
        }
        None => {
            // Keep stdout clean for machine-readable formats
            if matches!(format, OutputFormat::Text | OutputFormat::Markdown) {
                println!();
            }
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// Create spinner progress style
pub(super) fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .expect("valid template")
}
