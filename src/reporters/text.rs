//! Text (terminal) reporter with colors and formatting

use super::score_text;
use crate::models::{AuditReport, CheckStatus, Importance};
use crate::scoring::Rating;
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// ANSI color for a rating's semantic role
fn role_color(role: &str) -> &'static str {
    match role {
        "success" => "\x1b[32m", // Green
        "warning" => "\x1b[33m", // Yellow
        "error" => "\x1b[31m",   // Red
        _ => "\x1b[0m",
    }
}

fn rating_color(rating: Option<&Rating>) -> &'static str {
    rating.map_or(DIM, |r| role_color(r.color_role))
}

fn status_tag(status: CheckStatus) -> String {
    match status {
        CheckStatus::Pass => format!("\x1b[32m[✓]{RESET}"),
        CheckStatus::Fail => format!("\x1b[31m[✗]{RESET}"),
        CheckStatus::Unanswered => format!("{DIM}[ ]{RESET}"),
    }
}

fn importance_tag(importance: Importance) -> &'static str {
    match importance {
        Importance::Critical => "[C]",
        Importance::High => "[H]",
        Importance::Medium => "[M]",
        Importance::Low => "[L]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AuditReport) -> Result<String> {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{BOLD}{}{RESET}\n", report.checklist));
    if let Some(url) = &report.url {
        out.push_str(&format!("{DIM}{}{RESET}\n", url));
    }
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    let color = rating_color(report.rating.as_ref());
    match (report.overall_score, report.rating) {
        (Some(score), Some(rating)) => out.push_str(&format!(
            "Score: {color}{BOLD}{}/100{RESET}  Rating: {color}{BOLD}{}{RESET}  ",
            score, rating
        )),
        _ => out.push_str(&format!("Score: {DIM}not yet scored{RESET}  ")),
    }
    let s = &report.summary;
    out.push_str(&format!(
        "Passed: {}  Failed: {}  Not checked: {}  ({}/{} answered)\n\n",
        s.passed,
        s.failed,
        s.unanswered,
        s.answered(),
        s.total
    ));

    // Category scores (compact table)
    out.push_str(&format!("{BOLD}CATEGORIES{RESET}\n"));
    for category in &report.categories {
        let color = rating_color(category.rating.as_ref());
        let rating = category
            .rating
            .map(|r| r.label.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "  {:<32} {DIM}w{:<5}{RESET} {color}{:>9}{RESET}  {color}{}{RESET}\n",
            truncate(&category.name, 32),
            format_weight(category.weight),
            score_text(category.score),
            rating
        ));
    }
    out.push('\n');

    // Checks per category
    for category in &report.categories {
        out.push_str(&format!(
            "{BOLD}{}{RESET} {DIM}({}/{} answered){RESET}\n",
            category.name,
            category.summary.answered(),
            category.summary.total
        ));
        for check in &category.checks {
            out.push_str(&format!(
                "  {} {DIM}{}{RESET} {}\n",
                status_tag(check.status),
                importance_tag(check.importance),
                check.name
            ));
            if let Some(notes) = &check.notes {
                out.push_str(&format!("      {DIM}note: {}{RESET}\n", notes));
            }
        }
        out.push('\n');
    }

    // Tip based on what is left
    if report.summary.unanswered > 0 {
        out.push_str(&format!(
            "{DIM}{} checks not yet answered. Run `seoscore audit --resume <answers>` to continue.{RESET}\n",
            report.summary.unanswered
        ));
    } else if report.summary.failed > 0 {
        out.push_str(&format!(
            "{DIM}Fix the failed checks, starting with critical ones, to raise the score.{RESET}\n"
        ));
    }

    Ok(out)
}

fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        format!("{:.1}", weight)
    }
}

/// Truncate on char boundaries
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
