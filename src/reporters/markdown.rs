//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Client handoff documents
//! - Issue trackers and pull request comments
//! - Wikis

use super::score_text;
use crate::models::{AuditReport, CategoryReport, CheckStatus, Importance};
use crate::scoring::{Rating, RatingLevel};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AuditReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_summary(report));
    md.push('\n');

    md.push_str(&render_category_scores(report));
    md.push('\n');

    md.push_str(&render_failed_checks(report));
    md.push('\n');

    md.push_str(&render_checklist(report));
    md.push('\n');

    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &AuditReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let score = match (report.overall_score, report.rating) {
        (Some(score), Some(rating)) => format!(
            "**Rating: {} {}** | **Score: {}/100**",
            rating_emoji(Some(&rating)),
            rating,
            score
        ),
        _ => "**Not yet scored**".to_string(),
    };

    let mut header = format!("# {}\n\n{}\n\n", report.checklist, score);
    if let Some(url) = &report.url {
        header.push_str(&format!("Site: {}\n\n", url));
    }
    header.push_str(&format!("Generated: {}\n", timestamp));
    header
}

fn render_summary(report: &AuditReport) -> String {
    let s = &report.summary;
    format!(
        r#"## Summary

| Status | Checks |
|--------|--------|
| ✅ Passed | {} |
| ❌ Failed | {} |
| ⬜ Not checked | {} |
| **Total** | **{}** |
"#,
        s.passed, s.failed, s.unanswered, s.total
    )
}

fn render_category_scores(report: &AuditReport) -> String {
    let mut md = String::from(
        "## Category Scores\n\n| Category | Weight | Score | Rating |\n|----------|--------|-------|--------|\n",
    );
    for category in &report.categories {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&category.name),
            category.weight,
            score_text(category.score),
            category
                .rating
                .map(|r| format!("{} {}", rating_emoji(Some(&r)), r))
                .unwrap_or_else(|| "-".to_string())
        ));
    }
    md
}

fn render_failed_checks(report: &AuditReport) -> String {
    let mut md = String::from("## Failed Checks\n\n");

    let mut failed: Vec<_> = report
        .checks()
        .filter(|(_, check)| check.status == CheckStatus::Fail)
        .collect();

    if failed.is_empty() {
        md.push_str("✅ No failed checks.\n");
        return md;
    }

    // Most important first, checklist order within a tier
    failed.sort_by(|a, b| b.1.importance.cmp(&a.1.importance));

    for (category, check) in failed {
        md.push_str(&format!(
            "- {} **{}** ({}, {})",
            importance_emoji(check.importance),
            check.name,
            check.importance.label(),
            category.name
        ));
        if let Some(notes) = &check.notes {
            md.push_str(&format!(": {}", notes));
        }
        md.push('\n');
    }
    md
}

fn render_checklist(report: &AuditReport) -> String {
    let mut md = String::from("## Checklist\n\n");
    for category in &report.categories {
        md.push_str(&render_category(category));
    }
    md
}

fn render_category(category: &CategoryReport) -> String {
    let mut md = format!("### {}\n\n", category.name);
    if !category.description.is_empty() {
        md.push_str(&format!("{}\n\n", category.description));
    }

    for check in &category.checks {
        let mark = match check.status {
            CheckStatus::Pass => "[x]",
            CheckStatus::Fail => "[ ] ❌",
            CheckStatus::Unanswered => "[ ]",
        };
        let name = match &check.link {
            Some(link) => format!("[{}]({})", check.name, link),
            None => check.name.clone(),
        };
        md.push_str(&format!(
            "- {} {} `{}`\n",
            mark,
            name,
            check.importance.label().to_lowercase()
        ));
        if let Some(notes) = &check.notes {
            md.push_str(&format!("  > {}\n", notes));
        }
    }
    md.push('\n');
    md
}

fn render_footer() -> String {
    r#"---

*Generated by seoscore*
"#
    .to_string()
}

fn rating_emoji(rating: Option<&Rating>) -> &'static str {
    match rating.map(|r| r.level) {
        Some(RatingLevel::Excellent) => "🏆",
        Some(RatingLevel::Good) => "✅",
        Some(RatingLevel::NeedsImprovement) => "⚠️",
        Some(RatingLevel::Poor) => "❌",
        None => "❓",
    }
}

fn importance_emoji(importance: Importance) -> &'static str {
    match importance {
        Importance::Critical => "🔴",
        Importance::High => "🟠",
        Importance::Medium => "🟡",
        Importance::Low => "🔵",
    }
}

/// Pipes would split a table cell
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
