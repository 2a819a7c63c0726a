//! HTML reporter with embedded styles
//!
//! Generates a standalone HTML report that can be viewed in any browser
//! and printed to PDF. Includes:
//! - Overall score and rating badge
//! - Category score bars
//! - Every check with status, importance, notes and reference link
//! - Print stylesheet that keeps check rows together

use crate::models::{AuditReport, CategoryReport, CheckReport, CheckStatus, Importance};
use crate::scoring::Rating;
use anyhow::Result;
use chrono::Local;

/// Render report as standalone HTML
pub fn render(report: &AuditReport) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head(report));

    html.push_str("<body>\n<div class=\"container\">\n");

    html.push_str(&render_header(report));

    html.push_str("<div class=\"content\">\n");

    html.push_str(&render_score_section(report));

    html.push_str(&render_category_scores(report));

    for category in &report.categories {
        html.push_str(&render_category(category));
    }

    html.push_str("</div>\n"); // content

    html.push_str(&render_footer());

    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn render_head(report: &AuditReport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - {}</title>
    <style>
{CSS}
    </style>
</head>
"#,
        html_escape(&report.checklist),
        report
            .overall_score
            .map(|s| format!("Score {}", s))
            .unwrap_or_else(|| "Not yet scored".to_string())
    )
}

fn render_header(report: &AuditReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let site = report
        .url
        .as_ref()
        .map(|u| format!("    <p class=\"site\">{}</p>\n", html_escape(u)))
        .unwrap_or_default();
    format!(
        r#"<div class="header">
    <h1>{}</h1>
{}    <p class="timestamp">Generated {}</p>
</div>
"#,
        html_escape(&report.checklist),
        site,
        timestamp
    )
}

fn render_score_section(report: &AuditReport) -> String {
    let s = &report.summary;
    let (badge, label, class) = match (report.overall_score, report.rating) {
        (Some(score), Some(rating)) => (
            score.to_string(),
            rating.label.to_string(),
            role_class(Some(&rating)),
        ),
        _ => ("-".to_string(), "Not yet scored".to_string(), role_class(None)),
    };

    format!(
        r#"<div class="score-section">
    <div class="score-badge {}">{}</div>
    <div class="rating">{}</div>
    <div class="stats-grid">
        <div class="stat-item"><div class="stat-value">{}</div><div class="stat-label">Passed</div></div>
        <div class="stat-item"><div class="stat-value">{}</div><div class="stat-label">Failed</div></div>
        <div class="stat-item"><div class="stat-value">{}</div><div class="stat-label">Not checked</div></div>
        <div class="stat-item"><div class="stat-value">{}</div><div class="stat-label">Total</div></div>
    </div>
</div>
"#,
        class,
        badge,
        html_escape(&label),
        s.passed,
        s.failed,
        s.unanswered,
        s.total
    )
}

fn render_category_scores(report: &AuditReport) -> String {
    let mut html = String::from(
        r#"<div class="section">
    <h2 class="section-title">Category Scores</h2>
    <div class="metrics-grid">
"#,
    );

    for category in &report.categories {
        let (value, width) = match category.score {
            Some(s) => (s.to_string(), s),
            None => ("no score".to_string(), 0),
        };
        html.push_str(&format!(
            r#"        <div class="metric-card">
            <h3>{} (weight {})</h3>
            <div class="metric-value">{}</div>
            <div class="metric-bar">
                <div class="metric-bar-fill {}" style="width: {}%"></div>
            </div>
        </div>
"#,
            html_escape(&category.name),
            category.weight,
            value,
            role_class(category.rating.as_ref()),
            width
        ));
    }

    html.push_str("    </div>\n</div>\n");
    html
}

fn render_category(category: &CategoryReport) -> String {
    let mut html = format!(
        r#"<div class="section">
    <h2 class="section-title">{} <span class="count">{}/{} answered</span></h2>
"#,
        html_escape(&category.name),
        category.summary.answered(),
        category.summary.total
    );
    if !category.description.is_empty() {
        html.push_str(&format!(
            "    <p class=\"category-description\">{}</p>\n",
            html_escape(&category.description)
        ));
    }

    html.push_str("    <div class=\"checks-list\">\n");
    for check in &category.checks {
        html.push_str(&render_check(check));
    }
    html.push_str("    </div>\n</div>\n");
    html
}

fn render_check(check: &CheckReport) -> String {
    let status_class = match check.status {
        CheckStatus::Pass => "status-pass",
        CheckStatus::Fail => "status-fail",
        CheckStatus::Unanswered => "status-unanswered",
    };

    let importance_class = match check.importance {
        Importance::Critical => "importance-critical",
        Importance::High => "importance-high",
        Importance::Medium => "importance-medium",
        Importance::Low => "importance-low",
    };

    let name = match &check.link {
        Some(link) => format!(
            "<a href=\"{}\">{}</a>",
            html_escape(link),
            html_escape(&check.name)
        ),
        None => html_escape(&check.name),
    };

    let notes_html = check
        .notes
        .as_ref()
        .map(|notes| format!("<div class=\"check-notes\">{}</div>", html_escape(notes)))
        .unwrap_or_default();

    format!(
        r#"        <div class="check-row">
            <span class="status-badge {}">{}</span>
            <div class="check-body">
                <div class="check-name">{}</div>
                <div class="check-description">{}</div>
                {}
            </div>
            <span class="importance-badge {}">{}</span>
        </div>
"#,
        status_class,
        check.status.label(),
        name,
        html_escape(&check.description),
        notes_html,
        importance_class,
        check.importance.label()
    )
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by seoscore</p>
</div>
"#
    .to_string()
}

/// CSS class for a rating's color role
fn role_class(rating: Option<&Rating>) -> &'static str {
    match rating.map(|r| r.color_role) {
        Some("success") => "role-success",
        Some("warning") => "role-warning",
        Some("error") => "role-error",
        _ => "role-none",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
:root {
    --primary-color: #2563eb;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --muted-color: #64748b;
    --card-background: white;
    --border-color: #e2e8f0;
    --success: #16a34a;
    --success-muted: #dcfce7;
    --warning: #d97706;
    --warning-muted: #fef3c7;
    --error: #dc2626;
    --error-muted: #fee2e2;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #1d4ed8 0%, #0891b2 100%);
    color: white;
    padding: 2.5rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2.25rem; margin-bottom: 0.25rem; }
.header .site { font-size: 1.1rem; opacity: 0.95; }
.header .timestamp { opacity: 0.85; font-size: 0.9rem; }

.content { padding: 2rem; }

.score-section {
    text-align: center;
    padding: 2rem;
    background: #f1f5f9;
    border-radius: 8px;
    margin-bottom: 2rem;
}

.score-badge {
    display: inline-block;
    font-size: 3rem;
    font-weight: bold;
    width: 120px;
    height: 120px;
    line-height: 120px;
    border-radius: 50%;
    margin-bottom: 0.75rem;
    color: white;
}

.score-badge.role-success, .metric-bar-fill.role-success { background: var(--success); }
.score-badge.role-warning, .metric-bar-fill.role-warning { background: var(--warning); }
.score-badge.role-error, .metric-bar-fill.role-error { background: var(--error); }
.score-badge.role-none { background: #94a3b8; }

.rating { font-size: 1.4rem; color: var(--muted-color); margin-bottom: 1.5rem; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.4rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}
.section-title .count { font-size: 0.9rem; color: var(--muted-color); font-weight: normal; }
.category-description { color: var(--muted-color); margin-bottom: 1rem; }

.metrics-grid, .stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 1rem;
}

.metric-card, .stat-item {
    background: var(--card-background);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1.25rem;
}

.metric-card h3 {
    font-size: 0.8rem;
    color: var(--muted-color);
    margin-bottom: 0.5rem;
    text-transform: uppercase;
}

.metric-value, .stat-value {
    font-size: 1.75rem;
    font-weight: bold;
    margin-bottom: 0.5rem;
}

.stat-item { text-align: center; }
.stat-label { font-size: 0.875rem; color: var(--muted-color); }

.metric-bar {
    height: 8px;
    background: var(--border-color);
    border-radius: 4px;
    overflow: hidden;
}

.metric-bar-fill { height: 100%; border-radius: 4px; }

.checks-list { display: flex; flex-direction: column; gap: 0.5rem; }

.check-row {
    display: flex;
    align-items: flex-start;
    gap: 1rem;
    padding: 0.75rem 1rem;
    border: 1px solid var(--border-color);
    border-radius: 8px;
}

.check-body { flex: 1; }
.check-name { font-weight: 600; }
.check-name a { color: var(--primary-color); text-decoration: none; }
.check-description { color: var(--muted-color); font-size: 0.9rem; }
.check-notes {
    margin-top: 0.5rem;
    padding: 0.5rem 0.75rem;
    background: #f8fafc;
    border-left: 3px solid var(--primary-color);
    font-size: 0.9rem;
}

.status-badge, .importance-badge {
    padding: 0.2rem 0.7rem;
    border-radius: 6px;
    font-size: 0.8rem;
    font-weight: 600;
    white-space: nowrap;
}

.status-pass { background: var(--success-muted); color: var(--success); }
.status-fail { background: var(--error-muted); color: var(--error); }
.status-unanswered { background: #f1f5f9; color: var(--muted-color); }

.importance-critical { background: #dc2626; color: white; }
.importance-high { background: #ea580c; color: white; }
.importance-medium { background: #ca8a04; color: white; }
.importance-low { background: #2563eb; color: white; }

.footer {
    text-align: center;
    padding: 2rem;
    color: var(--muted-color);
    border-top: 1px solid var(--border-color);
}

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header { padding: 2rem 1rem; }
    .header h1 { font-size: 1.6rem; }
    .score-badge { width: 80px; height: 80px; line-height: 80px; font-size: 2rem; }
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .check-row { page-break-inside: avoid; }
    .section { page-break-inside: auto; }
}
"#;
