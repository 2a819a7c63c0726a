//! Analyze command - best-effort metadata sniffing for a single page

use super::setup;
use crate::analyzer::{self, HttpFetcher, PageAnalysis, Suggestion};
use crate::config::{AnalyzerOptions, UserConfig};
use crate::models::CheckStatus;
use anyhow::Result;
use console::style;
use indicatif::ProgressBar;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    #[serde(flatten)]
    analysis: &'a PageAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<&'a [Suggestion]>,
}

pub(super) fn run(url: &str, format: &str, suggest: bool) -> Result<()> {
    let json = format == "json";
    let analysis = fetch_with_spinner(url, !json)?;

    if let Some(err) = &analysis.error {
        eprintln!("{} {}", style("⚠️  Analysis incomplete:").yellow(), err);
    }

    let suggestions = suggest.then(|| analyzer::suggestions(&analysis));

    if json {
        let out = AnalyzeOutput {
            analysis: &analysis,
            suggestions: suggestions.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render_text(&analysis));
        if let Some(suggestions) = &suggestions {
            print!("{}", render_suggestions(suggestions));
        }
    }
    Ok(())
}

/// Run the analyzer with configured HTTP settings, showing a spinner on a TTY
pub(super) fn fetch_with_spinner(url: &str, show_spinner: bool) -> Result<PageAnalysis> {
    let project = setup::project_config();
    let user = UserConfig::load()?;
    let options = AnalyzerOptions::resolve(&project, &user);
    let fetcher = HttpFetcher::new(options.user_agent, options.timeout);

    let spinner = if show_spinner {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(setup::create_spinner_style());
        spinner.set_message(format!("Fetching {}...", url));
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    } else {
        None
    };

    let analysis = analyzer::analyze(&fetcher, url);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    Ok(analysis)
}

fn yes_no(value: bool) -> String {
    if value {
        style("yes").green().to_string()
    } else {
        style("no").red().to_string()
    }
}

fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => style("(missing)").dim().to_string(),
    }
}

fn render_text(a: &PageAnalysis) -> String {
    let mut out = format!("\n{} {}\n\n", style("🔎").bold(), style(&a.url).cyan().bold());

    let status = a
        .status_code
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!("  HTTP status:      {}\n", status));
    out.push_str(&format!("  HTTPS:            {}\n", yes_no(a.https)));
    out.push_str(&format!(
        "  Title:            {}{}\n",
        or_missing(a.title.as_deref()),
        a.title_length
            .map(|n| style(format!(" ({} chars)", n)).dim().to_string())
            .unwrap_or_default()
    ));
    out.push_str(&format!(
        "  Meta description: {}\n",
        or_missing(a.meta_description.as_deref())
    ));
    out.push_str(&format!("  Canonical:        {}\n", or_missing(a.canonical.as_deref())));
    out.push_str(&format!("  Meta robots:      {}\n", or_missing(a.robots_meta.as_deref())));
    out.push_str(&format!("  Language:         {}\n", or_missing(a.lang.as_deref())));
    out.push_str(&format!("  Viewport:         {}\n", yes_no(a.has_viewport)));
    out.push_str(&format!(
        "  H1:               {}\n",
        if a.h1.is_empty() {
            style("(none)").dim().to_string()
        } else {
            a.h1.join(" | ")
        }
    ));
    out.push_str(&format!(
        "  Images:           {} total, {} missing alt\n",
        a.images_total, a.images_missing_alt
    ));

    if !a.schema_types.is_empty() {
        out.push_str(&format!("  Schema types:     {}\n", a.schema_types.join(", ")));
    }
    for (key, value) in a.open_graph.iter().chain(a.twitter.iter()) {
        out.push_str(&format!("  {:<17} {}\n", format!("{}:", key), value));
    }
    for link in &a.social_links {
        out.push_str(&format!("  {:<17} {}\n", format!("{}:", link.network), link.url));
    }

    match &a.robots_txt {
        Some(robots) if robots.found => {
            out.push_str(&format!(
                "  robots.txt:       found{}\n",
                if robots.disallow_all {
                    style(", blocks all crawlers").red().to_string()
                } else {
                    String::new()
                }
            ));
            for sitemap in &robots.sitemaps {
                out.push_str(&format!("  Sitemap:          {}\n", sitemap));
            }
        }
        Some(_) => out.push_str(&format!("  robots.txt:       {}\n", style("not found").red())),
        None => out.push_str(&format!("  robots.txt:       {}\n", style("unreachable").dim())),
    }

    out.push_str(&format!(
        "\n{}\n",
        style("Heuristic results: confirm before recording them in an audit.").dim()
    ));
    out
}

fn render_suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return format!("\n{}\n", style("No suggestions (page could not be analyzed).").dim());
    }
    let mut out = format!("\n{}\n", style("Suggested statuses").bold());
    for s in suggestions {
        let status = match s.status {
            CheckStatus::Pass => style("pass").green().to_string(),
            CheckStatus::Fail => style("fail").red().to_string(),
            CheckStatus::Unanswered => style("skip").dim().to_string(),
        };
        out.push_str(&format!("  {:<22} {}  {}\n", s.check_id, status, style(&s.reason).dim()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_is_flat() {
        let analysis = PageAnalysis {
            url: "https://down.test".into(),
            error: Some("Request to https://down.test failed".into()),
            ..Default::default()
        };
        let out = AnalyzeOutput {
            analysis: &analysis,
            suggestions: None,
        };
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["url"], "https://down.test");
        assert!(value["error"].as_str().unwrap().contains("failed"));
        assert!(value.get("suggestions").is_none());
    }

    #[test]
    fn test_render_text_mentions_missing_fields() {
        let analysis = PageAnalysis {
            url: "https://acme.test".into(),
            status_code: Some(200),
            https: true,
            ..Default::default()
        };
        let out = render_text(&analysis);
        assert!(out.contains("https://acme.test"));
        assert!(out.contains("200"));
        assert!(out.contains("missing"));
        assert!(out.contains("unreachable"));
    }

    #[test]
    fn test_render_no_suggestions() {
        assert!(render_suggestions(&[]).contains("No suggestions"));
    }
}
