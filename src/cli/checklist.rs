//! Checklist command - list categories and checks

use super::setup;
use crate::checklist::Checklist;
use crate::models::Importance;
use anyhow::Result;
use console::style;
use std::path::Path;

pub(super) fn run(variant: Option<&str>, checklist: Option<&Path>, format: &str) -> Result<()> {
    let project = setup::project_config();
    let variant = setup::resolve_variant(variant, &project)?;
    let checklist = setup::resolve_checklist(checklist, None, variant, &project)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&checklist)?),
        _ => print!("{}", render_text(&checklist)),
    }
    Ok(())
}

fn render_text(checklist: &Checklist) -> String {
    let mut out = format!(
        "\n{} {}\n\n",
        style(&checklist.name).bold(),
        style(format!(
            "({} categories, {} checks, total weight {})",
            checklist.categories.len(),
            checklist.check_count(),
            checklist.total_weight()
        ))
        .dim()
    );

    for category in &checklist.categories {
        out.push_str(&format!(
            "{} {} {}\n",
            style(&category.name).bold(),
            style(format!("[{}]", category.id)).dim(),
            style(format!("weight {}", category.weight)).cyan()
        ));
        for check in &category.checks {
            out.push_str(&format!(
                "  {:<9} {:<28} {}\n",
                importance_styled(check.importance),
                check.id,
                check.name
            ));
        }
        out.push('\n');
    }
    out
}

fn importance_styled(importance: Importance) -> String {
    let label = importance.label();
    match importance {
        Importance::Critical => style(label).red().bold().to_string(),
        Importance::High => style(label).red().to_string(),
        Importance::Medium => style(label).yellow().to_string(),
        Importance::Low => style(label).blue().to_string(),
    }
}
