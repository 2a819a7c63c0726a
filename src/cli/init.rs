//! Init command - write an example project config

use crate::config::{EXAMPLE_PROJECT_CONFIG, PROJECT_CONFIG_TOML};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command in `dir`
pub fn run(dir: &Path, force: bool) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(PROJECT_CONFIG_TOML);
    if config_path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_PROJECT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\n{}", style("Next steps:").bold());
    println!("  1. Edit {} to set defaults and weights", PROJECT_CONFIG_TOML);
    println!("  2. Run {}", style("seoscore audit --save audit.toml").yellow());
    println!("  3. Run {}", style("seoscore score audit.toml --format html -o report.html").yellow());

    Ok(())
}
