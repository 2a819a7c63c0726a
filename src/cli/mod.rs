//! CLI command definitions and handlers

mod analyze;
mod audit;
mod checklist;
mod init;
mod score;
mod setup;

pub use audit::{Outcome, Prompter, TermPrompter, Wizard};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse an overall score threshold (0-100)
fn parse_threshold(s: &str) -> Result<u8, String> {
    let n: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid score", s))?;
    if n > 100 {
        Err("score threshold cannot exceed 100".to_string())
    } else {
        Ok(n)
    }
}

/// seoscore - SEO checklist auditing from the terminal
#[derive(Parser, Debug)]
#[command(name = "seoscore")]
#[command(
    version,
    about = "Interactive SEO checklist auditor with weighted scoring and exportable reports",
    long_about = "seoscore walks you through an SEO checklist, records pass/fail/skip for \
every check, and scores each category by importance-weighted pass rate. The overall \
score is a weighted mean over the categories answered so far.\n\n\
Answers are plain TOML files you can save, resume, edit and score in CI.",
    after_help = "\
Examples:
  seoscore audit --save audit.toml                 Start an interactive audit
  seoscore audit --resume audit.toml --save audit.toml   Pick up where you left off
  seoscore score audit.toml --format html -o report.html   Printable report
  seoscore score audit.toml --fail-under 70        Exit 1 below 70 (CI mode)
  seoscore analyze example.com --suggest           Sniff page metadata
  seoscore checklist --variant brand               List every check"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive checklist wizard
    #[command(after_help = "\
Keys at each check:
  p/y = pass   f/n = fail   s/Enter = skip   u = clear   b = back   # = note   q = quit

Examples:
  seoscore audit                                   General checklist, report to stdout
  seoscore audit --variant brand --save brand.toml Brand checklist, keep answers
  seoscore audit --url https://example.com --apply Pre-fill from the page analyzer
  seoscore audit --resume audit.toml --save audit.toml -o report.md")]
    Audit {
        /// Built-in checklist variant
        #[arg(long, value_parser = ["general", "brand"])]
        variant: Option<String>,

        /// Custom checklist TOML file
        #[arg(long)]
        checklist: Option<PathBuf>,

        /// Answers file to continue from
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Write answers here when the wizard ends (TOML, or JSON by extension)
        #[arg(long)]
        save: Option<PathBuf>,

        /// Site to analyze for hints before the wizard starts
        #[arg(long)]
        url: Option<String>,

        /// Fill unanswered checks from the analyzer's suggestions (needs --url or a URL in the answers)
        #[arg(long)]
        apply: bool,

        /// Report format: text, json, csv, markdown (or md), html
        #[arg(long, short = 'f', value_parser = ["text", "json", "csv", "markdown", "md", "html"])]
        format: Option<String>,

        /// Report file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Score an answers file without prompting
    #[command(after_help = "\
Examples:
  seoscore score audit.toml                        Text report
  seoscore score audit.toml --format json          JSON for scripting
  seoscore score audit.toml -o audit.csv           CSV (format from extension)
  seoscore score audit.toml --explain-score        Show the arithmetic
  seoscore score audit.toml --fail-under 70        Exit 1 below 70")]
    Score {
        /// Answers file (TOML or JSON)
        answers: PathBuf,

        /// Custom checklist TOML file (overrides the one recorded in the answers)
        #[arg(long)]
        checklist: Option<PathBuf>,

        /// Report format: text, json, csv, markdown (or md), html
        #[arg(long, short = 'f', value_parser = ["text", "json", "csv", "markdown", "md", "html"])]
        format: Option<String>,

        /// Report file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Explain the scoring formula with full breakdown
        #[arg(long)]
        explain_score: bool,

        /// Exit with code 1 if the overall score is below this value (or missing)
        #[arg(long, value_parser = parse_threshold)]
        fail_under: Option<u8>,
    },

    /// List categories and checks
    Checklist {
        /// Built-in checklist variant
        #[arg(long, value_parser = ["general", "brand"])]
        variant: Option<String>,

        /// Custom checklist TOML file
        #[arg(long)]
        checklist: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Fetch a page and report SEO metadata (best effort, not authoritative)
    #[command(after_help = "\
Examples:
  seoscore analyze example.com                     https:// is assumed
  seoscore analyze https://example.com --suggest   Map findings to check statuses
  seoscore analyze https://example.com --format json")]
    Analyze {
        /// Page URL
        url: String,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Suggest statuses for matching checklist items
        #[arg(long)]
        suggest: bool,
    },

    /// Initialize a seoscore.toml config file with example settings
    Init {
        /// Overwrite an existing seoscore.toml
        #[arg(long)]
        force: bool,
    },

    /// Manage configuration (init or show)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize user config file with example settings
    Init,
    /// Show current config and paths
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Audit {
            variant,
            checklist,
            resume,
            save,
            url,
            apply,
            format,
            output,
        } => audit::run(audit::AuditArgs {
            variant: variant.as_deref(),
            checklist: checklist.as_deref(),
            resume: resume.as_deref(),
            save: save.as_deref(),
            url: url.as_deref(),
            apply,
            format: format.as_deref(),
            output: output.as_deref(),
        }),

        Commands::Score {
            answers,
            checklist,
            format,
            output,
            explain_score,
            fail_under,
        } => score::run(score::ScoreArgs {
            answers: &answers,
            checklist: checklist.as_deref(),
            format: format.as_deref(),
            output: output.as_deref(),
            explain_score,
            fail_under,
        }),

        Commands::Checklist {
            variant,
            checklist,
            format,
        } => checklist::run(variant.as_deref(), checklist.as_deref(), &format),

        Commands::Analyze {
            url,
            format,
            suggest,
        } => analyze::run(&url, &format, suggest),

        Commands::Init { force } => init::run(&std::env::current_dir()?, force),

        Commands::Config { action } => run_config_action(action),

        Commands::Version => {
            println!("seoscore {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_config_action(action: ConfigAction) -> Result<()> {
    use crate::config::UserConfig;
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!("✅ Config initialized at: {}", path.display());
            println!("\nOr set via environment:");
            println!("  export {}=\"Mozilla/5.0 (compatible; mybot)\"", crate::config::ENV_USER_AGENT);
            println!("  export {}=30", crate::config::ENV_TIMEOUT_SECS);
            Ok(())
        }
        ConfigAction::Show => show_config(),
    }
}

fn show_config() -> Result<()> {
    use crate::config::{find_project_config, AnalyzerOptions, UserConfig, PROJECT_CONFIG_TOML};

    let user = UserConfig::load()?;
    let project = setup::project_config();

    println!("📁 Config paths:");
    if let Some(user_path) = UserConfig::user_config_path() {
        let status = if user_path.exists() { "✓" } else { "(not found)" };
        println!("  User:    {} {}", user_path.display(), status);
    }
    match std::env::current_dir().ok().and_then(|d| find_project_config(&d)) {
        Some(path) => println!("  Project: {} ✓", path.display()),
        None => println!("  Project: ./{} (not found)", PROJECT_CONFIG_TOML),
    }

    println!();
    println!("⚙️  Defaults:");
    let d = &project.defaults;
    println!("  variant:    {}", d.variant.as_deref().unwrap_or("general"));
    println!("  format:     {}", d.format.as_deref().unwrap_or("text"));
    if let Some(checklist) = &d.checklist {
        println!("  checklist:  {}", checklist.display());
    }
    if let Some(threshold) = d.fail_under {
        println!("  fail_under: {}", threshold);
    }
    if project.has_weight_overrides() {
        let mut weights: Vec<_> = project.weights.iter().collect();
        weights.sort_by(|a, b| a.0.cmp(b.0));
        println!("  weights:");
        for (id, weight) in weights {
            println!("    {} = {}", id, weight);
        }
    }

    let options = AnalyzerOptions::resolve(&project, &user);
    println!();
    println!("🌐 Analyzer:");
    println!("  user_agent: {}", options.user_agent);
    println!("  timeout:    {}s", options.timeout.as_secs());
    Ok(())
}
