//! Configuration module for seoscore
//!
//! This module handles:
//! - Project-level configuration (seoscore.toml)
//! - User-level configuration (~/.config/seoscore/config.toml)
//! - Analyzer HTTP settings resolution

mod project_config;
mod user_config;

pub use project_config::{
    find_project_config, load_project_config, AnalyzerSettings, CliDefaults, ProjectConfig,
    EXAMPLE_PROJECT_CONFIG, PROJECT_CONFIG_JSON, PROJECT_CONFIG_TOML,
};
pub use user_config::{UserConfig, ENV_TIMEOUT_SECS, ENV_USER_AGENT};

use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; seoscore/",
    env!("CARGO_PKG_VERSION"),
    ")"
);
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Fully resolved analyzer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl AnalyzerOptions {
    /// Environment and user file (already merged in `user`) win over the
    /// project file, which wins over built-in defaults.
    pub fn resolve(project: &ProjectConfig, user: &UserConfig) -> Self {
        let settings = user.analyzer.clone().or(&project.analyzer);
        AnalyzerOptions {
            user_agent: settings
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: Duration::from_secs(
                settings
                    .timeout_secs
                    .filter(|s| *s > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }
}
