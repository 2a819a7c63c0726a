//! Project-level configuration support
//!
//! Loads per-project configuration from `seoscore.toml` or
//! `.seoscorerc.json` in the working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # seoscore.toml
//!
//! [defaults]
//! variant = "brand"
//! format = "markdown"
//! checklist = "checklists/agency.toml"
//! fail_under = 70
//!
//! [analyzer]
//! user_agent = "Mozilla/5.0 (compatible; seoscore)"
//! timeout_secs = 10
//!
//! # Category weight overrides by category id
//! [weights]
//! technical = 30
//! social = 0
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PROJECT_CONFIG_TOML: &str = "seoscore.toml";
pub const PROJECT_CONFIG_JSON: &str = ".seoscorerc.json";

/// Project-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub defaults: CliDefaults,

    #[serde(default)]
    pub analyzer: AnalyzerSettings,

    /// Category id -> weight, applied on top of the selected checklist
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

/// Defaults for CLI flags the user did not pass
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliDefaults {
    /// Built-in checklist variant (general, brand)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Default report format (text, json, csv, markdown, html)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Custom checklist file, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<PathBuf>,

    /// Minimum overall score for `score` to exit successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_under: Option<u8>,
}

/// HTTP settings for the page analyzer
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalyzerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl AnalyzerSettings {
    /// Fill unset fields from `other`
    pub fn or(self, other: &AnalyzerSettings) -> AnalyzerSettings {
        AnalyzerSettings {
            user_agent: self.user_agent.or_else(|| other.user_agent.clone()),
            timeout_secs: self.timeout_secs.or(other.timeout_secs),
        }
    }
}

/// First config file present in `dir`, TOML preferred
pub fn find_project_config(dir: &Path) -> Option<PathBuf> {
    [PROJECT_CONFIG_TOML, PROJECT_CONFIG_JSON]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `seoscore.toml`
/// 2. `.seoscorerc.json`
///
/// A file that fails to parse is logged and skipped. Returns defaults if
/// nothing usable is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(PROJECT_CONFIG_TOML);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config.relative_to(dir);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(PROJECT_CONFIG_JSON);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config.relative_to(dir);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found in {}, using defaults", dir.display());
    ProjectConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

impl ProjectConfig {
    /// Resolve a relative checklist path against the config directory
    fn relative_to(mut self, dir: &Path) -> Self {
        if let Some(checklist) = self.defaults.checklist.take() {
            self.defaults.checklist = Some(if checklist.is_relative() {
                dir.join(checklist)
            } else {
                checklist
            });
        }
        self
    }

    pub fn has_weight_overrides(&self) -> bool {
        !self.weights.is_empty()
    }
}

/// Example written by `seoscore init`
pub const EXAMPLE_PROJECT_CONFIG: &str = r#"# seoscore project configuration

[defaults]
# Built-in checklist: "general" or "brand"
variant = "general"

# Report format: text, json, csv, markdown, html
format = "text"

# Custom checklist TOML (relative to this file)
# checklist = "checklist.toml"

# `seoscore score` exits non-zero below this overall score
# fail_under = 60

[analyzer]
# user_agent = "Mozilla/5.0 (compatible; seoscore)"
# timeout_secs = 15

# Category weight overrides by category id
[weights]
# technical = 30
# social = 0
"#;

#[cfg(test)]
mod tests;
