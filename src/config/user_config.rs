//! User-level configuration for seoscore
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/seoscore/config.toml

use super::project_config::AnalyzerSettings;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub const ENV_USER_AGENT: &str = "SEOSCORE_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "SEOSCORE_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub analyzer: AnalyzerSettings,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/seoscore/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(user_config) = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|content| match toml::from_str::<UserConfig>(&content) {
                Ok(c) => Some(c),
                Err(e) => {
                    warn!("Ignoring invalid user config: {}", e);
                    None
                }
            })
        {
            config.merge(user_config);
        }

        config.merge(Self::from_env(|key| std::env::var(key).ok()));
        Ok(config)
    }

    /// Settings taken from environment variables, looked up through `var`
    pub fn from_env(var: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_secs = var(ENV_TIMEOUT_SECS).and_then(|raw| match raw.trim().parse() {
            Ok(secs) => Some(secs),
            Err(_) => {
                warn!("Ignoring {}={:?}: not a whole number of seconds", ENV_TIMEOUT_SECS, raw);
                None
            }
        });
        UserConfig {
            analyzer: AnalyzerSettings {
                user_agent: var(ENV_USER_AGENT).filter(|ua| !ua.trim().is_empty()),
                timeout_secs,
            },
        }
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("seoscore").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.analyzer.user_agent.is_some() {
            self.analyzer.user_agent = other.analyzer.user_agent;
        }
        if other.analyzer.timeout_secs.is_some() {
            self.analyzer.timeout_secs = other.analyzer.timeout_secs;
        }
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# seoscore user configuration

[analyzer]
# User-Agent sent by `seoscore analyze` (env: SEOSCORE_USER_AGENT)
# user_agent = "Mozilla/5.0 (compatible; seoscore)"

# Request timeout in seconds (env: SEOSCORE_TIMEOUT_SECS)
# timeout_secs = 15
"#;
            std::fs::write(&config_path, example)?;
        }

        Ok(config_path)
    }
}
