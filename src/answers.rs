//! Answers file: the statuses and notes of one audit
//!
//! Written by `audit --save`, read by `score` and `audit --resume`.
//! TOML by default; a `.json` extension selects JSON.
//!
//! ```toml
//! variant = "general"
//! url = "https://example.com"
//!
//! [statuses]
//! https = "pass"
//! title-tag = "fail"
//!
//! [notes]
//! title-tag = "Home page title is 92 characters"
//! ```

use crate::checklist::Variant;
use crate::models::CheckStatuses;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum AnswersError {
    #[error("Failed to read answers file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write answers file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid answers TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize answers: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid answers JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answers {
    #[serde(default)]
    pub variant: Variant,

    /// Site under audit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Custom registry the answers belong to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<PathBuf>,

    #[serde(default)]
    pub statuses: CheckStatuses,

    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

impl Answers {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    pub fn note(&self, id: &str) -> Option<&str> {
        self.notes
            .get(id)
            .map(String::as_str)
            .filter(|n| !n.trim().is_empty())
    }

    /// Set or clear (empty text) the note for a check
    pub fn set_note(&mut self, id: impl Into<String>, note: &str) {
        let id = id.into();
        let note = note.trim();
        if note.is_empty() {
            self.notes.remove(&id);
        } else {
            self.notes.insert(id, note.to_string());
        }
    }

    pub fn load(path: &Path) -> Result<Self, AnswersError> {
        let content = std::fs::read_to_string(path).map_err(|source| AnswersError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let answers = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        debug!("Loaded answers from {}", path.display());
        Ok(answers)
    }

    pub fn save(&self, path: &Path) -> Result<(), AnswersError> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| AnswersError::Write {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| AnswersError::Write {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Saved answers to {}", path.display());
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckStatus;

    fn sample() -> Answers {
        let mut answers = Answers::new(Variant::Brand);
        answers.url = Some("https://example.com".into());
        answers.statuses.set("https", CheckStatus::Pass);
        answers.statuses.set("title-tag", CheckStatus::Fail);
        answers.set_note("title-tag", "  Too long on the home page  ");
        answers
    }

    #[test]
    fn test_parse_minimal_toml() {
        let answers: Answers = toml::from_str(
            r#"
[statuses]
https = "pass"
"#,
        )
        .unwrap();
        assert_eq!(answers.variant, Variant::General);
        assert_eq!(answers.statuses.get("https"), CheckStatus::Pass);
        assert!(answers.notes.is_empty());
    }

    #[test]
    fn test_notes_are_trimmed_and_cleared() {
        let mut answers = sample();
        assert_eq!(answers.note("title-tag"), Some("Too long on the home page"));
        answers.set_note("title-tag", "   ");
        assert_eq!(answers.note("title-tag"), None);
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.toml");
        let answers = sample();
        answers.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("variant = \"brand\""));
        assert!(text.contains("[statuses]"));

        assert_eq!(Answers::load(&path).unwrap(), answers);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.json");
        let answers = sample();
        answers.save(&path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["statuses"]["https"], "pass");
        assert_eq!(Answers::load(&path).unwrap(), answers);
    }

    #[test]
    fn test_invalid_status_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[statuses]\nhttps = \"maybe\"\n").unwrap();
        assert!(matches!(Answers::load(&path), Err(AnswersError::Toml(_))));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = Answers::load(Path::new("/no/such/answers.toml")).unwrap_err();
        assert!(matches!(err, AnswersError::Read { .. }));
    }
}
