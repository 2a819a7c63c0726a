//! Core data models for seoscore
//!
//! These models are shared by the scoring engine, the audit wizard
//! and every reporter: checks, categories, check statuses and the
//! serializable audit report.

use crate::answers::Answers;
use crate::checklist::Checklist;
use crate::scoring::{Rating, Score, ScoreBreakdown};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Importance tier of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
    Critical,
}

impl Importance {
    /// Fixed weight multiplier used by the category score
    pub const fn multiplier(self) -> u32 {
        match self {
            Importance::Critical => 4,
            Importance::High => 3,
            Importance::Medium => 2,
            Importance::Low => 1,
        }
    }

    /// Capitalized label used in exported tables
    pub fn label(&self) -> &'static str {
        match self {
            Importance::Critical => "Critical",
            Importance::High => "High",
            Importance::Medium => "Medium",
            Importance::Low => "Low",
        }
    }

    pub fn all() -> &'static [Importance] {
        &[
            Importance::Critical,
            Importance::High,
            Importance::Medium,
            Importance::Low,
        ]
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Importance::Critical => write!(f, "critical"),
            Importance::High => write!(f, "high"),
            Importance::Medium => write!(f, "medium"),
            Importance::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Importance::Critical),
            "high" => Ok(Importance::High),
            "medium" => Ok(Importance::Medium),
            "low" => Ok(Importance::Low),
            other => Err(format!(
                "Unknown importance '{}'. Valid tiers: critical, high, medium, low",
                other
            )),
        }
    }
}

/// Judgment recorded for a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    #[default]
    Unanswered,
}

impl CheckStatus {
    pub const fn is_answered(self) -> bool {
        !matches!(self, CheckStatus::Unanswered)
    }

    /// 1 for a pass, 0 otherwise
    pub const fn earned(self) -> u32 {
        match self {
            CheckStatus::Pass => 1,
            CheckStatus::Fail | CheckStatus::Unanswered => 0,
        }
    }

    /// Human label used in exports
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "Pass",
            CheckStatus::Fail => "Fail",
            CheckStatus::Unanswered => "Not Checked",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Fail => write!(f, "fail"),
            CheckStatus::Unanswered => write!(f, "unanswered"),
        }
    }
}

impl FromStr for CheckStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pass" | "p" | "yes" | "y" => Ok(CheckStatus::Pass),
            "fail" | "f" | "no" | "n" => Ok(CheckStatus::Fail),
            "unanswered" | "skip" | "s" | "" => Ok(CheckStatus::Unanswered),
            other => Err(format!(
                "Unknown status '{}'. Valid statuses: pass, fail, unanswered",
                other
            )),
        }
    }
}

/// A single yes/no audit item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub importance: Importance,
    /// Reference documentation for the check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A weighted group of checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Relative contribution to the overall score
    pub weight: f64,
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// Check id -> status map for one audit session.
///
/// A missing key reads back as [`CheckStatus::Unanswered`], so a sparse
/// map and a fully pre-filled one score identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckStatuses(BTreeMap<String, CheckStatus>);

impl CheckStatuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with an `Unanswered` entry for every check in the categories
    pub fn for_categories(categories: &[Category]) -> Self {
        categories
            .iter()
            .flat_map(|c| c.checks.iter())
            .map(|check| (check.id.clone(), CheckStatus::Unanswered))
            .collect()
    }

    pub fn get(&self, id: &str) -> CheckStatus {
        self.0.get(id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: impl Into<String>, status: CheckStatus) {
        self.0.insert(id.into(), status);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CheckStatus)> {
        self.0.iter().map(|(id, status)| (id.as_str(), *status))
    }

    /// Number of entries holding a pass or fail
    pub fn answered_count(&self) -> usize {
        self.0.values().filter(|s| s.is_answered()).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, CheckStatus)> for CheckStatuses {
    fn from_iter<I: IntoIterator<Item = (String, CheckStatus)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Counts of statuses across a report
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusSummary {
    pub passed: usize,
    pub failed: usize,
    pub unanswered: usize,
    pub total: usize,
}

impl StatusSummary {
    pub fn from_checks(checks: &[CheckReport]) -> Self {
        let mut summary = Self::default();
        for c in checks {
            match c.status {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Fail => summary.failed += 1,
                CheckStatus::Unanswered => summary.unanswered += 1,
            }
            summary.total += 1;
        }
        summary
    }

    pub fn answered(&self) -> usize {
        self.passed + self.failed
    }
}

/// One check as it appears in a report
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub importance: Importance,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One category as it appears in a report
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub weight: f64,
    pub score: Option<Score>,
    pub rating: Option<Rating>,
    pub summary: StatusSummary,
    pub checks: Vec<CheckReport>,
}

/// Complete audit result handed to reporters
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub checklist: String,
    pub variant: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub overall_score: Option<Score>,
    pub rating: Option<Rating>,
    pub summary: StatusSummary,
    pub categories: Vec<CategoryReport>,
}

impl AuditReport {
    /// Score the answers against the checklist and assemble the report
    pub fn build(checklist: &Checklist, answers: &Answers) -> Self {
        let breakdown = ScoreBreakdown::calculate(&checklist.categories, &answers.statuses);

        let categories: Vec<CategoryReport> = checklist
            .categories
            .iter()
            .zip(&breakdown.categories)
            .map(|(category, scored)| {
                let checks: Vec<CheckReport> = category
                    .checks
                    .iter()
                    .map(|check| CheckReport {
                        id: check.id.clone(),
                        name: check.name.clone(),
                        description: check.description.clone(),
                        importance: check.importance,
                        status: answers.statuses.get(&check.id),
                        notes: answers.note(&check.id).map(str::to_string),
                        link: check.link.clone(),
                    })
                    .collect();
                CategoryReport {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    description: category.description.clone(),
                    weight: category.weight,
                    score: scored.score,
                    rating: scored.rating,
                    summary: StatusSummary::from_checks(&checks),
                    checks,
                }
            })
            .collect();

        let all_checks: Vec<CheckReport> = categories
            .iter()
            .flat_map(|c| c.checks.iter().cloned())
            .collect();

        AuditReport {
            checklist: checklist.name.clone(),
            variant: answers.variant.to_string(),
            url: answers.url.clone(),
            overall_score: breakdown.overall_score,
            rating: breakdown.rating,
            summary: StatusSummary::from_checks(&all_checks),
            categories,
        }
    }

    /// Iterate every check together with its category
    pub fn checks(&self) -> impl Iterator<Item = (&CategoryReport, &CheckReport)> {
        self.categories
            .iter()
            .flat_map(|cat| cat.checks.iter().map(move |check| (cat, check)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_multipliers() {
        assert_eq!(Importance::Critical.multiplier(), 4);
        assert_eq!(Importance::High.multiplier(), 3);
        assert_eq!(Importance::Medium.multiplier(), 2);
        assert_eq!(Importance::Low.multiplier(), 1);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("PASS".parse::<CheckStatus>().unwrap(), CheckStatus::Pass);
        assert_eq!("n".parse::<CheckStatus>().unwrap(), CheckStatus::Fail);
        assert_eq!("".parse::<CheckStatus>().unwrap(), CheckStatus::Unanswered);
        assert!("maybe".parse::<CheckStatus>().is_err());
    }

    #[test]
    fn test_missing_status_reads_as_unanswered() {
        let mut statuses = CheckStatuses::new();
        statuses.set("https", CheckStatus::Pass);
        assert_eq!(statuses.get("https"), CheckStatus::Pass);
        assert_eq!(statuses.get("never-seen"), CheckStatus::Unanswered);
        assert_eq!(statuses.answered_count(), 1);
    }

    #[test]
    fn test_statuses_prefilled_for_categories() {
        let categories = vec![Category {
            id: "tech".into(),
            name: "Technical".into(),
            description: String::new(),
            weight: 10.0,
            checks: vec![
                Check {
                    id: "a".into(),
                    name: "A".into(),
                    description: String::new(),
                    importance: Importance::High,
                    link: None,
                },
                Check {
                    id: "b".into(),
                    name: "B".into(),
                    description: String::new(),
                    importance: Importance::Low,
                    link: None,
                },
            ],
        }];
        let statuses = CheckStatuses::for_categories(&categories);
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses.answered_count(), 0);
        assert_eq!(statuses.get("a"), CheckStatus::Unanswered);
    }

    #[test]
    fn test_statuses_deserialize_from_toml_table() {
        let statuses: CheckStatuses = toml::from_str(
            r#"
https = "pass"
title-tag = "fail"
lcp = "unanswered"
"#,
        )
        .unwrap();
        assert_eq!(statuses.get("https"), CheckStatus::Pass);
        assert_eq!(statuses.get("title-tag"), CheckStatus::Fail);
        assert_eq!(statuses.get("lcp"), CheckStatus::Unanswered);
    }

    #[test]
    fn test_status_summary_counts() {
        let check = |status| CheckReport {
            id: "x".into(),
            name: "X".into(),
            description: String::new(),
            importance: Importance::Low,
            status,
            notes: None,
            link: None,
        };
        let summary = StatusSummary::from_checks(&[
            check(CheckStatus::Pass),
            check(CheckStatus::Fail),
            check(CheckStatus::Fail),
            check(CheckStatus::Unanswered),
        ]);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.unanswered, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.answered(), 3);
    }
}
