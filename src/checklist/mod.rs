//! Check registry
//!
//! The catalogue of categories and checks an audit is scored against.
//! Two built-in variants ship with the binary:
//!
//! - `general` - technical, on-page, content, performance, mobile,
//!   structured data and social checks
//! - `brand` - everything in `general` plus brand presence checks
//!
//! A custom registry can be loaded from a TOML file with the same shape:
//!
//! ```toml
//! name = "Agency checklist"
//!
//! [[categories]]
//! id = "technical"
//! name = "Technical SEO"
//! weight = 30
//!
//! [[categories.checks]]
//! id = "https"
//! name = "Site served over HTTPS"
//! importance = "critical"
//! ```

mod catalog;

use crate::models::{Category, Check};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading or validating a registry
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read checklist {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse checklist: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate check id '{id}' (in '{first}' and '{second}')")]
    DuplicateCheck {
        id: String,
        first: String,
        second: String,
    },

    #[error("Duplicate category id '{0}'")]
    DuplicateCategory(String),

    #[error("Category '{category}' has invalid weight {weight} (must be finite and >= 0)")]
    InvalidWeight { category: String, weight: f64 },

    #[error("Checklist has no categories")]
    Empty,
}

/// Which composition of the built-in catalogue to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    General,
    Brand,
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" | "default" => Ok(Variant::General),
            "brand" => Ok(Variant::Brand),
            _ => Err(anyhow::anyhow!(
                "Unknown variant '{}'. Valid variants: general, brand",
                s
            )),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::General => write!(f, "general"),
            Variant::Brand => write!(f, "brand"),
        }
    }
}

/// An ordered collection of weighted categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default = "default_name")]
    pub name: String,
    pub categories: Vec<Category>,
}

fn default_name() -> String {
    "Custom checklist".to_string()
}

impl Checklist {
    /// Built-in catalogue for a variant
    pub fn builtin(variant: Variant) -> Self {
        match variant {
            Variant::General => Checklist {
                name: "SEO Audit Checklist".to_string(),
                categories: catalog::general(),
            },
            Variant::Brand => Checklist {
                name: "SEO Audit Checklist (Brand)".to_string(),
                categories: catalog::brand(),
            },
        }
    }

    /// Parse and validate a registry from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let checklist: Checklist = toml::from_str(content)?;
        checklist.validate()?;
        Ok(checklist)
    }

    /// Load and validate a registry file
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let checklist = Self::from_toml_str(&content)?;
        debug!(
            "Loaded checklist '{}' from {} ({} categories, {} checks)",
            checklist.name,
            path.display(),
            checklist.categories.len(),
            checklist.check_count()
        );
        Ok(checklist)
    }

    /// Check ids unique across the registry, weights finite and non-negative
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.categories.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut category_ids = HashSet::new();
        let mut check_owner: HashMap<&str, &str> = HashMap::new();

        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(RegistryError::DuplicateCategory(category.id.clone()));
            }
            if !category.weight.is_finite() || category.weight < 0.0 {
                return Err(RegistryError::InvalidWeight {
                    category: category.id.clone(),
                    weight: category.weight,
                });
            }
            for check in &category.checks {
                if let Some(first) = check_owner.insert(check.id.as_str(), category.id.as_str()) {
                    return Err(RegistryError::DuplicateCheck {
                        id: check.id.clone(),
                        first: first.to_string(),
                        second: category.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Replace category weights by id. Unknown ids and invalid weights are skipped.
    pub fn apply_weight_overrides(&mut self, overrides: &HashMap<String, f64>) {
        for (id, weight) in overrides {
            if !weight.is_finite() || *weight < 0.0 {
                warn!("Ignoring invalid weight {} for category '{}'", weight, id);
                continue;
            }
            match self.categories.iter_mut().find(|c| &c.id == id) {
                Some(category) => {
                    debug!("Weight override: {} {} -> {}", id, category.weight, weight);
                    category.weight = *weight;
                }
                None => warn!("Weight override for unknown category '{}'", id),
            }
        }
    }

    /// Every check in display order, with its category
    pub fn checks(&self) -> impl Iterator<Item = (&Category, &Check)> {
        self.categories
            .iter()
            .flat_map(|cat| cat.checks.iter().map(move |check| (cat, check)))
    }

    pub fn find_check(&self, id: &str) -> Option<(&Category, &Check)> {
        self.checks().find(|(_, check)| check.id == id)
    }

    pub fn check_count(&self) -> usize {
        self.categories.iter().map(|c| c.checks.len()).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|c| c.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Importance;

    #[test]
    fn test_builtin_variants_are_valid() {
        for variant in [Variant::General, Variant::Brand] {
            let checklist = Checklist::builtin(variant);
            checklist.validate().unwrap();
            assert!(checklist.check_count() > 20);
        }
    }

    #[test]
    fn test_brand_variant_extends_general() {
        let general = Checklist::builtin(Variant::General);
        let brand = Checklist::builtin(Variant::Brand);
        assert!(brand.check_count() > general.check_count());
        for (_, check) in general.checks() {
            assert!(
                brand.find_check(&check.id).is_some(),
                "brand variant missing {}",
                check.id
            );
        }
        assert!(brand.categories.iter().any(|c| c.id == "brand"));
        assert!(!general.categories.iter().any(|c| c.id == "brand"));
    }

    #[test]
    fn test_general_weights_sum_to_100() {
        let general = Checklist::builtin(Variant::General);
        assert!((general.total_weight() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("BRAND".parse::<Variant>().unwrap(), Variant::Brand);
        assert_eq!("general".parse::<Variant>().unwrap(), Variant::General);
        assert!("agency".parse::<Variant>().is_err());
    }

    #[test]
    fn test_parse_custom_checklist() {
        let checklist = Checklist::from_toml_str(
            r#"
name = "Tiny"

[[categories]]
id = "technical"
name = "Technical"
weight = 30

[[categories.checks]]
id = "https"
name = "HTTPS"
importance = "critical"
link = "https://example.com/https"

[[categories.checks]]
id = "sitemap"
name = "Sitemap"
importance = "medium"

[[categories]]
id = "content"
name = "Content"
weight = 0
"#,
        )
        .unwrap();

        assert_eq!(checklist.name, "Tiny");
        assert_eq!(checklist.categories.len(), 2);
        assert_eq!(checklist.check_count(), 2);
        let (cat, https) = checklist.find_check("https").unwrap();
        assert_eq!(cat.id, "technical");
        assert_eq!(https.importance, Importance::Critical);
        assert_eq!(https.link.as_deref(), Some("https://example.com/https"));
        assert_eq!(
            checklist.find_check("sitemap").unwrap().1.importance,
            Importance::Medium
        );
    }

    #[test]
    fn test_duplicate_check_ids_across_categories_rejected() {
        let err = Checklist::from_toml_str(
            r#"
[[categories]]
id = "a"
name = "A"
weight = 1
[[categories.checks]]
id = "dup"
name = "First"
importance = "low"

[[categories]]
id = "b"
name = "B"
weight = 1
[[categories.checks]]
id = "dup"
name = "Second"
importance = "low"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateCheck { ref id, .. } if id == "dup"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = Checklist::from_toml_str(
            r#"
[[categories]]
id = "a"
name = "A"
weight = -5
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidWeight { .. }));
    }

    #[test]
    fn test_unknown_importance_rejected() {
        let err = Checklist::from_toml_str(
            r#"
[[categories]]
id = "a"
name = "A"
weight = 1
[[categories.checks]]
id = "x"
name = "X"
importance = "urgent"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn test_missing_importance_rejected() {
        let err = Checklist::from_toml_str(
            r#"
[[categories]]
id = "a"
name = "A"
weight = 1
[[categories.checks]]
id = "x"
name = "X"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
        assert!(err.to_string().contains("importance"));
    }

    #[test]
    fn test_empty_checklist_rejected() {
        let err = Checklist::from_toml_str("categories = []").unwrap_err();
        assert!(matches!(err, RegistryError::Empty));
    }

    #[test]
    fn test_weight_overrides() {
        let mut checklist = Checklist::builtin(Variant::General);
        let mut overrides = HashMap::new();
        overrides.insert("technical".to_string(), 50.0);
        overrides.insert("nope".to_string(), 10.0);
        overrides.insert("content".to_string(), -1.0);
        let content_before = checklist
            .categories
            .iter()
            .find(|c| c.id == "content")
            .unwrap()
            .weight;

        checklist.apply_weight_overrides(&overrides);

        let weight = |id: &str| checklist.categories.iter().find(|c| c.id == id).unwrap().weight;
        assert_eq!(weight("technical"), 50.0);
        assert_eq!(weight("content"), content_before);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Checklist::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
