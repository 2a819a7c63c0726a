//! Qualitative rating for a score

use super::Score;
use serde::Serialize;

/// Rating buckets, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingLevel {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl RatingLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RatingLevel::Excellent => "Excellent",
            RatingLevel::Good => "Good",
            RatingLevel::NeedsImprovement => "Needs Improvement",
            RatingLevel::Poor => "Poor",
        }
    }

    /// Semantic foreground role. Excellent and Good share `success`.
    pub fn color_role(&self) -> &'static str {
        match self {
            RatingLevel::Excellent | RatingLevel::Good => "success",
            RatingLevel::NeedsImprovement => "warning",
            RatingLevel::Poor => "error",
        }
    }

    /// Semantic background role paired with [`Self::color_role`]
    pub fn background_role(&self) -> &'static str {
        match self {
            RatingLevel::Excellent | RatingLevel::Good => "success-muted",
            RatingLevel::NeedsImprovement => "warning-muted",
            RatingLevel::Poor => "error-muted",
        }
    }
}

/// Label plus opaque presentation roles for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub level: RatingLevel,
    pub label: &'static str,
    pub color_role: &'static str,
    pub background_role: &'static str,
}

impl From<RatingLevel> for Rating {
    fn from(level: RatingLevel) -> Self {
        Rating {
            level,
            label: level.label(),
            color_role: level.color_role(),
            background_role: level.background_role(),
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

/// Classify a score. Inclusive lower bounds: 80, 60, 40.
pub fn rating_for(score: Score) -> Rating {
    let level = match score {
        s if s >= 80 => RatingLevel::Excellent,
        s if s >= 60 => RatingLevel::Good,
        s if s >= 40 => RatingLevel::NeedsImprovement,
        _ => RatingLevel::Poor,
    };
    level.into()
}
