//! Score breakdown for transparency
//!
//! Recomputed in full from the checklist and the status map; the wizard
//! builds a fresh breakdown after every answer.

use super::engine::{effective_weight, weighted_overall, Score, Tally};
use super::rating::{rating_for, Rating};
use crate::models::{Category, CheckStatuses};
use tracing::debug;

/// Breakdown of a single category
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    pub id: String,
    pub name: String,
    /// Weight as configured (before clamping)
    pub weight: f64,
    pub tally: Tally,
    pub score: Option<Score>,
    pub rating: Option<Rating>,
    pub total_checks: usize,
}

/// Complete score breakdown across all categories
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub categories: Vec<CategoryBreakdown>,
    pub overall_score: Option<Score>,
    pub rating: Option<Rating>,
    /// Σ weight of the categories that have a score
    pub scored_weight: f64,
}

impl ScoreBreakdown {
    pub fn calculate(categories: &[Category], statuses: &CheckStatuses) -> Self {
        let categories: Vec<CategoryBreakdown> = categories
            .iter()
            .map(|category| {
                let tally = Tally::from_checks(&category.checks, statuses);
                let score = tally.score();
                CategoryBreakdown {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    weight: category.weight,
                    tally,
                    score,
                    rating: score.map(rating_for),
                    total_checks: category.checks.len(),
                }
            })
            .collect();

        let overall_score = weighted_overall(categories.iter().map(|c| (c.weight, c.score)));
        let scored_weight = categories
            .iter()
            .filter(|c| c.score.is_some())
            .map(|c| effective_weight(c.weight))
            .sum();

        debug!(
            "Score breakdown: overall={:?}, {}/{} categories scored",
            overall_score,
            categories.iter().filter(|c| c.score.is_some()).count(),
            categories.len()
        );

        ScoreBreakdown {
            overall_score,
            rating: overall_score.map(rating_for),
            scored_weight,
            categories,
        }
    }

    /// (answered, total) over every check
    pub fn progress(&self) -> (usize, usize) {
        self.categories.iter().fold((0, 0), |(answered, total), c| {
            (answered + c.tally.answered, total + c.total_checks)
        })
    }

    pub fn category(&self, id: &str) -> Option<&CategoryBreakdown> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Generate human-readable explanation of the score
    pub fn explain(&self) -> String {
        let mut lines = Vec::new();

        match (self.overall_score, self.rating) {
            (Some(score), Some(rating)) => {
                lines.push(format!("# Overall Score: {} ({})\n", score, rating.label))
            }
            _ => lines.push("# Overall Score: not yet scored\n".to_string()),
        }

        lines.push("## Scoring Formula\n".to_string());
        lines.push("```".to_string());
        lines.push("Category = round(100 × earned / total)   answered checks only".to_string());
        lines.push("           critical 4, high 3, medium 2, low 1".to_string());
        lines.push("Overall  = round(Σ weight × category / Σ weight)   scored categories only".to_string());
        lines.push("```\n".to_string());

        let (answered, total) = self.progress();
        lines.push(format!("- **Answered**: {} of {} checks", answered, total));
        lines.push(format!(
            "- **Scored weight**: {:.1} of {:.1}\n",
            self.scored_weight,
            self.categories
                .iter()
                .map(|c| effective_weight(c.weight))
                .sum::<f64>()
        ));

        for c in &self.categories {
            match c.score {
                Some(score) => {
                    lines.push(format!("## {}: {}\n", c.name, score));
                    lines.push(format!(
                        "- Earned {} of {} weighted points",
                        c.tally.earned_weight, c.tally.total_weight
                    ));
                    lines.push(format!(
                        "- {} passed, {} failed, {} unanswered",
                        c.tally.passed,
                        c.tally.failed(),
                        c.tally.unanswered
                    ));
                    lines.push(format!("- Weight: {}\n", c.weight));
                }
                None => {
                    lines.push(format!("## {}: no score\n", c.name));
                    lines.push(format!(
                        "- No answered checks; excluded from the overall (weight {})\n",
                        c.weight
                    ));
                }
            }
        }

        lines.join("\n")
    }
}
