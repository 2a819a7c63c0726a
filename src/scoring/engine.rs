//! Category and overall score functions

use crate::models::{Category, Check, CheckStatuses};
use tracing::debug;

/// Integer score in `0..=100`
pub type Score = u8;

/// Weighted counts over one category's checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Checks marked pass or fail
    pub answered: usize,
    pub passed: usize,
    pub unanswered: usize,
    /// Σ multiplier over passed checks
    pub earned_weight: u32,
    /// Σ multiplier over answered checks
    pub total_weight: u32,
}

impl Tally {
    pub fn from_checks(checks: &[Check], statuses: &CheckStatuses) -> Self {
        let mut tally = Tally::default();
        for check in checks {
            let status = statuses.get(&check.id);
            if !status.is_answered() {
                tally.unanswered += 1;
                continue;
            }
            let weight = check.importance.multiplier();
            tally.answered += 1;
            tally.passed += status.earned() as usize;
            tally.total_weight += weight;
            tally.earned_weight += weight * status.earned();
        }
        tally
    }

    pub fn failed(&self) -> usize {
        self.answered - self.passed
    }

    /// Category score, or `None` when nothing was answered
    pub fn score(&self) -> Option<Score> {
        if self.answered == 0 || self.total_weight == 0 {
            return None;
        }
        Some(to_score(
            100.0 * f64::from(self.earned_weight) / f64::from(self.total_weight),
        ))
    }
}

/// Importance-weighted pass rate of a category's answered checks.
///
/// Returns `None` for an empty category or one with no answered checks.
pub fn category_score(checks: &[Check], statuses: &CheckStatuses) -> Option<Score> {
    Tally::from_checks(checks, statuses).score()
}

/// Weighted mean of the category scores, renormalized over the
/// categories that currently have a score.
pub fn overall_score(categories: &[Category], statuses: &CheckStatuses) -> Option<Score> {
    weighted_overall(
        categories
            .iter()
            .map(|c| (c.weight, category_score(&c.checks, statuses))),
    )
}

/// Shared by [`overall_score`] and the breakdown so both agree exactly.
///
/// Weights are divided by the largest scored weight first, so the sums
/// stay finite for any finite weights.
pub(crate) fn weighted_overall(
    scored: impl IntoIterator<Item = (f64, Option<Score>)>,
) -> Option<Score> {
    let scored: Vec<(f64, Score)> = scored
        .into_iter()
        .filter_map(|(weight, score)| score.map(|s| (effective_weight(weight), s)))
        .collect();

    let max_weight = scored.iter().map(|(w, _)| *w).fold(0.0, f64::max);
    if max_weight <= 0.0 {
        return None;
    }

    let mut weight_total = 0.0;
    let mut weighted_sum = 0.0;
    for (weight, score) in scored {
        let weight = weight / max_weight;
        weight_total += weight;
        weighted_sum += weight * f64::from(score);
    }

    let mean = weighted_sum / weight_total;
    if !mean.is_finite() {
        debug!("Overall score is not finite ({}), treating as no score", mean);
        return None;
    }
    Some(to_score(mean))
}

/// Negative or non-finite weights count as zero
pub(crate) fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        debug!("Clamping invalid category weight {} to 0", weight);
        0.0
    }
}

fn to_score(value: f64) -> Score {
    value.round().clamp(0.0, 100.0) as Score
}
