//! Weighted Checklist Scoring
//!
//! Turns a sparse set of pass/fail judgments into category scores,
//! an overall score and a qualitative rating. Every function here is
//! pure: the wizard recomputes everything from scratch after each answer.
//!
//! # Scoring Formula
//!
//! ```text
//! Category = round(100 × Σ earned_w / Σ total_w)     over answered checks
//!   total_w  = importance multiplier (critical 4, high 3, medium 2, low 1)
//!   earned_w = total_w if the check passed, else 0
//!
//! Overall  = round(Σ (weight × category) / Σ weight)  over scored categories
//! ```
//!
//! Unanswered checks are left out of both sums, and so are categories
//! without a score. "No score" is `None`, never `0`: a category that has
//! not been started is different from one that scored 0%.
//!
//! Rounding is `f64::round`, i.e. ties go away from zero (37.5 → 38).
//!
//! # Rating
//!
//! | Score   | Label             | Role    |
//! |---------|-------------------|---------|
//! | 80–100  | Excellent         | success |
//! | 60–79   | Good              | success |
//! | 40–59   | Needs Improvement | warning |
//! | 0–39    | Poor              | error   |

mod breakdown;
mod engine;
mod rating;

pub use breakdown::{CategoryBreakdown, ScoreBreakdown};
pub use engine::{category_score, overall_score, Score, Tally};
pub use rating::{rating_for, Rating, RatingLevel};
