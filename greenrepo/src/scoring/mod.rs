// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Deterministic scoring pipeline.
//!
//! [`score`] reduces a [`RepositoryProfile`] to a [`ScoreResult`]. Rules run
//! in a fixed order (language, ecosystem, assets, size, infrastructure) which
//! only affects the order of reason lines. The running total starts at 100,
//! may leave `[0, 100]` while rules fire and is clamped once at the end.

pub mod assets;
pub mod ecosystem;
pub mod grade;
pub mod infrastructure;
pub mod language;
pub mod size;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::grade::{GRADE_BANDS, Grade, GradePalette};
use crate::{config::ScoringConfig, profile::RepositoryProfile};

/// Score every repository starts with.
pub const BASE_SCORE: i64 = 100;
/// Upper bound of a finalized score.
pub const MAX_SCORE: u8 = 100;

/// Per-category deduction totals and explanations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Points lost to language composition.
    pub language_deduction: u32,
    /// Points lost to compute-heavy ecosystems.
    pub compute_deduction:  u32,
    /// Points lost to assets and repository size.
    pub bloat_deduction:    u32,
    /// Negative findings in rule order.
    pub reasons:            Vec<String>,
    /// Positive findings in rule order.
    pub positive_reasons:   Vec<String>
}

/// Final output of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Score in `[0, 100]`.
    pub score:     u8,
    /// Grade derived from `score`.
    pub grade:     Grade,
    /// Explanation of the score.
    pub breakdown: Breakdown
}

/// Deduction bucket a negative finding is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Language,
    Compute,
    Bloat
}

/// Running state shared by the rules of a single pipeline run.
#[derive(Debug)]
pub(crate) struct Tally {
    points:    i64,
    breakdown: Breakdown
}

impl Tally {
    fn new() -> Self {
        Self {
            points:    BASE_SCORE,
            breakdown: Breakdown::default()
        }
    }

    /// Subtracts `amount` and records one negative reason.
    pub(crate) fn deduct(&mut self, category: Category, amount: u32, reason: String) {
        self.points -= i64::from(amount);
        let bucket = match category {
            Category::Language => &mut self.breakdown.language_deduction,
            Category::Compute => &mut self.breakdown.compute_deduction,
            Category::Bloat => &mut self.breakdown.bloat_deduction
        };
        *bucket = bucket.saturating_add(amount);
        self.breakdown.reasons.push(reason);
    }

    /// Adds `amount` and records one positive reason.
    pub(crate) fn award(&mut self, amount: i32, reason: String) {
        self.points += i64::from(amount);
        self.breakdown.positive_reasons.push(reason);
    }

    fn finish(self) -> ScoreResult {
        let score = self.points.clamp(0, i64::from(MAX_SCORE)) as u8;
        ScoreResult {
            score,
            grade: Grade::from_score(score),
            breakdown: self.breakdown
        }
    }
}

/// Scores a profile with the default [`ScoringConfig`].
///
/// # Examples
///
/// ```
/// use greenrepo::{Grade, RepositoryProfile, score};
///
/// let profile = RepositoryProfile::builder()
///     .language("Rust", 4096)
///     .size_kb(1024)
///     .build();
/// let result = score(&profile);
/// assert_eq!(result.score, 100);
/// assert_eq!(result.grade, Grade::S);
/// ```
pub fn score(profile: &RepositoryProfile) -> ScoreResult {
    score_with(profile, &ScoringConfig::default())
}

/// Scores a profile with an explicit configuration.
pub fn score_with(profile: &RepositoryProfile, config: &ScoringConfig) -> ScoreResult {
    let mut tally = Tally::new();

    language::apply(profile, config, &mut tally);
    ecosystem::apply(profile, &mut tally);
    assets::apply(profile, &mut tally);
    size::apply(profile, &mut tally);
    infrastructure::apply(profile, &mut tally);

    debug!(raw = tally.points, "scoring rules applied");
    tally.finish()
}
