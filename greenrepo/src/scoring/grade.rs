// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Score to grade classification.
//!
//! [`GRADE_BANDS`] is the only threshold table in the crate. The badge and
//! the text report derive letter, label and colors from [`Grade::from_score`]
//! and never compare scores themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Above 90.
    S,
    /// Above 80.
    A,
    /// Above 70.
    B,
    /// Above 60.
    C,
    /// Above 50.
    D,
    /// 50 or below.
    F
}

/// Exclusive lower bound for each grade, highest first. Scores at or below
/// the last bound are [`Grade::F`].
pub const GRADE_BANDS: &[(u8, Grade)] = &[
    (90, Grade::S),
    (80, Grade::A),
    (70, Grade::B),
    (60, Grade::C),
    (50, Grade::D)
];

/// Primary and secondary color used when rendering a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradePalette {
    /// Foreground accent.
    pub primary:   &'static str,
    /// Dark background tint.
    pub secondary: &'static str
}

impl Grade {
    /// Classifies a finalized score.
    ///
    /// # Examples
    ///
    /// ```
    /// use greenrepo::Grade;
    ///
    /// assert_eq!(Grade::from_score(100), Grade::S);
    /// assert_eq!(Grade::from_score(90), Grade::A);
    /// assert_eq!(Grade::from_score(50), Grade::F);
    /// ```
    pub fn from_score(score: u8) -> Self {
        GRADE_BANDS
            .iter()
            .find(|(bound, _)| score > *bound)
            .map_or(Grade::F, |(_, grade)| *grade)
    }

    /// Single-letter representation.
    pub fn letter(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F"
        }
    }

    /// Short human label shown next to the grade.
    pub fn label(self) -> &'static str {
        match self {
            Grade::S => "Eco Native",
            Grade::A => "Efficient",
            Grade::B | Grade::C => "Standard",
            Grade::D | Grade::F => "Intensive"
        }
    }

    /// Colors for visual renderings.
    pub fn palette(self) -> GradePalette {
        match self {
            Grade::S => GradePalette {
                primary:   "#10b981",
                secondary: "#064e3b"
            },
            Grade::A => GradePalette {
                primary:   "#3b82f6",
                secondary: "#1e3a8a"
            },
            Grade::B | Grade::C => GradePalette {
                primary:   "#eab308",
                secondary: "#713f12"
            },
            Grade::D | Grade::F => GradePalette {
                primary:   "#ef4444",
                secondary: "#7f1d1d"
            }
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn band_edges_belong_to_the_lower_grade() {
        assert_eq!(Grade::from_score(91), Grade::S);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(81), Grade::A);
        assert_eq!(Grade::from_score(80), Grade::B);
        assert_eq!(Grade::from_score(71), Grade::B);
        assert_eq!(Grade::from_score(70), Grade::C);
        assert_eq!(Grade::from_score(61), Grade::C);
        assert_eq!(Grade::from_score(60), Grade::D);
        assert_eq!(Grade::from_score(51), Grade::D);
        assert_eq!(Grade::from_score(50), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn labels_and_palettes_follow_grade() {
        assert_eq!(Grade::S.label(), "Eco Native");
        assert_eq!(Grade::C.label(), "Standard");
        assert_eq!(Grade::F.label(), "Intensive");
        assert_eq!(Grade::S.palette().primary, "#10b981");
        assert_eq!(Grade::B.palette(), Grade::C.palette());
    }

    #[test]
    fn serializes_as_letter() {
        let json = serde_json::to_string(&Grade::B).expect("serializable");
        assert_eq!(json, "\"B\"");
        assert_eq!(Grade::D.to_string(), "D");
    }

    proptest! {
        #[test]
        fn grade_never_improves_as_score_drops(score in 1u8..=100) {
            prop_assert!(Grade::from_score(score) <= Grade::from_score(score - 1));
        }
    }
}
