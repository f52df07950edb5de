// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository size rule.

use super::{Category, Tally};
use crate::profile::RepositoryProfile;

/// Size classification, evaluated from the largest band down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeBand {
    /// More than 500 MB.
    Massive,
    /// More than 100 MB.
    Large,
    /// Less than 5 MB.
    Micro,
    /// Anything in between.
    Regular
}

/// Lower bound of [`SizeBand::Massive`] in megabytes (exclusive).
pub const MASSIVE_MB: f64 = 500.0;
/// Lower bound of [`SizeBand::Large`] in megabytes (exclusive).
pub const LARGE_MB: f64 = 100.0;
/// Upper bound of [`SizeBand::Micro`] in megabytes (exclusive).
pub const MICRO_MB: f64 = 5.0;

impl SizeBand {
    /// Classifies a size reported in kilobytes.
    pub fn from_kilobytes(size_kb: u64) -> Self {
        let megabytes = size_kb as f64 / 1024.0;
        if megabytes > MASSIVE_MB {
            SizeBand::Massive
        } else if megabytes > LARGE_MB {
            SizeBand::Large
        } else if megabytes < MICRO_MB {
            SizeBand::Micro
        } else {
            SizeBand::Regular
        }
    }
}

pub(super) fn apply(profile: &RepositoryProfile, tally: &mut Tally) {
    match SizeBand::from_kilobytes(profile.size_kb()) {
        SizeBand::Massive => tally.deduct(
            Category::Bloat,
            20,
            "Massive repository size (>500MB): -20 pts".to_owned()
        ),
        SizeBand::Large => tally.deduct(
            Category::Bloat,
            10,
            "Large repository size (>100MB): -10 pts".to_owned()
        ),
        SizeBand::Micro => tally.award(5, "Micro-repository (<5MB): +5 pts".to_owned()),
        SizeBand::Regular => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_checked_from_the_top() {
        assert_eq!(SizeBand::from_kilobytes(600 * 1024), SizeBand::Massive);
        assert_eq!(SizeBand::from_kilobytes(500 * 1024 + 1), SizeBand::Massive);
        assert_eq!(SizeBand::from_kilobytes(500 * 1024), SizeBand::Large);
        assert_eq!(SizeBand::from_kilobytes(100 * 1024 + 1), SizeBand::Large);
        assert_eq!(SizeBand::from_kilobytes(100 * 1024), SizeBand::Regular);
        assert_eq!(SizeBand::from_kilobytes(5 * 1024), SizeBand::Regular);
        assert_eq!(SizeBand::from_kilobytes(5 * 1024 - 1), SizeBand::Micro);
        assert_eq!(SizeBand::from_kilobytes(1024), SizeBand::Micro);
        assert_eq!(SizeBand::from_kilobytes(0), SizeBand::Micro);
    }
}
