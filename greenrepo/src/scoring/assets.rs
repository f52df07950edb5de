// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Asset bloat rule.

use super::{Category, Tally};
use crate::profile::RepositoryProfile;

/// Raster image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff"];
/// Video extensions.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "wmv", "flv"];
/// Space-efficient image and vector extensions.
pub const MODERN_EXTENSIONS: &[&str] = &["webp", "avif", "svg"];

/// Image and video share above which the bloat deduction applies, in percent.
pub const ASSET_RATIO_PERCENT: usize = 15;
/// Deduction for a high asset share.
pub const ASSET_RATIO_DEDUCTION: u32 = 10;
/// Deduction when any video is tracked.
pub const VIDEO_DEDUCTION: u32 = 5;
/// Bonus for modern formats.
pub const MODERN_FORMAT_BONUS: i32 = 5;
/// Modern formats must reach this share of the raster image count, in percent.
pub const MODERN_SHARE_PERCENT: usize = 30;

/// Per-bucket counts over the extension histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetCounts {
    /// Entries in the histogram.
    pub total:  usize,
    /// Raster images.
    pub images: usize,
    /// Videos.
    pub videos: usize,
    /// Modern images.
    pub modern: usize
}

impl AssetCounts {
    /// Buckets every extension.
    pub fn from_extensions(extensions: &[String]) -> Self {
        let mut counts = Self {
            total: extensions.len(),
            ..Self::default()
        };

        for extension in extensions {
            let extension = extension.as_str();
            if IMAGE_EXTENSIONS.contains(&extension) {
                counts.images += 1;
            } else if VIDEO_EXTENSIONS.contains(&extension) {
                counts.videos += 1;
            } else if MODERN_EXTENSIONS.contains(&extension) {
                counts.modern += 1;
            }
        }

        counts
    }

    /// Whether images and videos make up strictly more than
    /// [`ASSET_RATIO_PERCENT`] of the histogram.
    pub fn exceeds_asset_ratio(&self) -> bool {
        self.total > 0 && (self.images + self.videos) * 100 > self.total * ASSET_RATIO_PERCENT
    }

    /// Whether modern formats reach [`MODERN_SHARE_PERCENT`] of raster images.
    pub fn favors_modern_formats(&self) -> bool {
        self.modern > 0 && self.modern * 100 >= self.images * MODERN_SHARE_PERCENT
    }
}

pub(super) fn apply(profile: &RepositoryProfile, tally: &mut Tally) {
    let counts = AssetCounts::from_extensions(profile.file_extensions());

    if counts.exceeds_asset_ratio() {
        tally.deduct(
            Category::Bloat,
            ASSET_RATIO_DEDUCTION,
            format!(
                "High density of non-optimized assets (>{ASSET_RATIO_PERCENT}% of files): \
                 -{ASSET_RATIO_DEDUCTION} pts"
            )
        );
    }

    if counts.videos > 0 {
        tally.deduct(
            Category::Bloat,
            VIDEO_DEDUCTION,
            format!("Video files detected in repo: -{VIDEO_DEDUCTION} pts")
        );
    }

    if counts.favors_modern_formats() {
        tally.award(
            MODERN_FORMAT_BONUS,
            format!("Modern image formats (WebP/SVG) used: +{MODERN_FORMAT_BONUS} pts")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions(pattern: &[(&str, usize)]) -> Vec<String> {
        pattern
            .iter()
            .flat_map(|(extension, count)| std::iter::repeat_n((*extension).to_owned(), *count))
            .collect()
    }

    #[test]
    fn counts_each_bucket() {
        let counts = AssetCounts::from_extensions(&extensions(&[
            ("png", 2),
            ("jpeg", 1),
            ("mov", 1),
            ("svg", 3),
            ("rs", 10)
        ]));
        assert_eq!(counts, AssetCounts {
            total:  17,
            images: 3,
            videos: 1,
            modern: 3
        });
    }

    #[test]
    fn exactly_fifteen_percent_does_not_trigger() {
        let counts = AssetCounts::from_extensions(&extensions(&[("png", 15), ("rs", 85)]));
        assert!(!counts.exceeds_asset_ratio());

        let counts = AssetCounts::from_extensions(&extensions(&[("png", 3), ("rs", 17)]));
        assert!(!counts.exceeds_asset_ratio());
    }

    #[test]
    fn just_above_fifteen_percent_triggers() {
        let counts = AssetCounts::from_extensions(&extensions(&[
            ("png", 15),
            ("mp4", 1),
            ("rs", 84)
        ]));
        assert!(counts.exceeds_asset_ratio());
    }

    #[test]
    fn empty_histogram_never_triggers() {
        let counts = AssetCounts::from_extensions(&[]);
        assert!(!counts.exceeds_asset_ratio());
        assert!(!counts.favors_modern_formats());
    }

    #[test]
    fn modern_share_boundary() {
        let counts = AssetCounts::from_extensions(&extensions(&[("png", 10), ("webp", 3)]));
        assert!(counts.favors_modern_formats());

        let counts = AssetCounts::from_extensions(&extensions(&[("png", 10), ("webp", 2)]));
        assert!(!counts.favors_modern_formats());
    }

    #[test]
    fn modern_formats_without_raster_images_earn_bonus() {
        let counts = AssetCounts::from_extensions(&extensions(&[("svg", 1), ("ts", 40)]));
        assert!(counts.favors_modern_formats());
    }
}
