// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Infrastructure signal rule: CI automation and serverless deployment
//! configuration each earn one bonus when any matching path exists.

use super::Tally;
use crate::profile::RepositoryProfile;

/// How a path is matched against a signal pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatch {
    /// Path starts with the pattern.
    Prefix(&'static str),
    /// Path contains the pattern anywhere.
    Contains(&'static str),
    /// Path ends with the pattern.
    Suffix(&'static str)
}

impl PathMatch {
    /// Tests a repository-relative path.
    pub fn matches(self, path: &str) -> bool {
        match self {
            PathMatch::Prefix(pattern) => path.starts_with(pattern),
            PathMatch::Contains(pattern) => path.contains(pattern),
            PathMatch::Suffix(pattern) => path.ends_with(pattern)
        }
    }
}

/// Recognized CI configuration locations.
pub const CI_PATTERNS: &[PathMatch] = &[
    PathMatch::Prefix(".github/workflows/"),
    PathMatch::Contains(".gitlab-ci.yml"),
    PathMatch::Contains("circle.yml"),
    PathMatch::Contains(".circleci/config.yml"),
    PathMatch::Contains(".travis.yml"),
    PathMatch::Contains("azure-pipelines.yml"),
    PathMatch::Suffix("Jenkinsfile")
];

/// Recognized serverless and cloud-native deployment configs.
pub const SERVERLESS_PATTERNS: &[PathMatch] = &[
    PathMatch::Suffix("vercel.json"),
    PathMatch::Suffix("netlify.toml"),
    PathMatch::Suffix("serverless.yml"),
    PathMatch::Suffix("serverless.yaml"),
    PathMatch::Suffix("wrangler.toml")
];

/// Bonus for each detected category.
pub const SIGNAL_BONUS: i32 = 5;

/// Whether any path matches any pattern.
pub fn detect(paths: &[String], patterns: &[PathMatch]) -> bool {
    paths
        .iter()
        .any(|path| patterns.iter().any(|pattern| pattern.matches(path)))
}

pub(super) fn apply(profile: &RepositoryProfile, tally: &mut Tally) {
    if detect(profile.file_paths(), CI_PATTERNS) {
        tally.award(
            SIGNAL_BONUS,
            format!("CI/CD Automation detected: +{SIGNAL_BONUS} pts")
        );
    }

    if detect(profile.file_paths(), SERVERLESS_PATTERNS) {
        tally.award(
            SIGNAL_BONUS,
            format!("Serverless/Cloud-Native config detected: +{SIGNAL_BONUS} pts")
        );
    }
}
