// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Deterministic sustainability scoring for source repositories.
//!
//! The crate collects structural metadata of a repository (language byte
//! counts, dependency manifests, the file tree and the total size) through a
//! [`RepositoryHost`], freezes it into a [`RepositoryProfile`] and reduces the
//! profile to a [`ScoreResult`]: a score in `[0, 100]`, a [`Grade`] and a
//! breakdown of every rule that fired.
//!
//! Data only flows forward: [`Collector`] → [`RepositoryProfile`] →
//! [`score`] → [`ScoreResult`] → [`render_badge_svg`]. Scoring is pure and
//! can run offline on a profile loaded from JSON.
//!
//! ```
//! use greenrepo::{RepositoryProfile, score};
//!
//! let profile = RepositoryProfile::builder()
//!     .language("TypeScript", 8_000)
//!     .dependency_text(r#"{"dependencies": {"svelte": "^4"}}"#)
//!     .file(".github/workflows/ci.yml")
//!     .size_kb(20 * 1024)
//!     .build();
//!
//! let result = score(&profile);
//! assert_eq!(result.score, 100 - 15 + 5 + 5);
//! assert_eq!(result.breakdown.language_deduction, 15);
//! ```

mod analysis;
mod badge;
mod collector;
mod config;
mod error;
mod host;
mod identifier;
mod profile;
mod retry;
pub mod scoring;
mod tree;

pub use analysis::{Analysis, analyze};
pub use badge::{BadgeAssets, DEFAULT_BADGE_SLUG, render_badge_svg, write_badge_assets};
pub use collector::{Collector, decode_blob};
pub use config::{GreenRepoConfig, HostConfig, ScoringConfig, load_config, parse_config};
pub use error::{Error, io_error};
pub use host::{
    BlobPayload, EntryKind, GithubHost, HostError, RepositoryHost, RepositoryMetadata,
    RepositoryTree, TreeEntry
};
pub use identifier::RepositoryId;
pub use profile::{ProfileBuilder, RepositoryProfile};
pub use retry::{RetryConfig, retry_with_backoff};
pub use scoring::{Breakdown, Grade, ScoreResult, score, score_with};
pub use tree::{MANIFEST_NAMES, ManifestCandidate, TreeIndex};
