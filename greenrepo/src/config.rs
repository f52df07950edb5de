// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Configuration document for the collector and the scoring pipeline.
//!
//! The YAML document mirrors the structure below. Every field is optional and
//! falls back to a documented default, so an empty document is valid.
//!
//! ```yaml
//! host:
//!   api_base: https://api.github.com
//!   manifest_limit: 5
//!   fetch_timeout_secs: 10
//!   retry:
//!     max_attempts: 1
//!     initial_delay_ms: 500
//!     backoff_factor: 2.0
//! scoring:
//!   unknown_language_penalty: 10
//! ```
//!
//! The bearer credential is not part of the document. The binary reads it from
//! the process environment and hands it to the host client constructor.

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    error::{self, Error},
    retry::RetryConfig
};

/// Default REST API base URI.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Maximum number of manifests fetched per analysis.
pub const DEFAULT_MANIFEST_LIMIT: usize = 5;
/// Per-manifest fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
/// Penalty applied to languages missing from the tier table.
pub const DEFAULT_UNKNOWN_LANGUAGE_PENALTY: f64 = 10.0;

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GreenRepoConfig {
    /// Remote host and collector settings.
    #[serde(default)]
    pub host:    HostConfig,
    /// Scoring pipeline settings.
    #[serde(default)]
    pub scoring: ScoringConfig
}

/// Settings consumed by the host client and the collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Base URI of the REST API.
    #[serde(default = "default_api_base")]
    pub api_base:           String,
    /// Upper bound on manifests fetched per analysis.
    #[serde(default = "default_manifest_limit")]
    pub manifest_limit:     usize,
    /// Timeout applied to each manifest fetch, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Client-layer retry policy.
    #[serde(default)]
    pub retry:              RetryConfig
}

impl HostConfig {
    /// Returns the per-manifest fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            api_base:           default_api_base(),
            manifest_limit:     DEFAULT_MANIFEST_LIMIT,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            retry:              RetryConfig::default()
        }
    }
}

/// Tunables for the scoring pipeline.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Penalty per 100% share applied to languages absent from the tier
    /// table.
    #[serde(default = "default_unknown_language_penalty")]
    pub unknown_language_penalty: f64
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            unknown_language_penalty: DEFAULT_UNKNOWN_LANGUAGE_PENALTY
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}

fn default_manifest_limit() -> usize {
    DEFAULT_MANIFEST_LIMIT
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_unknown_language_penalty() -> f64 {
    DEFAULT_UNKNOWN_LANGUAGE_PENALTY
}

/// Loads and validates configuration from a YAML file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`] when
/// the YAML is malformed and [`Error::Validation`] when a value is out of
/// range.
pub fn load_config(path: &Path) -> Result<GreenRepoConfig, Error> {
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    parse_config(&contents)
}

/// Parses and validates configuration from a YAML string.
///
/// Blank documents yield the defaults.
///
/// # Examples
///
/// ```
/// use greenrepo::parse_config;
///
/// let config = parse_config("scoring:\n  unknown_language_penalty: 12.5\n")?;
/// assert_eq!(config.scoring.unknown_language_penalty, 12.5);
/// assert_eq!(config.host.manifest_limit, 5);
/// # Ok::<(), greenrepo::Error>(())
/// ```
pub fn parse_config(contents: &str) -> Result<GreenRepoConfig, Error> {
    if contents.trim().is_empty() {
        return Ok(GreenRepoConfig::default());
    }

    let config: GreenRepoConfig = serde_yaml::from_str(contents)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &GreenRepoConfig) -> Result<(), Error> {
    let host = &config.host;
    if host.api_base.trim().is_empty() {
        return Err(Error::validation("host.api_base cannot be empty"));
    }
    if host.manifest_limit == 0 {
        return Err(Error::validation("host.manifest_limit must be at least 1"));
    }
    if host.fetch_timeout_secs == 0 {
        return Err(Error::validation(
            "host.fetch_timeout_secs must be at least 1"
        ));
    }
    if host.retry.max_attempts == 0 {
        return Err(Error::validation(
            "host.retry.max_attempts must be at least 1"
        ));
    }
    let backoff = host.retry.backoff_factor;
    if backoff.is_nan() || backoff < 1.0 {
        return Err(Error::validation(
            "host.retry.backoff_factor must be at least 1.0"
        ));
    }

    let penalty = config.scoring.unknown_language_penalty;
    if !penalty.is_finite() || !(0.0..=100.0).contains(&penalty) {
        return Err(Error::validation(
            "scoring.unknown_language_penalty must be between 0 and 100"
        ));
    }

    Ok(())
}
