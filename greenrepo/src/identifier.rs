// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository identifiers accepted by the collector.
//!
//! Identifiers are expected to arrive already parsed by the caller. The
//! checks here only guarantee that the collector never issues a request for
//! an empty or obviously malformed `owner/name` pair.

use std::{fmt, str::FromStr};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

const SEGMENT_PATTERN: &str = r"^[A-Za-z0-9_.-]+$";

/// Owner and repository name pair identifying one hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    /// Account or organization owning the repository.
    pub owner: String,
    /// Repository name.
    pub name:  String
}

impl RepositoryId {
    /// Validates and constructs an identifier.
    ///
    /// Surrounding whitespace is trimmed from both segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] when either segment is empty, contains
    /// characters outside `[A-Za-z0-9_.-]` or consists of dots only.
    ///
    /// # Examples
    ///
    /// ```
    /// use greenrepo::RepositoryId;
    ///
    /// let id = RepositoryId::new(" octocat ", "hello-world")?;
    /// assert_eq!(id.to_string(), "octocat/hello-world");
    /// # Ok::<(), greenrepo::Error>(())
    /// ```
    pub fn new(owner: &str, name: &str) -> Result<Self, Error> {
        let pattern = Regex::new(SEGMENT_PATTERN)
            .map_err(|e| Error::input(format!("invalid identifier pattern: {e}")))?;

        let owner = normalize_segment(&pattern, "owner", owner)?;
        let name = normalize_segment(&pattern, "repository name", name)?;

        Ok(Self {
            owner,
            name
        })
    }

    /// Re-checks an identifier that may have been constructed directly.
    pub(crate) fn ensure_valid(&self) -> Result<(), Error> {
        Self::new(&self.owner, &self.name).map(|_| ())
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = Error;

    /// Parses the `owner/name` shorthand.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) => Self::new(owner, name),
            _ => Err(Error::input(format!(
                "expected <owner>/<repository>, got '{value}'"
            )))
        }
    }
}

fn normalize_segment(pattern: &Regex, label: &str, raw: &str) -> Result<String, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::input(format!("{label} cannot be empty")));
    }
    if !pattern.is_match(trimmed) {
        return Err(Error::input(format!(
            "{label} '{trimmed}' contains unsupported characters"
        )));
    }
    if trimmed.chars().all(|c| c == '.') {
        return Err(Error::input(format!("{label} '{trimmed}' is not a valid name")));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::RepositoryId;
    use crate::Error;

    #[test]
    fn trims_segments() {
        let id = RepositoryId::new("  rust-lang ", " rust").expect("valid identifier");
        assert_eq!(id.owner, "rust-lang");
        assert_eq!(id.name, "rust");
    }

    #[test]
    fn rejects_empty_owner() {
        let error = RepositoryId::new("  ", "repo").expect_err("expected input error");
        match error {
            Error::Input {
                message
            } => assert_eq!(message, "owner cannot be empty"),
            other => panic!("expected input error, got {other:?}")
        }
    }

    #[test]
    fn rejects_empty_name() {
        let error = RepositoryId::new("owner", "").expect_err("expected input error");
        assert!(matches!(error, Error::Input { .. }));
    }

    #[test]
    fn rejects_path_traversal_characters() {
        let error = RepositoryId::new("owner", "../etc").expect_err("expected input error");
        assert!(matches!(error, Error::Input { .. }));
    }

    #[test]
    fn rejects_dot_only_segments() {
        for (owner, name) in [("owner", ".."), ("owner", "."), ("..", "repo"), ("owner", " ... ")] {
            let error = RepositoryId::new(owner, name).expect_err("expected input error");
            assert!(matches!(error, Error::Input { .. }), "{owner}/{name}");
        }

        assert!("owner/.".parse::<RepositoryId>().is_err());
        assert!("../repo".parse::<RepositoryId>().is_err());
    }

    #[test]
    fn dot_only_error_names_the_segment() {
        match RepositoryId::new("owner", "..") {
            Err(Error::Input {
                message
            }) => assert_eq!(message, "repository name '..' is not a valid name"),
            other => panic!("expected input error, got {other:?}")
        }
    }

    #[test]
    fn dots_inside_names_remain_valid() {
        let id = RepositoryId::new("owner", ".github").expect("valid identifier");
        assert_eq!(id.name, ".github");
        assert!(RepositoryId::new("owner", "a..b").is_ok());
    }

    #[test]
    fn parses_shorthand() {
        let id: RepositoryId = "vercel/next.js".parse().expect("valid shorthand");
        assert_eq!(id.owner, "vercel");
        assert_eq!(id.name, "next.js");
        assert_eq!(id.to_string(), "vercel/next.js");
    }

    #[test]
    fn shorthand_requires_exactly_two_segments() {
        assert!("owner".parse::<RepositoryId>().is_err());
        assert!("owner/repo/extra".parse::<RepositoryId>().is_err());
        assert!("/repo".parse::<RepositoryId>().is_err());
    }

    #[test]
    fn ensure_valid_catches_hand_built_identifiers() {
        let id = RepositoryId {
            owner: String::new(),
            name:  "repo".to_owned()
        };
        assert!(id.ensure_valid().is_err());
    }
}
