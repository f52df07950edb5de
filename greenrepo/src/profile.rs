// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Normalized structural metadata of one repository.
//!
//! A [`RepositoryProfile`] is produced once per analysis by the collector (or
//! loaded from JSON for offline scoring) and only read afterwards. Fields are
//! private and exposed through accessors, so a profile cannot change after
//! construction.
//!
//! File extensions are never read from JSON. They are derived from the file
//! paths on load, so every extension belongs to a tracked path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tree::TreeIndex;

/// Everything the scoring pipeline knows about a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredProfile")]
pub struct RepositoryProfile {
    languages:        BTreeMap<String, u64>,
    dependency_texts: Vec<String>,
    #[serde(skip_serializing)]
    file_extensions:  Vec<String>,
    file_paths:       Vec<String>,
    size_kb:          u64
}

/// Serialized form of a profile, without derived fields.
#[derive(Debug, Default, Deserialize)]
struct StoredProfile {
    #[serde(default)]
    languages:        BTreeMap<String, u64>,
    #[serde(default)]
    dependency_texts: Vec<String>,
    #[serde(default)]
    file_paths:       Vec<String>,
    #[serde(default)]
    size_kb:          u64
}

impl From<StoredProfile> for RepositoryProfile {
    fn from(stored: StoredProfile) -> Self {
        let builder = RepositoryProfile::builder()
            .languages(stored.languages)
            .dependency_texts(stored.dependency_texts)
            .size_kb(stored.size_kb);

        stored
            .file_paths
            .into_iter()
            .fold(builder, |builder, path| builder.file(path))
            .build()
    }
}

impl RepositoryProfile {
    /// Starts an empty profile builder.
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    /// Language name to byte count, as reported by the host.
    pub fn languages(&self) -> &BTreeMap<String, u64> {
        &self.languages
    }

    /// Decoded contents of the manifests that were fetched successfully.
    pub fn dependency_texts(&self) -> &[String] {
        &self.dependency_texts
    }

    /// Lower-cased extension of every tracked file that has one.
    pub fn file_extensions(&self) -> &[String] {
        &self.file_extensions
    }

    /// Repository-relative path of every tracked file.
    pub fn file_paths(&self) -> &[String] {
        &self.file_paths
    }

    /// Repository size in kilobytes.
    pub fn size_kb(&self) -> u64 {
        self.size_kb
    }

    /// Sum of all language byte counts.
    pub fn total_language_bytes(&self) -> u64 {
        self.languages.values().sum()
    }
}

/// Incremental constructor for [`RepositoryProfile`].
///
/// # Examples
///
/// ```
/// use greenrepo::RepositoryProfile;
///
/// let profile = RepositoryProfile::builder()
///     .language("Rust", 9_000)
///     .language("Shell", 1_000)
///     .file("src/main.rs")
///     .size_kb(120)
///     .build();
/// assert_eq!(profile.total_language_bytes(), 10_000);
/// assert_eq!(profile.file_extensions(), ["rs"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    profile: RepositoryProfile
}

impl ProfileBuilder {
    /// Records the byte count of a language, replacing any previous value.
    pub fn language(mut self, name: impl Into<String>, bytes: u64) -> Self {
        self.profile.languages.insert(name.into(), bytes);
        self
    }

    /// Replaces the language map.
    pub fn languages(mut self, languages: BTreeMap<String, u64>) -> Self {
        self.profile.languages = languages;
        self
    }

    /// Appends one manifest text.
    pub fn dependency_text(mut self, text: impl Into<String>) -> Self {
        self.profile.dependency_texts.push(text.into());
        self
    }

    /// Replaces the manifest texts.
    pub fn dependency_texts(mut self, texts: Vec<String>) -> Self {
        self.profile.dependency_texts = texts;
        self
    }

    /// Appends one tracked file, deriving its extension.
    pub fn file(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if let Some(extension) = crate::tree::extension_of(&path) {
            self.profile.file_extensions.push(extension);
        }
        self.profile.file_paths.push(path);
        self
    }

    /// Takes file paths and extensions from a tree index.
    pub fn tree(mut self, index: TreeIndex) -> Self {
        self.profile.file_paths = index.file_paths;
        self.profile.file_extensions = index.file_extensions;
        self
    }

    /// Sets the repository size in kilobytes.
    pub fn size_kb(mut self, size_kb: u64) -> Self {
        self.profile.size_kb = size_kb;
        self
    }

    /// Finishes the profile.
    pub fn build(self) -> RepositoryProfile {
        self.profile
    }
}
