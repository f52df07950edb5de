// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Normalization of a recursive tree listing into paths, extensions and
//! dependency manifest candidates.

use crate::host::{EntryKind, TreeEntry};

/// Filenames recognized as dependency manifests.
pub const MANIFEST_NAMES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "Gemfile",
    "composer.json",
    "mix.exs"
];

/// Deepest path (in segments) at which a manifest is still considered.
pub const MAX_MANIFEST_DEPTH: usize = 2;

/// Manifest selected for content fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestCandidate {
    /// Repository-relative path.
    pub path: String,
    /// Blob object id.
    pub sha:  String
}

/// Files and manifest candidates extracted from a tree listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeIndex {
    /// Path of every regular file, in tree order.
    pub file_paths:      Vec<String>,
    /// Lower-cased extension of every regular file that has one.
    pub file_extensions: Vec<String>,
    /// Every qualifying manifest, in tree order.
    pub manifests:       Vec<ManifestCandidate>
}

impl TreeIndex {
    /// Indexes the regular files among `entries`.
    ///
    /// # Examples
    ///
    /// ```
    /// use greenrepo::{TreeEntry, TreeIndex};
    ///
    /// let index = TreeIndex::from_entries(&[
    ///     TreeEntry::blob("package.json", "a"),
    ///     TreeEntry::blob("docs/Logo.PNG", "b"),
    ///     TreeEntry::blob("Makefile", "c"),
    /// ]);
    /// assert_eq!(index.file_extensions, vec!["json", "png"]);
    /// assert_eq!(index.manifests.len(), 1);
    /// ```
    pub fn from_entries(entries: &[TreeEntry]) -> Self {
        let mut index = Self::default();

        for entry in entries.iter().filter(|entry| entry.kind == EntryKind::Blob) {
            index.file_paths.push(entry.path.clone());

            if let Some(extension) = extension_of(&entry.path) {
                index.file_extensions.push(extension);
            }

            if is_manifest_path(&entry.path) {
                index.manifests.push(ManifestCandidate {
                    path: entry.path.clone(),
                    sha:  entry.sha.clone()
                });
            }
        }

        index
    }

    /// Returns at most `limit` manifests, in tree order.
    pub fn manifests_to_fetch(&self, limit: usize) -> &[ManifestCandidate] {
        let end = self.manifests.len().min(limit);
        &self.manifests[..end]
    }
}

/// Returns the lower-cased text after the last `.` of the file name.
///
/// Names without a dot, or ending in one, have no extension.
pub fn extension_of(path: &str) -> Option<String> {
    let name = file_name(path);
    let (_, extension) = name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension.to_lowercase())
}

/// Whether `path` is a recognized manifest no deeper than
/// [`MAX_MANIFEST_DEPTH`] segments.
pub fn is_manifest_path(path: &str) -> bool {
    let depth = path.split('/').count();
    depth <= MAX_MANIFEST_DEPTH && MANIFEST_NAMES.contains(&file_name(path))
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
