// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Builds a [`RepositoryProfile`] from a [`RepositoryHost`].
//!
//! Metadata, languages and the tree are required: any failure there aborts
//! the collection with [`Error::RemoteFetch`]. Manifest fetches are isolated
//! per file. A manifest that fails, times out or cannot be decoded is logged
//! and left out of the profile.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::{
    config::HostConfig,
    error::Error,
    host::{BlobPayload, HostError, RepositoryHost},
    identifier::RepositoryId,
    profile::RepositoryProfile,
    tree::{ManifestCandidate, TreeIndex}
};

/// Collects repository profiles through a [`RepositoryHost`].
#[derive(Debug, Clone)]
pub struct Collector<H> {
    host:           H,
    manifest_limit: usize,
    fetch_timeout:  Duration
}

impl<H: RepositoryHost> Collector<H> {
    /// Creates a collector with explicit limits.
    ///
    /// A `manifest_limit` of zero is treated as one.
    pub fn new(host: H, manifest_limit: usize, fetch_timeout: Duration) -> Self {
        Self {
            host,
            manifest_limit: manifest_limit.max(1),
            fetch_timeout
        }
    }

    /// Creates a collector using the limits from `config`.
    pub fn from_config(host: H, config: &HostConfig) -> Self {
        Self::new(host, config.manifest_limit, config.fetch_timeout())
    }

    /// Returns the underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Collects the profile of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] for an invalid identifier and
    /// [`Error::RemoteFetch`] when metadata, languages or the tree cannot be
    /// fetched. Manifest failures never surface here.
    pub async fn collect(&self, id: &RepositoryId) -> Result<RepositoryProfile, Error> {
        id.ensure_valid()?;
        debug!("Collecting profile for {}", id);

        let (metadata, languages) = tokio::try_join!(
            async {
                self.host
                    .metadata(id)
                    .await
                    .map_err(|e| remote_error("repository metadata", id, e))
            },
            async {
                self.host
                    .languages(id)
                    .await
                    .map_err(|e| remote_error("languages", id, e))
            }
        )?;

        let tree = self
            .host
            .tree(id, &metadata.default_branch)
            .await
            .map_err(|e| remote_error("file tree", id, e))?;
        if tree.truncated {
            warn!(
                "File tree for {} on {} was truncated by the host",
                id, metadata.default_branch
            );
        }

        let index = TreeIndex::from_entries(&tree.entries);
        let candidates = index.manifests_to_fetch(self.manifest_limit);
        let dependency_texts = self.fetch_manifests(id, candidates).await;

        info!(
            "Collected {} files, {} languages and {}/{} manifests for {}",
            index.file_paths.len(),
            languages.len(),
            dependency_texts.len(),
            candidates.len(),
            id
        );

        Ok(RepositoryProfile::builder()
            .languages(languages)
            .dependency_texts(dependency_texts)
            .size_kb(metadata.size)
            .tree(index)
            .build())
    }

    async fn fetch_manifests(
        &self,
        id: &RepositoryId,
        candidates: &[ManifestCandidate]
    ) -> Vec<String> {
        let fetches = candidates
            .iter()
            .map(|candidate| self.fetch_manifest(id, candidate));

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|outcome| match outcome {
                Ok(text) => Some(text),
                Err(error) => {
                    warn!("Skipping manifest for {}: {}", id, error);
                    None
                }
            })
            .collect()
    }

    async fn fetch_manifest(
        &self,
        id: &RepositoryId,
        candidate: &ManifestCandidate
    ) -> Result<String, Error> {
        let fetch = self.host.blob(id, &candidate.sha);
        let payload = tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                Error::manifest(
                    &candidate.path,
                    format!("timed out after {}ms", self.fetch_timeout.as_millis())
                )
            })?
            .map_err(|e| Error::manifest(&candidate.path, e.status_text))?;

        decode_blob(&candidate.path, &payload)
    }
}

/// Decodes a base64 blob payload into UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::ManifestFetch`] for a non-base64 encoding, malformed
/// base64, or content that is not UTF-8.
pub fn decode_blob(path: &str, payload: &BlobPayload) -> Result<String, Error> {
    if payload.encoding != "base64" {
        return Err(Error::manifest(
            path,
            format!("unsupported encoding '{}'", payload.encoding)
        ));
    }

    let compact: String = payload
        .content
        .chars()
        .filter(|character| !character.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::manifest(path, format!("invalid base64: {e}")))?;

    String::from_utf8(bytes).map_err(|e| Error::manifest(path, format!("invalid UTF-8: {e}")))
}

fn remote_error(resource: &'static str, id: &RepositoryId, error: HostError) -> Error {
    Error::RemoteFetch {
        resource,
        repository: id.to_string(),
        status: error.status_text
    }
}
