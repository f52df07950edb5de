// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Narrow interface to the code-hosting REST API.
//!
//! The collector only ever talks to a [`RepositoryHost`]. [`GithubHost`] is
//! the production implementation built on [`octocrab`]; tests substitute an
//! in-memory host.

use std::{collections::BTreeMap, fmt};

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::Error,
    identifier::RepositoryId,
    retry::{RetryConfig, retry_with_backoff}
};

/// Top-level repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryMetadata {
    /// Repository size in kilobytes.
    #[serde(default)]
    pub size:           u64,
    /// Name of the default branch.
    pub default_branch: String
}

/// Kind of a node in the recursive tree listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file.
    Blob,
    /// Directory.
    Tree,
    /// Submodule reference.
    Commit,
    /// Anything else the host may report.
    #[serde(other)]
    Other
}

/// One node of the recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    /// Repository-relative path.
    pub path: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Object identifier used to fetch blob contents.
    #[serde(default)]
    pub sha:  String
}

impl TreeEntry {
    /// Convenience constructor for a regular file entry.
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
            sha:  sha.into()
        }
    }
}

/// Recursive tree listing for one branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryTree {
    /// Tree nodes in host order.
    #[serde(default, rename = "tree")]
    pub entries:   Vec<TreeEntry>,
    /// Set when the host cut the listing short.
    #[serde(default)]
    pub truncated: bool
}

/// Raw blob payload as returned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlobPayload {
    /// Encoded content.
    #[serde(default)]
    pub content:  String,
    /// Content encoding, normally `base64`.
    #[serde(default)]
    pub encoding: String
}

/// Failure reported by a [`RepositoryHost`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError {
    /// HTTP status code, when the host answered.
    pub status:      Option<u16>,
    /// Status text, or a transport error description.
    pub status_text: String
}

impl HostError {
    /// Error for a non-success HTTP answer.
    pub fn status(code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status:      Some(code),
            status_text: status_text.into()
        }
    }

    /// Error raised before any status was received.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status:      None,
            status_text: message.into()
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_text)
    }
}

impl std::error::Error for HostError {}

/// Read-only operations the collector needs from a code host.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Fetches size and default branch.
    async fn metadata(&self, id: &RepositoryId) -> Result<RepositoryMetadata, HostError>;

    /// Fetches the language to byte-count map.
    async fn languages(&self, id: &RepositoryId) -> Result<BTreeMap<String, u64>, HostError>;

    /// Fetches the recursive file tree of `branch`.
    async fn tree(&self, id: &RepositoryId, branch: &str) -> Result<RepositoryTree, HostError>;

    /// Fetches one blob by object id.
    async fn blob(&self, id: &RepositoryId, sha: &str) -> Result<BlobPayload, HostError>;
}

/// [`RepositoryHost`] backed by the GitHub REST API.
#[derive(Clone)]
pub struct GithubHost {
    client: Octocrab,
    retry:  RetryConfig
}

impl fmt::Debug for GithubHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubHost")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GithubHost {
    /// Builds a client for `api_base`.
    ///
    /// When `token` is present it is attached to every request as a bearer
    /// credential. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the base URI is invalid or the client
    /// cannot be initialized.
    pub fn new(api_base: &str, token: Option<&str>, retry: RetryConfig) -> Result<Self, Error> {
        let mut builder = Octocrab::builder()
            .base_uri(api_base)
            .map_err(|e| Error::service(format!("invalid API base '{api_base}': {e}")))?;

        if let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) {
            builder = builder.personal_token(token);
        }

        let client = builder
            .build()
            .map_err(|e| Error::service(format!("failed to initialize GitHub client: {e}")))?;

        Ok(Self {
            client,
            retry
        })
    }

    async fn get_json<R>(&self, operation: &str, route: String) -> Result<R, HostError>
    where
        R: DeserializeOwned + Send
    {
        debug!("GET {}", route);
        let client = &self.client;
        let route = route.as_str();

        retry_with_backoff(&self.retry, operation, move || async move {
            client
                .get::<R, _, ()>(route, None::<&()>)
                .await
                .map_err(host_error)
        })
        .await
    }
}

#[async_trait]
impl RepositoryHost for GithubHost {
    async fn metadata(&self, id: &RepositoryId) -> Result<RepositoryMetadata, HostError> {
        let route = format!("/repos/{}/{}", id.owner, id.name);
        self.get_json("repository metadata", route).await
    }

    async fn languages(&self, id: &RepositoryId) -> Result<BTreeMap<String, u64>, HostError> {
        let route = format!("/repos/{}/{}/languages", id.owner, id.name);
        self.get_json("languages", route).await
    }

    async fn tree(&self, id: &RepositoryId, branch: &str) -> Result<RepositoryTree, HostError> {
        let route = format!(
            "/repos/{}/{}/git/trees/{}?recursive=1",
            id.owner, id.name, branch
        );
        self.get_json("file tree", route).await
    }

    async fn blob(&self, id: &RepositoryId, sha: &str) -> Result<BlobPayload, HostError> {
        let route = format!("/repos/{}/{}/git/blobs/{}", id.owner, id.name, sha);
        self.get_json("blob", route).await
    }
}

fn host_error(error: octocrab::Error) -> HostError {
    match error {
        octocrab::Error::GitHub {
            source, ..
        } => {
            let code = source.status_code;
            let reason = code.canonical_reason().unwrap_or("Unknown Status");
            HostError::status(code.as_u16(), format!("{} {reason}", code.as_u16()))
        }
        other => HostError::transport(other.to_string())
    }
}
