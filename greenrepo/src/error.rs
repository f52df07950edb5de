#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the greenrepo crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Only [`Error::RemoteFetch`] and [`Error::Input`] ever reach callers of the
//! collector. [`Error::ManifestFetch`] is produced per manifest and absorbed
//! by the collector after logging.

use std::path::{Path, PathBuf};

/// Unified error type returned by the collector, configuration loader, badge
/// writer and CLI.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// A required remote call (metadata, languages, tree) failed.
    #[error("failed to fetch {resource} for {repository}: {status}")]
    RemoteFetch {
        /// Resource that was being fetched.
        resource:   &'static str,
        /// `owner/name` of the repository under analysis.
        repository: String,
        /// Status text reported by the host.
        status:     String
    },
    /// A single manifest could not be fetched or decoded.
    #[error("failed to fetch manifest {path}: {message}")]
    ManifestFetch {
        /// Repository-relative path of the manifest.
        path:    String,
        /// Description of the failure.
        message: String
    },
    /// Repository identifier is empty or malformed.
    #[error("invalid repository identifier: {message}")]
    Input {
        /// Human readable message describing the problem.
        message: String
    },
    /// Wraps I/O errors that occur while reading configuration or profiles.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Location of the file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when the configuration violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps JSON encoding and decoding errors.
    #[error("failed to process JSON: {source}")]
    Serialize {
        /// Underlying serde_json error.
        source: serde_json::Error
    },
    /// Wraps I/O errors that occur while writing badge artifacts.
    #[error("failed to write badge artifact at {path:?}: {source}")]
    BadgeIo {
        /// Location of the artifact being produced.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// Failure to set up the remote client.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String
    }
}

impl Error {
    /// Constructs an input error from the provided displayable value.
    pub fn input<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Input {
            message: message.into()
        }
    }

    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a service error from the provided displayable value.
    pub fn service<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Service {
            message: message.into()
        }
    }

    /// Constructs a manifest error for the given path.
    pub fn manifest<P, M>(path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>
    {
        Self::ManifestFetch {
            path:    path.into(),
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation
    /// and is what the CLI prints to stderr.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::BadgeIo`] variant capturing the failing path and source.
pub fn badge_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::BadgeIo {
        path: path.to_path_buf(),
        source
    }
}
