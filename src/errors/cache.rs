// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the region response cache.

/// Errors that can occur while reading or persisting a region cache file.
///
/// A missing cache file is not an error (it reads as an empty cache). A file
/// that exists but cannot be decoded is reported as [`CacheError::Corrupt`]
/// and must not be silently replaced, since that would discard every response
/// fetched for the batch so far.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Filesystem failure while reading, writing or renaming the cache file.
    #[error("Cache I/O error at {path}: {details}")]
    Io {
        /// Path of the cache file involved
        path: String,
        /// What was being attempted
        details: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The cache file exists but is not a JSON object of region entries.
    #[error("Corrupt cache file {path}: {source}")]
    Corrupt {
        /// Path of the corrupt cache file
        path: String,
        /// The decode error
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory entries could not be serialized.
    #[error("Failed to serialize cache entries: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl CacheError {
    /// Create an `Io` error for the given path.
    pub fn io(path: impl Into<String>, details: impl Into<String>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            details: details.into(),
            source,
        }
    }

    /// Create a `Corrupt` error for the given path.
    pub fn corrupt(path: impl Into<String>, source: serde_json::Error) -> Self {
        CacheError::Corrupt {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the cache file exists but could not be decoded.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, CacheError::Corrupt { .. })
    }
}
