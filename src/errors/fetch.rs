// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for remote region lookups.
//!
//! None of these escape [`RegionFetcher::fetch`](crate::RegionFetcher::fetch):
//! every variant is written to the error log and the region is skipped.

/// Errors returned by a [`RegionSource`](crate::RegionSource).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or no response arrived (includes timeouts).
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The service answered with a non-2xx status.
    #[error("{status} for url: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The response body was not valid JSON.
    #[error("Invalid JSON body from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// The underlying decode error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Helper to create a `Transport` error from any error type.
    pub fn transport(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FetchError::Transport {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Status` error.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        FetchError::Status {
            status,
            url: url.into(),
        }
    }

    /// Helper to create a `Decode` error from any error type.
    pub fn decode(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FetchError::Decode {
            url: url.into(),
            source: Box::new(source),
        }
    }
}
