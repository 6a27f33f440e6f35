// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the regscan library.
//!
//! Errors are split by the layer that raises them:
//!
//! - [`CacheError`] - reading and persisting the per-batch region cache
//! - [`FetchError`] - remote region lookups (always contained by the fetcher)
//! - [`FlattenError`] - flattening an exported table
//! - [`InputError`] - a single malformed region value (row is skipped)
//! - [`BatchError`] - loading one gene list file
//! - [`ConfigError`] - building the run configuration
//!
//! [`RegscanError`] wraps all of them for callers that do not need to tell
//! the sources apart.
//!
//! # Example
//!
//! ```rust,ignore
//! use regscan::{FlattenError, RecordFlattener};
//!
//! match RecordFlattener::default().flatten_file("output_genes.csv", "flat_genes.csv") {
//!     Ok(()) => {}
//!     Err(FlattenError::MissingPayloadColumn { column }) => {
//!         eprintln!("table has no {column} column");
//!     }
//!     Err(e) => eprintln!("flatten failed: {e}"),
//! }
//! ```

mod cache;
mod config;
mod fetch;
mod flatten;
mod input;

pub use cache::CacheError;
pub use config::ConfigError;
pub use fetch::FetchError;
pub use flatten::FlattenError;
pub use input::{BatchError, InputError};

/// Unified error type for all regscan operations.
#[derive(Debug, thiserror::Error)]
pub enum RegscanError {
    /// Error from the region cache.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error from a remote region lookup.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from table flattening.
    #[error("Flatten error: {0}")]
    Flatten(#[from] FlattenError),

    /// Error from a malformed input value.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Error from loading a gene list batch.
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// Error from configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A blocking export or flatten task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Filesystem error outside the cache (directory setup, input listing).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RegscanError {
    /// Create an I/O error for `path`
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
