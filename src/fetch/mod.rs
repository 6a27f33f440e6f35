// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cached retrieval of regulatory annotations by region
//!
//! [`RegionFetcher`] resolves one [`Coordinate`] at a time:
//!
//! 1. Look the canonical key up in the batch cache; a hit is returned as is
//! 2. On a miss, ask the [`RegionSource`] (one remote call, fixed timeout)
//! 3. Store a successful response in the cache, which persists it immediately
//! 4. On any failure, append a line to the [`ErrorLog`] and return `None`
//!
//! Failures never propagate: one bad region must not abort a batch.
//!
//! # Example
//!
//! ```rust,ignore
//! use regscan::{DiskCache, EnsemblClient, ErrorLog, RegionFetcher, RegscanConfig};
//!
//! let config = RegscanConfig::default();
//! let client = EnsemblClient::new(&config)?;
//! let fetcher = RegionFetcher::new(client, ErrorLog::new(&config.error_log));
//! let cache = DiskCache::open(config.cache_file_for("genes.csv")).await?;
//!
//! let coordinate = "17:7661779-7687538".parse()?;
//! if let Some(payload) = fetcher.fetch(&coordinate, &cache).await {
//!     println!("{payload}");
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn, Instrument};

use crate::cache::RegionCache;
use crate::errors::FetchError;
use crate::spans;
use crate::types::coordinate::Coordinate;

mod ensembl;
mod error_log;

pub use ensembl::EnsemblClient;
pub use error_log::ErrorLog;

/// Remote source of region annotations
///
/// The production implementation is [`EnsemblClient`]; tests plug in mocks.
#[async_trait]
pub trait RegionSource: Send + Sync {
    /// Fetches the annotation payload for a region
    ///
    /// Returns the decoded response body. Transport failures, non-2xx
    /// responses and undecodable bodies are errors.
    async fn fetch_region(&self, coordinate: &Coordinate) -> Result<Value, FetchError>;

    /// Returns a human-readable name for this source
    fn name(&self) -> &'static str {
        "RegionSource"
    }
}

/// Resolves regions through a cache, falling back to a [`RegionSource`]
#[derive(Debug)]
pub struct RegionFetcher<S> {
    source: S,
    error_log: ErrorLog,
}

impl<S: RegionSource> RegionFetcher<S> {
    pub fn new(source: S, error_log: ErrorLog) -> Self {
        Self { source, error_log }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Returns the annotation payload for `coordinate`, or `None` if it could not be fetched
    ///
    /// A cached payload is returned without contacting the source. A payload
    /// fetched from the source is inserted into `cache` before returning; if
    /// persisting it fails the payload is still returned. A failed lookup is
    /// recorded in the error log and leaves the cache untouched.
    pub async fn fetch(&self, coordinate: &Coordinate, cache: &dyn RegionCache) -> Option<Value> {
        let span = spans::fetch_region(coordinate, cache.name());

        async move {
            if let Some(payload) = cache.get(coordinate).await {
                debug!(region = %coordinate, "Loading cached regulatory features");
                return Some(payload);
            }

            info!(
                region = %coordinate,
                source = self.source.name(),
                "Fetching regulatory features"
            );

            match self.source.fetch_region(coordinate).await {
                Ok(payload) => {
                    if let Err(e) = cache.insert(coordinate, payload.clone()).await {
                        warn!(
                            region = %coordinate,
                            error = %e,
                            "Failed to persist cached response"
                        );
                    }
                    Some(payload)
                }
                Err(e) => {
                    warn!(region = %coordinate, error = %e, "Failed request");
                    self.record_failure(coordinate, &e).await;
                    None
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn record_failure(&self, coordinate: &Coordinate, error: &FetchError) {
        let key = coordinate.cache_key();
        if let Err(e) = self.error_log.record(&key, &error.to_string()).await {
            warn!(
                path = %self.error_log.path().display(),
                error = %e,
                "Failed to append to error log"
            );
        }
    }
}
