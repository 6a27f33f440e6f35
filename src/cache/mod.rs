// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache backends for region annotation responses
//!
//! One cache belongs to one gene list batch and maps canonical coordinate keys
//! (`"chrom:start-end"`) to the raw service response for that region.
//!
//! - [`DiskCache`]: JSON file, read fully at open, persisted with
//!   read-merge-write after every insert (default)
//! - [`MemoryCache`]: in-process only, for tests and dry runs
//!
//! # Examples
//!
//! ```rust,ignore
//! use regscan::{DiskCache, MemoryCache, RegionFetcher};
//!
//! // Persistent cache for one gene list
//! let cache = DiskCache::open("data/cached_responses/cache_genes.csv.json").await?;
//! let payload = fetcher.fetch(&coordinate, &cache).await;
//!
//! // Throwaway cache
//! let cache = MemoryCache::new();
//! let payload = fetcher.fetch(&coordinate, &cache).await;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::CacheError;
use crate::types::coordinate::Coordinate;

mod disk;
mod memory;

pub use disk::{cache_read, cache_write, DiskCache};
pub use memory::MemoryCache;

/// Statistics about cache use during one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups not found in the cache
    pub misses: u64,
    /// Number of entries added
    pub inserts: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, inserts={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.inserts,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Trait for region response cache backends
///
/// The fetcher receives a cache as `&dyn RegionCache`, so the backend is chosen
/// by the caller and tests can substitute an in-memory store.
///
/// Implementations use interior mutability; all methods take `&self`.
#[async_trait]
pub trait RegionCache: Send + Sync {
    /// Returns the cached payload for a region, unchanged
    async fn get(&self, coordinate: &Coordinate) -> Option<Value>;

    /// Stores a payload for a region
    ///
    /// Persistent backends write the entry to durable storage before
    /// returning. The entry stays available in memory even if that write
    /// fails.
    async fn insert(&self, coordinate: &Coordinate, payload: Value) -> Result<(), CacheError>;

    /// Returns current cache statistics
    async fn stats(&self) -> CacheStats;

    /// Returns a human-readable name for this cache backend
    fn name(&self) -> &'static str;
}
