// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache implementation

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CacheStats, RegionCache};
use crate::errors::CacheError;
use crate::types::coordinate::Coordinate;

#[derive(Debug, Default)]
struct MemoryCacheState {
    entries: HashMap<String, Value>,
    stats: CacheStats,
}

/// Region cache that lives only as long as the process
///
/// Inserts never fail. Useful for tests and for runs that should not leave a
/// cache file behind.
#[derive(Debug, Default)]
pub struct MemoryCache {
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-populated with `(coordinate, payload)` pairs
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Coordinate, Value)>,
    {
        let entries: HashMap<String, Value> = entries
            .into_iter()
            .map(|(coordinate, payload)| (coordinate.cache_key(), payload))
            .collect();
        let stats = CacheStats {
            entries: entries.len(),
            ..CacheStats::default()
        };
        Self {
            state: Mutex::new(MemoryCacheState { entries, stats }),
        }
    }
}

#[async_trait]
impl RegionCache for MemoryCache {
    async fn get(&self, coordinate: &Coordinate) -> Option<Value> {
        let mut state = self.state.lock().await;
        let key = coordinate.cache_key();

        match state.entries.get(&key).cloned() {
            Some(payload) => {
                state.stats.hits += 1;
                debug!(key = %key, "Cache hit (memory)");
                Some(payload)
            }
            None => {
                state.stats.misses += 1;
                debug!(key = %key, "Cache miss (memory)");
                None
            }
        }
    }

    async fn insert(&self, coordinate: &Coordinate, payload: Value) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;
        state.entries.insert(coordinate.cache_key(), payload);
        state.stats.inserts += 1;
        state.stats.entries = state.entries.len();
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemoryCache"
    }
}
