// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Disk-based cache backed by one JSON file per batch

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{CacheStats, RegionCache};
use crate::errors::CacheError;
use crate::types::coordinate::Coordinate;

/// Loads a cache file into memory
///
/// Returns an empty map if the file does not exist. A file that exists but is
/// not a JSON object fails with [`CacheError::Corrupt`]; it is never reset.
pub async fn cache_read(path: impl AsRef<Path>) -> Result<Map<String, Value>, CacheError> {
    let path = path.as_ref();

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Cache file does not exist, using empty cache");
            return Ok(Map::new());
        }
        Err(e) => {
            return Err(CacheError::io(
                path.display().to_string(),
                "Failed to read cache file",
                e,
            ))
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| CacheError::corrupt(path.display().to_string(), e))
}

/// Persists cache entries with read-merge-write semantics
///
/// The file is re-read, `entries` are merged over its contents (last writer
/// wins per key) and the result is written through a temporary file that is
/// renamed into place. Entries written by another process since this one
/// loaded the file are kept. Keys are written in sorted order, so writing the
/// same entries twice leaves identical file content.
pub async fn cache_write(
    entries: &Map<String, Value>,
    path: impl AsRef<Path>,
) -> Result<(), CacheError> {
    merge_and_write(entries, path.as_ref()).await.map(|_| ())
}

async fn merge_and_write(
    entries: &Map<String, Value>,
    path: &Path,
) -> Result<Map<String, Value>, CacheError> {
    let mut merged = cache_read(path).await?;
    for (key, value) in entries {
        merged.insert(key.clone(), value.clone());
    }

    // Payloads keep their field order, cache keys are sorted
    let sorted: BTreeMap<&String, &Value> = merged.iter().collect();
    let json = serde_json::to_vec(&sorted).map_err(CacheError::Serialization)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            CacheError::io(
                parent.display().to_string(),
                "Failed to create cache directory",
                e,
            )
        })?;
    }

    let temp_path = temp_path_for(path);
    tokio::fs::write(&temp_path, &json).await.map_err(|e| {
        CacheError::io(
            temp_path.display().to_string(),
            "Failed to write temporary cache file",
            e,
        )
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        CacheError::io(
            path.display().to_string(),
            format!("Failed to rename {} into place", temp_path.display()),
            e,
        )
    })?;

    debug!(path = %path.display(), entries = merged.len(), "Saved region cache");
    Ok(merged)
}

/// Per-process temporary file next to the cache file
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cache".to_string());
    path.with_file_name(format!("{file_name}.{}.tmp", std::process::id()))
}

#[derive(Debug, Default)]
struct DiskCacheState {
    entries: Map<String, Value>,
    stats: CacheStats,
}

/// Region cache persisted as a JSON object on disk
///
/// The file is read fully by [`DiskCache::open`]; lookups are served from
/// memory. Every insert rewrites the file with [`cache_write`] and then adopts
/// the merged contents, so entries persisted by a concurrent writer become
/// visible as well.
///
/// # Examples
///
/// ```rust,ignore
/// use regscan::DiskCache;
///
/// let cache = DiskCache::open("cache_genes.csv.json").await?;
/// println!("{} cached regions", cache.stats().await.entries);
/// ```
#[derive(Debug)]
pub struct DiskCache {
    path: PathBuf,
    state: Mutex<DiskCacheState>,
}

impl DiskCache {
    /// Opens the cache stored at `path`, loading every entry
    ///
    /// A missing file yields an empty cache (the file is created on the first
    /// insert). A corrupt file is an error.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let entries = cache_read(&path).await?;

        info!(
            path = %path.display(),
            entries = entries.len(),
            "Loaded region cache"
        );

        let stats = CacheStats {
            entries: entries.len(),
            ..CacheStats::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(DiskCacheState { entries, stats }),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RegionCache for DiskCache {
    async fn get(&self, coordinate: &Coordinate) -> Option<Value> {
        let mut state = self.state.lock().await;
        let key = coordinate.cache_key();

        match state.entries.get(&key).cloned() {
            Some(payload) => {
                state.stats.hits += 1;
                debug!(key = %key, "Cache hit (disk)");
                Some(payload)
            }
            None => {
                state.stats.misses += 1;
                debug!(key = %key, "Cache miss (disk)");
                None
            }
        }
    }

    async fn insert(&self, coordinate: &Coordinate, payload: Value) -> Result<(), CacheError> {
        let mut state = self.state.lock().await;
        let key = coordinate.cache_key();

        debug!(key = %key, "Inserting entry into disk cache");
        state.entries.insert(key, payload);
        state.stats.inserts += 1;
        state.stats.entries = state.entries.len();

        let merged = merge_and_write(&state.entries, &self.path).await?;
        state.stats.entries = merged.len();
        state.entries = merged;

        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }

    fn name(&self) -> &'static str {
        "DiskCache"
    }
}
