// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for regscan integration tests
//!
//! Provides mock implementations of traits to enable testing without
//! a real annotation service.

use async_trait::async_trait;
use regscan::{Coordinate, FetchError, RegionSource, RegscanConfig, RegscanConfigBuilder};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Mock RegionSource for testing fetch and pipeline logic
///
/// Regions without a configured response get a generated payload with one
/// feature whose `id` is the region key. Every call is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockRegionSource::new()
///     .with_response("1:100-200", json!([]))
///     .with_failure("2:5-9", 503);
///
/// let fetcher = RegionFetcher::new(mock, ErrorLog::new(log_path));
/// ```
#[derive(Default)]
pub struct MockRegionSource {
    responses: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockRegionSource {
    /// Create a mock answering every region with a generated payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed payload for one region key
    pub fn with_response(mut self, key: &str, payload: Value) -> Self {
        self.responses.insert(key.to_string(), payload);
        self
    }

    /// Fail lookups of one region key with the given HTTP status
    pub fn with_failure(mut self, key: &str, status: u16) -> Self {
        self.failures.insert(key.to_string(), status);
        self
    }

    /// Region keys requested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RegionSource for MockRegionSource {
    async fn fetch_region(&self, coordinate: &Coordinate) -> Result<Value, FetchError> {
        let key = coordinate.cache_key();
        self.calls.lock().unwrap().push(key.clone());

        if let Some(&status) = self.failures.get(&key) {
            return Err(FetchError::status(status, format!("http://mock/{key}")));
        }

        Ok(self
            .responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| generated_payload(&key)))
    }

    fn name(&self) -> &'static str {
        "MockRegionSource"
    }
}

/// Payload returned for regions without a configured response
pub fn generated_payload(key: &str) -> Value {
    json!([{
        "id": key,
        "feature_type": "enhancer",
        "bound": {"start": 1, "end": 2}
    }])
}

/// Configuration rooted at a temporary data directory
#[allow(dead_code)]
pub fn test_config(data_dir: &Path) -> RegscanConfig {
    RegscanConfigBuilder::new()
        .data_dir(data_dir)
        .build()
        .unwrap()
}

/// Write a gene list into the input directory of `config`
#[allow(dead_code)]
pub fn write_gene_list(config: &RegscanConfig, file_name: &str, rows: &[(&str, &str, &str)]) {
    std::fs::create_dir_all(&config.input_dir).unwrap();
    let mut contents = String::from("external_gene_name,chromosomal_region,gene_biotype\n");
    for (name, region, biotype) in rows {
        contents.push_str(&format!("{name},{region},{biotype}\n"));
    }
    std::fs::write(config.input_dir.join(file_name), contents).unwrap();
}
