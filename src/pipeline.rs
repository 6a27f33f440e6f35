// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Directory-level processing of gene lists
//!
//! For every `*.csv` file in the input directory, in name order:
//!
//! 1. Open the batch cache `cache_{file}.json`
//! 2. Load the gene list and resolve each region ([`BatchLoader`])
//! 3. Export the records to `output_{file}`
//! 4. Flatten the export into `flat_output_{file}` ([`RecordFlattener`])
//!
//! A file that fails (corrupt cache, unreadable or incomplete gene list) is
//! reported in the [`RunSummary`] and the remaining files are still processed.

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info, warn, Instrument};

use crate::batch::{export_records, BatchLoader, InputColumns};
use crate::cache::{CacheStats, DiskCache, RegionCache};
use crate::config::RegscanConfig;
use crate::errors::RegscanError;
use crate::fetch::{ErrorLog, RegionFetcher, RegionSource};
use crate::flatten::RecordFlattener;
use crate::spans;

const INPUT_EXTENSION: &str = ".csv";

/// Outcome of one successfully processed gene list
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub file_name: String,
    /// Records written to the exported table
    pub records: usize,
    /// Rows skipped for a malformed region
    pub skipped: usize,
    /// Records whose lookup failed
    pub unresolved: usize,
    pub cache: CacheStats,
    pub output: PathBuf,
    pub flattened: PathBuf,
}

/// A gene list that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

/// Result of [`Pipeline::process_all`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub processed: Vec<FileReport>,
    pub failed: Vec<FileFailure>,
}

impl RunSummary {
    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.processed.iter().map(|report| report.records).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) processed, {} failed, {} record(s)",
            self.processed.len(),
            self.failed.len(),
            self.total_records()
        )
    }
}

/// Processes gene lists found under the configured input directory
#[derive(Debug)]
pub struct Pipeline<S> {
    config: RegscanConfig,
    fetcher: RegionFetcher<S>,
    loader: BatchLoader,
    flattener: RecordFlattener,
}

impl<S: RegionSource> Pipeline<S> {
    pub fn new(config: RegscanConfig, source: S) -> Self {
        let fetcher = RegionFetcher::new(source, ErrorLog::new(&config.error_log));
        let flattener = RecordFlattener::new(config.empty_annotation_policy);
        Self {
            config,
            fetcher,
            loader: BatchLoader::new(),
            flattener,
        }
    }

    /// Read gene lists with non-default column names
    pub fn with_input_columns(mut self, columns: InputColumns) -> Self {
        self.loader = BatchLoader::with_columns(columns);
        self
    }

    pub fn config(&self) -> &RegscanConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &RegionFetcher<S> {
        &self.fetcher
    }

    /// Creates the input, output, cache and error log directories
    pub async fn prepare_directories(&self) -> Result<(), RegscanError> {
        let mut dirs = vec![
            self.config.input_dir.as_path(),
            self.config.output_dir.as_path(),
            self.config.cache_dir.as_path(),
        ];
        if let Some(parent) = self.config.error_log.parent() {
            dirs.push(parent);
        }

        for dir in dirs.into_iter().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| RegscanError::io(dir, e))?;
        }
        Ok(())
    }

    /// Names of the gene lists in the input directory, sorted
    pub async fn input_files(&self) -> Result<Vec<String>, RegscanError> {
        let dir = &self.config.input_dir;
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| RegscanError::io(dir, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RegscanError::io(dir, e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_file && name.ends_with(INPUT_EXTENSION) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Loads, exports and flattens one gene list from the input directory
    pub async fn process_file(&self, file_name: &str) -> Result<FileReport, RegscanError> {
        let span = spans::process_file(file_name);

        async move {
            info!("Processing data");

            let input = self.config.input_dir.join(file_name);
            let cache = DiskCache::open(self.config.cache_file_for(file_name)).await?;

            let (records, stats) = self.loader.load(&input, &self.fetcher, &cache).await?;

            let record_count = records.len();
            let output = self.config.output_file_for(file_name);
            let flattened = self.config.flat_file_for(file_name);

            // CSV export and flattening use blocking file I/O
            let flattener = self.flattener.clone();
            let (output_path, flat_path) = (output.clone(), flattened.clone());
            tokio::task::spawn_blocking(move || -> Result<(), RegscanError> {
                export_records(&records, &output_path)?;
                flattener.flatten_file(&output_path, &flat_path)?;
                Ok(())
            })
            .await??;

            let cache_stats = cache.stats().await;
            info!(cache = %cache_stats, "Finished file");

            Ok(FileReport {
                file_name: file_name.to_string(),
                records: record_count,
                skipped: stats.skipped,
                unresolved: stats.unresolved,
                cache: cache_stats,
                output,
                flattened,
            })
        }
        .instrument(span)
        .await
    }

    /// Processes every gene list in the input directory
    ///
    /// # Errors
    ///
    /// Only directory setup and listing failures are errors; per-file
    /// failures are collected in [`RunSummary::failed`].
    pub async fn process_all(&self) -> Result<RunSummary, RegscanError> {
        self.prepare_directories().await?;
        let files = self.input_files().await?;

        if files.is_empty() {
            warn!(dir = %self.config.input_dir.display(), "No gene lists found");
        }

        let mut summary = RunSummary::default();
        for file_name in files {
            match self.process_file(&file_name).await {
                Ok(report) => summary.processed.push(report),
                Err(e) => {
                    error!(file = %file_name, error = %e, "Failed to process file");
                    summary.failed.push(FileFailure {
                        file_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(summary = %summary, "Run complete");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegscanConfigBuilder;
    use crate::errors::FetchError;
    use crate::types::coordinate::Coordinate;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    struct EchoSource;

    #[async_trait]
    impl RegionSource for EchoSource {
        async fn fetch_region(&self, coordinate: &Coordinate) -> Result<Value, FetchError> {
            Ok(json!([{"id": coordinate.cache_key()}]))
        }
    }

    fn pipeline(dir: &TempDir) -> Pipeline<EchoSource> {
        let config = RegscanConfigBuilder::new()
            .data_dir(dir.path())
            .build()
            .unwrap();
        Pipeline::new(config, EchoSource)
    }

    #[tokio::test]
    async fn test_input_files_are_sorted_csv_only() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline(&dir);
        pipeline.prepare_directories().await.unwrap();

        let input = &pipeline.config().input_dir;
        for name in ["b.csv", "a.csv", "notes.txt", "c.csv.bak"] {
            std::fs::write(input.join(name), "x\n").unwrap();
        }
        std::fs::create_dir(input.join("nested.csv")).unwrap();

        assert_eq!(pipeline.input_files().await.unwrap(), ["a.csv", "b.csv"]);
    }

    #[tokio::test]
    async fn test_empty_input_directory() {
        let dir = TempDir::new().unwrap();
        let summary = pipeline(&dir).process_all().await.unwrap();

        assert!(summary.is_success());
        assert!(summary.processed.is_empty());
        assert!(dir.path().join("cached_responses").is_dir());
        assert!(dir.path().join("error_logs").is_dir());
    }

    fn write_input(pipeline: &Pipeline<EchoSource>, file_name: &str, contents: &str) {
        std::fs::create_dir_all(&pipeline.config().input_dir).unwrap();
        std::fs::write(pipeline.config().input_dir.join(file_name), contents).unwrap();
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_process_file_writes_both_tables() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline(&dir);
        write_input(
            &pipeline,
            "genes.csv",
            "external_gene_name,chromosomal_region,gene_biotype\nTP53,17:1-2,protein_coding\n",
        );

        let report = pipeline.process_file("genes.csv").await.unwrap();

        assert_eq!(report.records, 1);
        assert_eq!(report.cache.inserts, 1);
        let flat = std::fs::read_to_string(&report.flattened).unwrap();
        assert_eq!(flat, "name,coordinate,biotype,id\nTP53,17:1-2,protein_coding,17:1-2\n");
        assert!(report.output.is_file());
    }

    #[tokio::test]
    async fn test_process_file_reports_corrupt_cache() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline(&dir);
        pipeline.prepare_directories().await.unwrap();
        write_input(
            &pipeline,
            "genes.csv",
            "external_gene_name,chromosomal_region,gene_biotype\nTP53,17:1-2,protein_coding\n",
        );
        std::fs::write(pipeline.config().cache_file_for("genes.csv"), "not json").unwrap();

        let err = pipeline.process_file("genes.csv").await.unwrap_err();

        assert!(matches!(err, RegscanError::Cache(ref e) if e.is_corrupt()));
        assert!(!pipeline.config().output_file_for("genes.csv").exists());
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            processed: vec![],
            failed: vec![FileFailure {
                file_name: "a.csv".to_string(),
                error: "boom".to_string(),
            }],
        };
        assert!(!summary.is_success());
        assert_eq!(summary.to_string(), "0 file(s) processed, 1 failed, 0 record(s)");
    }
}
