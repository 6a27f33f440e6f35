// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Regulatory-feature annotation for gene lists
//!
//! regscan resolves the chromosomal region of each gene in a gene list
//! against the Ensembl REST `overlap/region` endpoint, caches every response
//! on disk keyed by coordinate, and flattens the nested annotation payloads
//! into plain table columns.
//!
//! The main pieces:
//!
//! - [`RegionFetcher`]: cache-first lookup of one [`Coordinate`] through a
//!   [`RegionSource`] ([`EnsemblClient`] in production)
//! - [`DiskCache`] / [`MemoryCache`]: per-batch [`RegionCache`] backends
//! - [`BatchLoader`]: gene list CSV to [`GeneRecord`]s
//! - [`RecordFlattener`]: payload column to scalar columns
//! - [`Pipeline`]: all of the above for every gene list in a directory
//!
//! # Example
//!
//! ```rust,ignore
//! use regscan::{EnsemblClient, Pipeline, RegscanConfig};
//!
//! let config = RegscanConfig::from_env()?;
//! let client = EnsemblClient::new(&config)?;
//! let summary = Pipeline::new(config, client).process_all().await?;
//! println!("{summary}");
//! ```

pub mod batch;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod flatten;
pub mod pipeline;
pub mod table;
pub mod types;

pub(crate) mod spans;

pub use batch::{
    export_records, load_batch, parse_region, records_to_table, BatchLoader, BatchStats,
    InputColumns,
};
pub use cache::{cache_read, cache_write, CacheStats, DiskCache, MemoryCache, RegionCache};
pub use config::{RegscanConfig, RegscanConfigBuilder};
pub use errors::{
    BatchError, CacheError, ConfigError, FetchError, FlattenError, InputError, RegscanError,
};
pub use fetch::{EnsemblClient, ErrorLog, RegionFetcher, RegionSource};
pub use flatten::{EmptyAnnotationPolicy, RecordFlattener};
pub use pipeline::{FileFailure, FileReport, Pipeline, RunSummary};
pub use table::{Table, MISSING};
pub use types::annotation::ParsedAnnotation;
pub use types::coordinate::Coordinate;
pub use types::record::GeneRecord;
