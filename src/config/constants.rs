// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known endpoints, file names and column names
//!
//! Centralizes the constants shared by the fetcher, the batch loader and the
//! flattener so that the on-disk layout is defined in one place.

use std::time::Duration;

/// Public Ensembl REST server
pub const ENSEMBL_SERVER: &str = "https://rest.ensembl.org";

/// Species segment of the `overlap/region` path
pub const DEFAULT_SPECIES: &str = "human";

/// Per-request timeout for region lookups
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Root directory holding inputs, outputs, caches and the error log
pub const DEFAULT_DATA_DIR: &str = "data";

/// Layout below the data directory
pub mod layout {
    pub const INPUT_DIR: &str = "input";
    pub const OUTPUT_DIR: &str = "output";
    pub const CACHE_DIR: &str = "cached_responses";
    pub const ERROR_LOG_DIR: &str = "error_logs";
    pub const ERROR_LOG_FILE: &str = "unchecked_coordinates.log";

    /// Prefix of the per-batch cache file, `cache_{input}.json`
    pub const CACHE_FILE_PREFIX: &str = "cache_";
    /// Prefix of the exported batch table, `output_{input}`
    pub const OUTPUT_FILE_PREFIX: &str = "output_";
    /// Prefix of the flattened table, `flat_output_{input}`
    pub const FLAT_FILE_PREFIX: &str = "flat_";
}

/// Column names of gene list inputs and exported tables
pub mod columns {
    /// Gene name column of a BioMart gene list
    pub const GENE_NAME: &str = "external_gene_name";
    /// Region column of a BioMart gene list
    pub const REGION: &str = "chromosomal_region";
    /// Biotype column of a BioMart gene list
    pub const BIOTYPE: &str = "gene_biotype";

    pub const NAME: &str = "name";
    pub const COORDINATE: &str = "coordinate";
    pub const RECORD_BIOTYPE: &str = "biotype";
    /// Column carrying the serialized annotation payload
    pub const REGULATORY_DATA: &str = "regulatory_data";
}

/// Environment variables read by [`RegscanConfig::from_env`](crate::RegscanConfig::from_env)
pub mod env {
    pub const SERVER: &str = "REGSCAN_SERVER";
    pub const SPECIES: &str = "REGSCAN_SPECIES";
    pub const TIMEOUT_SECS: &str = "REGSCAN_TIMEOUT_SECS";
    pub const DATA_DIR: &str = "REGSCAN_DATA_DIR";
    pub const INPUT_DIR: &str = "REGSCAN_INPUT_DIR";
    pub const OUTPUT_DIR: &str = "REGSCAN_OUTPUT_DIR";
    pub const CACHE_DIR: &str = "REGSCAN_CACHE_DIR";
    pub const ERROR_LOG: &str = "REGSCAN_ERROR_LOG";
    pub const DROP_EMPTY: &str = "REGSCAN_DROP_EMPTY";
}
