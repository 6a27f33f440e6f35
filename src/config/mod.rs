// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for regscan runs
//!
//! A [`RegscanConfig`] is built once per run and passed down to the fetcher,
//! the batch loader and the flattener. It names the annotation service, the
//! request timeout, the directory layout and the empty-annotation policy.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use regscan::RegscanConfig;
//!
//! // Public Ensembl server, human, 10s timeout, ./data layout
//! let config = RegscanConfig::default();
//! assert_eq!(config.species, "human");
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use regscan::{EmptyAnnotationPolicy, RegscanConfigBuilder};
//! use std::time::Duration;
//!
//! let config = RegscanConfigBuilder::new()
//!     .species("mouse")
//!     .request_timeout(Duration::from_secs(30))
//!     .data_dir("/srv/regscan")
//!     .empty_annotation_policy(EmptyAnnotationPolicy::Drop)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.cache_dir.to_str(), Some("/srv/regscan/cached_responses"));
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;
use crate::flatten::EmptyAnnotationPolicy;

pub mod constants;

use constants::{env, layout};

/// Configuration for one regscan run
#[derive(Debug, Clone)]
pub struct RegscanConfig {
    /// Base URL of the region annotation service
    pub server_url: Url,

    /// Species segment of the request path
    /// Default: "human"
    pub species: String,

    /// Timeout applied to every region lookup
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// Directory scanned for gene list CSV files
    pub input_dir: PathBuf,

    /// Directory receiving exported and flattened tables
    pub output_dir: PathBuf,

    /// Directory holding one cache file per gene list
    pub cache_dir: PathBuf,

    /// Append-only log of failed region lookups
    pub error_log: PathBuf,

    /// Whether rows without annotations survive flattening
    /// Default: retain
    pub empty_annotation_policy: EmptyAnnotationPolicy,
}

impl Default for RegscanConfig {
    fn default() -> Self {
        let data_dir = Path::new(constants::DEFAULT_DATA_DIR);
        Self {
            server_url: default_server_url(),
            species: constants::DEFAULT_SPECIES.to_string(),
            request_timeout: constants::DEFAULT_REQUEST_TIMEOUT,
            input_dir: data_dir.join(layout::INPUT_DIR),
            output_dir: data_dir.join(layout::OUTPUT_DIR),
            cache_dir: data_dir.join(layout::CACHE_DIR),
            error_log: data_dir
                .join(layout::ERROR_LOG_DIR)
                .join(layout::ERROR_LOG_FILE),
            empty_annotation_policy: EmptyAnnotationPolicy::default(),
        }
    }
}

// Only ever parses the compile-time constant
fn default_server_url() -> Url {
    Url::parse(constants::ENSEMBL_SERVER).expect("ENSEMBL_SERVER is a valid URL")
}

impl RegscanConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first (if present).
    /// Unset variables keep their defaults; see [`constants::env`] for names.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Example
    ///
    /// ```rust
    /// use regscan::RegscanConfig;
    /// use std::collections::HashMap;
    ///
    /// let vars = HashMap::from([("REGSCAN_SPECIES", "mouse"), ("REGSCAN_TIMEOUT_SECS", "3")]);
    /// let lookup = |name: &str| vars.get(name).map(|v| v.to_string());
    /// let config = RegscanConfig::from_lookup(lookup).unwrap();
    /// assert_eq!(config.species, "mouse");
    /// assert_eq!(config.request_timeout.as_secs(), 3);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = RegscanConfigBuilder::new();

        if let Some(server) = lookup(env::SERVER) {
            builder = builder.server_url(server);
        }
        if let Some(species) = lookup(env::SPECIES) {
            builder = builder.species(species);
        }
        if let Some(raw) = lookup(env::TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ConfigError::invalid_variable(env::TIMEOUT_SECS, &raw, "expected whole seconds")
            })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = lookup(env::DATA_DIR) {
            builder = builder.data_dir(dir);
        }
        if let Some(dir) = lookup(env::INPUT_DIR) {
            builder = builder.input_dir(dir);
        }
        if let Some(dir) = lookup(env::OUTPUT_DIR) {
            builder = builder.output_dir(dir);
        }
        if let Some(dir) = lookup(env::CACHE_DIR) {
            builder = builder.cache_dir(dir);
        }
        if let Some(path) = lookup(env::ERROR_LOG) {
            builder = builder.error_log(path);
        }
        if let Some(raw) = lookup(env::DROP_EMPTY) {
            let policy = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => EmptyAnnotationPolicy::Drop,
                "0" | "false" | "no" | "" => EmptyAnnotationPolicy::Retain,
                _ => {
                    return Err(ConfigError::invalid_variable(
                        env::DROP_EMPTY,
                        &raw,
                        "expected true or false",
                    ))
                }
            };
            builder = builder.empty_annotation_policy(policy);
        }

        builder.build()
    }

    /// Cache file for a gene list, `cache_{file_name}.json`
    pub fn cache_file_for(&self, input_file_name: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}{input_file_name}.json", layout::CACHE_FILE_PREFIX))
    }

    /// Exported table for a gene list, `output_{file_name}`
    pub fn output_file_for(&self, input_file_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{input_file_name}", layout::OUTPUT_FILE_PREFIX))
    }

    /// Flattened table for a gene list, `flat_output_{file_name}`
    pub fn flat_file_for(&self, input_file_name: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}{input_file_name}",
            layout::FLAT_FILE_PREFIX,
            layout::OUTPUT_FILE_PREFIX
        ))
    }
}

/// Builder for [`RegscanConfig`]
///
/// Starts from [`RegscanConfig::default`]; [`build`](Self::build) validates
/// the server URL and species.
#[derive(Debug, Clone)]
pub struct RegscanConfigBuilder {
    server_url: String,
    config: RegscanConfig,
}

impl Default for RegscanConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegscanConfigBuilder {
    pub fn new() -> Self {
        Self {
            server_url: constants::ENSEMBL_SERVER.to_string(),
            config: RegscanConfig::default(),
        }
    }

    /// Set the annotation service base URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.config.species = species.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Place input, output, cache and error log under one root directory
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.config.input_dir = dir.join(layout::INPUT_DIR);
        self.config.output_dir = dir.join(layout::OUTPUT_DIR);
        self.config.cache_dir = dir.join(layout::CACHE_DIR);
        self.config.error_log = dir.join(layout::ERROR_LOG_DIR).join(layout::ERROR_LOG_FILE);
        self
    }

    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = dir.into();
        self
    }

    pub fn error_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.error_log = path.into();
        self
    }

    pub fn empty_annotation_policy(mut self, policy: EmptyAnnotationPolicy) -> Self {
        self.config.empty_annotation_policy = policy;
        self
    }

    /// Validate and build the final configuration
    pub fn build(self) -> Result<RegscanConfig, ConfigError> {
        let trimmed = self.server_url.trim().trim_end_matches('/');
        let server_url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidServerUrl {
            value: self.server_url.clone(),
            source,
        })?;

        let species = self.config.species.trim().to_string();
        if species.is_empty() {
            return Err(ConfigError::EmptySpecies);
        }

        Ok(RegscanConfig {
            server_url,
            species,
            ..self.config
        })
    }
}
