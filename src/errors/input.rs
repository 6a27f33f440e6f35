// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for gene list input and batch assembly.

use std::path::PathBuf;

/// A single input value that does not describe a valid region.
///
/// Rows carrying such values are skipped with a diagnostic; the batch goes on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The region field has no `chrom:` prefix.
    #[error("Malformed region '{value}': missing ':' separator")]
    MissingSeparator {
        /// The offending field value
        value: String,
    },

    /// The chromosome part of the region is empty.
    #[error("Malformed region '{value}': empty chromosome")]
    EmptyChromosome {
        /// The offending field value
        value: String,
    },

    /// A position is not a non-negative integer.
    #[error("Malformed region '{value}': invalid position '{position}'")]
    InvalidPosition {
        /// The offending field value
        value: String,
        /// The part that failed to parse
        position: String,
    },

    /// The start position lies after the end position.
    #[error("Invalid region {chromosome}:{start}-{end}: start is after end")]
    InvertedRange {
        /// Chromosome name
        chromosome: String,
        /// Start position
        start: u64,
        /// End position
        end: u64,
    },
}

/// Errors that abort loading one gene list batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The gene list does not have a required column.
    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn {
        /// The missing column name
        column: String,
        /// The gene list file
        path: PathBuf,
    },

    /// Reading the gene list or writing the output table failed.
    #[error("Table I/O error at {}: {source}", path.display())]
    Csv {
        /// Path of the table file
        path: PathBuf,
        /// The underlying CSV error
        #[source]
        source: csv::Error,
    },
}

impl BatchError {
    /// Create a `Csv` error for the given path.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        BatchError::Csv {
            path: path.into(),
            source,
        }
    }
}
