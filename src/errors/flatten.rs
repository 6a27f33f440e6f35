// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for table flattening.

use std::path::PathBuf;

/// Errors that abort flattening of a whole table.
///
/// Problems with individual payload cells are never errors; an unparseable
/// cell is treated as a row without annotations.
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    /// The table has no column carrying the annotation payload.
    #[error("Column '{column}' not found in table")]
    MissingPayloadColumn {
        /// Name of the expected payload column
        column: String,
    },

    /// The input table file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The input table file has no header row.
    #[error("Empty file: {}", path.display())]
    EmptyFile {
        /// Path of the empty file
        path: PathBuf,
    },

    /// Reading or writing the table failed.
    #[error("Table I/O error at {}: {source}", path.display())]
    Csv {
        /// Path of the table file
        path: PathBuf,
        /// The underlying CSV error
        #[source]
        source: csv::Error,
    },
}

impl FlattenError {
    /// Create a `MissingPayloadColumn` error.
    pub fn missing_payload_column(column: impl Into<String>) -> Self {
        FlattenError::MissingPayloadColumn {
            column: column.into(),
        }
    }

    /// Create a `Csv` error for the given path.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        FlattenError::Csv {
            path: path.into(),
            source,
        }
    }
}
