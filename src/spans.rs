// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for regscan operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use std::path::Path;

use tracing::{Level, Span};

use crate::types::coordinate::Coordinate;

/// Create span for resolving one region through cache and remote service.
///
/// Parent: load_batch span
#[inline]
pub(crate) fn fetch_region(coordinate: &Coordinate, cache: &'static str) -> Span {
    tracing::debug_span!(
        "regscan.fetch_region",
        region = %coordinate,
        cache = cache,
    )
}

/// Create span for loading one gene list and resolving its regions.
///
/// Parent: process_file span
/// Children: fetch_region spans (one per row)
#[inline]
pub(crate) fn load_batch(path: &Path) -> Span {
    tracing::info_span!("regscan.load_batch", path = %path.display())
}

/// Create span for flattening one table.
#[inline]
pub(crate) fn flatten_table(rows: usize, payload_column: &str) -> Span {
    tracing::debug_span!(
        "regscan.flatten_table",
        rows = rows,
        payload_column = payload_column,
    )
}

/// Create span for the full processing of one input file.
///
/// Parent: None (root span for this operation)
/// Children: load_batch span
#[inline]
pub(crate) fn process_file(file_name: &str) -> Span {
    tracing::span!(Level::INFO, "regscan.process_file", file = file_name)
}
