// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gene list batches
//!
//! A batch is one gene list CSV. Each row names a gene, its region and its
//! biotype; the region is resolved through a [`RegionFetcher`] and the result
//! becomes a [`GeneRecord`]. Rows whose region cannot be parsed are skipped
//! with a warning. Rows whose lookup fails are kept with no payload.

use std::path::Path;

use tracing::{info, warn, Instrument};

use crate::cache::RegionCache;
use crate::config::constants::columns;
use crate::errors::{BatchError, InputError};
use crate::fetch::{RegionFetcher, RegionSource};
use crate::spans;
use crate::table::{Table, MISSING};
use crate::types::coordinate::Coordinate;
use crate::types::record::GeneRecord;

/// Parses a gene list region field into a [`Coordinate`]
///
/// ```
/// use regscan::parse_region;
///
/// let coordinate = parse_region("1:1000-2000").unwrap();
/// assert_eq!(coordinate.cache_key(), "1:1000-2000");
/// assert!(parse_region("1000-2000").is_err());
/// ```
pub fn parse_region(field: &str) -> Result<Coordinate, InputError> {
    field.parse()
}

/// Names of the gene list columns read by [`BatchLoader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputColumns {
    pub gene_name: String,
    pub region: String,
    pub biotype: String,
}

impl Default for InputColumns {
    fn default() -> Self {
        Self {
            gene_name: columns::GENE_NAME.to_string(),
            region: columns::REGION.to_string(),
            biotype: columns::BIOTYPE.to_string(),
        }
    }
}

/// Counts reported after loading a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Rows read from the gene list
    pub rows: usize,
    /// Rows skipped because of a malformed region
    pub skipped: usize,
    /// Records whose lookup failed (no payload)
    pub unresolved: usize,
}

/// Loads gene list batches into [`GeneRecord`]s
#[derive(Debug, Clone, Default)]
pub struct BatchLoader {
    columns: InputColumns,
}

impl BatchLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(columns: InputColumns) -> Self {
        Self { columns }
    }

    /// Reads the gene list at `path` and resolves every region
    ///
    /// Regions are resolved one at a time, in row order.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or lacks one of the configured columns.
    /// Per-row problems are never errors.
    pub async fn load<S: RegionSource>(
        &self,
        path: impl AsRef<Path>,
        fetcher: &RegionFetcher<S>,
        cache: &dyn RegionCache,
    ) -> Result<(Vec<GeneRecord>, BatchStats), BatchError> {
        let path = path.as_ref();
        let span = spans::load_batch(path);

        async move {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| BatchError::csv(path, e.into()))?;
            let table = Table::from_reader(bytes.as_slice()).map_err(|e| BatchError::csv(path, e))?;

            let required = [
                &self.columns.gene_name,
                &self.columns.region,
                &self.columns.biotype,
            ];
            for column in required {
                if table.column_index(column).is_none() {
                    return Err(BatchError::MissingColumn {
                        column: column.clone(),
                        path: path.to_path_buf(),
                    });
                }
            }

            let mut records = Vec::with_capacity(table.len());
            let mut stats = BatchStats {
                rows: table.len(),
                ..BatchStats::default()
            };

            for row in 0..table.len() {
                let cell = |name: &str| table.get(row, name).unwrap_or(MISSING).to_string();
                let name = cell(&self.columns.gene_name);
                let region = cell(&self.columns.region);

                let coordinate = match parse_region(&region) {
                    Ok(coordinate) => coordinate,
                    Err(e) => {
                        warn!(
                            row,
                            gene = %name,
                            region = %region,
                            error = %e,
                            "Skipping row with malformed region"
                        );
                        stats.skipped += 1;
                        continue;
                    }
                };

                let regulatory_data = fetcher.fetch(&coordinate, cache).await;
                if regulatory_data.is_none() {
                    stats.unresolved += 1;
                }

                records.push(GeneRecord {
                    name,
                    coordinate,
                    biotype: cell(&self.columns.biotype),
                    regulatory_data,
                });
            }

            info!(
                rows = stats.rows,
                records = records.len(),
                skipped = stats.skipped,
                unresolved = stats.unresolved,
                "Loaded gene list"
            );

            Ok((records, stats))
        }
        .instrument(span)
        .await
    }
}

/// Loads the gene list at `path` with the default column names
pub async fn load_batch<S: RegionSource>(
    path: impl AsRef<Path>,
    fetcher: &RegionFetcher<S>,
    cache: &dyn RegionCache,
) -> Result<Vec<GeneRecord>, BatchError> {
    let (records, _) = BatchLoader::new().load(path, fetcher, cache).await?;
    Ok(records)
}

/// Builds the exported batch table: `name, coordinate, biotype, regulatory_data`
///
/// The payload is written as compact JSON; a failed lookup leaves the cell empty.
pub fn records_to_table(records: &[GeneRecord]) -> Table {
    let mut table = Table::new([
        columns::NAME,
        columns::COORDINATE,
        columns::RECORD_BIOTYPE,
        columns::REGULATORY_DATA,
    ]);
    for record in records {
        let payload = record
            .regulatory_data
            .as_ref()
            .map(|value| value.to_string())
            .unwrap_or_default();
        table.push_row([
            record.name.clone(),
            record.coordinate.to_string(),
            record.biotype.clone(),
            payload,
        ]);
    }
    table
}

/// Writes `records` to `path` as the exported batch table
pub fn export_records(records: &[GeneRecord], path: impl AsRef<Path>) -> Result<(), BatchError> {
    let path = path.as_ref();
    records_to_table(records)
        .write_csv(path)
        .map_err(|e| BatchError::csv(path, e))?;
    info!(path = %path.display(), records = records.len(), "Data exported");
    Ok(())
}
