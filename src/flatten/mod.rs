// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Flattening of embedded annotation payloads into table columns
//!
//! An exported batch table carries the raw service response of each gene in a
//! payload column (`regulatory_data`). [`RecordFlattener`] replaces that
//! column with the scalar fields of the first regulatory feature of each row:
//!
//! | name | regulatory_data                   |    | name | id    | start |
//! |------|-----------------------------------|----|------|-------|-------|
//! | A    | `[{"id": "ENSR1", "start": 5}]`   | => | A    | ENSR1 | 5     |
//! | B    | `[]`                              |    | B    |       |       |
//!
//! The output header is the union of the columns produced by every row, so
//! all rows are parsed before the first one is emitted. Rows lacking a column
//! get the missing-value marker.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::config::constants::columns;
use crate::errors::FlattenError;
use crate::spans;
use crate::table::{Table, MISSING};
use crate::types::annotation::ParsedAnnotation;

/// What happens to rows whose payload holds no features
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyAnnotationPolicy {
    /// Keep the row with its original columns only
    #[default]
    Retain,
    /// Leave the row out of the flattened table
    Drop,
}

/// Expands a table's payload column into scalar columns
#[derive(Debug, Clone)]
pub struct RecordFlattener {
    payload_column: String,
    policy: EmptyAnnotationPolicy,
}

impl Default for RecordFlattener {
    fn default() -> Self {
        Self {
            payload_column: columns::REGULATORY_DATA.to_string(),
            policy: EmptyAnnotationPolicy::default(),
        }
    }
}

impl RecordFlattener {
    pub fn new(policy: EmptyAnnotationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Use a payload column other than `regulatory_data`
    pub fn with_payload_column(mut self, column: impl Into<String>) -> Self {
        self.payload_column = column.into();
        self
    }

    pub fn payload_column(&self) -> &str {
        &self.payload_column
    }

    pub fn policy(&self) -> EmptyAnnotationPolicy {
        self.policy
    }

    /// Flattens `table`, producing one row per retained input row
    ///
    /// Output columns are the input columns without the payload column,
    /// followed by expansion columns in the order they were first seen. A
    /// payload field named like an input column replaces that row's value.
    ///
    /// # Errors
    ///
    /// [`FlattenError::MissingPayloadColumn`] if the table has no payload column.
    pub fn flatten(&self, table: &Table) -> Result<Table, FlattenError> {
        let span = spans::flatten_table(table.len(), &self.payload_column);
        let _guard = span.enter();

        let payload_index = table
            .column_index(&self.payload_column)
            .ok_or_else(|| FlattenError::missing_payload_column(&self.payload_column))?;

        let mut header: Vec<String> = Vec::with_capacity(table.columns().len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (index, column) in table.columns().iter().enumerate() {
            if index != payload_index {
                positions.entry(column.clone()).or_insert(header.len());
                header.push(column.clone());
            }
        }
        let base_width = header.len();

        // First pass: parse every payload and collect the column union
        let mut pending = Vec::with_capacity(table.len());
        let mut dropped = 0usize;
        for (row_index, row) in table.rows().iter().enumerate() {
            let parsed = ParsedAnnotation::parse_cell(row.get(payload_index).map(String::as_str));

            if let ParsedAnnotation::Malformed(reason) = &parsed {
                debug!(
                    row = row_index,
                    reason = %reason,
                    "Unusable annotation payload, treating as empty"
                );
            }

            if parsed.is_empty() && self.policy == EmptyAnnotationPolicy::Drop {
                dropped += 1;
                continue;
            }

            // The payload column is removed from the output, fields named after it too
            let expansion: Vec<(String, String)> = parsed
                .columns()
                .into_iter()
                .filter(|(name, _)| *name != self.payload_column)
                .collect();
            for (name, _) in &expansion {
                if !positions.contains_key(name) {
                    positions.insert(name.clone(), header.len());
                    header.push(name.clone());
                }
            }
            pending.push((row, expansion));
        }

        // Second pass: emit rows against the full header
        let mut output = Table::new(header.iter().cloned());
        for (row, expansion) in pending {
            let mut cells: Vec<String> = row
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != payload_index)
                .map(|(_, cell)| cell.clone())
                .collect();
            cells.resize(header.len(), MISSING.to_string());

            for (name, value) in expansion {
                if let Some(&position) = positions.get(&name) {
                    cells[position] = value;
                }
            }
            output.push_row(cells);
        }

        info!(
            rows_in = table.len(),
            rows_out = output.len(),
            added_columns = header.len() - base_width,
            dropped,
            "Completed flattening"
        );

        Ok(output)
    }

    /// Reads the table at `input`, flattens it and writes the result to `output`
    pub fn flatten_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), FlattenError> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.exists() {
            return Err(FlattenError::FileNotFound {
                path: input.to_path_buf(),
            });
        }

        let table = Table::read_csv(input).map_err(|e| FlattenError::csv(input, e))?;
        if table.columns().is_empty() {
            return Err(FlattenError::EmptyFile {
                path: input.to_path_buf(),
            });
        }

        let flattened = self.flatten(&table)?;
        flattened
            .write_csv(output)
            .map_err(|e| FlattenError::csv(output, e))?;

        info!(path = %output.display(), rows = flattened.len(), "Flattened table saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> Table {
        let mut table = Table::new(["name", "regulatory_data"]);
        for (name, payload) in rows {
            table.push_row([*name, *payload]);
        }
        table
    }

    #[test]
    fn test_empty_payload_keeps_original_columns() {
        let input = table(&[("A", "[]"), ("B", "")]);
        let output = RecordFlattener::default().flatten(&input).unwrap();

        assert_eq!(output.columns(), ["name"]);
        assert_eq!(output.rows(), [vec!["A".to_string()], vec!["B".to_string()]]);
    }

    #[test]
    fn test_single_quoted_payload_is_expanded() {
        let input = table(&[("A", "[{'a': 1, 'b': 2}]")]);
        let output = RecordFlattener::default().flatten(&input).unwrap();

        assert_eq!(output.columns(), ["name", "a", "b"]);
        assert_eq!(output.get(0, "a"), Some("1"));
        assert_eq!(output.get(0, "b"), Some("2"));
        assert!(output.column_index("regulatory_data").is_none());
    }

    #[test]
    fn test_column_union_fills_missing() {
        let input = table(&[("A", r#"[{"x": 1}]"#), ("B", r#"[{"y": 2}]"#), ("C", "[]")]);
        let output = RecordFlattener::default().flatten(&input).unwrap();

        assert_eq!(output.columns(), ["name", "x", "y"]);
        assert_eq!(output.rows()[0], ["A", "1", MISSING]);
        assert_eq!(output.rows()[1], ["B", MISSING, "2"]);
        assert_eq!(output.rows()[2], ["C", MISSING, MISSING]);
    }

    #[test]
    fn test_drop_policy_removes_unannotated_rows() {
        let input = table(&[("A", r#"[{"x": 1}]"#), ("B", "[]"), ("C", "garbage")]);
        let output = RecordFlattener::new(EmptyAnnotationPolicy::Drop)
            .flatten(&input)
            .unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!(output.get(0, "name"), Some("A"));
    }

    #[test]
    fn test_retain_policy_keeps_malformed_rows() {
        let input = table(&[("A", "garbage"), ("B", r#"{"error": "bad region"}"#)]);
        let output = RecordFlattener::default().flatten(&input).unwrap();

        assert_eq!(output.columns(), ["name"]);
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn test_payload_column_in_the_middle() {
        let mut input = Table::new(["name", "regulatory_data", "biotype"]);
        input.push_row(["A", r#"[{"id": "ENSR1"}]"#, "protein_coding"]);
        let output = RecordFlattener::default().flatten(&input).unwrap();

        assert_eq!(output.columns(), ["name", "biotype", "id"]);
        assert_eq!(output.rows()[0], ["A", "protein_coding", "ENSR1"]);
    }

    #[test]
    fn test_colliding_field_overwrites_original_value() {
        let mut input = Table::new(["name", "regulatory_data"]);
        input.push_row(["A", r#"[{"name": "feature-name"}]"#]);
        let output = RecordFlattener::default().flatten(&input).unwrap();

        assert_eq!(output.columns(), ["name"]);
        assert_eq!(output.get(0, "name"), Some("feature-name"));
    }

    #[test]
    fn test_field_named_like_payload_column_is_dropped() {
        let input = table(&[("A", r#"[{"id": "ENSR1", "regulatory_data": "nested"}]"#)]);
        let output = RecordFlattener::default().flatten(&input).unwrap();

        assert_eq!(output.columns(), ["name", "id"]);
        assert_eq!(output.rows()[0], ["A", "ENSR1"]);
    }

    #[test]
    fn test_missing_payload_column_fails() {
        let input = Table::new(["name", "coordinate"]);
        let err = RecordFlattener::default().flatten(&input).unwrap_err();
        assert!(matches!(
            err,
            FlattenError::MissingPayloadColumn { column } if column == "regulatory_data"
        ));
    }

    #[test]
    fn test_custom_payload_column() {
        let mut input = Table::new(["gene", "features"]);
        input.push_row(["A", r#"[{"id": "ENSR1"}]"#]);
        let output = RecordFlattener::default()
            .with_payload_column("features")
            .flatten(&input)
            .unwrap();

        assert_eq!(output.columns(), ["gene", "id"]);
    }
}
