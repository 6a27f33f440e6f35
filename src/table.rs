// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Rectangular string tables read from and written to CSV

use std::io;
use std::path::Path;

/// Missing-value marker used when a row has no value for a column
pub const MISSING: &str = "";

const UTF8_BOM: char = '\u{feff}';

/// A header plus rows of string cells, all rows as wide as the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given header
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell of `row` in column `name`, if both exist
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let column = self.column_index(name)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Appends a row, padding it with [`MISSING`] or truncating it to the header width
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), MISSING.to_string());
        self.rows.push(row);
    }

    /// Reads a CSV document with a header row
    ///
    /// A leading UTF-8 byte order mark is ignored. Rows with a different
    /// number of fields than the header are padded or truncated.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if let Some(first) = columns.first_mut() {
            if let Some(stripped) = first.strip_prefix(UTF8_BOM) {
                *first = stripped.to_string();
            }
        }

        let mut table = Table::new(columns);
        for record in reader.records() {
            table.push_row(record?.iter());
        }
        Ok(table)
    }

    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, csv::Error> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Writes the table as CSV with a header row
    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the table to `path`, creating parent directories as needed
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), csv::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.to_writer(io::BufWriter::new(file))
    }
}
