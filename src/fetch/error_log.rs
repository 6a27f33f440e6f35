// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Append-only log of failed region lookups
//!
//! Each failure becomes one line, `Error for {region}: {message}`. The file is
//! meant for manual follow-up and is never read back by regscan.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Handle to the error log file
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    /// Creates a handle; the file (and its directory) is created on first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry
    pub async fn record(&self, identifier: &str, message: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format_entry(identifier, message).as_bytes())
            .await?;
        file.flush().await
    }
}

fn format_entry(identifier: &str, message: &str) -> String {
    format!("Error for {identifier}: {message}\n")
}
