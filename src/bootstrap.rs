// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use tracing::info;

use crate::{EnsemblClient, Pipeline, RegscanConfig};

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load configuration (and .env) from the environment
    let config = RegscanConfig::from_env().context("Invalid configuration")?;

    info!(
        server = %config.server_url,
        species = %config.species,
        timeout_secs = config.request_timeout.as_secs(),
        input_dir = %config.input_dir.display(),
        "Starting regscan"
    );

    let client = EnsemblClient::new(&config).context("Failed to build HTTP client")?;
    let pipeline = Pipeline::new(config, client);

    let summary = pipeline.process_all().await?;

    for failure in &summary.failed {
        tracing::error!(file = %failure.file_name, error = %failure.error, "File not processed");
    }
    if !summary.is_success() {
        anyhow::bail!("{summary}");
    }

    Ok(())
}
