// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ensembl REST client for regulatory features overlapping a region

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::RegionSource;
use crate::config::RegscanConfig;
use crate::errors::FetchError;
use crate::types::coordinate::Coordinate;

const USER_AGENT: &str = concat!("regscan/", env!("CARGO_PKG_VERSION"));

/// Region source backed by the Ensembl REST `overlap/region` endpoint
///
/// Issues exactly one `GET` per lookup, with no retries. The configured
/// timeout bounds the whole request.
#[derive(Debug, Clone)]
pub struct EnsemblClient {
    http_client: reqwest::Client,
    server_url: Url,
    species: String,
}

impl EnsemblClient {
    /// Creates a client from the run configuration
    pub fn new(config: &RegscanConfig) -> Result<Self, FetchError> {
        Self::with_settings(
            config.server_url.clone(),
            config.species.clone(),
            config.request_timeout,
        )
    }

    pub fn with_settings(
        server_url: Url,
        species: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            server_url,
            species: species.into(),
        })
    }

    /// Request URL for a region:
    /// `{server}/overlap/region/{species}/{chrom}:{start}-{end}?feature=regulatory`
    pub fn region_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}/overlap/region/{}/{}?feature=regulatory",
            self.server_url.as_str().trim_end_matches('/'),
            self.species,
            coordinate
        )
    }
}

#[async_trait]
impl RegionSource for EnsemblClient {
    async fn fetch_region(&self, coordinate: &Coordinate) -> Result<Value, FetchError> {
        let url = self.region_url(coordinate);
        debug!(url = %url, "Querying region annotation service");

        let response = self
            .http_client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status.as_u16(), url));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(&url, e))?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "Received response");

        serde_json::from_slice(&body).map_err(|e| FetchError::decode(url, e))
    }

    fn name(&self) -> &'static str {
        "EnsemblClient"
    }
}
