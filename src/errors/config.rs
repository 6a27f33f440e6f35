// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for configuration loading.

/// Errors raised while building a [`RegscanConfig`](crate::RegscanConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The annotation service base URL could not be parsed.
    #[error("Invalid server URL '{value}': {source}")]
    InvalidServerUrl {
        /// The rejected value
        value: String,
        /// The URL parse error
        #[source]
        source: url::ParseError,
    },

    /// An environment variable holds a value of the wrong shape.
    #[error("Invalid value '{value}' for {variable}: {reason}")]
    InvalidVariable {
        /// Environment variable name
        variable: String,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The species segment of the request path is empty.
    #[error("Species must not be empty")]
    EmptySpecies,
}

impl ConfigError {
    /// Create an `InvalidVariable` error.
    pub fn invalid_variable(
        variable: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidVariable {
            variable: variable.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
