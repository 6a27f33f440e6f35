// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gene records assembled from a gene list batch

use serde_json::Value;

use super::coordinate::Coordinate;

/// One gene from an input list together with the annotation fetched for its region
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRecord {
    /// Gene name (e.g. `TP53`)
    pub name: String,
    /// Region the annotation was requested for
    pub coordinate: Coordinate,
    /// Gene biotype (e.g. `protein_coding`)
    pub biotype: String,
    /// Raw service response, `None` when the lookup failed
    pub regulatory_data: Option<Value>,
}
