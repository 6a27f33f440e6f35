// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared across regscan.
//!
//! - [`Coordinate`](coordinate::Coordinate): validated genomic region and its cache key
//! - [`ParsedAnnotation`](annotation::ParsedAnnotation): annotation payload after parsing
//! - [`GeneRecord`](record::GeneRecord): one gene with its fetched annotation

pub mod annotation;
pub mod coordinate;
pub mod record;

// Note: Public types are re-exported from lib.rs, not here
