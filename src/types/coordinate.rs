// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Genomic coordinates and their canonical cache key form

use std::fmt;
use std::str::FromStr;

use crate::errors::InputError;

/// A genomic region: chromosome plus inclusive start and end positions
///
/// Construction validates that the chromosome is non-empty and that
/// `start <= end`, so every `Coordinate` in the system is well-formed.
///
/// The [`Display`](fmt::Display) form is the canonical cache key and the
/// region segment of the service URL:
///
/// ```
/// use regscan::Coordinate;
///
/// let coordinate: Coordinate = "1:1000-2000".parse().unwrap();
/// assert_eq!(coordinate.chromosome(), "1");
/// assert_eq!(coordinate.start(), 1000);
/// assert_eq!(coordinate.end(), 2000);
/// assert_eq!(coordinate.to_string(), "1:1000-2000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    chromosome: String,
    start: u64,
    end: u64,
}

impl Coordinate {
    /// Creates a validated coordinate
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64) -> Result<Self, InputError> {
        let chromosome = chromosome.into();
        if chromosome.is_empty() {
            return Err(InputError::EmptyChromosome {
                value: format!(":{start}-{end}"),
            });
        }
        if start > end {
            return Err(InputError::InvertedRange {
                chromosome,
                start,
                end,
            });
        }
        Ok(Self {
            chromosome,
            start,
            end,
        })
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Canonical cache key, `"{chromosome}:{start}-{end}"`
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

/// Parses a region field.
///
/// Accepted forms:
/// - `chrom:start-end`
/// - `chrom:start` (single position, `end == start`)
/// - `chrom:start:end[:strand]` (BioMart `chromosomal_region` export)
impl FromStr for Coordinate {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let (chromosome, positions) =
            value
                .split_once(':')
                .ok_or_else(|| InputError::MissingSeparator {
                    value: value.to_string(),
                })?;

        let chromosome = chromosome.trim();
        if chromosome.is_empty() {
            return Err(InputError::EmptyChromosome {
                value: value.to_string(),
            });
        }

        let (start, end) = if positions.contains(':') {
            let mut parts = positions.split(':');
            let start = parts.next().unwrap_or_default();
            let end = parts.next().unwrap_or_default();
            (start, end)
        } else if let Some((start, end)) = positions.split_once('-') {
            (start, end)
        } else {
            (positions, positions)
        };

        let start = parse_position(value, start)?;
        let end = parse_position(value, end)?;
        Coordinate::new(chromosome, start, end)
    }
}

fn parse_position(value: &str, position: &str) -> Result<u64, InputError> {
    position
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidPosition {
            value: value.to_string(),
            position: position.to_string(),
        })
}
