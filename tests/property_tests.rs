// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for coordinates and flattening
//!
//! These tests use proptest to validate invariants of the canonical region key
//! and of the flattened table layout across arbitrary inputs.

use proptest::prelude::*;
use regscan::{Coordinate, RecordFlattener, Table, MISSING};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

// Helper to generate chromosome names (no ':' separator)
fn arb_chromosome() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=22).prop_map(|n| n.to_string()),
        Just("X".to_string()),
        Just("MT".to_string()),
        "[A-Za-z0-9_.]{1,12}",
    ]
}

// Helper to generate ordered start/end pairs
fn arb_range() -> impl Strategy<Value = (u64, u64)> {
    (0u64..=300_000_000, 0u64..=1_000_000).prop_map(|(start, len)| (start, start + len))
}

// Helper to generate one feature: a few keys from a small alphabet
fn arb_feature() -> impl Strategy<Value = BTreeMap<String, u32>> {
    prop::collection::btree_map("[a-f]", any::<u32>(), 0..4)
}

proptest! {
    /// Property: the canonical key parses back to the same coordinate
    #[test]
    fn prop_canonical_key_round_trip(chromosome in arb_chromosome(), (start, end) in arb_range()) {
        let coordinate = Coordinate::new(chromosome, start, end).unwrap();
        let parsed: Coordinate = coordinate.cache_key().parse().unwrap();
        prop_assert_eq!(parsed, coordinate);
    }

    /// Property: the colon-separated export form names the same region
    #[test]
    fn prop_colon_form_matches_dash_form(
        chromosome in arb_chromosome(),
        (start, end) in arb_range(),
        strand in prop_oneof![Just("1"), Just("-1")],
    ) {
        let colon: Coordinate = format!("{chromosome}:{start}:{end}:{strand}").parse().unwrap();
        let dash: Coordinate = format!("{chromosome}:{start}-{end}").parse().unwrap();
        prop_assert_eq!(colon, dash);
    }

    /// Property: construction rejects inverted ranges
    #[test]
    fn prop_inverted_range_rejected(
        chromosome in arb_chromosome(),
        start in 1u64..=1_000_000,
        gap in 1u64..=1000,
    ) {
        let end = start.saturating_sub(gap);
        prop_assume!(end < start);
        prop_assert!(Coordinate::new(chromosome, start, end).is_err());
    }

    /// Property: the flattened header is the original columns plus the union of
    /// feature keys, and every row has a value exactly for its own keys
    #[test]
    fn prop_column_union(features in prop::collection::vec(arb_feature(), 1..8)) {
        let mut input = Table::new(["name", "regulatory_data"]);
        for (index, feature) in features.iter().enumerate() {
            let payload = if feature.is_empty() {
                "[]".to_string()
            } else {
                let object: Map<String, Value> = feature
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(*v)))
                    .collect();
                Value::Array(vec![Value::Object(object)]).to_string()
            };
            input.push_row([format!("gene{index}"), payload]);
        }

        let output = RecordFlattener::default().flatten(&input).unwrap();

        let union: BTreeSet<&String> = features.iter().flat_map(|f| f.keys()).collect();
        prop_assert_eq!(output.len(), features.len());
        prop_assert_eq!(output.columns().len(), 1 + union.len());
        prop_assert_eq!(output.columns()[0].as_str(), "name");

        for (row, feature) in features.iter().enumerate() {
            prop_assert_eq!(output.rows()[row].len(), output.columns().len());
            for key in &union {
                let expected = feature.get(*key).map(|v| v.to_string());
                let actual = output.get(row, key).unwrap();
                match expected {
                    Some(value) => prop_assert_eq!(actual, value.as_str()),
                    None => prop_assert_eq!(actual, MISSING),
                }
            }
        }
    }
}
