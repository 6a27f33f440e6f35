// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Parsed form of a regulatory annotation payload
//!
//! The service returns a JSON array of feature objects. Once a payload has been
//! written to a table it comes back as text, sometimes in single-quoted
//! pseudo-JSON. [`ParsedAnnotation`] is where that loosely-typed value is pinned
//! down: past this point the flattener only deals with "no features", "one
//! representative feature", or "unusable".

use serde_json::{Map, Value};

/// Separator used when flattening nested feature objects into column names.
pub const NESTED_KEY_SEPARATOR: char = '.';

/// A regulatory annotation payload after parsing
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedAnnotation {
    /// No features: empty array, null, or an empty cell
    Empty,
    /// The first feature of a non-empty array; further features are ignored
    Single(Map<String, Value>),
    /// The payload could not be interpreted; treated as having no features
    Malformed(String),
}

impl ParsedAnnotation {
    /// Interprets an already-decoded payload value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => ParsedAnnotation::Empty,
            Value::Array(features) => match features.first() {
                None => ParsedAnnotation::Empty,
                Some(Value::Object(first)) => ParsedAnnotation::Single(first.clone()),
                Some(other) => ParsedAnnotation::Malformed(format!(
                    "first feature is not an object: {other}"
                )),
            },
            other => ParsedAnnotation::Malformed(format!(
                "expected an array of features, found {}",
                value_kind(other)
            )),
        }
    }

    /// Parses a payload cell read back from a table.
    ///
    /// The text is decoded as JSON first; if that fails, single quotes are
    /// replaced with double quotes and decoding is retried. An absent or blank
    /// cell is [`ParsedAnnotation::Empty`].
    pub fn parse_cell(cell: Option<&str>) -> Self {
        let Some(text) = cell.map(str::trim).filter(|text| !text.is_empty()) else {
            return ParsedAnnotation::Empty;
        };

        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(&value),
            Err(_) => match serde_json::from_str::<Value>(&text.replace('\'', "\"")) {
                Ok(value) => Self::from_value(&value),
                Err(e) => ParsedAnnotation::Malformed(e.to_string()),
            },
        }
    }

    /// Returns `true` unless a feature is available for expansion.
    pub fn is_empty(&self) -> bool {
        !matches!(self, ParsedAnnotation::Single(_))
    }

    /// Scalar columns of the representative feature, in payload field order.
    ///
    /// Nested objects are flattened into `parent.child` names. Empty for
    /// anything but [`ParsedAnnotation::Single`].
    pub fn columns(&self) -> Vec<(String, String)> {
        let mut columns = Vec::new();
        if let ParsedAnnotation::Single(feature) = self {
            flatten_object(None, feature, &mut columns);
        }
        columns
    }
}

fn flatten_object(
    prefix: Option<&str>,
    object: &Map<String, Value>,
    out: &mut Vec<(String, String)>,
) {
    for (key, value) in object {
        let name = match prefix {
            Some(prefix) => format!("{prefix}{NESTED_KEY_SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_object(Some(&name), nested, out),
            scalar => out.push((name, render_scalar(scalar))),
        }
    }
}

/// Renders a JSON value as a table cell.
pub(crate) fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_inputs() {
        assert_eq!(ParsedAnnotation::parse_cell(None), ParsedAnnotation::Empty);
        assert_eq!(ParsedAnnotation::parse_cell(Some("  ")), ParsedAnnotation::Empty);
        assert_eq!(ParsedAnnotation::parse_cell(Some("[]")), ParsedAnnotation::Empty);
        assert_eq!(ParsedAnnotation::parse_cell(Some("null")), ParsedAnnotation::Empty);
    }

    #[test]
    fn test_single_quoted_payload() {
        let parsed = ParsedAnnotation::parse_cell(Some("[{'a': 1, 'b': 2}]"));
        assert_eq!(
            parsed.columns(),
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_valid_json_with_apostrophe_is_kept_verbatim() {
        let parsed = ParsedAnnotation::parse_cell(Some(r#"[{"description": "5' flank"}]"#));
        assert_eq!(
            parsed.columns(),
            vec![("description".to_string(), "5' flank".to_string())]
        );
    }

    #[test]
    fn test_only_first_feature_is_expanded() {
        let value = json!([{"id": "ENSR1"}, {"id": "ENSR2"}]);
        let parsed = ParsedAnnotation::from_value(&value);
        assert_eq!(parsed.columns(), vec![("id".to_string(), "ENSR1".to_string())]);
    }

    #[test]
    fn test_nested_objects_use_dotted_names() {
        let value = json!([{
            "id": "ENSR1",
            "source": {"name": "Ensembl", "version": 110},
            "tags": ["a", "b"],
            "score": null
        }]);
        let columns = ParsedAnnotation::from_value(&value).columns();
        assert!(columns.contains(&("source.name".to_string(), "Ensembl".to_string())));
        assert!(columns.contains(&("source.version".to_string(), "110".to_string())));
        assert!(columns.contains(&("tags".to_string(), r#"["a","b"]"#.to_string())));
        assert!(columns.contains(&("score".to_string(), String::new())));
    }

    #[test]
    fn test_columns_follow_payload_field_order() {
        let parsed = ParsedAnnotation::parse_cell(Some(
            r#"[{"start": 10, "id": "ENSR1", "bound": {"start": 5, "end": 20}, "end": 12}]"#,
        ));
        let names: Vec<String> = parsed.columns().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["start", "id", "bound.start", "bound.end", "end"]);
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(
            ParsedAnnotation::parse_cell(Some("not json at all")),
            ParsedAnnotation::Malformed(_)
        ));
        assert!(matches!(
            ParsedAnnotation::from_value(&json!({"error": "region too large"})),
            ParsedAnnotation::Malformed(_)
        ));
        assert!(matches!(
            ParsedAnnotation::from_value(&json!([1, 2])),
            ParsedAnnotation::Malformed(_)
        ));
        assert!(ParsedAnnotation::parse_cell(Some("{{")).is_empty());
    }
}
