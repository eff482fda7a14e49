//! Reading unit annotations out of JSON Schema nodes
//!
//! Malformed nodes never fail; they simply carry no units.
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

use super::{ScalarUnits, UnitDescriptor};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const REF_PREFIXES: [&str; 2] = ["#/definitions/", "#/$defs/"];

/// Derive the unit descriptor for one schema node
///
/// Checked in order: a direct `si_units` annotation, an `object` type with
/// unit-bearing properties, an `array` of `$ref` items, then a bare `$ref`.
pub fn read_units(node: &Value) -> Option<UnitDescriptor> {
    let node = node.as_object()?;

    if let Some(si_units) = node.get("si_units") {
        return si_units.as_str().map(|si_units| {
            UnitDescriptor::Scalar(ScalarUnits {
                si_units: si_units.to_string(),
                ip_units: node
                    .get("ip_units")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        });
    }

    match node.get("type").and_then(Value::as_str) {
        Some("object") => {
            let fields = node
                .get("properties")
                .and_then(Value::as_object)
                .map(read_fields)
                .unwrap_or_default();
            return (!fields.is_empty()).then_some(UnitDescriptor::Composite(fields));
        }
        Some("array") => {
            if let Some(items_ref) = node
                .get("items")
                .and_then(|items| items.get("$ref"))
                .and_then(Value::as_str)
            {
                return Some(UnitDescriptor::array_of(strip_ref_prefix(items_ref)));
            }
        }
        _ => {}
    }

    node.get("$ref")
        .and_then(Value::as_str)
        .map(|target| UnitDescriptor::reference(strip_ref_prefix(target)))
}

/// Unit-bearing fields among the schema's top-level `properties`
pub fn read_properties(schema: &Value) -> BTreeMap<String, UnitDescriptor> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(read_fields)
        .unwrap_or_default()
}

/// Named definitions of a schema (`definitions`, or `$defs` when absent)
pub fn definitions(schema: &Value) -> impl Iterator<Item = (&String, &Value)> {
    schema
        .get("definitions")
        .or_else(|| schema.get("$defs"))
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|defs| defs.iter())
}

fn read_fields(properties: &Map<String, Value>) -> BTreeMap<String, UnitDescriptor> {
    properties
        .iter()
        .filter_map(|(name, node)| read_units(node).map(|units| (name.clone(), units)))
        .collect()
}

/// Reduce a local reference to the definition name it points at
pub fn strip_ref_prefix(reference: &str) -> String {
    REF_PREFIXES
        .iter()
        .find_map(|prefix| reference.strip_prefix(prefix))
        .unwrap_or(reference)
        .to_string()
}
