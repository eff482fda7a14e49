//! Converter synthesis
//!
//! A [`Converter`] is a compiled conversion plan for one unit map path and
//! one pair of unit systems. It is built once by walking the unit map and can
//! then be applied to any number of documents of the matching shape.
//!
//! # Module Organization
//!
//! - [`synthesis`] - builds converters from the unit map
//! - [`tests`] - converter behaviour against small schemas
//!
//! # Example
//!
//! ```rust
//! use geounits_core::{get_converter, UnitMap, UnitMapConfig};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "definitions": {
//!         "Room": {
//!             "type": "object",
//!             "properties": { "area": { "si_units": "m", "ip_units": "ft" } }
//!         }
//!     }
//! });
//! let units = UnitMap::from_schema(&schema, &UnitMapConfig::default());
//!
//! let to_feet = get_converter(&units, "Room", "si_units", "ip_units").unwrap();
//! let room = to_feet.apply(&json!({ "area": 10, "name": "Lobby" }));
//! assert_eq!(room["name"], json!("Lobby"));
//! ```
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

pub mod synthesis;


pub use synthesis::{build_converter, get_converter, Synthesizer};

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// A synthesized conversion for one path and system pair
#[derive(Debug, Clone, PartialEq)]
pub enum Converter {
    /// Return the input unchanged
    Identity,
    /// Multiply a numeric input by a factor
    Scale(f64),
    /// Apply the element converter to every item of an array
    Each(Box<Converter>),
    /// Apply per-field converters; fields without one pass through
    Fields(BTreeMap<String, Converter>),
}

impl Converter {
    /// Convert a value
    ///
    /// Values whose shape does not match the plan (a string where a number
    /// was expected, a number where an array was expected) come back
    /// unchanged.
    pub fn apply(&self, value: &Value) -> Value {
        match (self, value) {
            (Converter::Identity, _) => value.clone(),
            (Converter::Scale(factor), Value::Number(n)) => match n.as_f64() {
                Some(x) => scaled(x * factor),
                None => value.clone(),
            },
            (Converter::Each(element), Value::Array(items)) => {
                Value::Array(items.iter().map(|item| element.apply(item)).collect())
            }
            (Converter::Fields(fields), Value::Object(obj)) => {
                let converted: Map<String, Value> = obj
                    .iter()
                    .map(|(key, field)| {
                        let field = match fields.get(key) {
                            Some(converter) => converter.apply(field),
                            None => field.clone(),
                        };
                        (key.clone(), field)
                    })
                    .collect();
                Value::Object(converted)
            }
            _ => value.clone(),
        }
    }

    /// Whether applying this converter can change anything
    pub fn is_identity(&self) -> bool {
        match self {
            Converter::Identity => true,
            Converter::Scale(_) => false,
            Converter::Each(element) => element.is_identity(),
            Converter::Fields(fields) => fields.values().all(Converter::is_identity),
        }
    }

    /// Turn the plan into a plain function
    pub fn into_fn(self) -> impl Fn(&Value) -> Value + Send + Sync + 'static {
        move |value| self.apply(value)
    }
}

/// JSON has no representation for non-finite numbers
fn scaled(x: f64) -> Value {
    Number::from_f64(x).map(Value::Number).unwrap_or(Value::Null)
}
