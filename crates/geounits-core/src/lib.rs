//! Geounits Core - schema-driven SI / Imperial conversion
//!
//! This crate converts numeric values inside JSON documents between SI and
//! Imperial (IP) units. Which fields carry units, and which units, is read
//! from `si_units` / `ip_units` annotations in a JSON Schema.
//!
//! # Main Components
//!
//! - **Unit Map**: built once from a parsed schema; maps every dotted path to
//!   a [`UnitDescriptor`]
//! - **Factor Table**: the fixed set of supported unit pairs
//! - **Converter Synthesis**: turns a path and a system pair into a
//!   [`Converter`] that rescales matching documents
//!
//! # Example
//!
//! ```rust
//! use geounits_core::{convert_schema, UnitMap, UnitMapConfig, UnitSystem};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "properties": {
//!         "stories": { "type": "array", "items": { "$ref": "#/definitions/Story" } }
//!     },
//!     "definitions": {
//!         "Story": {
//!             "type": "object",
//!             "properties": { "height": { "si_units": "m", "ip_units": "ft" } }
//!         }
//!     }
//! });
//!
//! let units = UnitMap::from_schema(&schema, &UnitMapConfig::default());
//! let doc = json!({ "stories": [{ "height": 3 }] });
//!
//! let imperial = convert_schema(&units, &doc, UnitSystem::Si, UnitSystem::Ip).unwrap();
//! assert!(imperial["stories"][0]["height"].as_f64().unwrap() > 9.8);
//! ```
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

pub mod converter;
pub mod error;
pub mod factors;
pub mod system;
pub mod units;

// Re-export main types for convenience
pub use converter::{build_converter, get_converter, Converter, Synthesizer};
pub use error::{ConversionError, Result};
pub use factors::{conversion_factor, FactorTable};
pub use system::UnitSystem;
pub use units::{
    read_units, ScalarUnits, StateLayout, StateNode, UnitDescriptor, UnitMap, UnitMapConfig,
    SCHEMA_ROOT, STATE_ROOT,
};

use serde_json::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a document shaped like the schema itself
pub fn convert_schema(
    units: &UnitMap,
    data: &Value,
    from: UnitSystem,
    to: UnitSystem,
) -> Result<Value> {
    Ok(build_converter(units, SCHEMA_ROOT, from, to)?.apply(data))
}

/// Convert the editor's runtime state document
pub fn convert_state(
    units: &UnitMap,
    data: &Value,
    from: UnitSystem,
    to: UnitSystem,
) -> Result<Value> {
    Ok(build_converter(units, STATE_ROOT, from, to)?.apply(data))
}

/// Convert a library document
///
/// A library is a schema-shaped document with fewer keys.
pub fn convert_library(
    units: &UnitMap,
    data: &Value,
    from: UnitSystem,
    to: UnitSystem,
) -> Result<Value> {
    convert_schema(units, data, from, to)
}

impl UnitMap {
    /// Converter for `path` between two systems
    pub fn converter(&self, path: &str, from: UnitSystem, to: UnitSystem) -> Result<Converter> {
        build_converter(self, path, from, to)
    }

    /// See [`convert_schema`]
    pub fn convert_schema(&self, data: &Value, from: UnitSystem, to: UnitSystem) -> Result<Value> {
        convert_schema(self, data, from, to)
    }

    /// See [`convert_state`]
    pub fn convert_state(&self, data: &Value, from: UnitSystem, to: UnitSystem) -> Result<Value> {
        convert_state(self, data, from, to)
    }

    /// See [`convert_library`]
    pub fn convert_library(&self, data: &Value, from: UnitSystem, to: UnitSystem) -> Result<Value> {
        convert_library(self, data, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_library_and_schema_agree() {
        let schema = json!({
            "properties": {
                "windows": { "type": "array", "items": { "$ref": "#/definitions/Window" } }
            },
            "definitions": {
                "Window": {
                    "type": "object",
                    "properties": { "width": { "si_units": "m", "ip_units": "ft" } }
                }
            }
        });
        let units = UnitMap::from_schema(&schema, &UnitMapConfig::default());
        let library = json!({ "windows": [{ "width": 1.2, "name": "Standard" }] });

        assert_eq!(
            units.convert_library(&library, UnitSystem::Si, UnitSystem::Ip).unwrap(),
            units.convert_schema(&library, UnitSystem::Si, UnitSystem::Ip).unwrap()
        );
    }

    #[test]
    fn test_convert_state_without_state_root() {
        let config = UnitMapConfig {
            library_types: vec![],
            state: Some(StateLayout::default()),
        };
        let units = UnitMap::from_schema(&json!({}), &config);
        let state = json!({ "geometry": [{ "vertices": [] }] });

        assert!(units.get(STATE_ROOT).is_none());
        assert_eq!(
            convert_state(&units, &state, UnitSystem::Ip, UnitSystem::Si).unwrap(),
            state
        );
    }
}
