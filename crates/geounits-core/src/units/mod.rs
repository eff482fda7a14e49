//! Unit map construction and lookup
//!
//! A [`UnitMap`] is derived once from a JSON Schema and records, for every
//! path that carries units, how values at that path convert:
//!
//! - [`UnitDescriptor::Scalar`] - a numeric leaf with an SI / IP label pair
//! - [`UnitDescriptor::Ref`] - indirection to another top-level entry
//! - [`UnitDescriptor::ArrayOf`] - a sequence whose elements follow another entry
//! - [`UnitDescriptor::Composite`] - an object with unit-bearing fields
//!
//! Top-level keys are the schema's definition names plus two synthetic roots:
//! `$schema` (the schema's own properties) and `$state` (the editor's runtime
//! document, see [`state`]).
//!
//! # Example
//!
//! ```rust
//! use geounits_core::{UnitMap, UnitMapConfig};
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
//!
//! let units = UnitMap::from_schema(&schema, &UnitMapConfig::default());
//! assert!(units.lookup("Room.area").unwrap().is_some());
//! ```
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

pub mod reader;
pub mod state;

pub use reader::read_units;
pub use state::{StateLayout, StateNode, UnitMapConfig};

use crate::error::{ConversionError, Result};
use crate::system::UnitSystem;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Root key for the schema's top-level properties
pub const SCHEMA_ROOT: &str = "$schema";

/// Root key for the runtime state document
pub const STATE_ROOT: &str = "$state";

/// A scalar unit pair as annotated in the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarUnits {
    pub si_units: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_units: Option<String>,
}

impl ScalarUnits {
    pub fn new(si_units: impl Into<String>, ip_units: impl Into<String>) -> Self {
        Self {
            si_units: si_units.into(),
            ip_units: Some(ip_units.into()),
        }
    }

    /// Label used by `system`, if declared
    pub fn label(&self, system: UnitSystem) -> Option<&str> {
        match system {
            UnitSystem::Si => Some(self.si_units.as_str()),
            UnitSystem::Ip => self.ip_units.as_deref(),
        }
    }

    /// Both systems use the same label, so conversion is a no-op
    pub fn is_degenerate(&self) -> bool {
        self.ip_units.as_deref() == Some(self.si_units.as_str())
    }
}

/// How values at one unit map path convert between systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitDescriptor {
    Scalar(ScalarUnits),
    Ref {
        #[serde(rename = "$ref")]
        target: String,
    },
    ArrayOf {
        #[serde(rename = "arrayOf")]
        element: String,
    },
    Composite(BTreeMap<String, UnitDescriptor>),
}

impl UnitDescriptor {
    pub fn reference(target: impl Into<String>) -> Self {
        Self::Ref {
            target: target.into(),
        }
    }

    pub fn array_of(element: impl Into<String>) -> Self {
        Self::ArrayOf {
            element: element.into(),
        }
    }
}

/// Immutable lookup from dotted path to [`UnitDescriptor`]
///
/// Cloning shares the underlying tree, so one map built at startup can be
/// handed to every caller and thread.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitMap {
    entries: Arc<BTreeMap<String, UnitDescriptor>>,
}

impl UnitMap {
    /// Build the unit map for a parsed JSON Schema
    pub fn from_schema(schema: &Value, config: &UnitMapConfig) -> Self {
        Self::from_schema_with_layout(schema, &config.layout())
    }

    /// Build the unit map, composing `$state` from an explicit layout
    pub fn from_schema_with_layout(schema: &Value, layout: &StateLayout) -> Self {
        let mut entries = BTreeMap::new();

        let schema_fields = reader::read_properties(schema);
        debug!(
            fields = schema_fields.len(),
            "Read unit-bearing schema properties"
        );
        entries.insert(
            SCHEMA_ROOT.to_string(),
            UnitDescriptor::Composite(schema_fields),
        );

        let mut kept = 0usize;
        let mut skipped = 0usize;
        for (name, definition) in reader::definitions(schema) {
            match read_units(definition) {
                Some(descriptor) => {
                    entries.insert(name.clone(), descriptor);
                    kept += 1;
                }
                None => skipped += 1,
            }
        }
        debug!(kept, skipped, "Read unit-bearing schema definitions");

        let partial = Self::from_entries(entries);
        let state = layout.resolve(&partial);

        let mut entries =
            Arc::try_unwrap(partial.entries).unwrap_or_else(|shared| (*shared).clone());
        match state {
            Some(descriptor) => {
                entries.insert(STATE_ROOT.to_string(), descriptor);
            }
            None => debug!("State layout resolved to no unit-bearing fields"),
        }

        Self::from_entries(entries)
    }

    /// Wrap an already-built set of top-level entries
    pub fn from_entries(entries: BTreeMap<String, UnitDescriptor>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Find the descriptor at a dotted path
    ///
    /// Returns `Ok(None)` when nothing unit-bearing lives at the path, and an
    /// error when the path continues past a scalar, reference, or array entry.
    pub fn lookup(&self, path: &str) -> Result<Option<&UnitDescriptor>> {
        let mut segments = path.split('.');
        let root = segments.next().unwrap_or_default();

        let mut current = match self.entries.get(root) {
            Some(descriptor) => descriptor,
            None => return Ok(None),
        };

        for segment in segments {
            current = match current {
                UnitDescriptor::Composite(fields) => match fields.get(segment) {
                    Some(descriptor) => descriptor,
                    None => return Ok(None),
                },
                _ => return Err(ConversionError::unresolvable_path(path)),
            };
        }

        Ok(Some(current))
    }

    /// Top-level entry by name
    pub fn get(&self, name: &str) -> Option<&UnitDescriptor> {
        self.entries.get(name)
    }

    /// Names of all top-level entries
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for UnitMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.as_ref().serialize(serializer)
    }
}
