//! Composition of the `$state` root
//!
//! The editor keeps a runtime document that is not itself described by the
//! schema. Its shape is declared as a [`StateLayout`] whose nodes borrow
//! descriptors already present in the unit map.
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

use super::{UnitDescriptor, UnitMap, SCHEMA_ROOT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Library types enumerated under `models.library` when none are configured
pub const DEFAULT_LIBRARY_TYPES: [&str; 7] = [
    "building_units",
    "thermal_zones",
    "space_types",
    "construction_sets",
    "window_definitions",
    "daylighting_control_definitions",
    "door_definitions",
];

/// One node of a state layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateNode {
    /// Reuse the descriptor found at a dotted unit map path
    Path(String),
    /// A sequence whose elements follow the named entry
    ArrayOf(String),
    /// An object whose fields are laid out recursively
    Object(BTreeMap<String, StateNode>),
}

/// Shape of the runtime state document, keyed by top-level field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateLayout {
    pub fields: BTreeMap<String, StateNode>,
}

impl StateLayout {
    /// Layout of the geometry editor's store
    pub fn geometry_editor<S: AsRef<str>>(library_types: &[S]) -> Self {
        let library = library_types
            .iter()
            .map(|lt| {
                let lt = lt.as_ref();
                (lt.to_string(), StateNode::Path(format!("{}.{}", SCHEMA_ROOT, lt)))
            })
            .collect();

        let models = BTreeMap::from([
            ("stories".to_string(), StateNode::ArrayOf("Story".to_string())),
            ("library".to_string(), StateNode::Object(library)),
        ]);

        Self {
            fields: BTreeMap::from([
                ("application".to_string(), StateNode::Path("Application".to_string())),
                ("project".to_string(), StateNode::Path("Project".to_string())),
                ("geometry".to_string(), StateNode::ArrayOf("Geometry".to_string())),
                ("models".to_string(), StateNode::Object(models)),
            ]),
        }
    }

    /// Resolve the layout against a unit map
    ///
    /// Fields that resolve to nothing are dropped; an empty result is `None`.
    pub fn resolve(&self, units: &UnitMap) -> Option<UnitDescriptor> {
        resolve_fields(&self.fields, units)
    }
}

fn resolve_node(node: &StateNode, units: &UnitMap) -> Option<UnitDescriptor> {
    match node {
        StateNode::Path(path) => match units.lookup(path) {
            Ok(found) => {
                trace!(path = %path, found = found.is_some(), "Resolved state path");
                found.cloned()
            }
            Err(e) => {
                debug!(path = %path, error = %e, "State path does not resolve");
                None
            }
        },
        StateNode::ArrayOf(element) => Some(UnitDescriptor::array_of(element.clone())),
        StateNode::Object(fields) => resolve_fields(fields, units),
    }
}

fn resolve_fields(
    fields: &BTreeMap<String, StateNode>,
    units: &UnitMap,
) -> Option<UnitDescriptor> {
    let resolved: BTreeMap<String, UnitDescriptor> = fields
        .iter()
        .filter_map(|(name, node)| resolve_node(node, units).map(|d| (name.clone(), d)))
        .collect();

    (!resolved.is_empty()).then_some(UnitDescriptor::Composite(resolved))
}

/// Settings that shape unit map construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitMapConfig {
    /// Library type names enumerated under `models.library`
    pub library_types: Vec<String>,
    /// Explicit `$state` layout; the geometry editor layout when unset
    pub state: Option<StateLayout>,
}

impl Default for UnitMapConfig {
    fn default() -> Self {
        Self {
            library_types: DEFAULT_LIBRARY_TYPES.iter().map(|s| s.to_string()).collect(),
            state: None,
        }
    }
}

impl UnitMapConfig {
    /// The effective state layout
    pub fn layout(&self) -> StateLayout {
        self.state
            .clone()
            .unwrap_or_else(|| StateLayout::geometry_editor(&self.library_types))
    }
}
