//! End-to-end conversion of editor documents
//!
//! These tests build a unit map from a trimmed-down floorplan schema and
//! convert complete schema, state, and library documents.

use geounits_core::{
    convert_library, convert_schema, convert_state, get_converter, ConversionError, StateLayout,
    StateNode, UnitMap, UnitMapConfig, UnitSystem,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn floorplan_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "type": "object",
        "properties": {
            "application": { "$ref": "#/definitions/Application" },
            "project": { "$ref": "#/definitions/Project" },
            "stories": { "type": "array", "items": { "$ref": "#/definitions/Story" } },
            "space_types": { "type": "array", "items": { "$ref": "#/definitions/SpaceType" } },
            "thermal_zones": { "type": "array", "items": { "$ref": "#/definitions/ThermalZone" } },
            "version": { "type": "string" }
        },
        "definitions": {
            "Application": {
                "type": "object",
                "properties": {
                    "currentSelections": { "type": "object" },
                    "scale": {
                        "type": "object",
                        "properties": {
                            "x": { "si_units": "m", "ip_units": "ft" },
                            "y": { "si_units": "m", "ip_units": "ft" }
                        }
                    }
                }
            },
            "Project": {
                "type": "object",
                "properties": {
                    "north_angle": { "si_units": "deg", "ip_units": "deg" },
                    "grid": {
                        "type": "object",
                        "properties": { "spacing": { "si_units": "m", "ip_units": "ft" } }
                    }
                }
            },
            "Story": {
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "below_floor_plenum_height": { "si_units": "m", "ip_units": "ft" },
                    "floor_to_ceiling_height": { "si_units": "m", "ip_units": "ft" },
                    "spaces": { "type": "array", "items": { "$ref": "#/definitions/Space" } }
                }
            },
            "Space": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "daylighting_controls": {
                        "type": "array",
                        "items": { "$ref": "#/definitions/DaylightingControl" }
                    }
                }
            },
            "DaylightingControl": {
                "type": "object",
                "properties": {
                    "illuminance_setpoint": { "si_units": "lux", "ip_units": "fc" },
                    "height": { "si_units": "m", "ip_units": "ft" }
                }
            },
            "SpaceType": {
                "type": "object",
                "properties": { "name": { "type": "string" }, "color": { "type": "string" } }
            },
            "ThermalZone": {
                "type": "object",
                "properties": { "name": { "type": "string" } }
            },
            "Geometry": {
                "type": "object",
                "properties": {
                    "vertices": { "type": "array", "items": { "$ref": "#/definitions/Vertex" } }
                }
            },
            "Vertex": {
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "x": { "si_units": "m", "ip_units": "ft" },
                    "y": { "si_units": "m", "ip_units": "ft" }
                }
            }
        }
    })
}

fn units() -> UnitMap {
    UnitMap::from_schema(&floorplan_schema(), &UnitMapConfig::default())
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().unwrap();
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} to be close to {}",
        actual,
        expected
    );
}

#[test]
fn test_schema_document_round_trip_within_tolerance() {
    let units = units();
    let document = json!({
        "version": "0.1.0",
        "project": { "north_angle": 15, "grid": { "spacing": 2 } },
        "stories": [{
            "id": "s1",
            "below_floor_plenum_height": 0,
            "floor_to_ceiling_height": 3,
            "spaces": [{
                "name": "Office",
                "daylighting_controls": [{ "illuminance_setpoint": 500, "height": 0.8 }]
            }]
        }]
    });

    let imperial = convert_schema(&units, &document, UnitSystem::Si, UnitSystem::Ip).unwrap();
    assert_eq!(imperial["version"], json!("0.1.0"));
    assert_eq!(imperial["project"]["north_angle"], json!(15));
    assert_close(&imperial["project"]["grid"]["spacing"], 6.56168);

    let control = &imperial["stories"][0]["spaces"][0]["daylighting_controls"][0];
    assert_close(&control["illuminance_setpoint"], 500.0 * 0.092903);
    assert_close(&control["height"], 0.8 * 3.28084);

    let metric = convert_schema(&units, &imperial, UnitSystem::Ip, UnitSystem::Si).unwrap();
    let story = &metric["stories"][0];
    let height = story["floor_to_ceiling_height"].as_f64().unwrap();
    assert!((height - 3.0).abs() < 1e-4);
    assert_eq!(story["id"], json!("s1"));
}

#[test]
fn test_state_document() {
    let units = units();
    let state = json!({
        "application": { "scale": { "x": 10, "y": 20 }, "currentSelections": { "story": "s1" } },
        "project": { "grid": { "spacing": 1 } },
        "geometry": [{ "id": "g1", "vertices": [{ "id": "v1", "x": 1, "y": 2 }] }],
        "models": {
            "stories": [{ "floor_to_ceiling_height": 2 }],
            "library": { "space_types": [{ "name": "Office" }] }
        },
        "undo": []
    });

    let converted = convert_state(&units, &state, UnitSystem::Si, UnitSystem::Ip).unwrap();

    assert_close(&converted["application"]["scale"]["x"], 32.8084);
    assert_close(&converted["application"]["scale"]["y"], 65.6168);
    assert_eq!(converted["application"]["currentSelections"], state["application"]["currentSelections"]);
    assert_close(&converted["project"]["grid"]["spacing"], 3.28084);
    assert_close(&converted["geometry"][0]["vertices"][0]["x"], 3.28084);
    assert_close(&converted["geometry"][0]["vertices"][0]["y"], 6.56168);
    assert_eq!(converted["geometry"][0]["vertices"][0]["id"], json!("v1"));
    assert_close(&converted["models"]["stories"][0]["floor_to_ceiling_height"], 6.56168);
    assert_eq!(converted["models"]["library"], state["models"]["library"]);
    assert_eq!(converted["undo"], json!([]));
}

#[test]
fn test_library_document() {
    let units = units();
    let library = json!({ "stories": [{ "below_floor_plenum_height": 1 }] });
    let converted = convert_library(&units, &library, UnitSystem::Si, UnitSystem::Ip).unwrap();
    assert_close(&converted["stories"][0]["below_floor_plenum_height"], 3.28084);
}

#[test]
fn test_same_system_returns_input() {
    let units = units();
    let state = json!({ "geometry": [{ "vertices": [{ "x": 4 }] }] });
    assert_eq!(
        convert_state(&units, &state, UnitSystem::Ip, UnitSystem::Ip).unwrap(),
        state
    );
}

#[test]
fn test_custom_state_layout() {
    let layout = StateLayout {
        fields: BTreeMap::from([
            ("points".to_string(), StateNode::ArrayOf("Vertex".to_string())),
            ("grid".to_string(), StateNode::Path("Project.grid".to_string())),
        ]),
    };
    let config = UnitMapConfig {
        library_types: vec![],
        state: Some(layout),
    };
    let units = UnitMap::from_schema(&floorplan_schema(), &config);

    let state = json!({ "points": [{ "x": 1 }], "grid": { "spacing": 1 } });
    let converted = units.convert_state(&state, UnitSystem::Si, UnitSystem::Ip).unwrap();
    assert_close(&converted["points"][0]["x"], 3.28084);
    assert_close(&converted["grid"]["spacing"], 3.28084);
}

#[test]
fn test_string_api_rejects_unknown_system() {
    let units = units();
    let err = get_converter(&units, "$state", "xx", "si_units").unwrap_err();
    assert!(matches!(err, ConversionError::InvalidSystem { ref param, .. } if param == "fromSystem"));
    assert!(err.to_string().contains("received xx"));
}

#[test]
fn test_unit_map_is_built_once_and_shared() {
    let units = units();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let units = units.clone();
            std::thread::spawn(move || {
                let doc = json!({ "stories": [{ "floor_to_ceiling_height": i }] });
                units
                    .convert_schema(&doc, UnitSystem::Si, UnitSystem::Ip)
                    .map(|converted| converted["stories"][0]["floor_to_ceiling_height"].as_f64())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let height = handle.join().unwrap().unwrap().unwrap();
        assert!((height - i as f64 * 3.28084).abs() < 1e-9);
    }
}
