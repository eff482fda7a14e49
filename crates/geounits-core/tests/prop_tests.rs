//! Property-based tests for converter behaviour
//!
//! These tests check the conversion laws over a wide range of inputs:
//! identity for equal systems, approximate inversion, structural
//! preservation of arrays and objects.

use geounits_core::{
    build_converter, get_converter, ScalarUnits, UnitDescriptor, UnitMap, UnitSystem,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn sample_units() -> UnitMap {
    let window = UnitDescriptor::Composite(BTreeMap::from([
        (
            "width".to_string(),
            UnitDescriptor::Scalar(ScalarUnits::new("m", "ft")),
        ),
        (
            "setpoint".to_string(),
            UnitDescriptor::Scalar(ScalarUnits::new("lux", "fc")),
        ),
    ]));

    UnitMap::from_entries(BTreeMap::from([
        (
            "Length".to_string(),
            UnitDescriptor::Scalar(ScalarUnits::new("m", "ft")),
        ),
        (
            "Illuminance".to_string(),
            UnitDescriptor::Scalar(ScalarUnits::new("lux", "fc")),
        ),
        ("Lengths".to_string(), UnitDescriptor::array_of("Length")),
        ("Window".to_string(), window),
    ]))
}

fn system_strategy() -> impl Strategy<Value = UnitSystem> {
    prop_oneof![Just(UnitSystem::Si), Just(UnitSystem::Ip)]
}

fn scalar_path_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Length"), Just("Illuminance"), Just("Window.width")]
}

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 10, 5, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            proptest::collection::hash_map("[a-z_]{1,12}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_same_system_is_identity(
        path in scalar_path_strategy(),
        system in system_strategy(),
        x in -1.0e9f64..1.0e9,
    ) {
        let units = sample_units();
        let converter = build_converter(&units, path, system, system).unwrap();
        prop_assert_eq!(converter.apply(&json!(x)), json!(x));
    }

    #[test]
    fn prop_forward_then_back_is_close(
        path in scalar_path_strategy(),
        x in -1.0e6f64..1.0e6,
    ) {
        let units = sample_units();
        let forward = build_converter(&units, path, UnitSystem::Si, UnitSystem::Ip).unwrap();
        let back = build_converter(&units, path, UnitSystem::Ip, UnitSystem::Si).unwrap();

        let round_trip = back.apply(&forward.apply(&json!(x))).as_f64().unwrap();
        // Table factors are rounded independently, so allow relative drift
        let tolerance = 1e-5 * x.abs().max(1.0);
        prop_assert!((round_trip - x).abs() <= tolerance, "{} came back as {}", x, round_trip);
    }

    #[test]
    fn prop_array_preserves_length_and_order(
        xs in proptest::collection::vec(-1.0e6f64..1.0e6, 0..20),
    ) {
        let units = sample_units();
        let converter = build_converter(&units, "Lengths", UnitSystem::Si, UnitSystem::Ip).unwrap();

        let converted = converter.apply(&json!(xs));
        let items = converted.as_array().unwrap();
        prop_assert_eq!(items.len(), xs.len());
        for (item, x) in items.iter().zip(&xs) {
            let expected = x * 3.28084;
            prop_assert!((item.as_f64().unwrap() - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn prop_unknown_fields_untouched(
        extra in proptest::collection::hash_map("[a-z]{1,8}_extra", json_value_strategy(), 0..5),
        width in -1.0e3f64..1.0e3,
    ) {
        let units = sample_units();
        let converter = build_converter(&units, "Window", UnitSystem::Si, UnitSystem::Ip).unwrap();

        let mut window = serde_json::Map::new();
        window.insert("width".to_string(), json!(width));
        for (key, value) in &extra {
            window.insert(key.clone(), value.clone());
        }

        let converted = converter.apply(&Value::Object(window));
        for (key, value) in &extra {
            prop_assert_eq!(&converted[key.as_str()], value);
        }
        prop_assert_eq!(converted.as_object().unwrap().len(), extra.len() + 1);
    }

    #[test]
    fn prop_unknown_system_label_rejected(label in "[a-z_]{0,12}") {
        prop_assume!(label != "si_units" && label != "ip_units");
        let units = sample_units();
        let result = get_converter(&units, "Length", &label, "si_units");
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_identity_path_never_changes_values(value in json_value_strategy()) {
        let units = sample_units();
        let converter = build_converter(&units, "NotInTheMap", UnitSystem::Si, UnitSystem::Ip).unwrap();
        prop_assert_eq!(converter.apply(&value), value);
    }
}
