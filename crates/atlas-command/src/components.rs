//! Component key validation and null stripping.
//!
//! Entity components travel as a JSON object keyed by component name. Before
//! a request body is built the client:
//!
//! 1. checks every top-level key against [`KNOWN_COMPONENTS`] or the
//!    [`CUSTOM_COMPONENT_PREFIX`] escape hatch ([`validate_entity_components`]);
//! 2. deep-copies the mapping with null fields removed
//!    ([`components_to_record`]).
//!
//! Validation is shallow: nested values, including the bodies of custom
//! components, are never inspected.
//!
//! Null stripping treats objects and arrays differently. Object fields whose
//! value is null are dropped; null array slots are kept, so coordinate lists
//! such as polygon rings never shift indices.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{AtlasError, AtlasResult};

/// Prefix that exempts a component key from the known-name check.
pub const CUSTOM_COMPONENT_PREFIX: &str = "custom_";

/// First-party component names accepted without the custom prefix.
pub const KNOWN_COMPONENTS: &[&str] = &[
    "telemetry",
    "geometry",
    "task_catalog",
    "media_refs",
    "mil_view",
    "health",
    "sensor_refs",
    "communications",
    "task_queue",
    "status",
    "heartbeat",
];

/// Whether `key` is one of [`KNOWN_COMPONENTS`].
pub fn is_known_component(key: &str) -> bool {
    KNOWN_COMPONENTS.contains(&key)
}

/// Whether `key` may appear at the top level of an entity component mapping.
pub fn is_valid_component_key(key: &str) -> bool {
    key.starts_with(CUSTOM_COMPONENT_PREFIX) || is_known_component(key)
}

/// Reject a mapping containing a key that is neither known nor custom.
///
/// Keys are checked in insertion order and the first offending key is
/// reported. An empty mapping is valid.
pub fn validate_entity_components(components: &Map<String, Value>) -> AtlasResult<()> {
    match components.keys().find(|key| !is_valid_component_key(key)) {
        Some(key) => {
            warn!(key = %key, "rejecting unknown component key");
            Err(AtlasError::UnknownComponentKey { key: key.clone() })
        }
        None => Ok(()),
    }
}

/// Recursively remove null object fields.
///
/// Returns `None` when `value` itself is null so the caller can omit the
/// key. Arrays keep their length: null elements stay null, every other
/// element is stripped recursively.
pub fn strip_nulls(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .map(|item| strip_nulls(item).unwrap_or(Value::Null))
                .collect(),
        )),
        Value::Object(fields) => Some(Value::Object(strip_fields(fields))),
        scalar => Some(scalar.clone()),
    }
}

/// Null-stripped copy of a component mapping.
///
/// `None` passes through. A present mapping always yields a record, empty if
/// every field was dropped. This does not validate keys; call
/// [`validate_entity_components`] first when that is required.
pub fn components_to_record(components: Option<&Map<String, Value>>) -> Option<Map<String, Value>> {
    components.map(strip_fields)
}

fn strip_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|(key, value)| strip_nulls(value).map(|value| (key.clone(), value)))
        .collect()
}

/// Serialize, validate and strip entity components for a request body.
pub(crate) fn prepare_entity_components<T: serde::Serialize>(
    components: &T,
) -> AtlasResult<Map<String, Value>> {
    let map = to_component_map(components)?;
    validate_entity_components(&map)?;
    Ok(strip_fields(&map))
}

/// Serialize and strip components that are not key-validated (task components).
pub(crate) fn prepare_components<T: serde::Serialize>(
    components: &T,
) -> AtlasResult<Map<String, Value>> {
    let map = to_component_map(components)?;
    Ok(strip_fields(&map))
}

fn to_component_map<T: serde::Serialize>(components: &T) -> AtlasResult<Map<String, Value>> {
    match serde_json::to_value(components)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(AtlasError::InvalidRequest {
            message: format!("components must be a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_validate_empty_mapping() {
        assert!(validate_entity_components(&Map::new()).is_ok());
    }

    #[test]
    fn test_validate_all_known_keys() {
        let map: Map<String, Value> = KNOWN_COMPONENTS
            .iter()
            .map(|k| (k.to_string(), json!({})))
            .collect();
        assert!(validate_entity_components(&map).is_ok());
    }

    #[test]
    fn test_validate_bare_prefix_is_custom() {
        let map = obj(json!({ "custom_": 1 }));
        assert!(validate_entity_components(&map).is_ok());
    }

    #[test]
    fn test_validate_unknown_key() {
        let map = obj(json!({ "unknown_key": {} }));
        match validate_entity_components(&map) {
            Err(AtlasError::UnknownComponentKey { key }) => assert_eq!(key, "unknown_key"),
            other => panic!("expected UnknownComponentKey, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_reports_first_offender_in_insertion_order() {
        let map = obj(json!({
            "telemetry": {},
            "zz_first": {},
            "aa_second": {},
        }));
        let err = validate_entity_components(&map).unwrap_err();
        assert!(err.to_string().contains("zz_first"), "{}", err);
    }

    #[test]
    fn test_validate_is_shallow() {
        let map = obj(json!({
            "custom_payload": { "anything": { "goes": true } },
            "health": { "not_a_component": 1 },
        }));
        assert!(validate_entity_components(&map).is_ok());
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let map = obj(json!({ "Custom_thing": {} }));
        assert!(validate_entity_components(&map).is_err());
    }

    #[test]
    fn test_strip_drops_null_fields() {
        let stripped = strip_nulls(&json!({ "a": 1, "b": null })).unwrap();
        assert_eq!(stripped, json!({ "a": 1 }));
    }

    #[test]
    fn test_strip_null_is_absent() {
        assert_eq!(strip_nulls(&Value::Null), None);
    }

    #[test]
    fn test_strip_scalars_unchanged() {
        assert_eq!(strip_nulls(&json!(1.5)), Some(json!(1.5)));
        assert_eq!(strip_nulls(&json!("x")), Some(json!("x")));
        assert_eq!(strip_nulls(&json!(false)), Some(json!(false)));
    }

    #[test]
    fn test_strip_preserves_null_array_slots() {
        let input = json!({ "polygon": [[1, 2], [null, null], [3, 4]] });
        assert_eq!(strip_nulls(&input).unwrap(), input);
    }

    #[test]
    fn test_strip_recurses_into_array_objects() {
        let input = json!([{ "id": "a", "note": null }, null, { "id": "b" }]);
        let expected = json!([{ "id": "a" }, null, { "id": "b" }]);
        assert_eq!(strip_nulls(&input).unwrap(), expected);
    }

    #[test]
    fn test_components_to_record_none_passthrough() {
        assert_eq!(components_to_record(None), None);
    }

    #[test]
    fn test_components_to_record_keeps_emptied_record() {
        let map = obj(json!({ "telemetry": { "latitude": null } }));
        let record = components_to_record(Some(&map)).unwrap();
        assert_eq!(Value::Object(record), json!({ "telemetry": {} }));
    }

    #[test]
    fn test_components_to_record_all_dropped_is_empty() {
        let map = obj(json!({ "telemetry": null, "health": null }));
        let record = components_to_record(Some(&map)).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_custom_component_scenario() {
        let map = obj(json!({ "custom_weather": { "wind_speed": 12, "gusts": null } }));
        assert!(validate_entity_components(&map).is_ok());
        let record = components_to_record(Some(&map)).unwrap();
        assert_eq!(
            Value::Object(record),
            json!({ "custom_weather": { "wind_speed": 12 } })
        );
    }

    #[test]
    fn test_prepare_rejects_non_object() {
        let err = prepare_entity_components(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, AtlasError::InvalidRequest { .. }));
    }

    #[test]
    fn test_prepare_validates_before_stripping() {
        let err = prepare_entity_components(&json!({ "bogus": null })).unwrap_err();
        assert!(matches!(err, AtlasError::UnknownComponentKey { .. }));
    }

    fn json_value(allow_null: bool) -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
            Just(if allow_null { Value::Null } else { json!(0) }),
        ];
        leaf.prop_recursive(4, 48, 5, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_strip_is_identity_without_nulls(value in json_value(false)) {
            prop_assert_eq!(strip_nulls(&value), Some(value.clone()));
        }

        #[test]
        fn prop_strip_is_idempotent(value in json_value(true)) {
            let once = strip_nulls(&value);
            let twice = once.as_ref().and_then(strip_nulls);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_strip_preserves_array_length(items in prop::collection::vec(json_value(true), 0..8)) {
            let stripped = strip_nulls(&Value::Array(items.clone())).unwrap();
            prop_assert_eq!(stripped.as_array().map(Vec::len), Some(items.len()));
        }

        #[test]
        fn prop_custom_keys_always_valid(suffixes in prop::collection::vec("[A-Za-z0-9_]{0,10}", 0..6)) {
            let map: Map<String, Value> = suffixes
                .iter()
                .map(|s| (format!("{}{}", CUSTOM_COMPONENT_PREFIX, s), Value::Null))
                .collect();
            prop_assert!(validate_entity_components(&map).is_ok());
        }

        #[test]
        fn prop_unknown_key_always_rejected(key in "[a-z]{1,12}") {
            prop_assume!(!is_valid_component_key(&key));
            let mut map: Map<String, Value> = Map::new();
            map.insert("telemetry".to_string(), json!({}));
            map.insert(key.clone(), json!({}));
            match validate_entity_components(&map) {
                Err(AtlasError::UnknownComponentKey { key: reported }) => prop_assert_eq!(reported, key),
                other => prop_assert!(false, "expected rejection, got {:?}", other),
            }
        }
    }
}
