//! Element and shadow-root reference wire shapes.
//!
//! The server hands out element references as single-key JSON mappings with
//! a fixed, reserved property name. Two distinct names distinguish plain
//! elements from shadow roots. This module owns those constants plus the
//! shape tests that must run *before* any generic mapping recursion, since
//! a reference mapping must never be treated as an arbitrary nested object.

use serde_json::{Map, Value, json};

/// Reserved property name carrying a plain element id.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Reserved property name carrying a shadow-root id.
pub const SHADOW_ROOT_KEY: &str = "shadow-6066-11e4-a52e-4f735466cecf";

/// Returns the element id if `map` carries the element-reference key.
///
/// Membership is decided by the reserved key alone; other keys do not
/// affect it.
pub fn element_id(map: &Map<String, Value>) -> Option<&str> {
    map.get(ELEMENT_KEY).and_then(Value::as_str)
}

/// Returns the shadow-root id if `map` carries the shadow-root key.
pub fn shadow_root_id(map: &Map<String, Value>) -> Option<&str> {
    map.get(SHADOW_ROOT_KEY).and_then(Value::as_str)
}

/// Builds the single-key wire mapping for a plain element id.
pub fn element_reference(id: &str) -> Value {
    json!({ ELEMENT_KEY: id })
}

/// Builds the single-key wire mapping for a shadow-root id.
pub fn shadow_root_reference(id: &str) -> Value {
    json!({ SHADOW_ROOT_KEY: id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_element_reference() {
        let value = element_reference("e1");
        let map = value.as_object().unwrap();
        assert_eq!(element_id(map), Some("e1"));
        assert_eq!(shadow_root_id(map), None);
    }

    #[test]
    fn recognizes_shadow_root_reference() {
        let value = shadow_root_reference("sr9");
        let map = value.as_object().unwrap();
        assert_eq!(shadow_root_id(map), Some("sr9"));
        assert_eq!(element_id(map), None);
    }

    #[test]
    fn arbitrary_mapping_is_not_a_reference() {
        let value = json!({ "element": "e1" });
        let map = value.as_object().unwrap();
        assert_eq!(element_id(map), None);
    }

    #[test]
    fn non_string_id_is_not_a_reference() {
        let value = json!({ ELEMENT_KEY: 42 });
        let map = value.as_object().unwrap();
        assert_eq!(element_id(map), None);
    }
}
