//! Recursive value marshalling between caller values and wire JSON.
//!
//! Both directions are structural matches over closed tagged variants,
//! decided once at the JSON boundary rather than by repeated runtime type
//! probing: [`Arg`] is the outbound shape (caller values plus handles) and
//! [`WdValue`] the inbound one (wire JSON with handles substituted back in).
//! Element-reference mappings are recognized *before* generic mapping
//! recursion in both directions, so a reference is never walked as an
//! arbitrary nested object. Decoded wire JSON is acyclic, which bounds the
//! recursion.

use crate::element::{Element, ShadowRoot};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use wd_protocol::{SessionId, element_id, shadow_root_id};
use wd_runtime::Result;

/// Outbound argument: a caller value headed for the wire.
///
/// Scalars pass through unchanged; handles become their single-key wire
/// mapping; containers recurse. The closed enum is the argument contract -
/// there is no "other input type" to reject at marshalling time, and the
/// non-empty-id invariant is enforced when a handle is constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Element(Element),
    ShadowRoot(ShadowRoot),
    Seq(Vec<Arg>),
    Map(BTreeMap<String, Arg>),
}

impl Arg {
    /// Reinterprets already-decoded JSON as an argument tree.
    ///
    /// Plain JSON carries no handles, so this is a structural copy.
    pub fn from_json(value: &Value) -> Arg {
        match value {
            Value::Null => Arg::Null,
            Value::Bool(b) => Arg::Bool(*b),
            Value::Number(n) => Arg::Number(n.clone()),
            Value::String(s) => Arg::String(s.clone()),
            Value::Array(items) => Arg::Seq(items.iter().map(Arg::from_json).collect()),
            Value::Object(map) => Arg::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Arg::from_json(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Number(n.into())
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::String(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::String(s)
    }
}

impl From<Element> for Arg {
    fn from(element: Element) -> Self {
        Arg::Element(element)
    }
}

impl From<ShadowRoot> for Arg {
    fn from(root: ShadowRoot) -> Self {
        Arg::ShadowRoot(root)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::Seq(items.into_iter().map(Into::into).collect())
    }
}

/// Converts an outbound argument tree to wire JSON.
pub fn encode(arg: &Arg) -> Value {
    match arg {
        Arg::Null => Value::Null,
        Arg::Bool(b) => Value::Bool(*b),
        Arg::Number(n) => Value::Number(n.clone()),
        Arg::String(s) => Value::String(s.clone()),
        Arg::Element(element) => element.to_wire(),
        Arg::ShadowRoot(root) => root.to_wire(),
        // Mappings before sequences: a mapping-like container must convert
        // key-wise, never element-wise.
        Arg::Map(map) => {
            let mut wire = Map::new();
            for (key, value) in map {
                wire.insert(key.clone(), encode(value));
            }
            Value::Object(wire)
        }
        Arg::Seq(items) => Value::Array(items.iter().map(encode).collect()),
    }
}

/// Inbound value: wire JSON with element references substituted back in.
#[derive(Debug, Clone, PartialEq)]
pub enum WdValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Element(Element),
    ShadowRoot(ShadowRoot),
    /// Homogeneous element collection: the projection of a non-empty wire
    /// array whose every item was an element reference.
    Elements(Vec<Element>),
    Seq(Vec<WdValue>),
    Map(BTreeMap<String, WdValue>),
}

impl WdValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            WdValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WdValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            WdValue::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Converts back to an outbound argument, e.g. to feed a received
    /// structure into a later script call.
    pub fn to_arg(&self) -> Arg {
        match self {
            WdValue::Null => Arg::Null,
            WdValue::Bool(b) => Arg::Bool(*b),
            WdValue::Number(n) => Arg::Number(n.clone()),
            WdValue::String(s) => Arg::String(s.clone()),
            WdValue::Element(element) => Arg::Element(element.clone()),
            WdValue::ShadowRoot(root) => Arg::ShadowRoot(root.clone()),
            WdValue::Elements(elements) => {
                Arg::Seq(elements.iter().cloned().map(Arg::Element).collect())
            }
            WdValue::Seq(items) => Arg::Seq(items.iter().map(WdValue::to_arg).collect()),
            WdValue::Map(map) => Arg::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_arg()))
                    .collect(),
            ),
        }
    }
}

/// Reinterprets inbound wire JSON, substituting element handles.
///
/// Reference-shaped mappings become handles owned by `session`; other
/// mappings and sequences are rebuilt recursively in place. A non-empty
/// sequence in which *every* item resolved to an element handle is exposed
/// as [`WdValue::Elements`] - the result is always either fully projected
/// or a generic sequence, never partially typed.
pub fn decode(value: &Value, session: &SessionId) -> Result<WdValue> {
    match value {
        Value::Null => Ok(WdValue::Null),
        Value::Bool(b) => Ok(WdValue::Bool(*b)),
        Value::Number(n) => Ok(WdValue::Number(n.clone())),
        Value::String(s) => Ok(WdValue::String(s.clone())),
        Value::Object(map) => {
            if let Some(id) = element_id(map) {
                return Ok(WdValue::Element(Element::new(session.clone(), id)?));
            }
            if let Some(id) = shadow_root_id(map) {
                return Ok(WdValue::ShadowRoot(ShadowRoot::new(session.clone(), id)?));
            }
            let mut rebuilt = BTreeMap::new();
            for (key, nested) in map {
                rebuilt.insert(key.clone(), decode(nested, session)?);
            }
            Ok(WdValue::Map(rebuilt))
        }
        Value::Array(items) => {
            let decoded = items
                .iter()
                .map(|item| decode(item, session))
                .collect::<Result<Vec<_>>>()?;
            if !decoded.is_empty()
                && decoded
                    .iter()
                    .all(|item| matches!(item, WdValue::Element(_)))
            {
                let elements = decoded
                    .into_iter()
                    .map(|item| match item {
                        WdValue::Element(element) => element,
                        _ => unreachable!("all items checked above"),
                    })
                    .collect();
                return Ok(WdValue::Elements(elements));
            }
            Ok(WdValue::Seq(decoded))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wd_protocol::ELEMENT_KEY;

    fn session() -> SessionId {
        SessionId::new("s1")
    }

    #[test]
    fn scalars_are_identity_in_both_directions() {
        for value in [json!(null), json!(true), json!(42), json!(1.5), json!("x")] {
            let decoded = decode(&value, &session()).unwrap();
            assert_eq!(encode(&decoded.to_arg()), value);
        }
    }

    #[test]
    fn element_reference_round_trips_exactly() {
        let wire = json!({ ELEMENT_KEY: "abc123" });
        let decoded = decode(&wire, &session()).unwrap();
        let element = decoded.as_element().expect("should decode to a handle");
        assert_eq!(encode(&Arg::Element(element.clone())), wire);
    }

    #[test]
    fn outbound_mixed_sequence_preserves_order() {
        let element = Element::new(session(), "e1").unwrap();
        let args = Arg::Seq(vec![Arg::from("a"), Arg::from(1i64), Arg::Element(element)]);
        assert_eq!(
            encode(&args),
            json!(["a", 1, { ELEMENT_KEY: "e1" }])
        );
    }

    #[test]
    fn outbound_mapping_recurses_key_wise() {
        let element = Element::new(session(), "e2").unwrap();
        let mut map = BTreeMap::new();
        map.insert("target".to_string(), Arg::Element(element));
        map.insert("count".to_string(), Arg::from(3i64));
        assert_eq!(
            encode(&Arg::Map(map)),
            json!({ "count": 3, "target": { ELEMENT_KEY: "e2" } })
        );
    }

    #[test]
    fn homogeneous_element_array_projects_to_elements() {
        let wire = json!([{ ELEMENT_KEY: "e1" }, { ELEMENT_KEY: "e2" }]);
        match decode(&wire, &session()).unwrap() {
            WdValue::Elements(elements) => assert_eq!(elements.len(), 2),
            other => panic!("expected Elements, got: {other:?}"),
        }
    }

    #[test]
    fn mixed_array_stays_a_generic_sequence() {
        let wire = json!([{ ELEMENT_KEY: "e1" }, "not an element"]);
        match decode(&wire, &session()).unwrap() {
            WdValue::Seq(items) => {
                assert_eq!(items.len(), 2);
                assert!(items[0].as_element().is_some());
                assert_eq!(items[1].as_str(), Some("not an element"));
            }
            other => panic!("expected Seq, got: {other:?}"),
        }
    }

    #[test]
    fn empty_array_is_not_projected() {
        match decode(&json!([]), &session()).unwrap() {
            WdValue::Seq(items) => assert!(items.is_empty()),
            other => panic!("expected empty Seq, got: {other:?}"),
        }
    }

    #[test]
    fn references_are_recognized_before_mapping_recursion() {
        // A reference nested inside a generic mapping becomes a handle; the
        // enclosing mapping is rebuilt around it.
        let wire = json!({ "found": { ELEMENT_KEY: "e9" }, "depth": 2 });
        match decode(&wire, &session()).unwrap() {
            WdValue::Map(map) => {
                assert!(map["found"].as_element().is_some());
                assert_eq!(map["depth"], WdValue::Number(2.into()));
            }
            other => panic!("expected Map, got: {other:?}"),
        }
    }

    #[test]
    fn empty_reference_id_fails_decoding() {
        let wire = json!({ ELEMENT_KEY: "" });
        assert!(decode(&wire, &session()).is_err());
    }

    #[test]
    fn arg_from_json_is_structural() {
        let value = json!({ "a": [1, "two", null], "b": { "c": true } });
        assert_eq!(encode(&Arg::from_json(&value)), value);
    }
}
