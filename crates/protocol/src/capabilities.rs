//! Capability negotiation payloads for session creation.
//!
//! The new-session payload offered to the server is either a caller-supplied
//! fully negotiated object, or a `{"capabilities": {"firstMatch": [..]}}`
//! envelope built here from a single candidate map filtered down to
//! spec-compliant capability names. Legacy, non-spec names (e.g. `version`,
//! `platform`) are dropped rather than forwarded, so a W3C-only server never
//! sees a payload it must reject.

use serde_json::{Map, Value, json};

/// Capability names defined by the W3C WebDriver specification.
const W3C_CAPABILITY_NAMES: &[&str] = &[
    "acceptInsecureCerts",
    "browserName",
    "browserVersion",
    "pageLoadStrategy",
    "platformName",
    "proxy",
    "setWindowRect",
    "strictFileInteractability",
    "timeouts",
    "unhandledPromptBehavior",
    "webSocketUrl",
];

/// Whether `name` is legal in a W3C capabilities object.
///
/// Extension capabilities are namespaced with a colon (`goog:chromeOptions`,
/// `moz:firefoxOptions`, ...) and are always legal.
pub fn is_spec_compliant_capability_name(name: &str) -> bool {
    W3C_CAPABILITY_NAMES.contains(&name) || name.contains(':')
}

/// Filters a candidate capability map down to spec-compliant names.
pub fn filter_spec_compliant(caps: &Map<String, Value>) -> Map<String, Value> {
    caps.iter()
        .filter(|(name, _)| is_spec_compliant_capability_name(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Builds the new-session negotiation payload from one candidate map.
pub fn new_session_payload(caps: &Map<String, Value>) -> Value {
    json!({
        "capabilities": {
            "firstMatch": [Value::Object(filter_spec_compliant(caps))]
        }
    })
}
