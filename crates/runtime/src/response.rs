//! Response parsing and wire-dialect normalization.
//!
//! Remote servers have shipped three overlapping success envelope shapes
//! over the protocol's history:
//!
//! 1. W3C: `{"value": <any>}`, optionally with a top-level `"sessionId"`
//! 2. Legacy: no `"value"` key at all - the whole body is the value
//!    (new-session responses put `"capabilities"` at top level)
//! 3. New-session nesting: both id and capabilities one level down,
//!    `{"value": {"sessionId": ..., "capabilities": ...}}`
//!
//! [`Response::from_success`] reconciles all three in one normalization
//! pass. Error envelopes are parsed strictly by [`Response::from_error`]:
//! by the time that path runs the transport has already signaled failure,
//! so a body without a string `value.error` is a hard decode failure, not
//! a protocol error.

use crate::error::{Error, Result, ResultCode};
use serde_json::Value;
use wd_protocol::SessionId;

/// A normalized remote response: session id, result code, decoded value.
#[derive(Debug, Clone)]
pub struct Response {
    session_id: Option<SessionId>,
    status: ResultCode,
    value: Value,
}

impl Response {
    /// Assembles a response directly from its parts.
    pub fn new(session_id: Option<SessionId>, status: ResultCode, value: Value) -> Self {
        Self {
            session_id,
            status,
            value,
        }
    }

    /// Wraps a transport-level failure as an unhandled-error response.
    ///
    /// The transport never throws past the orchestrator boundary; its
    /// failure becomes a response carrying the cause as the error payload,
    /// which then funnels through the ordinary unpacking path.
    pub fn unhandled_error(cause: &Error) -> Self {
        Self {
            session_id: None,
            status: ResultCode::UnknownError,
            value: serde_json::json!({ "message": cause.to_string() }),
        }
    }

    /// Parses a success body, normalizing the legacy envelope dialects.
    pub fn from_success(body: Value) -> Result<Self> {
        let map = body
            .as_object()
            .ok_or_else(|| Error::Decode(format!("success body is not a mapping: {body}")))?;

        let mut session_id = map
            .get("sessionId")
            .and_then(Value::as_str)
            .map(SessionId::from);

        // No `value` key means the whole body is the value. That covers the
        // legacy new-session dialect too, where `capabilities` sits at top
        // level and the nested pass below re-homes it.
        let mut value = match map.get("value") {
            Some(value) => value.clone(),
            None => body.clone(),
        };

        // New-session nesting: id and payload one level down inside `value`.
        if let Some(obj) = value.as_object() {
            if obj.contains_key("sessionId") {
                if let Some(id) = obj.get("sessionId").and_then(Value::as_str) {
                    session_id = Some(SessionId::from(id));
                }
                // `capabilities` takes precedence over a nested `value` when
                // both are present; matches observed server behavior.
                if let Some(caps) = obj.get("capabilities") {
                    value = caps.clone();
                } else if let Some(inner) = obj.get("value") {
                    value = inner.clone();
                }
            }
        }

        Ok(Self {
            session_id,
            status: ResultCode::Success,
            value,
        })
    }

    /// Parses an error body. Strict: requires a mapping `value` containing
    /// a string `error` code; anything else fails decoding immediately.
    pub fn from_error(body: Value) -> Result<Self> {
        let map = body
            .as_object()
            .ok_or_else(|| Error::Decode(format!("error body is not a mapping: {body}")))?;

        let value = map
            .get("value")
            .ok_or_else(|| Error::Decode("error body has no 'value' entry".to_string()))?;

        let code = value
            .as_object()
            .and_then(|obj| obj.get("error"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::Decode(format!("error value has no string 'error' code: {value}"))
            })?;

        let session_id = map
            .get("sessionId")
            .and_then(Value::as_str)
            .map(SessionId::from);

        Ok(Self {
            session_id,
            status: ResultCode::from_wire(code),
            value: value.clone(),
        })
    }

    /// Session id reported by the server, if any.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Result code of this response.
    pub fn status(&self) -> ResultCode {
        self.status
    }

    /// Whether this response reports success.
    pub fn is_success(&self) -> bool {
        self.status == ResultCode::Success
    }

    /// The decoded value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the response, yielding the decoded value.
    pub fn into_value(self) -> Value {
        self.value
    }
}
