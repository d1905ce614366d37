//! Opaque element and shadow-root handles.
//!
//! A handle pairs the owning session with the server-assigned id. The id is
//! deliberately not readable through the public API; it only ever travels
//! back to the server inside the reserved single-key wire mapping. Handles
//! carry no liveness state - a stale handle is discovered when the server
//! rejects its next use, never proactively.

use serde_json::Value;
use wd_protocol::{SessionId, element_reference, shadow_root_reference};
use wd_runtime::{Error, Result};

/// Handle to a DOM element owned by a remote session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    session: SessionId,
    id: String,
}

impl Element {
    /// Builds a handle from the owning session and the raw server id.
    ///
    /// An empty id has no wire meaning and is rejected.
    pub fn new(session: SessionId, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_argument("element id must be non-empty"));
        }
        Ok(Self { session, id })
    }

    /// The session this handle belongs to.
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    /// The single-key wire mapping for this handle.
    pub(crate) fn to_wire(&self) -> Value {
        element_reference(&self.id)
    }
}

/// Handle to a shadow root owned by a remote session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShadowRoot {
    session: SessionId,
    id: String,
}

impl ShadowRoot {
    /// Builds a handle from the owning session and the raw server id.
    pub fn new(session: SessionId, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_argument("shadow root id must be non-empty"));
        }
        Ok(Self { session, id })
    }

    /// The session this handle belongs to.
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn to_wire(&self) -> Value {
        shadow_root_reference(&self.id)
    }
}
