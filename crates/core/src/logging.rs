//! Legacy log retrieval.
//!
//! The log end points predate the W3C specification and many servers never
//! implemented them. Both read paths here treat a not-implemented reply as
//! an expected, checkable outcome and degrade to an empty result instead of
//! propagating - an explicit match on the command result, not control flow
//! through caught failures.

use crate::session::Session;
use serde::Deserialize;
use serde_json::{Map, json};
use wd_protocol::Cmd;
use wd_runtime::{Error, Result};

/// One entry from a remote log.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    /// Severity as reported by the server (e.g. "INFO", "SEVERE").
    #[serde(default)]
    pub level: String,
    /// The logged message.
    #[serde(default)]
    pub message: String,
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub timestamp: i64,
}

fn not_implemented(error: &Error) -> bool {
    matches!(
        error,
        Error::UnsupportedOperation { .. }
            | Error::UnknownCommand { .. }
            | Error::UnknownMethod { .. }
    )
}

impl Session {
    /// Log types available on the server; empty when the server does not
    /// implement the log end points.
    pub async fn log_types(&self) -> Result<Vec<String>> {
        match self.execute(Cmd::GetLogTypes, Map::new()).await {
            Ok(response) => serde_json::from_value(response.into_value()).map_err(Into::into),
            Err(e) if not_implemented(&e) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Entries of one remote log; empty when the server does not implement
    /// the log end points.
    pub async fn logs(&self, kind: &str) -> Result<Vec<LogEntry>> {
        let mut params = Map::new();
        params.insert("type".to_string(), json!(kind));
        match self.execute(Cmd::GetLog, params).await {
            Ok(response) => serde_json::from_value(response.into_value()).map_err(Into::into),
            Err(e) if not_implemented(&e) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
