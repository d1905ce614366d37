//! Rust client for remote WebDriver servers.
//!
//! This crate is the ergonomic surface over the protocol engine in
//! `wd-runtime`: a [`Session`] that dispatches commands against a remote
//! server, opaque [`Element`] and [`ShadowRoot`] handles, and the recursive
//! value marshaller that threads those handles through arbitrarily nested
//! script arguments and results.
//!
//! # Quick start
//!
//! ```no_run
//! use serde_json::{Map, json};
//! use std::sync::Arc;
//! use wd::Session;
//! use wd_runtime::HttpExecutor;
//!
//! # async fn run() -> wd_runtime::Result<()> {
//! let executor = Arc::new(HttpExecutor::new("http://localhost:4444"));
//! let session = Session::new(executor);
//!
//! let mut caps = Map::new();
//! caps.insert("browserName".to_string(), json!("firefox"));
//! session.start_session(&caps).await?;
//!
//! session.goto("https://example.com").await?;
//! let heading = session.find_element("css selector", "h1").await?;
//! session.quit().await?;
//! # Ok(())
//! # }
//! ```

pub mod element;
pub mod logging;
pub mod session;
pub mod value;

pub use element::{Element, ShadowRoot};
pub use logging::LogEntry;
pub use session::Session;
pub use value::{Arg, WdValue, decode, encode};

// The failure channel is shared with the runtime; re-exported so callers
// need only this crate.
pub use wd_runtime::{Error, Result};
