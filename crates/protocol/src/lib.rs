//! Wire types for the WebDriver protocol.
//!
//! This crate contains the serde-serializable types used for communication
//! with a remote WebDriver server over JSON/HTTP. These types represent the
//! "protocol layer" - the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization, lookup, and validation
//! - **1:1 with protocol**: Match the W3C WebDriver specification, with the
//!   legacy JSON wire dialect accounted for where the two differ
//! - **Stable**: Changes only when the wire protocol changes
//!
//! Higher-level ergonomic APIs are built on top of these types in `wd-rs`.

pub mod capabilities;
pub mod command;
pub mod endpoint;
pub mod reference;

pub use capabilities::*;
pub use command::*;
pub use endpoint::*;
pub use reference::*;
