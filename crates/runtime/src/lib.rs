//! WebDriver runtime - response normalization, error taxonomy, transport seam
//!
//! This crate provides the protocol-engine infrastructure between the
//! ergonomic client API (`wd-rs`) and the wire types (`wd-protocol`):
//!
//! - **Response parsing**: normalizing the two historical wire dialects
//!   (legacy JSON wire vs. W3C) into one `{session id, status, value}` shape
//! - **Error taxonomy**: the total mapping from wire error-code strings to
//!   result codes to typed failures
//! - **Transport seam**: the [`CommandExecutor`] trait consumed by the
//!   session orchestrator, plus a reqwest-based HTTP implementation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │    wd-rs    │  Session, Element, value marshalling
//! └──────┬──────┘
//!        │ consumes CommandExecutor
//! ┌──────▼──────┐
//! │  wd-runtime │  This crate
//! │  ┌────────┐ │
//! │  │ Resp   │ │  Dialect normalization
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Errors │ │  Wire code -> result code -> typed failure
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ HTTP   │ │  Endpoint routing + request execution
//! │  └────────┘ │
//! └─────────────┘
//! ```

pub mod error;
pub mod http;
pub mod response;
pub mod transport;

pub use error::{Error, ErrorData, Result, ResultCode, StackFrame};
pub use http::HttpExecutor;
pub use response::Response;
pub use transport::{CommandExecutor, ExecuteFuture};
