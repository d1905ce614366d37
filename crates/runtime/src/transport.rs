//! The transport seam consumed by the session orchestrator.
//!
//! A transport executes one [`Command`] and yields either a parsed
//! [`Response`] or a transport-level failure. Retry, backoff, and
//! connection reuse all live behind this trait; the engine above it sees
//! one command in, one response or failure out.

use crate::error::Result;
use crate::response::Response;
use std::future::Future;
use std::pin::Pin;
use wd_protocol::Command;

/// Boxed future returned by [`CommandExecutor::execute`].
pub type ExecuteFuture<'a> = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'a>>;

/// Executes commands against a remote WebDriver server.
///
/// Implementations must preserve per-session ordering when called
/// sequentially; the session orchestrator never overlaps commands for one
/// session.
pub trait CommandExecutor: Send + Sync {
    /// Execute a single command and await its response.
    fn execute<'a>(&'a self, command: &'a Command) -> ExecuteFuture<'a>;
}
