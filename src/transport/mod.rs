//! Transport layer abstraction.
//!
//! Provides the [`LineTransport`] trait and [`StreamTransport`], its
//! implementation over any tokio byte stream pair (stdin/stdout in production,
//! in-memory pipes in tests).

mod stream;

pub use stream::*;

use crate::error::Result;
use std::future::Future;
use std::time::Duration;

/// Outcome of waiting for one inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A line with its terminator removed.
    Line(String),
    /// The peer closed its end.
    Eof,
    /// Nothing arrived within the idle timeout.
    TimedOut,
}

/// Agent-side line transport.
///
/// The SNMP daemon blocks on reading our replies, so every call to
/// [`send_lines`](LineTransport::send_lines) must be flushed before it returns.
pub trait LineTransport: Send {
    /// Wait up to `timeout` for the next newline-terminated line.
    fn recv_line(&mut self, timeout: Duration) -> impl Future<Output = Result<Inbound>> + Send;

    /// Write each line followed by `\n`, then flush.
    ///
    /// Errors are fatal to the agent: a closed pipe means the daemon is gone.
    fn send_lines(&mut self, lines: &[String]) -> impl Future<Output = Result<()>> + Send;
}
