//! Error types for pass-persist.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.

use crate::oid::OidKey;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error on the protocol transport.
    ///
    /// Write failures are fatal: the daemon on the other end of the pipe is gone.
    #[error("I/O error on transport: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Triple constructed with a type tag outside the supported set.
    #[error("bad SNMP type '{input}'")]
    InvalidType { input: Box<str> },

    /// Triple pushed for an OID outside the configured base subtree.
    #[error("OID {oid} is outside subtree {base}")]
    SubtreePrefixViolation { oid: OidKey, base: OidKey },

    /// The producer reported a failure of its own.
    #[error("producer failed: {message}")]
    Producer { message: Box<str> },

    /// The producer panicked while populating a triple set.
    #[error("producer panicked during population")]
    ProducerPanicked,

    /// Invalid agent configuration.
    #[error("configuration error: {message}")]
    Config { message: Box<str> },
}

impl Error {
    /// Create an invalid type error for the given tag.
    pub fn invalid_type(input: impl Into<Box<str>>) -> Self {
        Self::InvalidType {
            input: input.into(),
        }
    }

    /// Create a producer error from any displayable cause.
    ///
    /// Producers wrap their own failures (file reads, command output parsing)
    /// with this so the current population cycle is aborted.
    pub fn producer(cause: impl std::fmt::Display) -> Self {
        Self::Producer {
            message: cause.to_string().into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<Box<str>>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
