//! Domain Errors

use std::fmt;
use std::io;

/// Failures local to a single connection. None of them leave the handler.
#[derive(Debug)]
pub enum ConnectionError {
    Io(io::Error),
    /// The peer went away before a full request line arrived.
    PeerClosed,
    /// Fewer than two tokens on the request line.
    MalformedRequest { line: String },
    /// No line terminator within the first `limit` bytes.
    RequestLineTooLong { limit: usize },
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "connection i/o failure: {e}"),
            Self::PeerClosed => f.write_str("peer closed before sending a request line"),
            Self::MalformedRequest { line } => write!(f, "malformed request line {line:?}"),
            Self::RequestLineTooLong { limit } => {
                write!(f, "request line longer than {limit} bytes")
            }
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConnectionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug)]
pub enum DispatchError {
    Bind { port: u16, source: io::Error },
    EmptyPool,
    InvalidQueueBound,
    PoolClosed,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { port, source } => write!(f, "could not listen on port {port}: {source}"),
            Self::EmptyPool => f.write_str("number of workers must be greater than zero"),
            Self::InvalidQueueBound => f.write_str("queue bound must be greater than zero"),
            Self::PoolClosed => f.write_str("worker pool is no longer accepting jobs"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            _ => None,
        }
    }
}
