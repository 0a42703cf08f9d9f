//! Rendering client error types.
//!
//! Every failure from `send` or `health` is one of two kinds: the server was
//! never reached (`Connection`), or it answered with a non-success status
//! (`Server`).

use std::time::Duration;

/// Boxed error from a substituted [`HttpExecutor`](crate::HttpExecutor).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from the rendering client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a usable server response.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// The server responded with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl Error {
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Error::Server { .. })
    }

    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Server { status, .. } => Some(*status),
            Error::Connection(_) => None,
        }
    }
}

/// Transport failure before a complete response was obtained.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// DNS, connect, TLS, timeout or body read failure in reqwest.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Failure reported by a substituted executor.
    #[error("{0}")]
    Transport(#[source] BoxError),

    /// The caller's cancellation signal fired first.
    #[error("request cancelled")]
    Cancelled,

    /// The caller's deadline passed first.
    #[error("deadline of {0:?} elapsed")]
    DeadlineElapsed(Duration),
}

impl ConnectionError {
    /// Wrap an arbitrary transport error.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        ConnectionError::Transport(err.into())
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            ConnectionError::Http(e) => e.is_timeout(),
            ConnectionError::DeadlineElapsed(_) => true,
            ConnectionError::Transport(_) | ConnectionError::Cancelled => false,
        }
    }
}
