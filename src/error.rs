//! Crate-level error types

use crate::relay::RelayError;

/// Error type for server operations
#[derive(Debug)]
pub enum Error {
    /// I/O error (bind, accept, serve)
    Io(std::io::Error),
    /// Persistence store error
    Store(sqlx::Error),
    /// Relay core error
    Relay(RelayError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Store(err) => write!(f, "store error: {}", err),
            Error::Relay(err) => write!(f, "relay error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Store(err) => Some(err),
            Error::Relay(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Store(err)
    }
}

impl From<RelayError> for Error {
    fn from(err: RelayError) -> Self {
        Error::Relay(err)
    }
}

/// Result alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;
