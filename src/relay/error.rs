//! Relay error types

/// Error type for relay operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Lobby name is empty or whitespace-only
    EmptyLobbyName,
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::EmptyLobbyName => write!(f, "lobby name cannot be empty"),
        }
    }
}

impl std::error::Error for RelayError {}
