//! Error types for session handling and configuration.

use crate::session::SessionId;
use derive_more::{Display, Error};
use tictak_board::{MoveError, Position};
use tracing::instrument;

/// Rejection of a session operation.
///
/// Every variant is an ordinary result of user input. The registry is
/// left exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionError {
    /// A game is already running for this session.
    #[display("A game is already in progress in session {}", _0)]
    AlreadyInProgress(SessionId),

    /// No game is running for this session.
    #[display("No game in progress in session {}", _0)]
    NoActiveGame(SessionId),

    /// The target cell is already taken.
    #[display("Cell {} is already taken", _0)]
    CellOccupied(Position),

    /// The cell index is outside 0-8.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    InvalidIndex(usize),
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::CellOccupied(position) => SessionError::CellOccupied(position),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_converts() {
        let err: SessionError = MoveError::CellOccupied(Position::Center).into();
        assert_eq!(err, SessionError::CellOccupied(Position::Center));
    }

    #[test]
    fn test_config_error_tracks_location() {
        let err = ConfigError::new("bad port");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Config error: bad port at "));
    }
}
