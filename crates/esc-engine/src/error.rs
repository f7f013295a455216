//! Error types for the game engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while playing a level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A room, object, or inventory index was out of range.
    #[error("{0}")]
    Level(#[from] esc_core::EscError),

    /// The object carries no puzzle to hint at or answer.
    #[error("{0} has no puzzle")]
    NoPuzzle(String),

    /// The object's puzzle has already been solved.
    #[error("{0} is already solved")]
    AlreadySolved(String),

    /// A resumed state does not fit the level it is applied to.
    #[error("state does not match level: expected {expected} objects, found {found}")]
    StateMismatch {
        /// Object count of the level.
        expected: usize,
        /// Length of the solved-flag array in the state.
        found: usize,
    },

    /// The game is already over; there is no current room.
    #[error("all rooms have been escaped")]
    GameOver,
}
