use thiserror::Error;

/// Errors returned by the engine's entry points.
///
/// Every variant is recoverable: the game state is left untouched when one is
/// returned, so the caller may retry with corrected input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("already started")]
    AlreadyStarted,
    #[error("already joined")]
    AlreadyJoined,
    #[error("not started")]
    NotStarted,
    #[error("match is complete")]
    MatchComplete,
    #[error("player doesn't exist")]
    UnknownPlayer,
    #[error("not current player")]
    NotCurrentPlayer,
    #[error("player doesn't have the card")]
    CardNotInHand,
    #[error("invalid card")]
    InvalidPlay,
    #[error("invalid token: {0:?}")]
    InvalidToken(String),
    #[error("deck holds {available} cards but dealing requires {required}")]
    InsufficientDeck { required: usize, available: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
