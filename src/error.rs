use thiserror::Error;

/// Failures surfaced by the game engine and the request layer on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NimError {
    /// Malformed start situation or config value; nothing was created.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The move was rejected and the match is unchanged.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("no active match")]
    NoActiveMatch,
}

impl NimError {
    pub fn config(msg: impl Into<String>) -> Self { NimError::InvalidConfiguration(msg.into()) }
    pub fn illegal(msg: impl Into<String>) -> Self { NimError::IllegalMove(msg.into()) }
}
