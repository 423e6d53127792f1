//! Error types shared by the bracket crates

use crate::matches::MatchId;

/// Errors raised while validating formats or generating brackets
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid format settings: {field} must be a positive integer")]
    InvalidSettings { field: &'static str },

    #[error("Cannot generate a bracket without participants")]
    NoParticipants,

    #[error("Double elimination generation needs a power-of-two participant count, got {0}")]
    UnsupportedParticipantCount(usize),

    #[error("Match {0} is referenced but does not exist")]
    UnknownMatch(MatchId),

    #[error("Match {0} already has a result")]
    MatchAlreadyCompleted(MatchId),
}

pub type Result<T> = std::result::Result<T, CoreError>;
