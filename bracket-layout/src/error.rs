//! Layout errors

use bracket_core::{MatchId, PlayerId, StageType};

/// Errors raised while laying out a stage
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Cannot lay out a stage without matches")]
    NoMatches,

    #[error("Cannot lay out a stage without participants")]
    NoParticipants,

    #[error("Stage type {0:?} has no bracket layout")]
    UnsupportedStage(StageType),

    #[error("Match {match_id} references unknown participant {participant_id}")]
    UnknownParticipant {
        match_id: MatchId,
        participant_id: PlayerId,
    },

    #[error("Match {0} appears more than once in the bracket")]
    DuplicateMatch(MatchId),

    #[error("Match {match_id} has a {field} that is not part of the stage")]
    MissingMetadata {
        match_id: MatchId,
        field: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
