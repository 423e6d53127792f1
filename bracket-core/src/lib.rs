//! Bracket Core - Formats, round structure and the match model
//!
//! This crate provides the shared vocabulary of the bracket engine:
//! - Tournament formats and their settings
//! - Round structure generation (round counts, names, counterpick rounds)
//! - The match model supplied by a host tournament library
//! - The read-only host query surface and an in-memory host
//! - Blank single/double elimination bracket generation

pub mod error;
pub mod format;
pub mod generate;
pub mod host;
pub mod matches;
pub mod rounds;

// Re-exports for convenient access
pub use error::CoreError;
pub use format::{
    DoubleEliminationSettings, Format, FormatKind, HostSettings, SingleEliminationSettings,
    StageType, SwissSettings,
};
pub use generate::{GenerateOptions, GrandFinal};
pub use host::{InMemoryTournament, Player, TournamentStatus, TournamentView};
pub use matches::{Match, MatchId, MatchStatus, Outcome, ParticipantResult, PlayerId, Side};
pub use rounds::{
    compute_counterpick_round_indices, compute_losers_round_count, compute_simple_round_count,
    create_rounds, create_rounds_with_counterpicks, GameType, PlayStyle, Round,
};
