//! Bracket Layout - Turning a stage's matches into a drawable bracket
//!
//! This crate provides:
//! - Grouping of matches by group and round
//! - The connection mapper (origin counts, siblings, connectors, byes)
//! - Match labels, round names and origin hints behind a [`Translate`] seam
//! - Stage layout for round-robin, single and double elimination stages
//! - Slot and caption content driven by [`ViewerConfig`]

pub mod config;
pub mod connection;
pub mod error;
pub mod grouping;
pub mod lang;
pub mod layout;
pub mod mapper;
pub mod slots;

// Re-exports for convenient access
pub use config::{OriginPlacement, ViewerConfig};
pub use connection::{
    bracket_connection, final_connection, Connection, ConnectionType, FinalType, GroupType,
};
pub use error::LayoutError;
pub use grouping::{Group, MatchGroups};
pub use lang::{EnglishTranslator, KeyTranslator, OriginHint, RoundNameInfo, Translate};
pub use layout::{BracketLayout, FinalLayout, LaidOutMatch, RoundLayout, StageLayout, Viewer};
pub use mapper::{map_bracket, ByeWrapper, MatchPosition};
pub use slots::{match_caption, origin_abbreviation, slot_display, MatchCaption, SlotDisplay};
