//! Bracket Standings - Tiebreakers and final placements
//!
//! This crate provides:
//! - The standings comparator (eight criteria, total order)
//! - History tiebreakers added to the host's base standings
//! - Final placement resolution for Swiss, single and double elimination

pub mod augment;
pub mod comparator;
pub mod placement;

// Re-exports for convenient access
pub use augment::{augment_standings, BaseStanding};
pub use comparator::{compare_performance, compare_standings_values, StandingsValues};
pub use placement::{compute_final_standings, PlacementMap};
