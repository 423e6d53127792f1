//! Bracket connection mapper
//!
//! Walks one bracket (matches already split by round and sorted by number)
//! and computes the positional record of every match: which round it is in,
//! how many matches feed it, and how many feed the match it feeds.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use bracket_core::Match;

use crate::connection::{bracket_connection, Connection, GroupType};
use crate::error::{LayoutError, Result};

/// Position of a match within its bracket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPosition {
    /// 1-based
    pub round_number: u32,
    pub round_count: u32,
    /// Matches of this bracket whose winner comes here
    pub origin_matches: u32,
    /// `origin_matches` of the win destination; `None` without one, or when
    /// the destination lies outside the bracket
    pub child_origin_matches: Option<u32>,
    /// `origin_matches` of the win destination's next sibling
    pub child_sibling_origin_matches: Option<u32>,
    pub location: GroupType,
    /// Whether the last round joins the final group
    pub connect_final: bool,
}

impl MatchPosition {
    pub fn connection(&self) -> Connection {
        bracket_connection(
            self.round_number,
            self.round_count,
            self.origin_matches,
            self.child_origin_matches,
            self.location,
            self.connect_final,
        )
    }

    /// A match with a single feeder forwards its winner straight on and is
    /// drawn as a passthrough. Odd loser rounds are exempt since the other
    /// slot is filled by a drop from the winner bracket.
    pub fn bye_wrapper(&self) -> Option<ByeWrapper> {
        let forwards = self.child_origin_matches == Some(1)
            && (self.round_number % 2 == 0 || self.location != GroupType::LoserBracket);
        forwards.then(|| ByeWrapper {
            merge_with_sibling: self.child_sibling_origin_matches.unwrap_or(0) > 0,
        })
    }
}

/// Passthrough drawing for a match that only forwards its winner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByeWrapper {
    pub merge_with_sibling: bool,
}

/// Compute the position of every match of a bracket.
///
/// `rounds` must be in round order with each round sorted by number.
/// `stage` holds every match of the stage; a win destination found neither
/// in the bracket nor in the stage is an error.
pub fn map_bracket(
    rounds: Vec<Vec<Match>>,
    location: GroupType,
    connect_final: bool,
    stage: &[Match],
) -> Result<Vec<Vec<(Match, MatchPosition)>>> {
    let positions = compute_positions(&rounds, location, connect_final, stage)?;

    Ok(rounds
        .into_iter()
        .zip(positions)
        .map(|(round, positions)| round.into_iter().zip(positions).collect())
        .collect())
}

fn compute_positions(
    rounds: &[Vec<Match>],
    location: GroupType,
    connect_final: bool,
    stage: &[Match],
) -> Result<Vec<Vec<MatchPosition>>> {
    let round_count = rounds.len() as u32;

    let mut origin_counts: FxHashMap<&str, u32> = FxHashMap::default();
    for m in rounds.iter().flatten() {
        if origin_counts.insert(m.id.as_str(), 0).is_some() {
            return Err(LayoutError::DuplicateMatch(m.id.clone()));
        }
    }

    let stage_ids: FxHashSet<&str> = stage.iter().map(|m| m.id.as_str()).collect();
    let mut siblings: FxHashMap<&str, &str> = FxHashMap::default();
    for round in rounds.iter().rev() {
        for pair in round.windows(2) {
            siblings.insert(pair[0].id.as_str(), pair[1].id.as_str());
        }
        for m in round {
            let Some(destination) = m.win_destination.as_deref() else {
                continue;
            };
            // Destinations outside the bracket are not counted
            match origin_counts.get_mut(destination) {
                Some(count) => *count += 1,
                None if stage_ids.contains(destination) => {}
                None => {
                    return Err(LayoutError::MissingMetadata {
                        match_id: m.id.clone(),
                        field: "win_destination",
                    });
                }
            }
        }
    }

    let mut positions = Vec::with_capacity(rounds.len());
    for (idx, round) in rounds.iter().enumerate() {
        let round_number = idx as u32 + 1;
        let mut round_positions = Vec::with_capacity(round.len());

        for m in round {
            // Every id of the bracket was counted above
            let origin_matches = origin_counts[m.id.as_str()];
            let destination = m.win_destination.as_deref();
            let child_origin_matches = destination.and_then(|d| origin_counts.get(d).copied());
            let child_sibling_origin_matches = destination
                .and_then(|d| siblings.get(d))
                .and_then(|s| origin_counts.get(s).copied());

            round_positions.push(MatchPosition {
                round_number,
                round_count,
                origin_matches,
                child_origin_matches,
                child_sibling_origin_matches,
                location,
                connect_final,
            });
        }
        positions.push(round_positions);
    }

    tracing::trace!(
        "Mapped {:?} bracket: {} rounds, {} matches",
        location,
        round_count,
        origin_counts.len()
    );

    Ok(positions)
}
