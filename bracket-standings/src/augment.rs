//! Extra tiebreakers derived from match history
//!
//! The host library produces base standings (points and opponent
//! percentages). Two tiebreakers it does not know about are computed here
//! from the recorded matches: losses against players on the same match
//! points, and games lost.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use bracket_core::{Match, PlayerId, Side};

use crate::comparator::{compare_standings_values, StandingsValues};

/// A line of the host's standings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseStanding {
    pub player: PlayerId,
    #[serde(default = "default_active")]
    pub active: bool,
    pub match_points: u32,
    pub game_points: u32,
    #[serde(default)]
    pub opponent_match_win_pct: f64,
    #[serde(default)]
    pub opponent_game_win_pct: f64,
}

fn default_active() -> bool {
    true
}

impl BaseStanding {
    pub fn new(player: impl Into<PlayerId>, match_points: u32, game_points: u32) -> Self {
        Self {
            player: player.into(),
            active: true,
            match_points,
            game_points,
            opponent_match_win_pct: 0.0,
            opponent_game_win_pct: 0.0,
        }
    }
}

#[derive(Default)]
struct Tally {
    losses_against_tied: u32,
    game_losses: u32,
}

/// Add the history tiebreakers to `base` and sort best first.
///
/// Only completed matches between two known players count.
pub fn augment_standings(base: &[BaseStanding], matches: &[Match]) -> Vec<StandingsValues> {
    let points: FxHashMap<&str, u32> = base
        .iter()
        .map(|s| (s.player.as_str(), s.match_points))
        .collect();
    let mut tallies: FxHashMap<&str, Tally> = FxHashMap::default();

    for m in matches.iter().filter(|m| m.is_completed() && !m.is_bye()) {
        let (Some(a), Some(b)) = (m.opponent(Side::Opponent1), m.opponent(Side::Opponent2)) else {
            continue;
        };
        let (Some(a_id), Some(b_id)) = (a.id.as_deref(), b.id.as_deref()) else {
            continue;
        };

        tallies.entry(a_id).or_default().game_losses += b.score.unwrap_or(0);
        tallies.entry(b_id).or_default().game_losses += a.score.unwrap_or(0);

        if let Some((winner, loser)) = m.winner_loser() {
            let tied = match (points.get(winner.as_str()), points.get(loser.as_str())) {
                (Some(w), Some(l)) => w == l,
                _ => false,
            };
            if tied {
                tallies.entry(loser.as_str()).or_default().losses_against_tied += 1;
            }
        }
    }

    let mut standings: Vec<StandingsValues> = base
        .iter()
        .enumerate()
        .map(|(order, s)| {
            let tally = tallies.get(s.player.as_str());
            StandingsValues {
                player: s.player.clone(),
                active: s.active,
                match_points: s.match_points,
                losses_against_tied: tally.map_or(0, |t| t.losses_against_tied),
                opponent_match_win_pct: s.opponent_match_win_pct,
                game_points: s.game_points,
                game_losses: tally.map_or(0, |t| t.game_losses),
                opponent_game_win_pct: s.opponent_game_win_pct,
                order,
            }
        })
        .collect();

    standings.sort_by(compare_standings_values);

    tracing::debug!(
        "Augmented {} standings from {} matches",
        standings.len(),
        matches.len()
    );

    standings
}
