//! Final placements
//!
//! Level 1 - Per-format resolution and Level 2 - Bracket walks
//!
//! Placements are read off an elimination bracket by walking it from the
//! final backward: the final decides ranks 1 and 2, and every earlier round's
//! losers share the next free rank. Below the top cut of a Swiss tournament
//! the Swiss standings fill in the remaining ranks.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use bracket_core::generate::{FINAL_GROUP, SECOND_GROUP, WINNER_GROUP};
use bracket_core::{Format, Match, PlayerId, Side, TournamentStatus, TournamentView};

use crate::comparator::{compare_performance, StandingsValues};

/// Rank (1-based) to the players sharing it
pub type PlacementMap = BTreeMap<u32, Vec<PlayerId>>;

/// First rank below the final
const FIRST_OPEN_RANK: u32 = 3;

// ============================================================================
// Level 1 - Per-format resolution
// ============================================================================

/// Compute final placements for the current state of `tournament`.
///
/// `swiss_standings` must be sorted best first; it is only read for Swiss
/// tournaments. Unfinished matches leave their ranks empty.
pub fn compute_final_standings<T: TournamentView + ?Sized>(
    tournament: &T,
    swiss_standings: &[StandingsValues],
) -> PlacementMap {
    let placements = match tournament.format() {
        Format::Swiss(settings) => {
            if matches!(
                tournament.status(),
                TournamentStatus::Setup | TournamentStatus::StageOne
            ) {
                return PlacementMap::new();
            }
            let first_round = tournament.swiss_round_count() + 1;
            let mut placements = single_elimination_placements(tournament, first_round);
            let cutoff = (settings.advancement_cutoff as usize).min(swiss_standings.len());
            merge_swiss_standings(&mut placements, &swiss_standings[cutoff..], cutoff as u32);
            placements
        }
        Format::SingleElimination(_) => single_elimination_placements(tournament, 0),
        Format::DoubleElimination(_) => double_elimination_placements(tournament),
    };

    tracing::debug!(
        "Resolved {} ranks for {:?} tournament",
        placements.len(),
        tournament.format().kind()
    );

    placements
}

// ============================================================================
// Level 2 - Bracket walks
// ============================================================================

/// Placements of a single elimination bracket whose rounds start at
/// `first_round`. A played consolation final decides ranks 3 and 4.
fn single_elimination_placements<T: TournamentView + ?Sized>(
    tournament: &T,
    first_round: u32,
) -> PlacementMap {
    let mut placements = PlacementMap::new();

    let in_stage = |m: &&Match| m.round_id >= first_round;
    let bracket: Vec<&Match> = tournament
        .matches()
        .iter()
        .filter(in_stage)
        .filter(|m| m.group_id == Some(WINNER_GROUP))
        .collect();
    let consolation_final = tournament
        .matches()
        .iter()
        .filter(in_stage)
        .find(|m| m.group_id == Some(SECOND_GROUP));

    let mut rounds = rounds_descending(&bracket);
    if rounds.is_empty() {
        return placements;
    }
    let final_round = rounds.remove(0);
    if let Some(final_match) = final_round.first() {
        place_final(tournament, final_match, &mut placements);
    }

    let consolation_result = consolation_final.and_then(|m| tournament.winner_loser_of(m));
    let mut rank = FIRST_OPEN_RANK;
    for (idx, round) in rounds.iter().enumerate() {
        match consolation_result {
            // The semi final losers were split by the consolation final
            Some((winner, loser)) if idx == 0 => {
                placements.insert(rank, vec![winner.clone()]);
                placements.insert(rank + 1, vec![loser.clone()]);
                rank += played_count(round);
            }
            _ => rank = place_round(tournament, round, rank, &mut placements),
        }
    }

    placements
}

/// Placements of a double elimination stage: the grand final decides ranks
/// 1 and 2, then the loser bracket is walked backward.
fn double_elimination_placements<T: TournamentView + ?Sized>(tournament: &T) -> PlacementMap {
    let mut placements = PlacementMap::new();

    let mut grand_final: Vec<&Match> = tournament
        .matches()
        .iter()
        .filter(|m| m.group_id == Some(FINAL_GROUP) && m.number == 1)
        .collect();
    grand_final.sort_by_key(|m| m.round_id);

    if let Some(final_match) = deciding_final(tournament, &grand_final) {
        place_final(tournament, final_match, &mut placements);
    }

    let loser_bracket: Vec<&Match> = tournament
        .matches()
        .iter()
        .filter(|m| m.group_id == Some(SECOND_GROUP))
        .collect();

    let mut rank = FIRST_OPEN_RANK;
    for round in rounds_descending(&loser_bracket) {
        rank = place_round(tournament, &round, rank, &mut placements);
    }

    placements
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Matches grouped by round, latest round first, each sorted by number
fn rounds_descending<'m>(matches: &[&'m Match]) -> Vec<Vec<&'m Match>> {
    let mut by_round: BTreeMap<u32, Vec<&'m Match>> = BTreeMap::new();
    for m in matches {
        by_round.entry(m.round_id).or_default().push(*m);
    }
    by_round
        .into_values()
        .rev()
        .map(|mut round| {
            round.sort_by_key(|m| m.number);
            round
        })
        .collect()
}

/// The grand final match that decides ranks 1 and 2, if it has ended.
///
/// When the loser bracket champion (opponent 2) wins the first match the
/// reset is the final, so nothing is decided until the reset has a result.
fn deciding_final<'m, T: TournamentView + ?Sized>(
    tournament: &T,
    grand_final: &[&'m Match],
) -> Option<&'m Match> {
    let first = *grand_final.first()?;
    let reset = grand_final.get(1).copied();

    if let Some(reset) = reset {
        if tournament.winner_loser_of(reset).is_some() {
            return Some(reset);
        }
    }
    tournament.winner_loser_of(first)?;

    match (reset, first.winning_side()) {
        (Some(_), Some(Side::Opponent2)) => None,
        _ => Some(first),
    }
}

fn place_final<T: TournamentView + ?Sized>(
    tournament: &T,
    final_match: &Match,
    placements: &mut PlacementMap,
) {
    if let Some((winner, loser)) = tournament.winner_loser_of(final_match) {
        placements.insert(1, vec![winner.clone()]);
        placements.insert(2, vec![loser.clone()]);
    }
}

/// Put the recorded losers of `round` at `rank` and return the next free
/// rank. A round without any recorded loser takes no rank.
fn place_round<T: TournamentView + ?Sized>(
    tournament: &T,
    round: &[&Match],
    rank: u32,
    placements: &mut PlacementMap,
) -> u32 {
    let losers: Vec<PlayerId> = round
        .iter()
        .filter_map(|m| tournament.winner_loser_of(m))
        .map(|(_, loser)| loser.clone())
        .collect();

    if losers.is_empty() {
        return rank;
    }
    placements.insert(rank, losers);
    rank + played_count(round)
}

/// Matches of a round that can produce a loser
fn played_count(round: &[&Match]) -> u32 {
    round.iter().filter(|m| !m.is_bye()).count() as u32
}

/// Append Swiss-only players below the top cut. A player shares the
/// previous player's rank unless the previous one did strictly better; a
/// shared rank consumes one rank per player.
fn merge_swiss_standings(placements: &mut PlacementMap, below_cut: &[StandingsValues], cutoff: u32) {
    let mut rank = cutoff;

    for (idx, standing) in below_cut.iter().enumerate() {
        let advances = idx == 0
            || compare_performance(&below_cut[idx - 1], standing) == Ordering::Less;
        if advances {
            rank = cutoff + idx as u32 + 1;
        }
        placements
            .entry(rank)
            .or_default()
            .push(standing.player.clone());
    }
}
