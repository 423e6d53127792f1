//! Round structure generation
//!
//! Derives the ordered list of rounds a format needs for a given player
//! count, and which of those rounds use counterpick game selection.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: create_rounds, compute_counterpick_round_indices (orchestration)
//! - Level 3: elimination_sequence (steps)
//! - Level 4: round count arithmetic

use serde::{Deserialize, Serialize};

use crate::format::Format;

/// How a game's map/mode is chosen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Picked from the fixed pool for the round
    Pool,
    /// Picked reactively by the previous game's loser
    Counterpick,
}

/// How a round is played out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayStyle {
    #[default]
    BestOf,
}

/// A round descriptor consumed by the host library
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub name: String,
    pub play_style: PlayStyle,
    /// One entry per game; the length is the best-of count
    pub games: Vec<GameType>,
}

impl Round {
    fn best_of(name: String, best_of: u32) -> Self {
        Self {
            name,
            play_style: PlayStyle::BestOf,
            games: vec![GameType::Pool; best_of as usize],
        }
    }

    /// Number of games in the round
    pub fn best_of_count(&self) -> usize {
        self.games.len()
    }
}

/// Names used for one elimination sequence
struct SequenceNames {
    round_prefix: &'static str,
    semis: &'static str,
    finals: &'static str,
}

const GENERIC_NAMES: SequenceNames = SequenceNames {
    round_prefix: "Round ",
    semis: "Semifinals",
    finals: "Finals",
};

const PLAYOFF_NAMES: SequenceNames = SequenceNames {
    round_prefix: "Playoffs R",
    semis: "Playoffs Semis",
    finals: "Playoffs Finals",
};

const WINNERS_NAMES: SequenceNames = SequenceNames {
    round_prefix: "Winners R",
    semis: "Winners Semis",
    finals: "Winners Finals",
};

const LOSERS_NAMES: SequenceNames = SequenceNames {
    round_prefix: "Losers R",
    semis: "Losers Semis",
    finals: "Losers Finals",
};

// ============================================================================
// Level 4 - Round count arithmetic
// ============================================================================

fn floor_log2(n: u32) -> u32 {
    debug_assert!(n > 0);
    31 - n.leading_zeros()
}

/// Rounds needed for a knockout of `players`, i.e. `ceil(log2(players))`.
///
/// Zero for one player or fewer: no bracket is needed.
pub fn compute_simple_round_count(players: u32) -> u32 {
    if players <= 1 {
        0
    } else {
        floor_log2(players - 1) + 1
    }
}

/// Rounds in the loser bracket of a double elimination (OEIS A126236).
///
/// `floor(log2(n)) + floor(log2(2n / 3))` with `n = players`; zero below
/// three players.
pub fn compute_losers_round_count(players: u32) -> u32 {
    if players < 3 {
        return 0;
    }
    let n = players;
    floor_log2(n) + floor_log2(2 * n / 3)
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Create the round descriptors for `players` playing `format`
pub fn create_rounds(players: u32, format: &Format) -> Vec<Round> {
    match format {
        Format::Swiss(settings) => {
            let swiss_rounds = (1..=compute_simple_round_count(players))
                .map(|n| Round::best_of(format!("Swiss R{}", n), settings.swiss_best_of));

            let top_cut = settings.advancement_cutoff.min(players);
            let playoffs = elimination_sequence(
                compute_simple_round_count(top_cut),
                &PLAYOFF_NAMES,
                settings.playoffs_best_of,
                settings.playoffs_best_of,
            );

            swiss_rounds.chain(playoffs).collect()
        }
        Format::SingleElimination(settings) => elimination_sequence(
            compute_simple_round_count(players),
            &GENERIC_NAMES,
            settings.best_of,
            settings.finals_best_of,
        ),
        Format::DoubleElimination(settings) => {
            let mut rounds = elimination_sequence(
                compute_simple_round_count(players),
                &WINNERS_NAMES,
                settings.best_of,
                settings.finals_best_of,
            );
            rounds.push(Round::best_of(
                "Grand Final".to_string(),
                settings.grand_final_best_of,
            ));

            let losers_count = compute_losers_round_count(players);
            if losers_count > 0 {
                rounds.extend(elimination_sequence(
                    losers_count,
                    &LOSERS_NAMES,
                    settings.best_of,
                    settings.finals_best_of,
                ));
            }
            rounds
        }
    }
}

/// Create the rounds with the counterpick rounds' games switched to
/// [`GameType::Counterpick`]
pub fn create_rounds_with_counterpicks(
    players: u32,
    format: &Format,
    counterpick_rounds: u32,
) -> Vec<Round> {
    let mut rounds = create_rounds(players, format);
    for index in compute_counterpick_round_indices(counterpick_rounds, players, format) {
        if let Some(round) = rounds.get_mut(index) {
            round.games.fill(GameType::Counterpick);
        }
    }
    rounds
}

/// Sorted 0-based indices (in [`create_rounds`] order) of the rounds that use
/// counterpick selection, counted backward from the final round(s).
pub fn compute_counterpick_round_indices(
    counterpick_rounds: u32,
    players: u32,
    format: &Format,
) -> Vec<usize> {
    if counterpick_rounds == 0 {
        return Vec::new();
    }
    let wanted = counterpick_rounds as usize;

    match format {
        Format::Swiss(_) | Format::SingleElimination(_) => {
            let total = create_rounds(players, format).len();
            (total - wanted.min(total)..total).collect()
        }
        Format::DoubleElimination(_) => {
            let winners = compute_simple_round_count(players).max(1) as usize;
            let losers = compute_losers_round_count(players) as usize;
            let grand_final = winners;
            let last = winners + losers;

            let mut indices = vec![grand_final];
            for i in 0..(wanted - 1).min(winners.max(losers)) {
                if i < winners {
                    indices.push(winners - 1 - i);
                }
                if i < losers {
                    indices.push(last - i);
                }
            }
            indices.sort_unstable();
            indices
        }
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// One elimination sequence of `round_count` rounds ending in a finals round.
///
/// Fewer than two rounds collapse to the finals round alone.
fn elimination_sequence(
    round_count: u32,
    names: &SequenceNames,
    best_of: u32,
    finals_best_of: u32,
) -> Vec<Round> {
    let mut rounds: Vec<Round> = (1..=round_count.saturating_sub(2))
        .map(|n| Round::best_of(format!("{}{}", names.round_prefix, n), best_of))
        .collect();

    if round_count > 1 {
        rounds.push(Round::best_of(names.semis.to_string(), finals_best_of));
    }
    rounds.push(Round::best_of(names.finals.to_string(), finals_best_of));

    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{DoubleEliminationSettings, SingleEliminationSettings, SwissSettings};
    use std::collections::HashSet;

    fn names(rounds: &[Round]) -> Vec<&str> {
        rounds.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_simple_round_count() {
        assert_eq!(compute_simple_round_count(0), 0);
        assert_eq!(compute_simple_round_count(1), 0);
        assert_eq!(compute_simple_round_count(2), 1);
        assert_eq!(compute_simple_round_count(3), 2);
        assert_eq!(compute_simple_round_count(8), 3);
        assert_eq!(compute_simple_round_count(9), 4);
        assert_eq!(compute_simple_round_count(1024), 10);
    }

    #[test]
    fn test_losers_round_count() {
        assert_eq!(compute_losers_round_count(0), 0);
        assert_eq!(compute_losers_round_count(2), 0);
        assert_eq!(compute_losers_round_count(3), 2);
        assert_eq!(compute_losers_round_count(8), 5);
        assert_eq!(compute_losers_round_count(16), 7);
    }

    #[test]
    fn test_single_elimination_rounds() {
        let rounds = create_rounds(8, &Format::single_elimination());
        assert_eq!(names(&rounds), vec!["Round 1", "Semifinals", "Finals"]);
        assert_eq!(rounds[0].best_of_count(), 3);
        assert_eq!(rounds[1].best_of_count(), 5);
        assert_eq!(rounds[2].best_of_count(), 5);
        assert!(rounds[0].games.iter().all(|g| *g == GameType::Pool));
    }

    #[test]
    fn test_degenerate_sequences_collapse_to_finals() {
        for players in [0, 1, 2] {
            let rounds = create_rounds(players, &Format::single_elimination());
            assert_eq!(names(&rounds), vec!["Finals"], "players={}", players);
        }
    }

    #[test]
    fn test_swiss_rounds() {
        let format = Format::Swiss(SwissSettings {
            swiss_best_of: 1,
            advancement_cutoff: 8,
            playoffs_best_of: 3,
        });
        let rounds = create_rounds(16, &format);
        assert_eq!(
            names(&rounds),
            vec![
                "Swiss R1",
                "Swiss R2",
                "Swiss R3",
                "Swiss R4",
                "Playoffs R1",
                "Playoffs Semis",
                "Playoffs Finals",
            ]
        );
        assert_eq!(rounds[0].best_of_count(), 1);
        assert!(rounds[4..].iter().all(|r| r.best_of_count() == 3));
    }

    #[test]
    fn test_swiss_cutoff_capped_at_players() {
        let format = Format::Swiss(SwissSettings {
            advancement_cutoff: 64,
            ..Default::default()
        });
        let rounds = create_rounds(4, &format);
        assert_eq!(
            names(&rounds),
            vec!["Swiss R1", "Swiss R2", "Playoffs Semis", "Playoffs Finals"]
        );
    }

    #[test]
    fn test_double_elimination_rounds() {
        let format = Format::DoubleElimination(DoubleEliminationSettings {
            best_of: 3,
            finals_best_of: 5,
            grand_final_best_of: 7,
        });
        let rounds = create_rounds(8, &format);
        assert_eq!(
            names(&rounds),
            vec![
                "Winners R1",
                "Winners Semis",
                "Winners Finals",
                "Grand Final",
                "Losers R1",
                "Losers R2",
                "Losers R3",
                "Losers Semis",
                "Losers Finals",
            ]
        );
        assert_eq!(rounds[3].best_of_count(), 7);
    }

    #[test]
    fn test_double_elimination_two_players_has_no_losers() {
        let rounds = create_rounds(2, &Format::double_elimination());
        assert_eq!(names(&rounds), vec!["Winners Finals", "Grand Final"]);
    }

    #[test]
    fn test_round_names_unique_and_end_in_finals() {
        let formats = [
            Format::swiss(),
            Format::single_elimination(),
            Format::double_elimination(),
        ];
        for format in &formats {
            for players in 0..70 {
                let rounds = create_rounds(players, format);
                let unique: HashSet<&str> = names(&rounds).into_iter().collect();
                assert_eq!(unique.len(), rounds.len(), "{:?} players={}", format, players);

                let last = &rounds.last().unwrap().name;
                match format {
                    Format::DoubleElimination(_) if players < 3 => {
                        assert_eq!(last, "Grand Final");
                        assert!(rounds[rounds.len() - 2].name.ends_with("Finals"));
                    }
                    _ => assert!(last.ends_with("Finals"), "{:?} players={}", format, players),
                }
            }
        }
    }

    #[test]
    fn test_counterpick_zero_is_empty() {
        for format in [
            Format::swiss(),
            Format::single_elimination(),
            Format::double_elimination(),
        ] {
            for players in [0, 2, 8, 33] {
                assert!(compute_counterpick_round_indices(0, players, &format).is_empty());
            }
        }
    }

    #[test]
    fn test_counterpick_single_elimination_tail() {
        let format = Format::SingleElimination(SingleEliminationSettings::default());
        // 16 players: Round 1, Round 2, Semifinals, Finals
        assert_eq!(compute_counterpick_round_indices(2, 16, &format), vec![2, 3]);
        assert_eq!(compute_counterpick_round_indices(10, 16, &format), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_counterpick_double_elimination_symmetric() {
        let format = Format::double_elimination();
        // 8 players: W(0..=2), GF(3), L(4..=8)
        assert_eq!(compute_counterpick_round_indices(1, 8, &format), vec![3]);
        assert_eq!(compute_counterpick_round_indices(2, 8, &format), vec![2, 3, 8]);
        assert_eq!(
            compute_counterpick_round_indices(3, 8, &format),
            vec![1, 2, 3, 7, 8]
        );
    }

    #[test]
    fn test_create_rounds_with_counterpicks() {
        let rounds = create_rounds_with_counterpicks(8, &Format::single_elimination(), 1);
        assert!(rounds[2].games.iter().all(|g| *g == GameType::Counterpick));
        assert!(rounds[1].games.iter().all(|g| *g == GameType::Pool));
    }
}
