//! Standings entries and their ordering

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use bracket_core::PlayerId;

/// One player's line in the standings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingsValues {
    pub player: PlayerId,
    /// False once the player has dropped
    pub active: bool,
    pub match_points: u32,
    /// Losses against opponents on the same match points
    pub losses_against_tied: u32,
    pub opponent_match_win_pct: f64,
    pub game_points: u32,
    pub game_losses: u32,
    pub opponent_game_win_pct: f64,
    /// Position in the host's standings, the final tiebreak
    pub order: usize,
}

/// A percentage with no opponents behind it (0/0) counts as zero
fn percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

fn descending_f64(a: f64, b: f64) -> Ordering {
    percentage(b)
        .partial_cmp(&percentage(a))
        .unwrap_or(Ordering::Equal)
}

/// Compare on results alone, best first. `Equal` means the two entries
/// are indistinguishable by play and share a rank.
pub fn compare_performance(a: &StandingsValues, b: &StandingsValues) -> Ordering {
    b.active
        .cmp(&a.active)
        .then_with(|| b.match_points.cmp(&a.match_points))
        .then_with(|| a.losses_against_tied.cmp(&b.losses_against_tied))
        .then_with(|| descending_f64(a.opponent_match_win_pct, b.opponent_match_win_pct))
        .then_with(|| b.game_points.cmp(&a.game_points))
        .then_with(|| a.game_losses.cmp(&b.game_losses))
        .then_with(|| descending_f64(a.opponent_game_win_pct, b.opponent_game_win_pct))
}

/// Total order over standings entries, best first. Entries equal on
/// performance are kept in host order.
pub fn compare_standings_values(a: &StandingsValues, b: &StandingsValues) -> Ordering {
    compare_performance(a, b).then_with(|| a.order.cmp(&b.order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn entry(player: &str, order: usize) -> StandingsValues {
        StandingsValues {
            player: player.to_string(),
            active: true,
            match_points: 6,
            losses_against_tied: 0,
            opponent_match_win_pct: 0.5,
            game_points: 6,
            game_losses: 2,
            opponent_game_win_pct: 0.5,
            order,
        }
    }

    fn random_entry(rng: &mut ChaCha8Rng, order: usize) -> StandingsValues {
        // Narrow ranges so that ties on early criteria are common
        StandingsValues {
            player: format!("p{}", order),
            active: rng.gen_bool(0.9),
            match_points: rng.gen_range(0..4) * 3,
            losses_against_tied: rng.gen_range(0..2),
            opponent_match_win_pct: random_pct(rng),
            game_points: rng.gen_range(0..4),
            game_losses: rng.gen_range(0..3),
            opponent_game_win_pct: random_pct(rng),
            order,
        }
    }

    /// Includes the NaN a host produces for a player without opponents
    fn random_pct(rng: &mut ChaCha8Rng) -> f64 {
        if rng.gen_bool(0.1) {
            f64::NAN
        } else {
            rng.gen_range(0..3) as f64 / 4.0
        }
    }

    #[test]
    fn test_criteria_priority() {
        let base = entry("a", 0);

        let dropped = StandingsValues {
            active: false,
            match_points: 99,
            ..entry("b", 1)
        };
        assert_eq!(compare_standings_values(&base, &dropped), Ordering::Less);

        let more_points = StandingsValues {
            match_points: 9,
            losses_against_tied: 3,
            ..entry("b", 1)
        };
        assert_eq!(compare_standings_values(&more_points, &base), Ordering::Less);

        let lost_to_tied = StandingsValues {
            losses_against_tied: 1,
            opponent_match_win_pct: 0.9,
            ..entry("b", 1)
        };
        assert_eq!(compare_standings_values(&base, &lost_to_tied), Ordering::Less);

        let tougher_schedule = StandingsValues {
            opponent_match_win_pct: 0.6,
            game_points: 0,
            ..entry("b", 1)
        };
        assert_eq!(compare_standings_values(&tougher_schedule, &base), Ordering::Less);

        let more_games = StandingsValues {
            game_points: 7,
            game_losses: 5,
            ..entry("b", 1)
        };
        assert_eq!(compare_standings_values(&more_games, &base), Ordering::Less);

        let fewer_game_losses = StandingsValues {
            game_losses: 1,
            opponent_game_win_pct: 0.1,
            ..entry("b", 1)
        };
        assert_eq!(compare_standings_values(&fewer_game_losses, &base), Ordering::Less);

        let tougher_games = StandingsValues {
            opponent_game_win_pct: 0.7,
            ..entry("b", 1)
        };
        assert_eq!(compare_standings_values(&tougher_games, &base), Ordering::Less);
    }

    #[test]
    fn test_order_breaks_full_ties() {
        let a = entry("a", 0);
        let b = entry("b", 1);
        assert_eq!(compare_performance(&a, &b), Ordering::Equal);
        assert_eq!(compare_standings_values(&a, &b), Ordering::Less);
        assert_eq!(compare_standings_values(&b, &a), Ordering::Greater);
        assert_eq!(compare_standings_values(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_comparator_is_total_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..20 {
            let entries: Vec<StandingsValues> =
                (0..12).map(|order| random_entry(&mut rng, order)).collect();

            for a in &entries {
                for b in &entries {
                    assert_eq!(
                        compare_standings_values(a, b),
                        compare_standings_values(b, a).reverse(),
                        "antisymmetry: {} vs {}",
                        a.player,
                        b.player
                    );
                    for c in &entries {
                        if compare_standings_values(a, b) == Ordering::Less
                            && compare_standings_values(b, c) == Ordering::Less
                        {
                            assert_eq!(compare_standings_values(a, c), Ordering::Less);
                        }
                    }
                }
            }

            let mut sorted = entries.clone();
            sorted.sort_by(compare_standings_values);
            for pair in sorted.windows(2) {
                assert_eq!(compare_standings_values(&pair[0], &pair[1]), Ordering::Less);
            }
        }
    }

    #[test]
    fn test_nan_percentage_counts_as_zero() {
        let high = StandingsValues {
            opponent_match_win_pct: 0.9,
            ..entry("a", 2)
        };
        let unknown = StandingsValues {
            opponent_match_win_pct: f64::NAN,
            ..entry("b", 1)
        };
        let low = StandingsValues {
            opponent_match_win_pct: 0.1,
            ..entry("c", 0)
        };

        assert_eq!(compare_standings_values(&high, &unknown), Ordering::Less);
        assert_eq!(compare_standings_values(&low, &unknown), Ordering::Less);
        assert_eq!(compare_standings_values(&high, &low), Ordering::Less);

        let zero = StandingsValues {
            opponent_match_win_pct: 0.0,
            ..entry("d", 3)
        };
        assert_eq!(compare_performance(&unknown, &zero), Ordering::Equal);
    }
}
