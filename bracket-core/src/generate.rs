//! Blank bracket generation
//!
//! Builds the match graph a host library would create for an elimination
//! stage: seeded first round, byes, and win/lose destinations. Results are
//! left empty.
//!
//! Match ids follow `<prefix><round>.<number>`: `R` for a single bracket,
//! `W`/`L` for the winner/loser brackets, `GF` for the grand final and `CF`
//! for a consolation final.

use crate::error::{CoreError, Result};
use crate::matches::{Match, ParticipantResult, PlayerId};

/// Group of the winner bracket (or the only bracket)
pub const WINNER_GROUP: u32 = 0;
/// Group of the loser bracket in double elimination, or of the consolation
/// final in single elimination
pub const SECOND_GROUP: u32 = 1;
/// Group holding the grand final in double elimination
pub const FINAL_GROUP: u32 = 2;

/// Grand final shape for double elimination
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrandFinal {
    /// No grand final; the brackets end separately
    None,
    /// One match
    #[default]
    Simple,
    /// A second match is played if the loser bracket champion wins the first
    Double,
}

/// Options for bracket generation
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    pub stage_id: u32,
    /// Round id given to the first round; later rounds count up from it
    pub first_round_id: u32,
    /// Games per match
    pub child_count: u32,
    /// Single elimination: play a match for third place
    pub consolation_final: bool,
    /// Double elimination grand final
    pub grand_final: GrandFinal,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            stage_id: 0,
            first_round_id: 1,
            child_count: 3,
            consolation_final: false,
            grand_final: GrandFinal::Simple,
        }
    }
}

impl GenerateOptions {
    /// Start round ids at `round_id`
    pub fn starting_at_round(mut self, round_id: u32) -> Self {
        self.first_round_id = round_id;
        self
    }

    /// Set games per match
    pub fn with_child_count(mut self, child_count: u32) -> Self {
        self.child_count = child_count;
        self
    }

    /// Add a third place match to single elimination
    pub fn with_consolation_final(mut self) -> Self {
        self.consolation_final = true;
        self
    }

    /// Set the double elimination grand final
    pub fn with_grand_final(mut self, grand_final: GrandFinal) -> Self {
        self.grand_final = grand_final;
        self
    }
}

/// Seed numbers in bracket order: 1 meets the last seed, and the top two
/// seeds can only meet in the final.
pub fn seed_order(size: usize) -> Vec<u32> {
    let mut order = vec![1u32];
    while order.len() < size {
        let mirror = 2 * order.len() as u32 + 1;
        order = order.iter().flat_map(|&s| [s, mirror - s]).collect();
    }
    order
}

fn match_id(prefix: &str, round: usize, number: usize) -> String {
    format!("{}{}.{}", prefix, round, number)
}

/// Single elimination bracket for `players` in seed order.
///
/// A lone player needs no bracket and yields no matches.
pub fn single_elimination(players: &[PlayerId], options: &GenerateOptions) -> Result<Vec<Match>> {
    if players.is_empty() {
        return Err(CoreError::NoParticipants);
    }
    if players.len() == 1 {
        return Ok(Vec::new());
    }

    let mut rounds = knockout_rounds(players, "R", WINNER_GROUP, options);
    let round_count = rounds.len();

    if options.consolation_final && round_count >= 2 {
        let round_id = options.first_round_id + round_count as u32;
        let id = match_id("CF", 1, 1);
        for semi in rounds[round_count - 2].iter_mut() {
            semi.lose_destination = Some(id.clone());
        }
        let consolation = blank(id, options, SECOND_GROUP, round_id, 1);
        rounds.push(vec![consolation]);
    }

    Ok(rounds.into_iter().flatten().collect())
}

/// Double elimination bracket for a power-of-two number of `players` (at
/// least four) in seed order.
pub fn double_elimination(players: &[PlayerId], options: &GenerateOptions) -> Result<Vec<Match>> {
    let n = players.len();
    if n == 0 {
        return Err(CoreError::NoParticipants);
    }
    if n < 4 || !n.is_power_of_two() {
        return Err(CoreError::UnsupportedParticipantCount(n));
    }

    let mut winners = knockout_rounds(players, "W", WINNER_GROUP, options);
    let k = winners.len();
    let loser_round_count = 2 * (k - 1);
    let lb_first_round_id = options.first_round_id + k as u32;

    // Loser bracket: odd rounds pair the survivors, even rounds take drops.
    let mut losers: Vec<Vec<Match>> = Vec::with_capacity(loser_round_count);
    for lr in 1..=loser_round_count {
        let count = if lr == 1 {
            n / 4
        } else if lr % 2 == 0 {
            n >> (lr / 2 + 1)
        } else {
            n >> ((lr - 1) / 2 + 2)
        };
        let round_id = lb_first_round_id + lr as u32 - 1;
        let round: Vec<Match> = (1..=count)
            .map(|i| {
                let mut m = blank(match_id("L", lr, i), options, SECOND_GROUP, round_id, i as u32);
                if lr == 1 {
                    m.opponent1 = Some(ParticipantResult::to_be_determined(Some(2 * i as u32 - 1)));
                    m.opponent2 = Some(ParticipantResult::to_be_determined(Some(2 * i as u32)));
                } else if lr % 2 == 0 {
                    m.opponent2 = Some(ParticipantResult::to_be_determined(Some(i as u32)));
                }
                if lr < loser_round_count {
                    let next = if lr % 2 == 1 { i } else { (i + 1) / 2 };
                    m.win_destination = Some(match_id("L", lr + 1, next));
                }
                m
            })
            .collect();
        losers.push(round);
    }

    for (r, round) in winners.iter_mut().enumerate() {
        let wr = r + 1;
        for (idx, m) in round.iter_mut().enumerate() {
            let i = idx + 1;
            m.lose_destination = Some(if wr == 1 {
                match_id("L", 1, (i + 1) / 2)
            } else {
                match_id("L", 2 * (wr - 1), i)
            });
        }
    }

    let mut finals: Vec<Match> = Vec::new();
    if options.grand_final != GrandFinal::None {
        let round_id = lb_first_round_id + loser_round_count as u32;
        let first = match_id("GF", 1, 1);
        for m in winners[k - 1].iter_mut().chain(losers[loser_round_count - 1].iter_mut()) {
            m.win_destination = Some(first.clone());
        }

        let mut grand_final = blank(first, options, FINAL_GROUP, round_id, 1);
        if options.grand_final == GrandFinal::Double {
            let reset = match_id("GF", 2, 1);
            grand_final.win_destination = Some(reset.clone());
            finals.push(grand_final);
            finals.push(blank(reset, options, FINAL_GROUP, round_id + 1, 1));
        } else {
            finals.push(grand_final);
        }
    }

    tracing::debug!(
        "Generated double elimination: {} players, {} winner rounds, {} loser rounds",
        n,
        k,
        loser_round_count
    );

    Ok(winners
        .into_iter()
        .chain(losers)
        .flatten()
        .chain(finals)
        .collect())
}

/// A knockout of `players` padded to a power of two. Byes carry their
/// player straight into the second round.
fn knockout_rounds(
    players: &[PlayerId],
    prefix: &str,
    group_id: u32,
    options: &GenerateOptions,
) -> Vec<Vec<Match>> {
    let size = players.len().next_power_of_two();
    let round_count = size.trailing_zeros() as usize;
    let order = seed_order(size);

    let slot = |seed: u32| -> Option<ParticipantResult> {
        players
            .get(seed as usize - 1)
            .map(|id| ParticipantResult::player(id.clone()).with_position(seed))
    };

    let mut rounds: Vec<Vec<Match>> = Vec::with_capacity(round_count);
    for r in 1..=round_count {
        let count = size >> r;
        let round_id = options.first_round_id + r as u32 - 1;
        let round: Vec<Match> = (1..=count)
            .map(|i| {
                let mut m = blank(match_id(prefix, r, i), options, group_id, round_id, i as u32);
                if r == 1 {
                    m = m.with_opponents(slot(order[2 * i - 2]), slot(order[2 * i - 1]));
                }
                if r < round_count {
                    m.win_destination = Some(match_id(prefix, r + 1, (i + 1) / 2));
                }
                m
            })
            .collect();
        rounds.push(round);
    }

    if round_count >= 2 {
        let (first, rest) = rounds.split_at_mut(1);
        for (idx, m) in first[0].iter().enumerate() {
            if !m.is_bye() {
                continue;
            }
            let advancing = m.opponent1.clone().or_else(|| m.opponent2.clone());
            let target = &mut rest[0][idx / 2];
            if idx % 2 == 0 {
                target.opponent1 = advancing;
            } else {
                target.opponent2 = advancing;
            }
        }
    }

    rounds
}

fn blank(id: String, options: &GenerateOptions, group_id: u32, round_id: u32, number: u32) -> Match {
    let mut m = Match::new(id, Some(group_id), round_id, number).with_child_count(options.child_count);
    m.stage_id = options.stage_id;
    m
}
