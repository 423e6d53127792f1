//! Read-only query surface of the host tournament library
//!
//! The bracket crates never mutate tournament state; they only need the
//! queries in [`TournamentView`]. [`InMemoryTournament`] is a plain
//! implementation that can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::format::Format;
use crate::generate::{FINAL_GROUP, SECOND_GROUP};
use crate::matches::{Match, MatchStatus, ParticipantResult, PlayerId, Side};

/// A registered player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// False once the player has dropped
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
        }
    }
}

/// Where the host tournament is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TournamentStatus {
    #[default]
    Setup,
    /// First (or only) stage running
    StageOne,
    /// Elimination stage after a Swiss stage
    StageTwo,
    Complete,
}

/// Queries the bracket crates need from a host tournament
pub trait TournamentView {
    /// Current format and its settings
    fn format(&self) -> &Format;

    fn status(&self) -> TournamentStatus;

    /// Players in registration order
    fn players(&self) -> &[Player];

    /// Every match of every stage
    fn matches(&self) -> &[Match];

    /// Rounds played in the Swiss stage; elimination rounds follow them
    fn swiss_round_count(&self) -> u32;

    fn player(&self, id: &str) -> Option<&Player> {
        self.players().iter().find(|p| p.id == id)
    }

    fn matches_in_round(&self, round_id: u32) -> Vec<&Match> {
        self.matches()
            .iter()
            .filter(|m| m.round_id == round_id)
            .collect()
    }

    /// Recorded (winner, loser), or `None` while undetermined or for a bye
    fn winner_loser_of<'m>(&self, m: &'m Match) -> Option<(&'m PlayerId, &'m PlayerId)> {
        m.winner_loser()
    }
}

/// Tournament state held in memory
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryTournament {
    pub format: Format,
    #[serde(default)]
    pub status: TournamentStatus,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub swiss_rounds: u32,
}

impl InMemoryTournament {
    pub fn new(format: Format, players: Vec<Player>) -> Self {
        Self {
            format,
            players,
            ..Default::default()
        }
    }

    /// Replace the matches and move to `status`
    pub fn with_matches(mut self, matches: Vec<Match>, status: TournamentStatus) -> Self {
        self.matches = matches;
        self.status = status;
        self
    }

    /// Parse from JSON
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Record a result and move both players on to their destination
    /// matches.
    ///
    /// A grand final won by the winner bracket champion ends the stage; the
    /// reset match is only filled when the loser bracket champion wins.
    /// A match that already has a result is rejected, and nothing is written
    /// unless every destination exists.
    pub fn record_result(&mut self, match_id: &str, winner: Side, scores: (u32, u32)) -> Result<()> {
        let index = self.match_index(match_id)?;
        if self.matches[index].is_completed() {
            return Err(CoreError::MatchAlreadyCompleted(match_id.to_string()));
        }

        let recorded = self.matches[index].clone().with_result(winner, scores);
        let win_target = self.destination_index(recorded.win_destination.as_deref())?;
        let lose_target = self.destination_index(recorded.lose_destination.as_deref())?;
        self.matches[index] = recorded.clone();

        let Some((winner_id, loser_id)) = recorded.winner_loser() else {
            return Ok(());
        };

        if let Some(target_index) = win_target {
            let target = &mut self.matches[target_index];
            if recorded.group_id == Some(FINAL_GROUP) && target.group_id == Some(FINAL_GROUP) {
                if winner == Side::Opponent2 {
                    let reset = target.clone().with_opponents(
                        Some(ParticipantResult::player(loser_id.clone())),
                        Some(ParticipantResult::player(winner_id.clone())),
                    );
                    *target = reset;
                }
            } else {
                let preferred = winner_side_in(&recorded, target);
                assign(target, preferred, winner_id);
            }
        }

        if let Some(target_index) = lose_target {
            let target = &mut self.matches[target_index];
            let preferred = loser_side_in(&recorded, target);
            assign(target, preferred, loser_id);
        }

        Ok(())
    }

    fn destination_index(&self, destination: Option<&str>) -> Result<Option<usize>> {
        destination.map(|id| self.match_index(id)).transpose()
    }

    fn match_index(&self, match_id: &str) -> Result<usize> {
        self.matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or_else(|| CoreError::UnknownMatch(match_id.to_string()))
    }
}

/// Slot a winner takes in its next match: the lower-numbered feeder fills
/// the first slot, and the loser bracket champion takes the second slot of
/// the grand final.
fn winner_side_in(source: &Match, target: &Match) -> Side {
    let feeds_second = if source.group_id == target.group_id {
        target.number * 2 == source.number
    } else {
        source.group_id == Some(SECOND_GROUP) && target.group_id == Some(FINAL_GROUP)
    };
    if feeds_second {
        Side::Opponent2
    } else {
        Side::Opponent1
    }
}

/// Slot a dropped loser takes: the one whose position names the source
/// match, if any
fn loser_side_in(source: &Match, target: &Match) -> Side {
    let positioned = |side: Side| {
        target
            .opponent(side)
            .map_or(false, |slot| slot.id.is_none() && slot.position == Some(source.number))
    };
    if !positioned(Side::Opponent1) && positioned(Side::Opponent2) {
        Side::Opponent2
    } else {
        Side::Opponent1
    }
}

/// Put `player` into `preferred`, or the other slot if `preferred` is taken.
/// A player already in the match stays where they are.
fn assign(target: &mut Match, preferred: Side, player: &PlayerId) {
    let other = match preferred {
        Side::Opponent1 => Side::Opponent2,
        Side::Opponent2 => Side::Opponent1,
    };
    let holds = |side: Side| {
        target
            .opponent(side)
            .map_or(false, |slot| slot.id.as_ref() == Some(player))
    };
    if holds(Side::Opponent1) || holds(Side::Opponent2) {
        return;
    }

    let is_free = |side: Side| target.opponent(side).map_or(true, |slot| slot.id.is_none());
    let side = if is_free(preferred) {
        preferred
    } else if is_free(other) {
        other
    } else {
        tracing::warn!("Match {} is full, {} was not placed", target.id, player);
        return;
    };

    let slot = match side {
        Side::Opponent1 => &mut target.opponent1,
        Side::Opponent2 => &mut target.opponent2,
    };
    let position = slot.as_ref().and_then(|s| s.position);
    let mut filled = ParticipantResult::player(player.clone());
    filled.position = position;
    *slot = Some(filled);

    if target.status < MatchStatus::Running {
        let both_known = [&target.opponent1, &target.opponent2]
            .iter()
            .all(|s| s.as_ref().map_or(false, |p| p.id.is_some()));
        target.status = if both_known {
            MatchStatus::Ready
        } else {
            MatchStatus::Waiting
        };
    }
}

impl TournamentView for InMemoryTournament {
    fn format(&self) -> &Format {
        &self.format
    }

    fn status(&self) -> TournamentStatus {
        self.status
    }

    fn players(&self) -> &[Player] {
        &self.players
    }

    fn matches(&self) -> &[Match] {
        &self.matches
    }

    fn swiss_round_count(&self) -> u32 {
        self.swiss_rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{double_elimination, single_elimination, GenerateOptions, GrandFinal};

    fn sample() -> InMemoryTournament {
        let players = vec![Player::new("a", "Alpha"), Player::new("b", "Bravo")];
        let matches = vec![Match::new("m1", Some(0), 1, 1)
            .with_opponents(
                Some(ParticipantResult::player("a")),
                Some(ParticipantResult::player("b")),
            )
            .with_result(Side::Opponent1, (2, 0))];
        InMemoryTournament::new(Format::single_elimination(), players)
            .with_matches(matches, TournamentStatus::Complete)
    }

    #[test]
    fn test_default_queries() {
        let t = sample();
        assert_eq!(t.player("b").map(|p| p.name.as_str()), Some("Bravo"));
        assert!(t.player("z").is_none());
        assert_eq!(t.matches_in_round(1).len(), 1);
        assert!(t.matches_in_round(2).is_empty());

        let m = &t.matches()[0];
        let (winner, loser) = t.winner_loser_of(m).unwrap();
        assert_eq!((winner.as_str(), loser.as_str()), ("a", "b"));
    }

    fn seeded(n: usize, format: Format) -> InMemoryTournament {
        let players: Vec<Player> = (1..=n)
            .map(|i| Player::new(format!("p{}", i), format!("Player {}", i)))
            .collect();
        InMemoryTournament::new(format, players)
    }

    fn ids(t: &InMemoryTournament, match_id: &str) -> (Option<String>, Option<String>) {
        let m = t.matches().iter().find(|m| m.id == match_id).unwrap();
        (
            m.opponent1.as_ref().and_then(|p| p.id.clone()),
            m.opponent2.as_ref().and_then(|p| p.id.clone()),
        )
    }

    #[test]
    fn test_record_result_advances_winner() {
        let mut t = seeded(4, Format::single_elimination());
        let ids_in_order: Vec<String> = t.players.iter().map(|p| p.id.clone()).collect();
        let options = GenerateOptions::default().with_consolation_final();
        let matches = single_elimination(&ids_in_order, &options).unwrap();
        t = t.with_matches(matches, TournamentStatus::StageOne);

        // R1.2 finishes first but still feeds the second slot
        t.record_result("R1.2", Side::Opponent2, (2, 1)).unwrap();
        t.record_result("R1.1", Side::Opponent1, (2, 0)).unwrap();

        assert_eq!(ids(&t, "R2.1"), (Some("p1".into()), Some("p3".into())));
        assert_eq!(ids(&t, "CF1.1"), (Some("p2".into()), Some("p4".into())));
        let final_match = t.matches().iter().find(|m| m.id == "R2.1").unwrap();
        assert_eq!(final_match.status, MatchStatus::Ready);
    }

    #[test]
    fn test_record_result_unknown_match() {
        let mut t = sample();
        assert!(matches!(
            t.record_result("nope", Side::Opponent1, (2, 0)),
            Err(CoreError::UnknownMatch(id)) if id == "nope"
        ));
    }

    fn four_player_double_elimination() -> InMemoryTournament {
        let t = seeded(4, Format::double_elimination());
        let ids_in_order: Vec<String> = t.players.iter().map(|p| p.id.clone()).collect();
        let matches = double_elimination(&ids_in_order, &GenerateOptions::default()).unwrap();
        t.with_matches(matches, TournamentStatus::StageOne)
    }

    #[test]
    fn test_record_result_twice_is_rejected() {
        let mut t = four_player_double_elimination();
        t.record_result("W1.1", Side::Opponent1, (2, 0)).unwrap();

        assert!(matches!(
            t.record_result("W1.1", Side::Opponent1, (2, 1)),
            Err(CoreError::MatchAlreadyCompleted(id)) if id == "W1.1"
        ));
        assert_eq!(ids(&t, "W2.1"), (Some("p1".into()), None));
        assert_eq!(ids(&t, "L1.1"), (Some("p4".into()), None));
        let first = t.matches().iter().find(|m| m.id == "W1.1").unwrap();
        assert_eq!(first.opponent1.as_ref().and_then(|p| p.score), Some(2));
        assert_eq!(first.opponent2.as_ref().and_then(|p| p.score), Some(0));
    }

    #[test]
    fn test_assign_keeps_one_copy_of_a_player() {
        let mut target = Match::new("m2", Some(0), 2, 1);
        assign(&mut target, Side::Opponent1, &"a".to_string());
        assign(&mut target, Side::Opponent1, &"a".to_string());

        assert_eq!(target.opponent1.as_ref().and_then(|p| p.id.as_deref()), Some("a"));
        assert!(target.opponent2.as_ref().map_or(true, |p| p.id.is_none()));
        assert_eq!(target.status, MatchStatus::Waiting);
    }

    #[test]
    fn test_record_result_unknown_destination_writes_nothing() {
        let mut t = four_player_double_elimination();
        let broken = t.matches.iter_mut().find(|m| m.id == "W1.2").unwrap();
        broken.lose_destination = Some("L9.9".to_string());

        assert!(matches!(
            t.record_result("W1.2", Side::Opponent1, (2, 0)),
            Err(CoreError::UnknownMatch(id)) if id == "L9.9"
        ));
        let untouched = t.matches().iter().find(|m| m.id == "W1.2").unwrap();
        assert!(!untouched.is_completed());
        assert_eq!(ids(&t, "W2.1"), (None, None));
    }

    #[test]
    fn test_grand_final_reset_only_after_upset() {
        let build = || {
            let t = seeded(4, Format::double_elimination());
            let ids_in_order: Vec<String> = t.players.iter().map(|p| p.id.clone()).collect();
            let options = GenerateOptions::default().with_grand_final(GrandFinal::Double);
            let matches = double_elimination(&ids_in_order, &options).unwrap();
            let mut t = t.with_matches(matches, TournamentStatus::StageOne);
            t.record_result("W1.1", Side::Opponent1, (2, 0)).unwrap();
            t.record_result("W1.2", Side::Opponent1, (2, 0)).unwrap();
            t.record_result("W2.1", Side::Opponent1, (2, 0)).unwrap();
            t.record_result("L1.1", Side::Opponent1, (2, 0)).unwrap();
            t.record_result("L2.1", Side::Opponent1, (2, 0)).unwrap();
            t
        };

        // Loser bracket: p4 and p3 drop first, p2 drops from the final
        let t = build();
        assert_eq!(ids(&t, "L1.1"), (Some("p4".into()), Some("p3".into())));
        assert_eq!(ids(&t, "L2.1"), (Some("p4".into()), Some("p2".into())));
        assert_eq!(ids(&t, "GF1.1"), (Some("p1".into()), Some("p4".into())));

        let mut no_reset = build();
        no_reset.record_result("GF1.1", Side::Opponent1, (3, 0)).unwrap();
        assert_eq!(ids(&no_reset, "GF2.1"), (None, None));

        let mut reset = build();
        reset.record_result("GF1.1", Side::Opponent2, (3, 2)).unwrap();
        assert_eq!(ids(&reset, "GF2.1"), (Some("p1".into()), Some("p4".into())));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "format": {"type": "double_elimination", "best_of": 3, "finals_best_of": 5, "grand_final_best_of": 7},
            "status": "stage-one",
            "players": [{"id": "a", "name": "Alpha"}]
        }"#;
        let t = InMemoryTournament::from_json(json).unwrap();
        assert_eq!(t.status(), TournamentStatus::StageOne);
        assert!(t.players()[0].active);
        assert!(t.matches().is_empty());
    }
}
