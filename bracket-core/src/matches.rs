//! Match model as supplied by the host library

use serde::{Deserialize, Serialize};

pub type MatchId = String;
pub type PlayerId = String;

/// Lifecycle of a match. Ordered: everything from `Completed` on has ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Both participants unknown
    Locked,
    /// One participant known
    #[default]
    Waiting,
    /// Both participants known
    Ready,
    Running,
    Completed,
    Archived,
}

/// Recorded outcome for one side of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// One of the two slots of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Opponent1,
    Opponent2,
}

/// A participant slot. `id` is `None` while the occupant is undetermined.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResult {
    #[serde(default)]
    pub id: Option<PlayerId>,
    /// Seed or positional slot number, used for origin hints
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub result: Option<Outcome>,
    #[serde(default)]
    pub forfeit: bool,
}

impl ParticipantResult {
    /// A known participant
    pub fn player(id: impl Into<PlayerId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// A slot whose occupant is not known yet
    pub fn to_be_determined(position: Option<u32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the slot's position
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    fn won(&self) -> bool {
        self.result == Some(Outcome::Win)
    }

    fn lost(&self) -> bool {
        self.result == Some(Outcome::Loss) || self.forfeit
    }
}

/// A match of a stage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    #[serde(default)]
    pub stage_id: u32,
    /// Group within the stage; `None` for ungrouped consolation matches
    #[serde(default)]
    pub group_id: Option<u32>,
    /// Round ordering key, unique per group
    pub round_id: u32,
    /// Ordinal within the round, starting at 1
    pub number: u32,
    #[serde(default)]
    pub opponent1: Option<ParticipantResult>,
    #[serde(default)]
    pub opponent2: Option<ParticipantResult>,
    /// Games per match
    #[serde(default)]
    pub child_count: u32,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub win_destination: Option<MatchId>,
    #[serde(default)]
    pub lose_destination: Option<MatchId>,
    #[serde(default)]
    pub bye: bool,
}

impl Match {
    /// An empty match with two undetermined slots
    pub fn new(id: impl Into<MatchId>, group_id: Option<u32>, round_id: u32, number: u32) -> Self {
        Self {
            id: id.into(),
            stage_id: 0,
            group_id,
            round_id,
            number,
            opponent1: Some(ParticipantResult::default()),
            opponent2: Some(ParticipantResult::default()),
            child_count: 0,
            status: MatchStatus::Locked,
            win_destination: None,
            lose_destination: None,
            bye: false,
        }
    }

    /// Set both slots
    pub fn with_opponents(
        mut self,
        opponent1: Option<ParticipantResult>,
        opponent2: Option<ParticipantResult>,
    ) -> Self {
        self.opponent1 = opponent1;
        self.opponent2 = opponent2;
        self.bye = self.opponent1.is_none() || self.opponent2.is_none();
        self.status = match (&self.opponent1, &self.opponent2) {
            (Some(a), Some(b)) if a.id.is_some() && b.id.is_some() => MatchStatus::Ready,
            (Some(a), Some(b)) if a.id.is_none() && b.id.is_none() => MatchStatus::Locked,
            _ => MatchStatus::Waiting,
        };
        self
    }

    /// Set where the winner advances
    pub fn with_win_destination(mut self, destination: impl Into<MatchId>) -> Self {
        self.win_destination = Some(destination.into());
        self
    }

    /// Set where the loser drops
    pub fn with_lose_destination(mut self, destination: impl Into<MatchId>) -> Self {
        self.lose_destination = Some(destination.into());
        self
    }

    /// Set the games per match
    pub fn with_child_count(mut self, child_count: u32) -> Self {
        self.child_count = child_count;
        self
    }

    /// Record a finished result, `winner` taking `scores.0` games
    pub fn with_result(mut self, winner: Side, scores: (u32, u32)) -> Self {
        let (win_slot, lose_slot) = match winner {
            Side::Opponent1 => (&mut self.opponent1, &mut self.opponent2),
            Side::Opponent2 => (&mut self.opponent2, &mut self.opponent1),
        };
        if let Some(slot) = win_slot {
            slot.result = Some(Outcome::Win);
            slot.score = Some(scores.0);
        }
        if let Some(slot) = lose_slot {
            slot.result = Some(Outcome::Loss);
            slot.score = Some(scores.1);
        }
        self.status = MatchStatus::Completed;
        self
    }

    /// The slot on `side`
    pub fn opponent(&self, side: Side) -> Option<&ParticipantResult> {
        match side {
            Side::Opponent1 => self.opponent1.as_ref(),
            Side::Opponent2 => self.opponent2.as_ref(),
        }
    }

    /// A bye has at most one participant and never produces a loser
    pub fn is_bye(&self) -> bool {
        self.bye || self.opponent1.is_none() || self.opponent2.is_none()
    }

    /// Whether the match has ended
    pub fn is_completed(&self) -> bool {
        self.status >= MatchStatus::Completed
    }

    /// Which side won, if the result is recorded
    pub fn winning_side(&self) -> Option<Side> {
        let a = self.opponent1.as_ref()?;
        let b = self.opponent2.as_ref()?;
        if a.won() || (b.lost() && !a.lost()) {
            Some(Side::Opponent1)
        } else if b.won() || (a.lost() && !b.lost()) {
            Some(Side::Opponent2)
        } else {
            None
        }
    }

    /// Recorded (winner, loser). `None` for byes, unplayed or drawn matches.
    pub fn winner_loser(&self) -> Option<(&PlayerId, &PlayerId)> {
        if self.is_bye() {
            return None;
        }
        let a = self.opponent1.as_ref()?.id.as_ref()?;
        let b = self.opponent2.as_ref()?.id.as_ref()?;
        match self.winning_side()? {
            Side::Opponent1 => Some((a, b)),
            Side::Opponent2 => Some((b, a)),
        }
    }
}
