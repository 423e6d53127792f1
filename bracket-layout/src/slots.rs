//! What each participant slot and match caption shows

use serde::Serialize;

use bracket_core::{Player, Side};

use crate::config::{OriginPlacement, ViewerConfig};
use crate::connection::GroupType;
use crate::lang::{best_of_label, Translate};
use crate::layout::LaidOutMatch;

/// Short prefix put in front of a slot's position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginAbbreviation {
    /// The position is the participant's seed
    Seed,
    /// The position is the slot a winner bracket loser dropped into
    Position,
}

impl OriginAbbreviation {
    pub fn text(&self, t: &dyn Translate) -> String {
        match self {
            OriginAbbreviation::Seed => t.translate("abbreviations.seed", &[]),
            OriginAbbreviation::Position => t.translate("abbreviations.position", &[]),
        }
    }
}

/// Abbreviation for a known participant's origin, if its position means
/// something in this slot
pub fn origin_abbreviation(
    location: GroupType,
    skip_first_round: bool,
    round_number: Option<u32>,
    side: Side,
) -> Option<OriginAbbreviation> {
    let round_number = round_number?;

    if location == GroupType::LoserBracket && round_number == 1 && skip_first_round {
        return Some(OriginAbbreviation::Seed);
    }
    if location == GroupType::SingleBracket
        || (location == GroupType::WinnerBracket && round_number == 1)
    {
        return Some(OriginAbbreviation::Seed);
    }
    if location == GroupType::LoserBracket && round_number % 2 == 0 && side == Side::Opponent2 {
        return Some(OriginAbbreviation::Position);
    }
    None
}

/// Content of one participant slot
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum SlotDisplay {
    /// No opponent in this slot
    Bye,
    /// A known participant, with its origin when shown
    Participant {
        name: String,
        origin: Option<String>,
        placement: OriginPlacement,
        score: Option<u32>,
    },
    /// An undetermined participant and where it will come from
    Hint(String),
    /// An undetermined participant with nothing to say about it
    Empty,
}

impl SlotDisplay {
    /// Single line rendering
    pub fn render(&self) -> String {
        match self {
            SlotDisplay::Bye => "BYE".to_string(),
            SlotDisplay::Participant {
                name,
                origin: Some(origin),
                placement: OriginPlacement::After,
                ..
            } => format!("{} ({})", name, origin),
            SlotDisplay::Participant {
                name,
                origin: Some(origin),
                ..
            } => format!("({}) {}", origin, name),
            SlotDisplay::Participant { name, .. } => name.clone(),
            SlotDisplay::Hint(hint) => hint.clone(),
            SlotDisplay::Empty => "TBD".to_string(),
        }
    }
}

/// What to show in the `side` slot of a laid out match
pub fn slot_display(
    laid_out: &LaidOutMatch,
    side: Side,
    participants: &[Player],
    config: &ViewerConfig,
    t: &dyn Translate,
) -> SlotDisplay {
    let Some(slot) = laid_out.raw.opponent(side) else {
        return SlotDisplay::Bye;
    };

    let location = laid_out.location();
    let origin_hidden = !config.show_slots_origin
        || (!config.show_lower_bracket_slots_origin && location == Some(GroupType::LoserBracket));

    let found = slot
        .id
        .as_ref()
        .and_then(|id| participants.iter().find(|p| &p.id == id));

    match found {
        Some(player) => {
            let origin = match (slot.position, location) {
                (Some(position), Some(location))
                    if !origin_hidden
                        && config.participant_origin_placement != OriginPlacement::None =>
                {
                    let round_number = laid_out.position.map(|p| p.round_number);
                    origin_abbreviation(location, laid_out.skip_first_round, round_number, side)
                        .map(|abbreviation| format!("{}{}", abbreviation.text(t), position))
                }
                _ => None,
            };
            SlotDisplay::Participant {
                name: player.name.clone(),
                origin,
                placement: config.participant_origin_placement,
                score: slot.score,
            }
        }
        None => match (laid_out.origin_hint, slot.position) {
            (Some(hint), Some(position)) if !origin_hidden => {
                SlotDisplay::Hint(hint.describe(position, t))
            }
            _ => SlotDisplay::Empty,
        },
    }
}

/// Label line(s) above a match
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MatchCaption {
    pub label: Option<String>,
    /// Set only when the best-of count is shown on its own
    pub child_count_label: Option<String>,
}

/// Caption of a match. Without separated labels nothing is shown for a
/// match with no games.
pub fn match_caption(laid_out: &LaidOutMatch, config: &ViewerConfig, t: &dyn Translate) -> MatchCaption {
    let child_count = laid_out.raw.child_count;
    let best_of = (child_count > 0).then(|| best_of_label(child_count, t));

    if config.separated_child_count_label {
        return MatchCaption {
            label: laid_out.label.clone(),
            child_count_label: best_of,
        };
    }

    let label = best_of.map(|best_of| match &laid_out.label {
        Some(label) if !label.is_empty() => format!("{}, {}", label, best_of),
        _ => best_of,
    });
    MatchCaption {
        label,
        child_count_label: None,
    }
}
