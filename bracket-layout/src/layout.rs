//! Stage layout
//!
//! Turns the raw matches of a stage into brackets of named rounds whose
//! matches carry their position, connectors, label and origin hint.

use serde::Serialize;

use bracket_core::{Match, Outcome, Player, StageType};

use crate::config::ViewerConfig;
use crate::connection::{final_connection, Connection, FinalType, GroupType};
use crate::error::{LayoutError, Result};
use crate::grouping::{split_rounds, Group, MatchGroups};
use crate::lang::{
    self, bracket_name, final_match_label, final_origin_hint, match_label, origin_hint,
    OriginHint, RoundNameGetter, RoundNameInfo, Translate,
};
use crate::mapper::{map_bracket, ByeWrapper, MatchPosition};

/// Caller-supplied round names. Returning `None` falls back to the default.
pub type CustomRoundName<'a> = &'a dyn Fn(&RoundNameInfo, &dyn Translate) -> Option<String>;

/// A match ready for display
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LaidOutMatch {
    #[serde(rename = "match")]
    pub raw: Match,
    /// Set for bracket and final matches
    pub position: Option<MatchPosition>,
    pub connection: Option<Connection>,
    pub label: Option<String>,
    /// Cleared once the match has ended
    pub origin_hint: Option<OriginHint>,
    pub bye_wrapper: Option<ByeWrapper>,
    /// The bracket was drawn without its bye-only first round
    pub skip_first_round: bool,
}

impl LaidOutMatch {
    fn bracket(raw: Match, position: MatchPosition, skip_first_round: bool, t: &dyn Translate) -> Self {
        let label = match_label(
            raw.number,
            Some((position.round_number, position.round_count, position.location)),
            t,
        );
        let hint = origin_hint(
            position.round_number,
            position.round_count,
            skip_first_round,
            position.location,
        );
        let mut laid_out =
            Self::assemble(raw, Some(position), Some(position.connection()), Some(label), hint);
        laid_out.skip_first_round = skip_first_round;
        laid_out
    }

    fn final_match(
        raw: Match,
        stage_type: StageType,
        final_type: FinalType,
        round_number: u32,
        round_count: u32,
        t: &dyn Translate,
    ) -> Self {
        let position = MatchPosition {
            round_number,
            round_count,
            origin_matches: 0,
            child_origin_matches: None,
            child_sibling_origin_matches: None,
            location: GroupType::FinalGroup,
            connect_final: false,
        };
        let label = final_match_label(final_type, round_number, round_count, t);
        let hint = final_origin_hint(stage_type, final_type, round_number);
        let connection = final_connection(final_type, round_number, round_count);
        Self::assemble(raw, Some(position), Some(connection), Some(label), hint)
    }

    fn plain(raw: Match, label: Option<String>) -> Self {
        Self::assemble(raw, None, None, label, None)
    }

    fn assemble(
        raw: Match,
        position: Option<MatchPosition>,
        connection: Option<Connection>,
        label: Option<String>,
        hint: Option<OriginHint>,
    ) -> Self {
        let origin_hint = if raw.is_completed() { None } else { hint };
        let bye_wrapper = position.and_then(|p| p.bye_wrapper());
        Self {
            raw,
            position,
            connection,
            label,
            origin_hint,
            bye_wrapper,
            skip_first_round: false,
        }
    }

    /// Group type of the match, unknown for round-robin and consolation
    /// matches
    pub fn location(&self) -> Option<GroupType> {
        self.position.map(|p| p.location)
    }
}

/// One named round
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundLayout {
    pub round_id: u32,
    pub name: String,
    pub matches: Vec<LaidOutMatch>,
}

/// A bracket, or a round-robin group
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BracketLayout {
    pub group_id: u32,
    pub group_type: GroupType,
    pub name: Option<String>,
    pub rounds: Vec<RoundLayout>,
}

/// Final group matches displayed after the brackets
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinalLayout {
    pub final_type: FinalType,
    pub rounds: Vec<RoundLayout>,
}

/// Everything needed to draw a stage
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageLayout {
    pub stage_type: StageType,
    pub skip_first_round: bool,
    pub brackets: Vec<BracketLayout>,
    pub finals: Vec<FinalLayout>,
    /// Matches outside any group
    pub consolation: Vec<LaidOutMatch>,
}

impl StageLayout {
    /// Every laid out match in display order
    pub fn matches(&self) -> impl Iterator<Item = &LaidOutMatch> {
        let brackets = self.brackets.iter().flat_map(|b| b.rounds.iter());
        let finals = self.finals.iter().flat_map(|f| f.rounds.iter());
        brackets
            .chain(finals)
            .flat_map(|r| r.matches.iter())
            .chain(self.consolation.iter())
    }

    pub fn find(&self, match_id: &str) -> Option<&LaidOutMatch> {
        self.matches().find(|m| m.raw.id == match_id)
    }
}

/// Lays out stages with a translator and rendering options
pub struct Viewer<'a> {
    config: ViewerConfig,
    translator: &'a dyn Translate,
    custom_round_name: Option<CustomRoundName<'a>>,
    skip_first_round: bool,
}

impl<'a> Viewer<'a> {
    pub fn new(config: ViewerConfig, translator: &'a dyn Translate) -> Self {
        Self {
            config,
            translator,
            custom_round_name: None,
            skip_first_round: false,
        }
    }

    /// Override round names
    pub fn with_custom_round_name(mut self, custom: CustomRoundName<'a>) -> Self {
        self.custom_round_name = Some(custom);
        self
    }

    /// The stage skipped its first winner round and seeds straight into
    /// the loser bracket
    pub fn skipping_first_round(mut self, skip: bool) -> Self {
        self.skip_first_round = skip;
        self
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn translator(&self) -> &dyn Translate {
        self.translator
    }

    /// Lay out one stage.
    ///
    /// Every known participant of a match must be in `participants`.
    pub fn layout_stage(
        &self,
        stage_type: StageType,
        matches: &[Match],
        participants: &[Player],
    ) -> Result<StageLayout> {
        if participants.is_empty() {
            return Err(LayoutError::NoParticipants);
        }
        if matches.is_empty() {
            return Err(LayoutError::NoMatches);
        }
        check_participants(matches, participants)?;

        let groups = MatchGroups::split(matches);
        let mut layout = StageLayout {
            stage_type,
            skip_first_round: self.skip_first_round,
            brackets: Vec::new(),
            finals: Vec::new(),
            consolation: Vec::new(),
        };

        match stage_type {
            StageType::RoundRobin => {
                for group in &groups.groups {
                    layout.brackets.push(self.round_robin_group(group));
                }
            }
            StageType::SingleElimination => self.single_elimination(&groups, matches, &mut layout)?,
            StageType::DoubleElimination => self.double_elimination(&groups, matches, &mut layout)?,
            StageType::Swiss => return Err(LayoutError::UnsupportedStage(stage_type)),
        }

        layout.consolation = groups
            .ungrouped
            .iter()
            .zip(1u32..)
            .map(|(m, number)| {
                let label = match_label(number, None, self.translator);
                LaidOutMatch::plain(m.clone(), Some(label))
            })
            .collect();

        tracing::debug!(
            "Laid out {:?} stage: {} brackets, {} finals, {} consolation matches",
            stage_type,
            layout.brackets.len(),
            layout.finals.len(),
            layout.consolation.len()
        );

        Ok(layout)
    }

    fn round_name(
        &self,
        info: &RoundNameInfo,
        fallback: impl FnOnce(&RoundNameInfo, &dyn Translate) -> String,
    ) -> String {
        self.custom_round_name
            .and_then(|custom| custom(info, self.translator))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback(info, self.translator))
    }

    fn round_robin_group(&self, group: &Group) -> BracketLayout {
        let rounds = group
            .rounds()
            .into_iter()
            .zip(1u32..)
            .filter_map(|(round, round_number)| {
                let round_id = round.first()?.round_id;
                let info = RoundNameInfo {
                    round_number,
                    round_count: 0,
                    group_type: GroupType::RoundRobin,
                    final_type: None,
                };
                Some(RoundLayout {
                    round_id,
                    name: self.round_name(&info, lang::round_name),
                    matches: round
                        .into_iter()
                        .map(|m| LaidOutMatch::plain(m, None))
                        .collect(),
                })
            })
            .collect();

        BracketLayout {
            group_id: group.group_id,
            group_type: GroupType::RoundRobin,
            name: None,
            rounds,
        }
    }

    fn single_elimination(
        &self,
        groups: &MatchGroups,
        stage: &[Match],
        layout: &mut StageLayout,
    ) -> Result<()> {
        let bracket = groups.nth(0).ok_or(LayoutError::NoMatches)?;

        // The consolation final does not follow the last round directly
        layout.brackets.push(self.bracket(
            bracket,
            GroupType::SingleBracket,
            lang::round_name,
            false,
            stage,
        )?);

        if let Some(final_group) = groups.nth(1) {
            let mut final_matches = final_group.matches.clone();
            final_matches.sort_by_key(|m| m.number);
            self.push_final(layout, FinalType::ConsolationFinal, final_matches);
        }
        Ok(())
    }

    fn double_elimination(
        &self,
        groups: &MatchGroups,
        stage: &[Match],
        layout: &mut StageLayout,
    ) -> Result<()> {
        let winner = groups.nth(0).ok_or(LayoutError::NoMatches)?;

        let (grand_final, consolation_final) = match groups.nth(2) {
            Some(final_group) => {
                let mut grand_final: Vec<Match> = final_group
                    .matches
                    .iter()
                    .filter(|m| m.number == 1)
                    .cloned()
                    .collect();
                grand_final.sort_by_key(|m| m.round_id);
                let consolation_final: Vec<Match> = final_group
                    .matches
                    .iter()
                    .filter(|m| m.number == 2)
                    .cloned()
                    .collect();
                (grand_final, consolation_final)
            }
            None => (Vec::new(), Vec::new()),
        };
        let connect_final = !grand_final.is_empty();

        layout.brackets.push(self.bracket(
            winner,
            GroupType::WinnerBracket,
            lang::winner_bracket_round_name,
            connect_final,
            stage,
        )?);

        if let Some(loser) = groups.nth(1) {
            layout.brackets.push(self.bracket(
                loser,
                GroupType::LoserBracket,
                lang::loser_bracket_round_name,
                false,
                stage,
            )?);
        }

        self.push_final(layout, FinalType::GrandFinal, grand_final);
        self.push_final(layout, FinalType::ConsolationFinal, consolation_final);
        Ok(())
    }

    fn bracket(
        &self,
        group: &Group,
        group_type: GroupType,
        round_name: RoundNameGetter,
        connect_final: bool,
        stage: &[Match],
    ) -> Result<BracketLayout> {
        let mapped = map_bracket(split_rounds(&group.matches), group_type, connect_final, stage)?;
        let round_count = mapped.len() as u32;

        let rounds = mapped
            .into_iter()
            .zip(1u32..)
            .filter_map(|(round, round_number)| {
                let round_id = round.first()?.0.round_id;
                let info = RoundNameInfo {
                    round_number,
                    round_count,
                    group_type,
                    final_type: None,
                };
                Some(RoundLayout {
                    round_id,
                    name: self.round_name(&info, round_name),
                    matches: round
                        .into_iter()
                        .map(|(m, position)| {
                            LaidOutMatch::bracket(m, position, self.skip_first_round, self.translator)
                        })
                        .collect(),
                })
            })
            .collect();

        Ok(BracketLayout {
            group_id: group.group_id,
            group_type,
            name: bracket_name(group_type, self.translator),
            rounds,
        })
    }

    /// Append a final. The reset match of a grand final is only shown when
    /// the winner bracket champion lost the first one.
    fn push_final(&self, layout: &mut StageLayout, final_type: FinalType, matches: Vec<Match>) {
        let Some(first) = matches.first() else {
            return;
        };

        let champion = first.opponent1.as_ref();
        let settled = champion.map_or(false, |c| {
            c.id.is_none() || c.result == Some(Outcome::Win)
        });
        let display_count = if settled { 1 } else { 2 };
        let shown: Vec<Match> = matches.into_iter().take(display_count).collect();
        let round_count = shown.len() as u32;

        let rounds = shown
            .into_iter()
            .zip(1u32..)
            .map(|(m, round_number)| {
                let info = RoundNameInfo {
                    round_number,
                    round_count,
                    group_type: GroupType::FinalGroup,
                    final_type: Some(final_type),
                };
                let name = self.round_name(&info, |info, t| {
                    final_match_label(final_type, info.round_number, info.round_count, t)
                });
                RoundLayout {
                    round_id: m.round_id,
                    name,
                    matches: vec![LaidOutMatch::final_match(
                        m,
                        layout.stage_type,
                        final_type,
                        round_number,
                        round_count,
                        self.translator,
                    )],
                }
            })
            .collect();

        layout.finals.push(FinalLayout { final_type, rounds });
    }
}

fn check_participants(matches: &[Match], participants: &[Player]) -> Result<()> {
    for m in matches {
        let slots = [m.opponent1.as_ref(), m.opponent2.as_ref()];
        for id in slots.into_iter().flatten().filter_map(|slot| slot.id.as_ref()) {
            if !participants.iter().any(|p| &p.id == id) {
                return Err(LayoutError::UnknownParticipant {
                    match_id: m.id.clone(),
                    participant_id: id.clone(),
                });
            }
        }
    }
    Ok(())
}
