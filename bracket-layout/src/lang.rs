//! Labels, round names and origin hints
//!
//! Every piece of user-facing text goes through a [`Translate`]
//! implementation as a key plus named arguments, so a host can plug in its
//! own locale. [`KeyTranslator`] echoes the key and [`EnglishTranslator`]
//! ships the default English strings.

use serde::{Deserialize, Serialize};

use bracket_core::{MatchStatus, StageType};

use crate::connection::{FinalType, GroupType};

/// Turns a locale key and its named arguments into text
pub trait Translate {
    fn translate(&self, key: &str, args: &[(&str, String)]) -> String;
}

/// Returns the part of the key after the namespace, ignoring arguments
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyTranslator;

impl Translate for KeyTranslator {
    fn translate(&self, key: &str, _args: &[(&str, String)]) -> String {
        match key.find('.') {
            Some(idx) => key[idx + 1..].to_string(),
            None => key.to_string(),
        }
    }
}

/// Default English strings. Unknown keys are returned as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishTranslator;

impl EnglishTranslator {
    fn template(key: &str) -> Option<&'static str> {
        let text = match key {
            "origin-hint.seed" => "Seed {{position}}",
            "origin-hint.winner-bracket" => "Loser of WB {{round}}.{{position}}",
            "origin-hint.winner-bracket-semi-final" => "Loser of WB Semi {{position}}",
            "origin-hint.winner-bracket-final" => "Loser of WB Final",
            "origin-hint.consolation-final" => "Loser of Semi {{position}}",
            "origin-hint.grand-final" => "Winner of LB Final",
            "origin-hint.double-elimination-consolation-final-opponent-1" => "Loser of LB Final",
            "origin-hint.double-elimination-consolation-final-opponent-2" => "Loser of WB Final",

            "match-label.default" => "M{{matchNumber}}",
            "match-label.winner-bracket" => "WB",
            "match-label.loser-bracket" => "LB",
            "match-label.standard-bracket" => "Bracket",
            "match-label.standard-bracket-semi-final" => "Semi {{matchNumber}}",
            "match-label.standard-bracket-final" => "Final",
            "match-label.double-elimination" => "{{matchPrefix}} {{roundNumber}}.{{matchNumber}}",
            "match-label.double-elimination-semi-final" => "{{matchPrefix}} Semi {{matchNumber}}",
            "match-label.double-elimination-final" => "{{matchPrefix}} Final",
            "match-label.consolation-final" => "Consolation Final",
            "match-label.grand-final-single" => "Grand Final",
            "match-label.grand-final" => "GF Round {{roundNumber}}",

            "match-status.locked" => "Locked",
            "match-status.waiting" => "Waiting",
            "match-status.ready" => "Ready",
            "match-status.running" => "Running",
            "match-status.completed" => "Completed",
            "match-status.archived" => "Archived",

            "abbreviations.seed" => "#",
            "abbreviations.position" => "P",

            "common.best-of-x" => "Bo{{x}}",
            "common.consolation" => "Consolation",
            "common.group-name-winner-bracket" => "Winner Bracket",
            "common.group-name-loser-bracket" => "Loser Bracket",
            "common.round-name" => "Round {{roundNumber}}",
            "common.round-name-final" => "Final Round",
            "common.round-name-winner-bracket" => "WB Round {{roundNumber}}",
            "common.round-name-winner-bracket-final" => "WB Final Round",
            "common.round-name-loser-bracket" => "LB Round {{roundNumber}}",
            "common.round-name-loser-bracket-final" => "LB Final Round",
            _ => return None,
        };
        Some(text)
    }
}

impl Translate for EnglishTranslator {
    fn translate(&self, key: &str, args: &[(&str, String)]) -> String {
        let Some(template) = Self::template(key) else {
            return key.to_string();
        };
        args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{{{}}}}}", name), value)
        })
    }
}

/// Describes where the occupant of an undetermined slot will come from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OriginHint {
    /// Seeded into the slot
    Seed,
    /// Dropped from the given winner bracket round
    WinnerBracket { round: u32 },
    WinnerBracketSemiFinal,
    WinnerBracketFinal,
    /// Loser of a single elimination semi final
    ConsolationFinal,
    /// Champion of the loser bracket
    GrandFinal,
    DoubleEliminationConsolationFinal,
}

impl OriginHint {
    /// Hint text for the slot at `position`
    pub fn describe(&self, position: u32, t: &dyn Translate) -> String {
        let position_arg = [("position", position.to_string())];
        match self {
            OriginHint::Seed => t.translate("origin-hint.seed", &position_arg),
            OriginHint::WinnerBracket { round } => t.translate(
                "origin-hint.winner-bracket",
                &[("round", round.to_string()), ("position", position.to_string())],
            ),
            OriginHint::WinnerBracketSemiFinal => {
                t.translate("origin-hint.winner-bracket-semi-final", &position_arg)
            }
            OriginHint::WinnerBracketFinal => t.translate("origin-hint.winner-bracket-final", &[]),
            OriginHint::ConsolationFinal => {
                t.translate("origin-hint.consolation-final", &position_arg)
            }
            OriginHint::GrandFinal => t.translate("origin-hint.grand-final", &[]),
            OriginHint::DoubleEliminationConsolationFinal if position == 1 => t.translate(
                "origin-hint.double-elimination-consolation-final-opponent-1",
                &[],
            ),
            OriginHint::DoubleEliminationConsolationFinal => t.translate(
                "origin-hint.double-elimination-consolation-final-opponent-2",
                &[],
            ),
        }
    }
}

/// Round 1 and even rounds. In a loser bracket these take drops from the
/// winner bracket.
pub fn is_major_round(round_number: u32) -> bool {
    round_number == 1 || round_number % 2 == 0
}

/// Origin hint for a bracket match, if its slots have a meaningful origin
pub fn origin_hint(
    round_number: u32,
    round_count: u32,
    skip_first_round: bool,
    location: GroupType,
) -> Option<OriginHint> {
    if round_number == 1 {
        match location {
            GroupType::SingleBracket | GroupType::WinnerBracket => return Some(OriginHint::Seed),
            GroupType::LoserBracket if skip_first_round => return Some(OriginHint::Seed),
            _ => {}
        }
    }

    if !is_major_round(round_number) || location != GroupType::LoserBracket {
        return None;
    }

    if round_number + 2 == round_count {
        return Some(OriginHint::WinnerBracketSemiFinal);
    }
    if round_number == round_count {
        return Some(OriginHint::WinnerBracketFinal);
    }

    let winner_round = (round_number + 2) / 2;
    let round = if skip_first_round {
        winner_round.saturating_sub(1)
    } else {
        winner_round
    };
    Some(OriginHint::WinnerBracket { round })
}

/// Origin hint for a match of the final group
pub fn final_origin_hint(
    stage_type: StageType,
    final_type: FinalType,
    round_number: u32,
) -> Option<OriginHint> {
    if stage_type == StageType::SingleElimination {
        return Some(OriginHint::ConsolationFinal);
    }

    match final_type {
        // Both reset participants obviously come from the first match
        FinalType::GrandFinal if round_number == 1 => Some(OriginHint::GrandFinal),
        FinalType::GrandFinal => None,
        FinalType::ConsolationFinal => Some(OriginHint::DoubleEliminationConsolationFinal),
    }
}

/// Label of a bracket match, or the plain numbered label without a position
pub fn match_label(
    match_number: u32,
    position: Option<(u32, u32, GroupType)>,
    t: &dyn Translate,
) -> String {
    let Some((round_number, round_count, location)) = position else {
        return t.translate("match-label.default", &[("matchNumber", match_number.to_string())]);
    };

    let match_prefix = match location {
        GroupType::WinnerBracket => t.translate("match-label.winner-bracket", &[]),
        GroupType::LoserBracket => t.translate("match-label.loser-bracket", &[]),
        _ => t.translate("match-label.standard-bracket", &[]),
    };

    let in_semi_final_round = round_number + 1 == round_count;
    let in_final_round = round_number == round_count;

    if location == GroupType::SingleBracket {
        if in_semi_final_round {
            return t.translate(
                "match-label.standard-bracket-semi-final",
                &[("matchNumber", match_number.to_string())],
            );
        }
        if in_final_round {
            return t.translate("match-label.standard-bracket-final", &[]);
        }
    }

    if in_semi_final_round {
        return t.translate(
            "match-label.double-elimination-semi-final",
            &[
                ("matchPrefix", match_prefix),
                ("matchNumber", match_number.to_string()),
            ],
        );
    }
    if in_final_round {
        return t.translate("match-label.double-elimination-final", &[("matchPrefix", match_prefix)]);
    }

    t.translate(
        "match-label.double-elimination",
        &[
            ("matchPrefix", match_prefix),
            ("roundNumber", round_number.to_string()),
            ("matchNumber", match_number.to_string()),
        ],
    )
}

/// Label of a final group match
pub fn final_match_label(
    final_type: FinalType,
    round_number: u32,
    round_count: u32,
    t: &dyn Translate,
) -> String {
    if final_type == FinalType::ConsolationFinal {
        return t.translate("match-label.consolation-final", &[]);
    }
    if round_count == 1 {
        return t.translate("match-label.grand-final-single", &[]);
    }
    t.translate(
        "match-label.grand-final",
        &[("roundNumber", round_number.to_string())],
    )
}

pub fn match_status_label(status: MatchStatus, t: &dyn Translate) -> String {
    let key = match status {
        MatchStatus::Locked => "match-status.locked",
        MatchStatus::Waiting => "match-status.waiting",
        MatchStatus::Ready => "match-status.ready",
        MatchStatus::Running => "match-status.running",
        MatchStatus::Completed => "match-status.completed",
        MatchStatus::Archived => "match-status.archived",
    };
    t.translate(key, &[])
}

/// Display name of a bracket; only the two double elimination brackets
/// have one
pub fn bracket_name(group_type: GroupType, t: &dyn Translate) -> Option<String> {
    match group_type {
        GroupType::WinnerBracket => Some(t.translate("common.group-name-winner-bracket", &[])),
        GroupType::LoserBracket => Some(t.translate("common.group-name-loser-bracket", &[])),
        _ => None,
    }
}

/// "Bo{n}" caption for the games of a match
pub fn best_of_label(child_count: u32, t: &dyn Translate) -> String {
    t.translate("common.best-of-x", &[("x", child_count.to_string())])
}

/// What a round name is computed from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundNameInfo {
    pub round_number: u32,
    /// Zero for round-robin groups, which have no final round
    pub round_count: u32,
    pub group_type: GroupType,
    #[serde(default)]
    pub final_type: Option<FinalType>,
}

/// Default round name of one kind of group
pub type RoundNameGetter = fn(&RoundNameInfo, &dyn Translate) -> String;

pub fn round_name(info: &RoundNameInfo, t: &dyn Translate) -> String {
    if info.round_number == info.round_count {
        t.translate("common.round-name-final", &[])
    } else {
        t.translate(
            "common.round-name",
            &[("roundNumber", info.round_number.to_string())],
        )
    }
}

pub fn winner_bracket_round_name(info: &RoundNameInfo, t: &dyn Translate) -> String {
    if info.round_number == info.round_count {
        t.translate("common.round-name-winner-bracket-final", &[])
    } else {
        t.translate(
            "common.round-name-winner-bracket",
            &[("roundNumber", info.round_number.to_string())],
        )
    }
}

pub fn loser_bracket_round_name(info: &RoundNameInfo, t: &dyn Translate) -> String {
    if info.round_number == info.round_count {
        t.translate("common.round-name-loser-bracket-final", &[])
    } else {
        t.translate(
            "common.round-name-loser-bracket",
            &[("roundNumber", info.round_number.to_string())],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: EnglishTranslator = EnglishTranslator;

    #[test]
    fn test_key_translator_strips_namespace() {
        assert_eq!(KeyTranslator.translate("origin-hint.seed", &[]), "seed");
        assert_eq!(KeyTranslator.translate("plain", &[]), "plain");
    }

    #[test]
    fn test_english_interpolation() {
        let text = EN.translate(
            "origin-hint.winner-bracket",
            &[("round", "2".to_string()), ("position", "3".to_string())],
        );
        assert_eq!(text, "Loser of WB 2.3");
        assert_eq!(EN.translate("no.such-key", &[]), "no.such-key");
    }

    #[test]
    fn test_origin_hint_first_round() {
        assert_eq!(origin_hint(1, 3, false, GroupType::SingleBracket), Some(OriginHint::Seed));
        assert_eq!(origin_hint(1, 3, false, GroupType::WinnerBracket), Some(OriginHint::Seed));
        assert_eq!(origin_hint(1, 6, true, GroupType::LoserBracket), Some(OriginHint::Seed));
        assert_eq!(origin_hint(2, 3, false, GroupType::SingleBracket), None);
    }

    #[test]
    fn test_origin_hint_loser_bracket() {
        // 16 players: 6 loser rounds
        assert_eq!(
            origin_hint(1, 6, false, GroupType::LoserBracket),
            Some(OriginHint::WinnerBracket { round: 1 })
        );
        assert_eq!(
            origin_hint(2, 6, false, GroupType::LoserBracket),
            Some(OriginHint::WinnerBracket { round: 2 })
        );
        assert_eq!(origin_hint(3, 6, false, GroupType::LoserBracket), None);
        assert_eq!(
            origin_hint(4, 6, false, GroupType::LoserBracket),
            Some(OriginHint::WinnerBracketSemiFinal)
        );
        assert_eq!(
            origin_hint(6, 6, false, GroupType::LoserBracket),
            Some(OriginHint::WinnerBracketFinal)
        );
        assert_eq!(
            origin_hint(2, 8, true, GroupType::LoserBracket),
            Some(OriginHint::WinnerBracket { round: 1 })
        );
    }

    #[test]
    fn test_final_origin_hint() {
        assert_eq!(
            final_origin_hint(StageType::SingleElimination, FinalType::ConsolationFinal, 1),
            Some(OriginHint::ConsolationFinal)
        );
        assert_eq!(
            final_origin_hint(StageType::DoubleElimination, FinalType::GrandFinal, 1),
            Some(OriginHint::GrandFinal)
        );
        assert_eq!(
            final_origin_hint(StageType::DoubleElimination, FinalType::GrandFinal, 2),
            None
        );

        let hint = OriginHint::DoubleEliminationConsolationFinal;
        assert_eq!(hint.describe(1, &EN), "Loser of LB Final");
        assert_eq!(hint.describe(2, &EN), "Loser of WB Final");
    }

    #[test]
    fn test_match_labels() {
        assert_eq!(match_label(4, None, &EN), "M4");
        assert_eq!(match_label(1, Some((1, 3, GroupType::SingleBracket)), &EN), "Bracket 1.1");
        assert_eq!(match_label(2, Some((2, 3, GroupType::SingleBracket)), &EN), "Semi 2");
        assert_eq!(match_label(1, Some((3, 3, GroupType::SingleBracket)), &EN), "Final");
        assert_eq!(match_label(3, Some((1, 3, GroupType::WinnerBracket)), &EN), "WB 1.3");
        assert_eq!(match_label(1, Some((3, 4, GroupType::LoserBracket)), &EN), "LB Semi 1");
        assert_eq!(match_label(1, Some((4, 4, GroupType::LoserBracket)), &EN), "LB Final");
    }

    #[test]
    fn test_final_match_labels() {
        assert_eq!(final_match_label(FinalType::GrandFinal, 1, 1, &EN), "Grand Final");
        assert_eq!(final_match_label(FinalType::GrandFinal, 2, 2, &EN), "GF Round 2");
        assert_eq!(
            final_match_label(FinalType::ConsolationFinal, 1, 1, &EN),
            "Consolation Final"
        );
    }

    #[test]
    fn test_round_names() {
        let info = |round_number, round_count| RoundNameInfo {
            round_number,
            round_count,
            group_type: GroupType::WinnerBracket,
            final_type: None,
        };
        assert_eq!(round_name(&info(1, 3), &EN), "Round 1");
        assert_eq!(round_name(&info(3, 3), &EN), "Final Round");
        assert_eq!(round_name(&info(3, 0), &EN), "Round 3");
        assert_eq!(winner_bracket_round_name(&info(2, 3), &EN), "WB Round 2");
        assert_eq!(loser_bracket_round_name(&info(4, 4), &EN), "LB Final Round");
    }

    #[test]
    fn test_misc_labels() {
        assert_eq!(best_of_label(3, &EN), "Bo3");
        assert_eq!(match_status_label(MatchStatus::Running, &EN), "Running");
        assert_eq!(bracket_name(GroupType::SingleBracket, &EN), None);
        assert_eq!(
            bracket_name(GroupType::LoserBracket, &EN).as_deref(),
            Some("Loser Bracket")
        );
    }
}
