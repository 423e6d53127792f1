//! Tournament formats and their settings
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Settings for a Swiss stage followed by a single elimination top cut
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwissSettings {
    /// Games per match during the Swiss rounds
    pub swiss_best_of: u32,
    /// Number of players advancing to the playoffs
    pub advancement_cutoff: u32,
    /// Games per match during the playoffs
    pub playoffs_best_of: u32,
}

impl Default for SwissSettings {
    fn default() -> Self {
        Self {
            swiss_best_of: 3,
            advancement_cutoff: 4,
            playoffs_best_of: 5,
        }
    }
}

/// Settings for a single elimination bracket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleEliminationSettings {
    /// Games per match before the semifinals
    pub best_of: u32,
    /// Games per match in the semifinals and finals
    pub finals_best_of: u32,
}

impl Default for SingleEliminationSettings {
    fn default() -> Self {
        Self {
            best_of: 3,
            finals_best_of: 5,
        }
    }
}

/// Settings for a double elimination bracket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleEliminationSettings {
    /// Games per match before the semifinals of either bracket
    pub best_of: u32,
    /// Games per match in the semifinals and finals of either bracket
    pub finals_best_of: u32,
    /// Games per match in the grand final
    pub grand_final_best_of: u32,
}

impl Default for DoubleEliminationSettings {
    fn default() -> Self {
        Self {
            best_of: 3,
            finals_best_of: 5,
            grand_final_best_of: 5,
        }
    }
}

/// Tournament format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Format {
    /// Swiss rounds, then a single elimination top cut
    Swiss(SwissSettings),
    /// Straight knockout
    SingleElimination(SingleEliminationSettings),
    /// Knockout with a loser bracket and a grand final
    DoubleElimination(DoubleEliminationSettings),
}

impl Default for Format {
    fn default() -> Self {
        Format::Swiss(SwissSettings::default())
    }
}

/// Format tag without its settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Swiss,
    SingleElimination,
    DoubleElimination,
}

/// Type of a stage as seen by the host library
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageType {
    RoundRobin,
    Swiss,
    SingleElimination,
    DoubleElimination,
}

/// How players advance from the first stage to the second
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advancement {
    /// Number of players advancing, by rank
    pub value: u32,
}

/// Initial stage configuration handed to the host library
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSettings {
    /// Scoring best-of for the first stage
    pub best_of: u32,
    pub stage_one: StageType,
    pub stage_two: Option<StageType>,
    pub advance: Option<Advancement>,
}

impl Format {
    /// Swiss with default settings
    pub fn swiss() -> Self {
        Format::Swiss(SwissSettings::default())
    }

    /// Single elimination with default settings
    pub fn single_elimination() -> Self {
        Format::SingleElimination(SingleEliminationSettings::default())
    }

    /// Double elimination with default settings
    pub fn double_elimination() -> Self {
        Format::DoubleElimination(DoubleEliminationSettings::default())
    }

    /// The variant tag
    pub fn kind(&self) -> FormatKind {
        match self {
            Format::Swiss(_) => FormatKind::Swiss,
            Format::SingleElimination(_) => FormatKind::SingleElimination,
            Format::DoubleElimination(_) => FormatKind::DoubleElimination,
        }
    }

    /// Reject settings that are not positive integers
    pub fn validate(&self) -> Result<()> {
        let fields: Vec<(&'static str, u32)> = match self {
            Format::Swiss(s) => vec![
                ("swiss_best_of", s.swiss_best_of),
                ("advancement_cutoff", s.advancement_cutoff),
                ("playoffs_best_of", s.playoffs_best_of),
            ],
            Format::SingleElimination(s) => vec![
                ("best_of", s.best_of),
                ("finals_best_of", s.finals_best_of),
            ],
            Format::DoubleElimination(s) => vec![
                ("best_of", s.best_of),
                ("finals_best_of", s.finals_best_of),
                ("grand_final_best_of", s.grand_final_best_of),
            ],
        };

        match fields.iter().find(|(_, value)| *value == 0) {
            Some(&(field, _)) => Err(CoreError::InvalidSettings { field }),
            None => Ok(()),
        }
    }

    /// Stage configuration for the host library
    pub fn host_settings(&self) -> HostSettings {
        match self {
            Format::Swiss(s) => HostSettings {
                best_of: s.swiss_best_of,
                stage_one: StageType::Swiss,
                stage_two: Some(StageType::SingleElimination),
                advance: Some(Advancement {
                    value: s.advancement_cutoff,
                }),
            },
            Format::SingleElimination(s) => HostSettings {
                best_of: s.best_of,
                stage_one: StageType::SingleElimination,
                stage_two: None,
                advance: None,
            },
            Format::DoubleElimination(s) => HostSettings {
                best_of: s.best_of,
                stage_one: StageType::DoubleElimination,
                stage_two: None,
                advance: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_defaults() {
        assert_eq!(
            Format::default(),
            Format::Swiss(SwissSettings {
                swiss_best_of: 3,
                advancement_cutoff: 4,
                playoffs_best_of: 5,
            })
        );
        assert_eq!(Format::single_elimination().kind(), FormatKind::SingleElimination);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let format = Format::DoubleElimination(DoubleEliminationSettings {
            grand_final_best_of: 0,
            ..Default::default()
        });
        match format.validate() {
            Err(CoreError::InvalidSettings { field }) => assert_eq!(field, "grand_final_best_of"),
            other => panic!("expected invalid settings, got {:?}", other),
        }
        assert!(Format::swiss().validate().is_ok());
    }

    #[test]
    fn test_host_settings_swiss() {
        let settings = Format::swiss().host_settings();
        assert_eq!(settings.best_of, 3);
        assert_eq!(settings.stage_one, StageType::Swiss);
        assert_eq!(settings.stage_two, Some(StageType::SingleElimination));
        assert_eq!(settings.advance, Some(Advancement { value: 4 }));
    }

    #[test]
    fn test_format_serde_tag() {
        let json = serde_json::to_string(&Format::single_elimination()).unwrap();
        assert!(json.contains("\"type\":\"single_elimination\""));
        let parsed: Format = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Format::single_elimination());
    }
}
