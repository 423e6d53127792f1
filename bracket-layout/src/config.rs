//! Viewer configuration

use serde::{Deserialize, Serialize};

/// Where the origin (seed or position) of a known participant is shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginPlacement {
    #[default]
    Before,
    After,
    None,
}

/// Rendering options for a stage layout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub participant_origin_placement: OriginPlacement,
    /// Show origin hints in slots whose participant is not known yet
    pub show_slots_origin: bool,
    /// Same, restricted to the loser bracket; only read when
    /// `show_slots_origin` is on
    pub show_lower_bracket_slots_origin: bool,
    /// Show the best-of count on its own instead of after the match label
    pub separated_child_count_label: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            participant_origin_placement: OriginPlacement::Before,
            show_slots_origin: true,
            show_lower_bracket_slots_origin: true,
            separated_child_count_label: false,
        }
    }
}

impl ViewerConfig {
    pub fn with_origin_placement(mut self, placement: OriginPlacement) -> Self {
        self.participant_origin_placement = placement;
        self
    }

    pub fn with_slots_origin(mut self, show: bool) -> Self {
        self.show_slots_origin = show;
        self
    }

    pub fn with_lower_bracket_slots_origin(mut self, show: bool) -> Self {
        self.show_lower_bracket_slots_origin = show;
        self
    }

    pub fn with_separated_child_count_label(mut self, separated: bool) -> Self {
        self.separated_child_count_label = separated;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.participant_origin_placement, OriginPlacement::Before);
        assert!(config.show_slots_origin);
        assert!(config.show_lower_bracket_slots_origin);
        assert!(!config.separated_child_count_label);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{"participant_origin_placement": "after"}"#).unwrap();
        assert_eq!(config.participant_origin_placement, OriginPlacement::After);
        assert!(config.show_slots_origin);
    }

    #[test]
    fn test_builders() {
        let config = ViewerConfig::default()
            .with_origin_placement(OriginPlacement::None)
            .with_slots_origin(false)
            .with_separated_child_count_label(true);
        assert_eq!(config.participant_origin_placement, OriginPlacement::None);
        assert!(!config.show_slots_origin);
        assert!(config.separated_child_count_label);
    }
}
