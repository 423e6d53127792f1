//! Partitioning a stage's matches into groups and rounds

use std::collections::BTreeMap;

use bracket_core::Match;

/// The matches of one group
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub group_id: u32,
    pub matches: Vec<Match>,
}

impl Group {
    /// Matches split by round in `round_id` order, each round sorted by
    /// `number`
    pub fn rounds(&self) -> Vec<Vec<Match>> {
        split_rounds(&self.matches)
    }
}

/// A stage's matches by group. Matches without a group are consolation
/// matches and are kept apart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchGroups {
    /// Sorted by `group_id`
    pub groups: Vec<Group>,
    pub ungrouped: Vec<Match>,
}

impl MatchGroups {
    pub fn split(matches: &[Match]) -> Self {
        let mut by_group: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
        let mut ungrouped = Vec::new();

        for m in matches {
            match m.group_id {
                Some(group_id) => by_group.entry(group_id).or_default().push(m.clone()),
                None => ungrouped.push(m.clone()),
            }
        }

        let groups = by_group
            .into_iter()
            .map(|(group_id, matches)| Group { group_id, matches })
            .collect();

        Self { groups, ungrouped }
    }

    /// The group at `index` in group order, which is not its id
    pub fn nth(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }
}

/// Split matches into rounds by `round_id`, each sorted by `number`
pub fn split_rounds(matches: &[Match]) -> Vec<Vec<Match>> {
    let mut by_round: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
    for m in matches {
        by_round.entry(m.round_id).or_default().push(m.clone());
    }
    by_round
        .into_values()
        .map(|mut round| {
            round.sort_by_key(|m| m.number);
            round
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(id: &str, group_id: Option<u32>, round_id: u32, number: u32) -> Match {
        Match::new(id, group_id, round_id, number)
    }

    #[test]
    fn test_split_groups_and_leftovers() {
        let matches = vec![
            m("b", Some(4), 1, 1),
            m("a", Some(1), 1, 1),
            m("x", None, 9, 1),
            m("c", Some(4), 2, 1),
        ];
        let groups = MatchGroups::split(&matches);

        let ids: Vec<u32> = groups.groups.iter().map(|g| g.group_id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(groups.nth(1).unwrap().matches.len(), 2);
        assert_eq!(groups.ungrouped.len(), 1);
        assert_eq!(groups.ungrouped[0].id, "x");
        assert!(groups.nth(2).is_none());
    }

    #[test]
    fn test_split_rounds_sorts_by_number() {
        let matches = vec![
            m("r2", Some(0), 7, 1),
            m("r1b", Some(0), 3, 2),
            m("r1a", Some(0), 3, 1),
        ];
        let rounds = split_rounds(&matches);
        assert_eq!(rounds.len(), 2);
        let first: Vec<&str> = rounds[0].iter().map(|m| m.id.as_str()).collect();
        assert_eq!(first, vec!["r1a", "r1b"]);
        assert_eq!(rounds[1][0].id, "r2");
    }

    #[test]
    fn test_empty() {
        let groups = MatchGroups::split(&[]);
        assert!(groups.groups.is_empty());
        assert!(groups.ungrouped.is_empty());
        assert!(split_rounds(&[]).is_empty());
    }
}
