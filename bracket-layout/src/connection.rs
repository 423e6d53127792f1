//! Connector types between matches
//!
//! Decides how a match box is joined to the matches feeding it and to the
//! match it feeds: an elbow (`Square`) when two lines merge, a `Straight`
//! line for a direct one-to-one feed, or nothing.

use serde::{Deserialize, Serialize};

/// Where a match sits inside a stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    /// The only bracket of a single elimination
    SingleBracket,
    WinnerBracket,
    LoserBracket,
    /// Grand final and consolation final
    FinalGroup,
    /// A round-robin pool
    RoundRobin,
}

/// Kind of final rendered after the brackets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalType {
    GrandFinal,
    ConsolationFinal,
}

/// Line style joining two matches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    Square,
    Straight,
    #[default]
    None,
}

/// Connectors on both sides of a match box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub connect_previous: ConnectionType,
    pub connect_next: ConnectionType,
}

/// Connection for a match of a bracket.
///
/// Loser bracket rounds alternate between taking drops from the winner
/// bracket (odd rounds, two sources) and continuing their own knockout (even
/// rounds), so their connectors depend on round parity only.
pub fn bracket_connection(
    round_number: u32,
    round_count: u32,
    origin_matches: u32,
    child_origin_matches: Option<u32>,
    location: GroupType,
    connect_final: bool,
) -> Connection {
    if location == GroupType::LoserBracket {
        let connect_previous = match round_number {
            n if n > 1 && n % 2 == 1 => ConnectionType::Square,
            n if n > 1 => ConnectionType::Straight,
            _ => ConnectionType::None,
        };
        let connect_next = match round_number {
            n if n < round_count && n % 2 == 0 => ConnectionType::Square,
            n if n < round_count => ConnectionType::Straight,
            _ => ConnectionType::None,
        };
        return Connection {
            connect_previous,
            connect_next,
        };
    }

    let connect_previous = if origin_matches > 0 {
        ConnectionType::Square
    } else {
        ConnectionType::None
    };
    let connect_next = if child_origin_matches == Some(1) {
        ConnectionType::Straight
    } else if round_number < round_count {
        ConnectionType::Square
    } else if connect_final {
        ConnectionType::Straight
    } else {
        ConnectionType::None
    };

    Connection {
        connect_previous,
        connect_next,
    }
}

/// Connection for a match of the final group.
///
/// `match_count` is the number of displayed final matches (2 when a grand
/// final reset is shown).
pub fn final_connection(final_type: FinalType, round_number: u32, match_count: u32) -> Connection {
    let connect_previous = if final_type == FinalType::GrandFinal && round_number == 1 {
        ConnectionType::Straight
    } else {
        ConnectionType::None
    };
    let connect_next = if match_count == 2 && round_number == 1 {
        ConnectionType::Straight
    } else {
        ConnectionType::None
    };

    Connection {
        connect_previous,
        connect_next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConnectionType::{None as Nothing, Square, Straight};

    fn conn(previous: ConnectionType, next: ConnectionType) -> Connection {
        Connection {
            connect_previous: previous,
            connect_next: next,
        }
    }

    #[test]
    fn test_loser_bracket_parity() {
        for round_count in 2..10 {
            for round in 2..=round_count {
                let c = bracket_connection(round, round_count, 0, None, GroupType::LoserBracket, false);
                let expected = if round % 2 == 1 { Square } else { Straight };
                assert_eq!(c.connect_previous, expected, "round {}/{}", round, round_count);
            }
        }
    }

    #[test]
    fn test_loser_bracket_edges() {
        let first = bracket_connection(1, 4, 0, Some(2), GroupType::LoserBracket, true);
        assert_eq!(first, conn(Nothing, Straight));

        let second = bracket_connection(2, 4, 1, Some(2), GroupType::LoserBracket, true);
        assert_eq!(second, conn(Straight, Square));

        let last = bracket_connection(4, 4, 1, None, GroupType::LoserBracket, true);
        assert_eq!(last, conn(Straight, Nothing));
    }

    #[test]
    fn test_single_bracket_four_players() {
        let first = bracket_connection(1, 2, 0, Some(2), GroupType::SingleBracket, false);
        assert_eq!(first, conn(Nothing, Square));

        let final_disconnected = bracket_connection(2, 2, 2, None, GroupType::SingleBracket, false);
        assert_eq!(final_disconnected, conn(Square, Nothing));

        let final_connected = bracket_connection(2, 2, 2, None, GroupType::WinnerBracket, true);
        assert_eq!(final_connected, conn(Square, Straight));
    }

    #[test]
    fn test_single_origin_child_is_straight() {
        let c = bracket_connection(1, 3, 0, Some(1), GroupType::SingleBracket, false);
        assert_eq!(c.connect_next, Straight);
    }

    #[test]
    fn test_final_connection() {
        assert_eq!(final_connection(FinalType::GrandFinal, 1, 1), conn(Straight, Nothing));
        assert_eq!(final_connection(FinalType::GrandFinal, 1, 2), conn(Straight, Straight));
        assert_eq!(final_connection(FinalType::GrandFinal, 2, 2), conn(Nothing, Nothing));
        assert_eq!(
            final_connection(FinalType::ConsolationFinal, 1, 1),
            conn(Nothing, Nothing)
        );
    }
}
