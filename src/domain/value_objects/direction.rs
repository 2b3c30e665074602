//! Exit directions and the opposed-direction pairing

use serde::{Deserialize, Serialize};

/// Direction of a place exit
///
/// Exits are keyed by direction: a place has at most one exit per
/// direction, and two exits are the "same" exit exactly when their
/// directions match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
    In,
    Out,
}

impl Direction {
    /// All supported directions
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
        Direction::In,
        Direction::Out,
    ];

    /// The direction leading back through an exit in this direction
    ///
    /// This pairing is a total involution: `d.opposed().opposed() == d`
    /// for every direction.
    pub fn opposed(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            other => Err(format!("Unknown direction: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposed_is_an_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposed().opposed(), direction);
        }
    }

    #[test]
    fn test_opposed_pairs() {
        assert_eq!(Direction::North.opposed(), Direction::South);
        assert_eq!(Direction::East.opposed(), Direction::West);
        assert_eq!(Direction::Up.opposed(), Direction::Down);
        assert_eq!(Direction::In.opposed(), Direction::Out);
    }

    #[test]
    fn test_round_trip_through_strings() {
        for direction in Direction::ALL {
            let parsed: Direction = direction.as_str().parse().unwrap();
            assert_eq!(parsed, direction);
        }
        assert!("northwest".parse::<Direction>().is_err());
    }
}
