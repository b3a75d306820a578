//! Encounter catalogue: which event each direction triggers and what it shows.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction picked by the player at a crossroads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Straight,
}

impl Direction {
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Straight];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Straight => "straight",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction `{0}` (expected left, right or straight)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "r" | "right" => Ok(Self::Right),
            "s" | "straight" => Ok(Self::Straight),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// Encounter determined by the chosen direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryEncounter {
    TreasureFind,
    Theft,
    Snakebite,
}

impl PrimaryEncounter {
    #[must_use]
    pub const fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::TreasureFind,
            Direction::Right => Self::Theft,
            Direction::Straight => Self::Snakebite,
        }
    }

    /// Resource key handed to the narrative loader.
    #[must_use]
    pub const fn narrative_key(self) -> &'static str {
        match self {
            Self::TreasureFind => "treasure",
            Self::Theft => "thief",
            Self::Snakebite => "snake",
        }
    }

    #[must_use]
    pub const fn asset(self) -> Asset {
        match self {
            Self::TreasureFind => Asset::Treasure,
            Self::Theft => Asset::Thief,
            Self::Snakebite => Asset::Snake,
        }
    }
}

/// Illustration shown next to an encounter result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Treasure,
    Thief,
    Snake,
}

impl Asset {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Treasure => "images/treasure.png",
            Self::Thief => "images/badman.png",
            Self::Snake => "images/snake.png",
        }
    }

    #[must_use]
    pub const fn alt_text(self) -> &'static str {
        match self {
            Self::Treasure => "Treasure",
            Self::Thief => "Bandit",
            Self::Snake => "Snake",
        }
    }
}

/// Polarity of a secondary NPC encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcKind {
    Friendly,
    Hostile,
}

impl NpcKind {
    #[must_use]
    pub const fn from_coin(friendly: bool) -> Self {
        if friendly {
            Self::Friendly
        } else {
            Self::Hostile
        }
    }
}

/// Amount a thief takes: `floor(treasure * share_pct / 100)`.
///
/// Flooring follows the mathematical floor, so a negative purse yields a
/// negative cut.
#[must_use]
pub fn theft_amount(treasure: i64, share_pct: i64) -> i64 {
    let cut = (i128::from(treasure) * i128::from(share_pct)).div_euclid(100);
    i64::try_from(cut).unwrap_or(if cut < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_map_to_distinct_encounters() {
        let keys: Vec<&str> = Direction::ALL
            .iter()
            .map(|d| PrimaryEncounter::for_direction(*d).narrative_key())
            .collect();
        assert_eq!(keys, ["treasure", "thief", "snake"]);
        assert_eq!(PrimaryEncounter::Theft.asset(), Asset::Thief);
        assert_eq!(Asset::Snake.path(), "images/snake.png");
    }

    #[test]
    fn parses_direction_aliases() {
        assert_eq!("L".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!(" straight ".parse::<Direction>().unwrap(), Direction::Straight);
        assert_eq!("right".parse::<Direction>().unwrap(), Direction::Right);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn theft_floors_twenty_percent() {
        assert_eq!(theft_amount(100, 20), 20);
        assert_eq!(theft_amount(0, 20), 0);
        assert_eq!(theft_amount(4, 20), 0);
        assert_eq!(theft_amount(49, 20), 9);
        assert_eq!(theft_amount(-7, 20), -2);
    }

    #[test]
    fn theft_is_exact_for_huge_purses() {
        assert_eq!(
            theft_amount(922_337_203_685_477_580, 20),
            184_467_440_737_095_516
        );
        assert_eq!(theft_amount(i64::MAX, 20), i64::MAX / 5);
        assert_eq!(theft_amount(i64::MIN, 20), i64::MIN.div_euclid(5));
    }
}
