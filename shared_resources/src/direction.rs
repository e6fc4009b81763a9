use std::fmt;
use std::str::FromStr;

use crate::error::RequestError;

/// Travel direction of a floor call button.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up = 0,
    Down = 1,
}

impl Direction {
    pub fn num_directions() -> usize {
        2
    }

    pub fn iter() -> impl Iterator<Item = Direction> {
        [Direction::Up, Direction::Down].iter().copied()
    }

    pub fn as_index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Whether a call button for this direction exists on `floor` in a
    /// building with `num_floors` floors (floors are numbered from 1).
    pub fn exists_on(self, floor: u8, num_floors: u8) -> bool {
        match self {
            Direction::Up => floor < num_floors,
            Direction::Down => floor > 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(RequestError::UnknownDirection(s.to_string())),
        }
    }
}
