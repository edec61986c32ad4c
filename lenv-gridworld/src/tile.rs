//! Tiles of the grid.
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A tile of the grid.
///
/// In configuration files tiles are written as integers, `0` to `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tile {
    /// `0`, the agent can walk on it.
    Accessible,

    /// `1`, reaching it ends the episode with a reward.
    Good,

    /// `2`, reaching it ends the episode with a penalty.
    Bad,

    /// `3`, walls and holes. The agent cannot enter it.
    Inaccessible,
}

impl Tile {
    /// Returns `true` if the agent may stand on the tile.
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Inaccessible)
    }

    /// Returns `true` if standing on the tile ends the episode.
    ///
    /// Inaccessible tiles cannot be reached by a valid move, they are terminal so
    /// that a corrupted state ends the episode instead of going on.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Accessible)
    }
}

impl TryFrom<u8> for Tile {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Accessible),
            1 => Ok(Self::Good),
            2 => Ok(Self::Bad),
            3 => Ok(Self::Inaccessible),
            _ => Err(format!("invalid tile value {}, expected 0..=3", v)),
        }
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Accessible => 0,
            Tile::Good => 1,
            Tile::Bad => 2,
            Tile::Inaccessible => 3,
        }
    }
}

/// Move of the agent, the discrete action `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// `0`, previous row.
    Up,

    /// `1`, next row.
    Down,

    /// `2`, previous column.
    Left,

    /// `3`, next column.
    Right,
}

impl Move {
    /// Number of moves.
    pub const COUNT: u64 = 4;

    /// Decodes an action index. Indices out of `0..4` give `None`.
    pub fn from_index(ix: u64) -> Option<Self> {
        match ix {
            0 => Some(Self::Up),
            1 => Some(Self::Down),
            2 => Some(Self::Left),
            3 => Some(Self::Right),
            _ => None,
        }
    }

    /// Offset `(column, row)` of the move.
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

impl From<Move> for u64 {
    fn from(m: Move) -> Self {
        match m {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }
}
