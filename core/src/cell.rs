use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the two competing colonies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Content of a single board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    pub const fn is_alive(self) -> bool {
        !matches!(self, Self::Empty)
    }

    pub const fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Player1 => Some(Player::One),
            Self::Player2 => Some(Player::Two),
        }
    }

    /// Byte used in snapshots, matches the digit a player is known by.
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Player1 => 1,
            Self::Player2 => 2,
        }
    }

    /// Character used by text patterns.
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Player1 => '1',
            Self::Player2 => '2',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            '1' => Some(Self::Player1),
            '2' => Some(Self::Player2),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Self::Player1,
            Player::Two => Self::Player2,
        }
    }
}

impl From<Option<Player>> for Cell {
    fn from(owner: Option<Player>) -> Self {
        owner.map_or(Self::Empty, Self::from)
    }
}
