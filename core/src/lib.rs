#![no_std]

extern crate alloc;

use core::ops::Add;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use export::*;
pub use simulation::*;
pub use snapshot::*;
pub use tiebreak::*;
pub use types::*;

mod analysis;
mod cell;
mod engine;
mod error;
mod export;
mod simulation;
mod snapshot;
mod tiebreak;
mod types;

/// Board side used when nothing else is requested.
pub const DEFAULT_SIDE: Coord = 32;

/// Number of snapshots the pattern detector remembers.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// How the winner of a periodic pattern is scored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodicScoring {
    /// Compare the populations of the current generation only.
    #[default]
    CurrentCounts,
    /// Sum the populations over the last full period before comparing.
    Cumulative,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub side: Coord,
    pub history_capacity: usize,
    pub periodic_scoring: PeriodicScoring,
}

impl SimConfig {
    pub const fn new_unchecked(
        side: Coord,
        history_capacity: usize,
        periodic_scoring: PeriodicScoring,
    ) -> Self {
        Self {
            side,
            history_capacity,
            periodic_scoring,
        }
    }

    pub fn new(side: Coord, history_capacity: usize, periodic_scoring: PeriodicScoring) -> Self {
        let side = side.clamp(1, Coord::MAX);
        let history_capacity = history_capacity.max(2);
        Self::new_unchecked(side, history_capacity, periodic_scoring)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new_unchecked(
            DEFAULT_SIDE,
            DEFAULT_HISTORY_CAPACITY,
            PeriodicScoring::default(),
        )
    }
}

/// Live population of each player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub player1: CellCount,
    pub player2: CellCount,
}

impl CellCounts {
    pub const fn new(player1: CellCount, player2: CellCount) -> Self {
        Self { player1, player2 }
    }

    pub const fn total(&self) -> CellCount {
        self.player1 + self.player2
    }

    pub const fn is_extinct(&self) -> bool {
        self.total() == 0
    }

    pub const fn of(&self, player: Player) -> CellCount {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Player with the strictly larger population, `None` when tied.
    pub fn leader(&self) -> Option<Player> {
        use core::cmp::Ordering::*;
        match self.player1.cmp(&self.player2) {
            Greater => Some(Player::One),
            Less => Some(Player::Two),
            Equal => None,
        }
    }

    /// The only player still alive, `None` when both or neither are.
    pub const fn sole_survivor(&self) -> Option<Player> {
        match (self.player1 > 0, self.player2 > 0) {
            (true, false) => Some(Player::One),
            (false, true) => Some(Player::Two),
            _ => None,
        }
    }

    pub(crate) fn record(&mut self, cell: Cell) {
        match cell {
            Cell::Player1 => self.player1 += 1,
            Cell::Player2 => self.player2 += 1,
            Cell::Empty => {}
        }
    }
}

impl Add for CellCounts {
    type Output = CellCounts;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.player1 + rhs.player1, self.player2 + rhs.player2)
    }
}

/// Moore-neighborhood population around one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborCounts {
    pub player1: u8,
    pub player2: u8,
}

impl NeighborCounts {
    pub const fn total(&self) -> u8 {
        self.player1 + self.player2
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EditOutcome {
    /// Coordinates were off the board, nothing was written.
    Ignored,
    Written,
}

impl EditOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Written => true,
        }
    }
}
