use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Which populations a settled verdict was scored on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBasis {
    Current,
    Cumulative,
}

/// Winner of the match as far as the detector can tell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Still evolving and not running.
    NoResultYet,
    /// Still evolving, one player ahead for now.
    Leading { player: Player, counts: CellCounts },
    /// Still evolving, populations level for now.
    Tied { counts: CellCounts },
    /// Settled pattern with a larger population for `player`.
    Won {
        player: Player,
        counts: CellCounts,
        basis: ScoreBasis,
    },
    /// Settled pattern with equal populations.
    Draw { counts: CellCounts, basis: ScoreBasis },
    /// Everything died and `Player` was the last colour standing.
    LastAlive(Player),
    /// Everything died without a single survivor being recorded.
    SimultaneousExtinction,
}

impl Verdict {
    /// Scores a settled pattern on the given populations.
    pub fn settled(counts: CellCounts, basis: ScoreBasis) -> Self {
        match counts.leader() {
            Some(player) => Self::Won {
                player,
                counts,
                basis,
            },
            None => Self::Draw { counts, basis },
        }
    }

    /// Describes a pattern that is still evolving.
    pub fn provisional(counts: CellCounts, is_running: bool) -> Self {
        if !is_running {
            return Self::NoResultYet;
        }
        match counts.leader() {
            Some(player) => Self::Leading { player, counts },
            None => Self::Tied { counts },
        }
    }

    pub fn extinction(last_survivor: Option<Player>) -> Self {
        match last_survivor {
            Some(player) => Self::LastAlive(player),
            None => Self::SimultaneousExtinction,
        }
    }

    /// Player this verdict favours, decisively or not.
    pub const fn player(&self) -> Option<Player> {
        match *self {
            Self::Leading { player, .. } | Self::Won { player, .. } | Self::LastAlive(player) => {
                Some(player)
            }
            Self::NoResultYet
            | Self::Tied { .. }
            | Self::Draw { .. }
            | Self::SimultaneousExtinction => None,
        }
    }

    pub const fn is_final(&self) -> bool {
        !matches!(
            self,
            Self::NoResultYet | Self::Leading { .. } | Self::Tied { .. }
        )
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NoResultYet => write!(f, "None yet"),
            Self::Leading { player, counts } => write!(
                f,
                "{} leading ({} vs {})",
                player,
                counts.of(player),
                counts.of(player.opponent())
            ),
            Self::Tied { counts } => {
                write!(f, "Currently tied ({}-{})", counts.player1, counts.player2)
            }
            Self::Won {
                player,
                counts,
                basis: ScoreBasis::Current,
            } => write!(
                f,
                "{} ({} vs {})",
                player,
                counts.of(player),
                counts.of(player.opponent())
            ),
            Self::Won {
                player,
                counts,
                basis: ScoreBasis::Cumulative,
            } => write!(
                f,
                "{} (Cumulative: {} vs {})",
                player,
                counts.of(player),
                counts.of(player.opponent())
            ),
            Self::Draw {
                counts,
                basis: ScoreBasis::Current,
            } => write!(f, "Draw ({}-{})", counts.player1, counts.player2),
            Self::Draw {
                counts,
                basis: ScoreBasis::Cumulative,
            } => write!(
                f,
                "Draw (Cumulative: {}-{})",
                counts.player1, counts.player2
            ),
            Self::LastAlive(player) => write!(f, "{} (Last alive)", player),
            Self::SimultaneousExtinction => write!(f, "Draw (Simultaneous extinction)"),
        }
    }
}
