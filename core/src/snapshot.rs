use alloc::boxed::Box;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Frozen row-major encoding of a board, one byte per cell.
///
/// Equal boards always produce byte-identical snapshots, which is what the
/// pattern detector compares.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot(Box<[u8]>);

impl Snapshot {
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self(cells.into_iter().map(Cell::code).collect())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recovers the per-player population stored in this snapshot.
    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &code in self.0.iter() {
            match code {
                1 => counts.player1 += 1,
                2 => counts.player2 += 1,
                _ => {}
            }
        }
        counts
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &code in self.0.iter() {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}
