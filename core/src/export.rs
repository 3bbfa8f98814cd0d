use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Version tag written into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// Saved match: the board and what the detector concluded about it.
///
/// Snapshot history is not part of the record, a restored simulation starts
/// detecting from scratch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameExport {
    pub version: String,
    pub generation: u64,
    pub grid_size: Coord,
    /// Text rows, `.` empty, `1` and `2` for the players.
    pub grid: Vec<String>,
    pub cell_counts: CellCounts,
    pub game_status: Classification,
}

impl GameExport {
    pub fn from_simulation<T: TieBreak>(sim: &Simulation<T>) -> Self {
        let engine = sim.engine();
        Self {
            version: EXPORT_VERSION.into(),
            generation: engine.generation(),
            grid_size: engine.side(),
            grid: engine.to_rows(),
            cell_counts: engine.count_cells(),
            game_status: sim.classification(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| SimError::MalformedExport(err.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| SimError::MalformedExport(err.to_string()))
    }

    /// Rebuilds the board, checking it against the declared size and counts.
    pub fn to_engine(&self) -> Result<LifeEngine> {
        let side = usize::from(self.grid_size);
        if side == 0
            || self.grid.len() != side
            || self.grid.iter().any(|row| row.chars().count() != side)
        {
            return Err(SimError::InvalidGridShape);
        }

        let parsed = LifeEngine::from_rows(self.grid.as_slice())?;
        if parsed.count_cells() != self.cell_counts {
            return Err(SimError::InvalidCounts);
        }

        LifeEngine::from_parts(parsed.board().clone(), self.generation)
    }
}

impl<T: TieBreak> Simulation<T> {
    pub fn export(&self) -> GameExport {
        GameExport::from_simulation(self)
    }

    /// Restores the board, generation and classification of an export.
    pub fn from_export(export: &GameExport, config: SimConfig, tie_break: T) -> Result<Self> {
        if export.version != EXPORT_VERSION {
            log::warn!(
                "Importing export version {}, expected {}",
                export.version,
                EXPORT_VERSION
            );
        }

        let engine = export.to_engine()?;
        let config = SimConfig {
            side: engine.side(),
            ..config
        };
        let detector =
            PatternDetector::from_config(&config).with_classification(export.game_status);
        log::debug!(
            "Imported generation {} on a {}x{} board",
            engine.generation(),
            config.side,
            config.side
        );

        Ok(Self::from_parts(engine, detector, config, tie_break))
    }
}
