use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use immigration_core::*;

/// Reads a text pattern and centers it on a board of at least `side`.
pub(crate) fn pattern_file(path: &Path, side: Coord) -> Result<LifeEngine> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read pattern {}", path.display()))?;
    let pattern = LifeEngine::parse(&text)
        .with_context(|| format!("Could not parse pattern {}", path.display()))?;
    Ok(centered(&pattern, side))
}

pub(crate) fn export_file(path: &Path) -> Result<GameExport> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read export {}", path.display()))?;
    GameExport::from_json(&text)
        .with_context(|| format!("Could not parse export {}", path.display()))
}

/// Copies `pattern` into the middle of an empty board of `side`, unless it is already that large.
pub(crate) fn centered(pattern: &LifeEngine, side: Coord) -> LifeEngine {
    let pattern_side = pattern.side();
    let side = side.max(pattern_side);
    if side == pattern_side {
        return pattern.clone();
    }

    let offset = (side - pattern_side) / 2;
    let mut engine = LifeEngine::new(side);
    for y in 0..pattern_side {
        for x in 0..pattern_side {
            engine.set_cell((x + offset, y + offset), pattern.cell_at((x, y)));
        }
    }
    log::debug!(
        "Centered {}x{} pattern on a {}x{} board",
        pattern_side,
        pattern_side,
        side,
        side
    );
    engine
}
