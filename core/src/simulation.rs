use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// What happened during one [`Simulation::step`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub generation: u64,
    pub counts: CellCounts,
    pub regime: Regime,
    pub period: usize,
    /// Set the first time a terminal regime is seen while running.
    pub auto_pause: bool,
}

/// One-line summary of the match for a status bar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Extinct,
    Running(CellCounts),
    Paused(CellCounts),
}

impl Status {
    pub fn new(counts: CellCounts, is_running: bool) -> Self {
        if counts.is_extinct() {
            Self::Extinct
        } else if is_running {
            Self::Running(counts)
        } else {
            Self::Paused(counts)
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, counts) = match *self {
            Self::Extinct => return write!(f, "Extinct - All cells died!"),
            Self::Running(counts) => ("Running", counts),
            Self::Paused(counts) => ("Paused", counts),
        };
        match counts.leader() {
            Some(player) => write!(
                f,
                "{} - {} leads {}-{}",
                prefix,
                player,
                counts.of(player),
                counts.of(player.opponent())
            ),
            None => write!(
                f,
                "{} - Tied at {}-{}",
                prefix, counts.player1, counts.player2
            ),
        }
    }
}

/// A board and its pattern detector, kept consistent with each other.
///
/// Any change to the board outside of [`Self::step`] resets the detector, and
/// edits made at generation zero become the state [`Self::reset_to_initial`]
/// rewinds to.
#[derive(Clone, Debug)]
pub struct Simulation<T = SeededTieBreak> {
    config: SimConfig,
    engine: LifeEngine,
    detector: PatternDetector,
    tie_break: T,
}

impl Simulation<SeededTieBreak> {
    pub fn seeded(config: SimConfig, seed: u64) -> Self {
        Self::new(config, SeededTieBreak::new(seed))
    }
}

impl<T: TieBreak> Simulation<T> {
    pub fn new(config: SimConfig, tie_break: T) -> Self {
        Self::with_engine(LifeEngine::new(config.side), config, tie_break)
    }

    /// Starts from an existing board, its side overrides `config.side`.
    pub fn with_engine(engine: LifeEngine, config: SimConfig, tie_break: T) -> Self {
        let config = SimConfig {
            side: engine.side(),
            ..config
        };
        Self {
            detector: PatternDetector::from_config(&config),
            config,
            engine,
            tie_break,
        }
    }

    pub(crate) fn from_parts(
        engine: LifeEngine,
        detector: PatternDetector,
        config: SimConfig,
        tie_break: T,
    ) -> Self {
        Self {
            config,
            engine,
            detector,
            tie_break,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn detector(&self) -> &PatternDetector {
        &self.detector
    }

    pub fn tie_break(&self) -> &T {
        &self.tie_break
    }

    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    pub fn counts(&self) -> CellCounts {
        self.engine.count_cells()
    }

    pub fn classification(&self) -> Classification {
        self.detector.classification()
    }

    /// Advances one generation and classifies the result.
    pub fn step(&mut self, is_running: bool) -> StepReport {
        let generation = self.engine.step_generation(&mut self.tie_break);
        let counts = self.engine.count_cells();
        let regime = self.detector.observe(self.engine.snapshot(), counts);
        let auto_pause = self.detector.should_auto_pause(is_running);

        StepReport {
            generation,
            counts,
            regime,
            period: self.detector.period(),
            auto_pause,
        }
    }

    pub fn edit(&mut self, coords: Coord2, cell: Cell) -> EditOutcome {
        let outcome = self.engine.set_cell(coords, cell);
        if outcome.has_update() {
            if self.engine.generation() == 0 {
                self.engine.save_initial();
            }
            self.detector.reset();
        }
        outcome
    }

    pub fn resize(&mut self, side: Coord) {
        self.engine.resize(side);
        self.config.side = self.engine.side();
        self.detector.reset();
    }

    /// Wipes the board and makes the empty board generation zero.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.engine.save_initial();
        self.detector.reset();
    }

    /// Makes the current board the state [`Self::reset_to_initial`] rewinds to.
    pub fn mark_initial(&mut self) {
        self.engine.save_initial();
    }

    pub fn reset_to_initial(&mut self) -> Result<()> {
        log::debug!("Reset requested at generation {}", self.engine.generation());
        self.engine.restore_initial()?;
        self.detector.reset();
        Ok(())
    }

    pub fn winner(&self, is_running: bool) -> Verdict {
        self.detector.winner(self.counts(), is_running)
    }

    pub fn status(&self, is_running: bool) -> Status {
        Status::new(self.counts(), is_running)
    }
}

impl Default for Simulation<SeededTieBreak> {
    fn default() -> Self {
        Self::seeded(SimConfig::default(), 0)
    }
}
