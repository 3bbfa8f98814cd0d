use serde::{Deserialize, Serialize};

use crate::*;

/// Long-run behaviour of the simulation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    #[default]
    Active,
    Static,
    Periodic,
    Extinct,
}

impl Regime {
    /// Regimes that end the match and may trigger an auto-pause.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Static | Self::Periodic | Self::Extinct)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Static => "Static",
            Self::Periodic => "Periodic",
            Self::Extinct => "Extinct",
        }
    }
}

/// Everything the detector has concluded so far.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub regime: Regime,
    /// Cycle length, only non-zero while `Periodic`.
    pub period: usize,
    /// Only colour alive at the last observation where exactly one was.
    pub last_survivor: Option<Player>,
    pub auto_paused: bool,
}

/// Watches successive generations for extinction, fixed points and cycles.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternDetector {
    history: History,
    classification: Classification,
    scoring: PeriodicScoring,
}

impl PatternDetector {
    pub fn new(history_capacity: usize, scoring: PeriodicScoring) -> Self {
        Self {
            history: History::new(history_capacity),
            classification: Classification::default(),
            scoring,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.history_capacity, config.periodic_scoring)
    }

    pub(crate) fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn regime(&self) -> Regime {
        self.classification.regime
    }

    pub fn period(&self) -> usize {
        self.classification.period
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn scoring(&self) -> PeriodicScoring {
        self.scoring
    }

    /// Forgets all history, used whenever the board changes outside of a step.
    pub fn reset(&mut self) {
        self.history.clear();
        self.classification = Classification::default();
    }

    /// Classifies the newest generation.
    pub fn observe(&mut self, snapshot: Snapshot, counts: CellCounts) -> Regime {
        let next = if counts.is_extinct() {
            Classification {
                regime: Regime::Extinct,
                period: 0,
                ..self.classification
            }
        } else {
            self.history.push(snapshot);
            let (regime, period) = self.classify_history();
            Classification {
                regime,
                period,
                last_survivor: counts.sole_survivor(),
                ..self.classification
            }
        };

        self.update(next);
        next.regime
    }

    fn classify_history(&self) -> (Regime, usize) {
        if self.history.is_static() {
            return (Regime::Static, 0);
        }
        match self.history.smallest_period() {
            Some(period) => (Regime::Periodic, period),
            None => (Regime::Active, 0),
        }
    }

    fn update(&mut self, next: Classification) {
        let previous = self.classification;
        if previous.regime != next.regime || previous.period != next.period {
            log::debug!(
                "Regime changed: {:?} (period {}) -> {:?} (period {})",
                previous.regime,
                previous.period,
                next.regime,
                next.period
            );
        }
        self.classification = next;
    }

    /// Current winner, does not change any state.
    pub fn winner(&self, counts: CellCounts, is_running: bool) -> Verdict {
        match self.classification.regime {
            Regime::Extinct => Verdict::extinction(self.classification.last_survivor),
            Regime::Static => Verdict::settled(counts, ScoreBasis::Current),
            Regime::Periodic => match self.scoring {
                PeriodicScoring::CurrentCounts => Verdict::settled(counts, ScoreBasis::Current),
                PeriodicScoring::Cumulative => {
                    Verdict::settled(self.cumulative_counts(), ScoreBasis::Cumulative)
                }
            },
            Regime::Active => Verdict::provisional(counts, is_running),
        }
    }

    /// Populations summed over the newest `period` snapshots.
    pub fn cumulative_counts(&self) -> CellCounts {
        self.history
            .iter_recent()
            .take(self.classification.period)
            .map(Snapshot::counts)
            .fold(CellCounts::default(), |total, counts| total + counts)
    }

    /// True once per terminal regime while running, then latched until [`Self::reset`].
    pub fn should_auto_pause(&mut self, is_running: bool) -> bool {
        let should_pause = self.classification.regime.is_terminal()
            && is_running
            && !self.classification.auto_paused;
        if should_pause {
            log::debug!("Auto-pausing on {:?}", self.classification.regime);
            self.classification.auto_paused = true;
        }
        should_pause
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
