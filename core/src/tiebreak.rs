use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::*;

/// Decides the owner of a newborn cell whose neighbors are split evenly between the players.
///
/// Every call must be an independent draw.
pub trait TieBreak {
    fn pick(&mut self) -> Player;
}

/// Fair coin backed by a seeded [`SmallRng`], so runs can be replayed.
#[derive(Clone, Debug)]
pub struct SeededTieBreak {
    seed: u64,
    rng: SmallRng,
}

impl SeededTieBreak {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TieBreak for SeededTieBreak {
    fn pick(&mut self) -> Player {
        use rand::Rng;

        if self.rng.random_bool(0.5) {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// Always resolves ties in favor of the same player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedTieBreak(pub Player);

impl TieBreak for FixedTieBreak {
    fn pick(&mut self) -> Player {
        self.0
    }
}

impl<T: TieBreak + ?Sized> TieBreak for &mut T {
    fn pick(&mut self) -> Player {
        (**self).pick()
    }
}
