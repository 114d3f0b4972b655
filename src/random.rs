//! Uniformly random move selection.

use log::debug;

use crate::board::{Board, StoneColor};
use crate::cell::CellInfo;
use crate::error::Result;
use crate::position::Position;
use crate::strategy::Strategy;

/// Picks any legal move with equal probability.
pub struct RandomStrategy {
    rng: fastrand::Rng,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomStrategy {
    /// Seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible sequence of choices for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_move(&mut self, board: &Board, color: StoneColor) -> Result<Option<CellInfo>> {
        let moves = Position::new(board).legal_moves(color);
        if moves.is_empty() {
            debug!("random: no move for {color}");
            return Ok(None);
        }
        let chosen = moves[self.rng.usize(..moves.len())];
        debug!(
            "random: {color} picks [{},{}] out of {} moves",
            chosen.x,
            chosen.y,
            moves.len()
        );
        Ok(Some(chosen))
    }
}
