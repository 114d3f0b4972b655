//! Heuristic ("theory") move selection.
//!
//! Each legal move is scored on its own trial copy of the board and the best
//! score wins. The evaluation looks exactly one ply ahead:
//! - taking a corner is rewarded
//! - the cell diagonally inside a corner is avoided until the end game
//! - flipping many stones is penalised, except that the end game partly
//!   reverses the penalty
//! - flipped stones surrounded by opponent stones are rewarded
//!
//! The game stage always comes from the board before the candidate move.

use log::{debug, trace};

use crate::board::{Board, StoneColor};
use crate::cell::CellInfo;
use crate::constants::{
    WEIGHT_CORNER, WEIGHT_CORNER_INSIDE, WEIGHT_END_FLIP, WEIGHT_ENEMY_NEIGHBOR, WEIGHT_FLIP,
};
use crate::error::Result;
use crate::position::{Position, Stage};
use crate::strategy::Strategy;

/// Scoring weights. `Default` gives the standard values from
/// [`crate::constants`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Weights {
    pub corner: i32,
    pub corner_inside: i32,
    pub flip: i32,
    pub enemy_neighbor: i32,
    pub end_flip: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            corner: WEIGHT_CORNER,
            corner_inside: WEIGHT_CORNER_INSIDE,
            flip: WEIGHT_FLIP,
            enemy_neighbor: WEIGHT_ENEMY_NEIGHBOR,
            end_flip: WEIGHT_END_FLIP,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TheoryStrategy {
    weights: Weights,
}

impl TheoryStrategy {
    /// A strategy with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// A strategy with custom weights.
    pub fn with_weights(weights: Weights) -> Self {
        Self { weights }
    }

    /// The weights in use.
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Score one candidate against `position`, which is left unchanged.
    pub fn score_move(&self, position: &Position, candidate: &CellInfo) -> Result<i32> {
        let w = &self.weights;
        let color = candidate.color;
        let stage = position.stage();
        let mut score = 0;

        if candidate.is_corner() {
            score += w.corner;
        }
        if candidate.is_corner_inside() && stage != Stage::End {
            score += w.corner_inside;
        }

        let mut trial = position.clone();
        let turned = trial.place_stone(candidate.x, candidate.y, color)?;
        let flips = turned.len() as i32;
        score += w.flip * flips;

        let enemy = color.opponent();
        for cell in &turned {
            score += w.enemy_neighbor * trial.count_neighbors(cell.x, cell.y, enemy)? as i32;
        }

        if stage == Stage::End {
            score += w.end_flip * flips;
        }

        trace!(
            "theory: [{},{}] for {color} flips {flips} in {stage}, score {score}",
            candidate.x,
            candidate.y
        );
        Ok(score)
    }

    /// Every legal move for `color` with its score, in enumeration order.
    pub fn evaluate(&self, board: &Board, color: StoneColor) -> Result<Vec<(CellInfo, i32)>> {
        let position = Position::new(board);
        let mut scored = Vec::new();
        for candidate in position.legal_moves(color) {
            let score = self.score_move(&position, &candidate)?;
            scored.push((candidate, score));
        }
        Ok(scored)
    }
}

impl Strategy for TheoryStrategy {
    fn name(&self) -> &'static str {
        "theory"
    }

    /// The highest-scoring move. Ties go to the earliest candidate.
    fn select_move(&mut self, board: &Board, color: StoneColor) -> Result<Option<CellInfo>> {
        let mut best: Option<(CellInfo, i32)> = None;
        for (candidate, score) in self.evaluate(board, color)? {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }
        match best {
            Some((m, score)) => debug!("theory: {color} picks [{},{}] with score {score}", m.x, m.y),
            None => debug!("theory: no move for {color}"),
        }
        Ok(best.map(|(m, _)| m))
    }
}
