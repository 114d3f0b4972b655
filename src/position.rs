//! The rules engine: move legality, stone placement, and flipping.
//!
//! A [`Position`] owns a private copy of a [`Board`]. It never aliases the
//! board it was built from, so strategies can run trial moves on throwaway
//! copies without touching the live game.
//!
//! Everything is built on one primitive, a ray scan from an origin cell in one
//! of the 8 [`DIRECTIONS`]: the scan walks over opponent stones and succeeds
//! only when it reaches one of the mover's own stones after at least one
//! opponent stone. Leaving the board or hitting an empty cell ends the scan
//! without a capture.

use log::trace;

use crate::board::{Board, StoneColor};
use crate::cell::CellInfo;
use crate::constants::{CELL_COUNT, DIRECTIONS, SIZE_X, SIZE_Y};
use crate::error::{EngineError, Result};

/// Coarse game phase derived from how many cells are still empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Opening,
    Middle,
    End,
}

impl Stage {
    /// End below a third of the board empty, Middle below two thirds,
    /// Opening otherwise. Both thresholds are strict.
    pub const fn classify(empty: usize, total: usize) -> Self {
        // empty < total / 3, kept in integers
        if empty * 3 < total {
            Stage::End
        } else if empty * 3 < total * 2 {
            Stage::Middle
        } else {
            Stage::Opening
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Opening => "opening",
            Stage::Middle => "middle",
            Stage::End => "end",
        };
        f.write_str(name)
    }
}

/// A board simulation that enforces the placement rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(&Board::initial())
    }
}

impl Position {
    /// Copy `board` into a new simulation.
    pub fn new(board: &Board) -> Self {
        Self { board: *board }
    }

    /// Build a simulation from `(x, y, color)` triples covering every cell once.
    pub fn from_snapshot<I>(cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, StoneColor)>,
    {
        Ok(Self {
            board: Board::from_cells(cells)?,
        })
    }

    /// The simulated board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consume the simulation and return its board.
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Color at `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Result<StoneColor> {
        self.board
            .cell(x, y)
            .ok_or(EngineError::OutOfBounds { x, y })
    }

    /// Whether `color` may be placed at `(x, y)`.
    ///
    /// Off-board and occupied cells are never legal.
    pub fn is_legal_move(&self, x: usize, y: usize, color: StoneColor) -> bool {
        if self.board.cell(x, y) != Some(StoneColor::None) {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.capture_len(x, y, color, dir) > 0)
    }

    /// Every legal move for `color`, scanning x outer and y inner.
    pub fn legal_moves(&self, color: StoneColor) -> Vec<CellInfo> {
        let mut moves = Vec::new();
        for x in 0..SIZE_X {
            for y in 0..SIZE_Y {
                if self.is_legal_move(x, y, color) {
                    moves.push(CellInfo::new(x, y, color));
                }
            }
        }
        moves
    }

    /// Whether `color` has at least one legal move.
    pub fn has_legal_move(&self, color: StoneColor) -> bool {
        (0..SIZE_X).any(|x| (0..SIZE_Y).any(|y| self.is_legal_move(x, y, color)))
    }

    /// Place `color` at `(x, y)` and flip every captured run.
    ///
    /// Legality is checked again here regardless of what the caller checked.
    /// Returns the flipped cells in direction order, nearest first within a
    /// direction. The placed cell is not part of the result.
    ///
    /// # Errors
    /// - [`EngineError::OutOfBounds`] if `(x, y)` is off the board
    /// - [`EngineError::IllegalMove`] if the placement captures nothing or the
    ///   cell is occupied
    pub fn place_stone(&mut self, x: usize, y: usize, color: StoneColor) -> Result<Vec<CellInfo>> {
        if !Board::in_bounds(x, y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        if !self.is_legal_move(x, y, color) {
            return Err(EngineError::IllegalMove { x, y, color });
        }
        self.board.set(x, y, color)?;

        let mut flipped = Vec::new();
        for dir in DIRECTIONS {
            let run = self.capture_len(x, y, color, dir);
            for (fx, fy) in ray(x, y, dir).take(run) {
                self.board.set(fx, fy, color)?;
                flipped.push(CellInfo::new(fx, fy, color));
            }
        }
        trace!("{color} at [{x},{y}] flipped {} stones", flipped.len());
        Ok(flipped)
    }

    /// Number of cells holding `color`. `StoneColor::None` counts empty cells.
    pub fn count_stones(&self, color: StoneColor) -> usize {
        self.board.count(color)
    }

    /// Number of the (up to) 8 surrounding cells holding `color`.
    pub fn count_neighbors(&self, x: usize, y: usize, color: StoneColor) -> Result<usize> {
        if !Board::in_bounds(x, y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        let count = DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| step(x, y, dx, dy))
            .filter(|&(nx, ny)| self.board.cell(nx, ny) == Some(color))
            .count();
        Ok(count)
    }

    /// Game stage of the current board.
    pub fn stage(&self) -> Stage {
        Stage::classify(self.count_stones(StoneColor::None), CELL_COUNT)
    }

    /// Length of the opponent run `color` would capture from `(x, y)` along
    /// `dir`, or 0 when the ray does not end on one of `color`'s stones.
    fn capture_len(&self, x: usize, y: usize, color: StoneColor, dir: (isize, isize)) -> usize {
        let mut run = 0;
        for (cx, cy) in ray(x, y, dir) {
            match self.board.cell(cx, cy) {
                Some(StoneColor::None) | None => return 0,
                Some(c) if c == color => return run,
                Some(_) => run += 1,
            }
        }
        0
    }
}

/// One step from `(x, y)`, or `None` when it leaves the board.
#[inline]
fn step(x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    Board::in_bounds(nx, ny).then_some((nx, ny))
}

/// Cells from `(x, y)` outward along `dir`, excluding the origin.
fn ray(x: usize, y: usize, (dx, dy): (isize, isize)) -> impl Iterator<Item = (usize, usize)> {
    std::iter::successors(step(x, y, dx, dy), move |&(cx, cy)| step(cx, cy, dx, dy))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn center() -> (usize, usize) {
        (SIZE_X / 2, SIZE_Y / 2)
    }

    #[test]
    fn test_initial_legal_moves() {
        let pos = Position::default();
        let (cx, cy) = center();
        let moves: Vec<_> = pos
            .legal_moves(StoneColor::Black)
            .iter()
            .map(|m| (m.x, m.y))
            .collect();
        assert_eq!(
            moves,
            vec![(cx - 2, cy - 1), (cx - 1, cy - 2), (cx, cy + 1), (cx + 1, cy)]
        );
    }

    #[test]
    fn test_occupied_cell_is_illegal() {
        let pos = Position::default();
        let (cx, cy) = center();
        assert!(!pos.is_legal_move(cx, cy, StoneColor::Black));
        assert!(!pos.is_legal_move(cx - 1, cy, StoneColor::White));
    }

    #[test]
    fn test_out_of_bounds_is_illegal() {
        let pos = Position::default();
        assert!(!pos.is_legal_move(SIZE_X, 0, StoneColor::Black));
        assert!(!pos.is_legal_move(0, SIZE_Y, StoneColor::Black));
    }

    #[test]
    fn test_own_stone_without_enemy_run_is_not_a_capture() {
        let mut board = Board::empty();
        board.set(1, 0, StoneColor::Black).unwrap();
        let pos = Position::new(&board);
        assert!(!pos.is_legal_move(0, 0, StoneColor::Black));
    }

    #[test]
    fn test_run_ending_at_edge_is_not_a_capture() {
        let mut board = Board::empty();
        for x in 1..SIZE_X {
            board.set(x, 0, StoneColor::White).unwrap();
        }
        let pos = Position::new(&board);
        assert!(!pos.is_legal_move(0, 0, StoneColor::Black));
    }

    #[test]
    fn test_run_ending_at_empty_is_not_a_capture() {
        let mut board = Board::empty();
        board.set(1, 0, StoneColor::White).unwrap();
        board.set(3, 0, StoneColor::Black).unwrap();
        let pos = Position::new(&board);
        assert!(!pos.is_legal_move(0, 0, StoneColor::Black));
    }

    #[test]
    fn test_place_stone_flips_long_run() {
        let mut board = Board::empty();
        for x in 1..SIZE_X - 1 {
            board.set(x, 0, StoneColor::White).unwrap();
        }
        board.set(SIZE_X - 1, 0, StoneColor::Black).unwrap();
        let mut pos = Position::new(&board);

        let flipped = pos.place_stone(0, 0, StoneColor::Black).unwrap();
        let expected: Vec<_> = (1..SIZE_X - 1)
            .map(|x| CellInfo::new(x, 0, StoneColor::Black))
            .collect();
        assert_eq!(flipped, expected);
        assert_eq!(pos.count_stones(StoneColor::White), 0);
        assert_eq!(pos.count_stones(StoneColor::Black), SIZE_X);
    }

    #[test]
    fn test_place_stone_does_not_flip_terminating_stone() {
        let mut board = Board::empty();
        board.set(1, 0, StoneColor::White).unwrap();
        board.set(2, 0, StoneColor::Black).unwrap();
        let mut pos = Position::new(&board);

        let flipped = pos.place_stone(0, 0, StoneColor::Black).unwrap();
        assert_eq!(flipped, vec![CellInfo::new(1, 0, StoneColor::Black)]);
        assert_eq!(pos.cell(2, 0), Ok(StoneColor::Black));
        assert_eq!(pos.cell(3, 0), Ok(StoneColor::None));
    }

    #[test]
    fn test_place_stone_multiple_directions_in_order() {
        // Black at (2,2) captures up-left, up, and left at once
        let mut board = Board::empty();
        board.set(1, 1, StoneColor::White).unwrap();
        board.set(0, 0, StoneColor::Black).unwrap();
        board.set(2, 1, StoneColor::White).unwrap();
        board.set(2, 0, StoneColor::Black).unwrap();
        board.set(1, 2, StoneColor::White).unwrap();
        board.set(0, 2, StoneColor::Black).unwrap();
        let mut pos = Position::new(&board);

        let flipped = pos.place_stone(2, 2, StoneColor::Black).unwrap();
        assert_eq!(
            flipped,
            vec![
                CellInfo::new(1, 1, StoneColor::Black), // (-1,-1)
                CellInfo::new(1, 2, StoneColor::Black), // (-1, 0)
                CellInfo::new(2, 1, StoneColor::Black), // ( 0,-1)
            ]
        );
    }

    #[test]
    fn test_place_stone_matches_per_direction_runs() {
        let mut pos = Position::default();
        let mut rng = fastrand::Rng::with_seed(7);
        let mut color = StoneColor::Black;
        for _ in 0..20 {
            let moves = pos.legal_moves(color);
            if moves.is_empty() {
                color = color.opponent();
                continue;
            }
            let m = moves[rng.usize(..moves.len())];

            let mut expected = HashSet::new();
            for dir in DIRECTIONS {
                let run = pos.capture_len(m.x, m.y, color, dir);
                expected.extend(ray(m.x, m.y, dir).take(run));
            }

            let flipped = pos.place_stone(m.x, m.y, color).unwrap();
            let got: HashSet<_> = flipped.iter().map(|c| (c.x, c.y)).collect();
            assert_eq!(got.len(), flipped.len(), "a cell was reported twice");
            assert_eq!(got, expected);
            color = color.opponent();
        }
    }

    #[test]
    fn test_place_stone_illegal() {
        let mut pos = Position::default();
        let before = pos.clone();
        assert_eq!(
            pos.place_stone(0, 0, StoneColor::Black),
            Err(EngineError::IllegalMove {
                x: 0,
                y: 0,
                color: StoneColor::Black
            })
        );
        assert_eq!(pos, before, "failed placement must not mutate the board");
    }

    #[test]
    fn test_place_stone_out_of_bounds() {
        let mut pos = Position::default();
        assert_eq!(
            pos.place_stone(SIZE_X, 0, StoneColor::Black),
            Err(EngineError::OutOfBounds { x: SIZE_X, y: 0 })
        );
    }

    #[test]
    fn test_count_neighbors() {
        let pos = Position::default();
        let (cx, cy) = center();
        // Each center stone sees the other three
        assert_eq!(pos.count_neighbors(cx, cy, StoneColor::Black), Ok(2));
        assert_eq!(pos.count_neighbors(cx, cy, StoneColor::White), Ok(1));
        // Corner only has three cells around it
        assert_eq!(pos.count_neighbors(0, 0, StoneColor::None), Ok(3));
        assert_eq!(
            pos.count_neighbors(SIZE_X, 0, StoneColor::None),
            Err(EngineError::OutOfBounds { x: SIZE_X, y: 0 })
        );
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let pos = Position::default();
        assert_eq!(
            pos.cell(0, SIZE_Y),
            Err(EngineError::OutOfBounds { x: 0, y: SIZE_Y })
        );
    }

    #[test]
    fn test_stage_classify_thresholds() {
        let total = CELL_COUNT;
        assert_eq!(Stage::classify(total, total), Stage::Opening);
        assert_eq!(Stage::classify(0, total), Stage::End);
        // A third of the board empty is already Middle (strict comparison)
        assert_eq!(Stage::classify(30, 90), Stage::Middle);
        assert_eq!(Stage::classify(29, 90), Stage::End);
        assert_eq!(Stage::classify(60, 90), Stage::Opening);
        assert_eq!(Stage::classify(59, 90), Stage::Middle);
    }

    #[cfg(feature = "board8x8")]
    #[test]
    fn test_stage_boundaries_8x8() {
        assert_eq!(Stage::classify(43, 64), Stage::Opening);
        assert_eq!(Stage::classify(42, 64), Stage::Middle);
        assert_eq!(Stage::classify(22, 64), Stage::Middle);
        assert_eq!(Stage::classify(21, 64), Stage::End);
    }

    #[test]
    fn test_stage_of_initial_position() {
        assert_eq!(Position::default().stage(), Stage::Opening);
        assert_eq!(Position::new(&Board::empty()).stage(), Stage::Opening);
    }
}
