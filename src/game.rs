//! Turn sequencing for a full game.
//!
//! [`Game`] keeps the live board, whose turn it is, and when the game is over.
//! Players are not stored: a move comes either from explicit coordinates or
//! from a [`Strategy`] handed in for that call.
//!
//! After every move the turn passes to the opponent. If the opponent has no
//! legal move their turn is skipped, and if neither side can move (or the board
//! is full) the game ends.

use log::{debug, info};

use crate::board::{Board, StoneColor};
use crate::cell::CellInfo;
use crate::error::{EngineError, Result};
use crate::position::{Position, Stage};
use crate::strategy::Strategy;

/// Stone counts for both players.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

/// Final result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub score: Score,
}

impl Outcome {
    /// The player with more stones, or `None` on a draw.
    pub fn winner(&self) -> Option<StoneColor> {
        let Score { black, white } = self.score;
        if black > white {
            Some(StoneColor::Black)
        } else if white > black {
            Some(StoneColor::White)
        } else {
            None
        }
    }
}

impl From<Score> for Outcome {
    fn from(score: Score) -> Self {
        Self { score }
    }
}

/// What a single move did, for the caller to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub placed: CellInfo,
    pub flipped: Vec<CellInfo>,
    /// The player whose following turn was skipped for lack of moves.
    pub skipped: Option<StoneColor>,
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    /// `None` once the game is over
    to_move: Option<StoneColor>,
    history: Vec<CellInfo>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the standard opening, Black to move.
    pub fn new() -> Self {
        Self {
            position: Position::new(&Board::initial()),
            to_move: Some(StoneColor::Black),
            history: Vec::new(),
        }
    }

    /// Resume from an arbitrary board.
    ///
    /// If `to_move` cannot play, the turn is skipped or the game ends right
    /// away, exactly as after a move.
    pub fn from_board(board: Board, to_move: StoneColor) -> Result<Self> {
        if to_move == StoneColor::None {
            return Err(EngineError::InvalidSnapshot(
                "side to move must be Black or White".to_string(),
            ));
        }
        let mut game = Self {
            position: Position::new(&board),
            to_move: None,
            history: Vec::new(),
        };
        game.hand_over(to_move);
        Ok(game)
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    /// The side to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<StoneColor> {
        self.to_move
    }

    /// Whether neither side can move any more.
    pub fn is_finished(&self) -> bool {
        self.to_move.is_none()
    }

    /// Moves played so far, in order.
    pub fn history(&self) -> &[CellInfo] {
        &self.history
    }

    /// Game stage of the live board.
    pub fn stage(&self) -> Stage {
        self.position.stage()
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<CellInfo> {
        match self.to_move {
            Some(color) => self.position.legal_moves(color),
            None => Vec::new(),
        }
    }

    /// Current stone counts.
    pub fn score(&self) -> Score {
        Score {
            black: self.position.count_stones(StoneColor::Black),
            white: self.position.count_stones(StoneColor::White),
        }
    }

    /// Final result, available once the game is finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_finished().then(|| Outcome::from(self.score()))
    }

    /// Play at `(x, y)` for the side to move.
    pub fn play(&mut self, x: usize, y: usize) -> Result<MoveReport> {
        let color = self.to_move.ok_or(EngineError::GameOver)?;
        let flipped = self.position.place_stone(x, y, color)?;
        let placed = CellInfo::new(x, y, color);
        self.history.push(placed);
        debug!("{color} plays [{x},{y}], {} flipped", flipped.len());

        let skipped = self.hand_over(color.opponent());
        Ok(MoveReport {
            placed,
            flipped,
            skipped,
        })
    }

    /// Let `strategy` choose the move for the side to move, then play it.
    pub fn play_with(&mut self, strategy: &mut dyn Strategy) -> Result<MoveReport> {
        let color = self.to_move.ok_or(EngineError::GameOver)?;
        match strategy.select_move(self.position.board(), color)? {
            Some(m) => self.play(m.x, m.y),
            None => Err(EngineError::MissingMove(color)),
        }
    }

    /// Give the turn to `next`, skipping them or ending the game as needed.
    /// Returns the skipped player, if any.
    fn hand_over(&mut self, next: StoneColor) -> Option<StoneColor> {
        if self.position.count_stones(StoneColor::None) == 0 {
            self.finish();
            return None;
        }
        if self.position.has_legal_move(next) {
            self.to_move = Some(next);
            return None;
        }

        let other = next.opponent();
        if self.position.has_legal_move(other) {
            info!("{next} cannot put stone, turn skipped");
            self.to_move = Some(other);
        } else {
            info!("{next} cannot put stone, {other} cannot either");
            self.finish();
        }
        Some(next)
    }

    fn finish(&mut self) {
        self.to_move = None;
        let Score { black, white } = self.score();
        info!("game finished: Black {black}, White {white}");
    }
}

/// Play `game` to the end with one strategy per side.
pub fn play_match(
    game: &mut Game,
    black: &mut dyn Strategy,
    white: &mut dyn Strategy,
) -> Result<Outcome> {
    while let Some(color) = game.to_move() {
        if color == StoneColor::Black {
            game.play_with(&mut *black)?;
        } else {
            game.play_with(&mut *white)?;
        }
    }
    Ok(Outcome::from(game.score()))
}
