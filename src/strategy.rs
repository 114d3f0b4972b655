//! Pluggable move selection for computer players.
//!
//! A strategy gets a read-only board snapshot and the color to move, and
//! answers with a legal move or `None` when that color has to pass. The color
//! is passed on every call; strategies keep no notion of "their" side.

use crate::board::{Board, StoneColor};
use crate::cell::CellInfo;
use crate::error::Result;

pub trait Strategy {
    /// Short name for logs and the command line.
    fn name(&self) -> &'static str;

    /// Choose a move for `color` on `board`.
    ///
    /// `Ok(None)` means `color` has no legal move. Errors are reserved for
    /// contract violations inside the engine.
    fn select_move(&mut self, board: &Board, color: StoneColor) -> Result<Option<CellInfo>>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn select_move(&mut self, board: &Board, color: StoneColor) -> Result<Option<CellInfo>> {
        (**self).select_move(board, color)
    }
}
