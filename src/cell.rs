//! Move descriptors: a cell coordinate plus the color placed (or flipped) there.

use crate::board::StoneColor;
use crate::constants::{SIZE_X, SIZE_Y};

/// An immutable `(x, y, color)` value reported for legal moves and flips.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellInfo {
    pub x: usize,
    pub y: usize,
    pub color: StoneColor,
}

impl CellInfo {
    pub const fn new(x: usize, y: usize, color: StoneColor) -> Self {
        Self { x, y, color }
    }

    /// One of the four board corners.
    pub const fn is_corner(&self) -> bool {
        (self.x == 0 || self.x == SIZE_X - 1) && (self.y == 0 || self.y == SIZE_Y - 1)
    }

    /// The cell diagonally inward from a corner, e.g. `(1, 1)`.
    pub const fn is_corner_inside(&self) -> bool {
        (self.x == 1 || self.x == SIZE_X - 2) && (self.y == 1 || self.y == SIZE_Y - 2)
    }
}
