//! Constants for board dimensions, ray directions, and heuristic weights.
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board8x8` (default): the standard 8x8 board
//! - `board6x6`: 6x6 board
//! - `board10x10`: 10x10 board
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                                                # 8x8 (default)
//! cargo build --no-default-features --features board10x10   # 10x10
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of columns.
#[cfg(feature = "board8x8")]
pub const SIZE_X: usize = 8;

/// Number of rows.
#[cfg(feature = "board8x8")]
pub const SIZE_Y: usize = 8;

#[cfg(feature = "board6x6")]
pub const SIZE_X: usize = 6;

#[cfg(feature = "board6x6")]
pub const SIZE_Y: usize = 6;

#[cfg(feature = "board10x10")]
pub const SIZE_X: usize = 10;

#[cfg(feature = "board10x10")]
pub const SIZE_Y: usize = 10;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(any(
    all(feature = "board6x6", feature = "board8x8"),
    all(feature = "board6x6", feature = "board10x10"),
    all(feature = "board8x8", feature = "board10x10"),
))]
compile_error!("Enable only one of the 'board6x6', 'board8x8' and 'board10x10' features");

#[cfg(not(any(feature = "board6x6", feature = "board8x8", feature = "board10x10")))]
compile_error!("Must enable exactly one board size feature: 'board6x6', 'board8x8' or 'board10x10'");

/// Total number of cells on the board.
pub const CELL_COUNT: usize = SIZE_X * SIZE_Y;

// =============================================================================
// Ray Directions
// =============================================================================

/// The 8 compass directions as `(dx, dy)` steps.
///
/// Flip results are reported in this order, so it is part of the engine's
/// observable behavior.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Heuristic Weights (Theory strategy)
// =============================================================================

/// Bonus for taking a corner.
pub const WEIGHT_CORNER: i32 = 50;

/// Penalty for the cell diagonally inside a corner, outside the end game.
pub const WEIGHT_CORNER_INSIDE: i32 = -30;

/// Per flipped stone.
pub const WEIGHT_FLIP: i32 = -10;

/// Per opponent stone around each flipped stone, after the move.
pub const WEIGHT_ENEMY_NEIGHBOR: i32 = 2;

/// Per flipped stone, only in the end game.
pub const WEIGHT_END_FLIP: i32 = 5;
