//! Reversi-Rust: a Reversi (Othello) rules engine with computer players.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, ray directions, heuristic weights
//! - [`board`] - Plain board storage and stone colors
//! - [`cell`] - Move descriptors reported for legal moves and flips
//! - [`position`] - Rules engine: legality, placement, flipping, game stage
//! - [`strategy`] - The move selection trait
//! - [`random`] - Uniformly random player
//! - [`theory`] - One-ply heuristic player
//! - [`game`] - Turn sequencing, skipped turns, game end
//! - [`protocol`] - Text command loop for external front ends
//!
//! ## Example
//!
//! ```
//! use reversi_rust::board::{Board, StoneColor};
//! use reversi_rust::position::Position;
//! use reversi_rust::strategy::Strategy;
//! use reversi_rust::theory::TheoryStrategy;
//!
//! let board = Board::initial();
//! let mut ai = TheoryStrategy::new();
//! let m = ai.select_move(&board, StoneColor::Black).unwrap().unwrap();
//!
//! let mut position = Position::new(&board);
//! let flipped = position.place_stone(m.x, m.y, StoneColor::Black).unwrap();
//! assert_eq!(flipped.len(), 1);
//! ```

pub mod board;
pub mod cell;
pub mod constants;
pub mod error;
pub mod game;
pub mod position;
pub mod protocol;
pub mod random;
pub mod strategy;
pub mod theory;

pub use error::{EngineError, Result};
