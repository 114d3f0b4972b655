use thiserror::Error;

use crate::board::StoneColor;

/// Contract violations reported by the engine and the coordinator.
///
/// "No legal move" is never one of these: strategies report it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Cannot put {color:?} stone to [{x},{y}]")]
    IllegalMove {
        x: usize,
        y: usize,
        color: StoneColor,
    },
    #[error("Coordinates [{x},{y}] are outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("Invalid board snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
    #[error("{0:?} strategy returned no move while one was available")]
    MissingMove(StoneColor),
}

pub type Result<T> = core::result::Result<T, EngineError>;
