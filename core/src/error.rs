use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board geometry: {0}")]
    InvalidGeometry(&'static str),
    #[error("Invalid coordinates")]
    InvalidCoordinate,
    #[error("Game is paused, resume it before moving")]
    GamePaused,
    #[error("Game already ended, no new moves are accepted")]
    GameAlreadyEnded,
    #[error("Cell is already revealed")]
    CellAlreadyRevealed,
}

pub type Result<T> = core::result::Result<T, GameError>;
