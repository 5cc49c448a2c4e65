use sweeper_core::{GameError, GameId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Game {0} not found")]
    NotFound(GameId),
    #[error("Some other game has the name {0:?}")]
    DuplicateName(String),
    #[error("Only the owner of a game can change it")]
    NotOwner,
    #[error("Store lock poisoned by a panicked writer")]
    Poisoned,
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
