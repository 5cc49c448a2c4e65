//! Persistence side of the game engine: a storage trait, an in-memory
//! implementation and a service that applies one move per transaction.

pub use error::*;
pub use memory::*;
pub use service::*;

mod error;
mod memory;
mod service;

use sweeper_core::{Cell, Coord2, Game, GameId};

/// Storage for games and their cells. A game always arrives with its whole
/// cell set and is written back as one aggregate.
pub trait GameStore: Send + Sync {
    /// Reserves a fresh identity for a game about to be inserted.
    fn next_id(&self) -> GameId;

    /// Stores a new game. Names are unique across games.
    fn insert(&self, game: Game) -> Result<()>;

    fn fetch(&self, id: GameId) -> Result<Game>;

    fn contains(&self, id: GameId) -> Result<bool> {
        match self.fetch(id) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn cell(&self, id: GameId, coords: Coord2) -> Result<Cell> {
        Ok(self.fetch(id)?.board().cell(coords)?)
    }

    /// Replaces the stored game with `game`, all fields and cells at once.
    fn commit(&self, game: &Game) -> Result<()>;

    /// Games whose name contains `query` (case-insensitive), oldest first.
    fn list(&self, query: Option<&str>) -> Result<Vec<Game>>;

    fn delete(&self, id: GameId) -> Result<()>;
}
