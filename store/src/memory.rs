use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use sweeper_core::{Cell, Coord2, Game, GameId};

use crate::*;

/// Keeps every game in a map guarded by a single lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<GameId, Game>>,
    last_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.read().map(|games| games.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameStore for MemoryStore {
    fn next_id(&self) -> GameId {
        GameId(self.last_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn insert(&self, game: Game) -> Result<()> {
        let mut games = self.games.write().map_err(|_| StoreError::Poisoned)?;
        if games.values().any(|other| other.name() == game.name()) {
            return Err(StoreError::DuplicateName(game.name().to_owned()));
        }
        log::debug!("Inserted game {} {:?}", game.id(), game.name());
        games.insert(game.id(), game);
        Ok(())
    }

    fn fetch(&self, id: GameId) -> Result<Game> {
        let games = self.games.read().map_err(|_| StoreError::Poisoned)?;
        games.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn contains(&self, id: GameId) -> Result<bool> {
        let games = self.games.read().map_err(|_| StoreError::Poisoned)?;
        Ok(games.contains_key(&id))
    }

    fn cell(&self, id: GameId, coords: Coord2) -> Result<Cell> {
        let games = self.games.read().map_err(|_| StoreError::Poisoned)?;
        let game = games.get(&id).ok_or(StoreError::NotFound(id))?;
        Ok(game.board().cell(coords)?)
    }

    fn commit(&self, game: &Game) -> Result<()> {
        let mut games = self.games.write().map_err(|_| StoreError::Poisoned)?;
        let stored = games
            .get_mut(&game.id())
            .ok_or(StoreError::NotFound(game.id()))?;
        *stored = game.clone();
        Ok(())
    }

    fn list(&self, query: Option<&str>) -> Result<Vec<Game>> {
        let games = self.games.read().map_err(|_| StoreError::Poisoned)?;
        let query = query.map(str::to_lowercase);
        let mut found: Vec<Game> = games
            .values()
            .filter(|game| match &query {
                Some(query) => game.name().to_lowercase().contains(query.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by_key(|game| (game.created_at(), game.id()));
        Ok(found)
    }

    fn delete(&self, id: GameId) -> Result<()> {
        let mut games = self.games.write().map_err(|_| StoreError::Poisoned)?;
        games.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta};
    use sweeper_core::{Board, GameError};

    fn game(store: &MemoryStore, name: &str, offset: i64) -> Game {
        let board = Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap() + TimeDelta::seconds(offset);
        Game::new(store.next_id(), name, "alice", board, now)
    }

    #[test]
    fn ids_are_unique() {
        let store = MemoryStore::new();
        assert_ne!(store.next_id(), store.next_id());
    }

    #[test]
    fn insert_and_fetch() {
        let store = MemoryStore::new();
        let game = game(&store, "first", 0);
        store.insert(game.clone()).unwrap();

        assert_eq!(store.fetch(game.id()).unwrap(), game);
        assert!(store.cell(game.id(), (0, 0)).unwrap().is_mine());
        assert_eq!(
            store.cell(game.id(), (3, 0)),
            Err(StoreError::Game(GameError::InvalidCoordinate))
        );
        assert_eq!(store.fetch(GameId(99)), Err(StoreError::NotFound(GameId(99))));
    }

    #[test]
    fn names_are_unique() {
        let store = MemoryStore::new();
        store.insert(game(&store, "same", 0)).unwrap();

        assert_eq!(
            store.insert(game(&store, "same", 1)),
            Err(StoreError::DuplicateName("same".to_owned()))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn list_filters_case_insensitively_in_creation_order() {
        let store = MemoryStore::new();
        store.insert(game(&store, "Sunday Sweep", 20)).unwrap();
        store.insert(game(&store, "monday sweep", 10)).unwrap();
        store.insert(game(&store, "expert", 0)).unwrap();

        let names: Vec<String> = store
            .list(Some("SWEEP"))
            .unwrap()
            .iter()
            .map(|game| game.name().to_owned())
            .collect();
        assert_eq!(names, ["monday sweep", "Sunday Sweep"]);
        assert_eq!(store.list(None).unwrap().len(), 3);
    }

    #[test]
    fn commit_requires_existing_game() {
        let store = MemoryStore::new();
        let game = game(&store, "ghost", 0);

        assert_eq!(store.commit(&game), Err(StoreError::NotFound(game.id())));
    }

    #[test]
    fn delete_removes_game() {
        let store = MemoryStore::new();
        let game = game(&store, "gone", 0);
        store.insert(game.clone()).unwrap();

        store.delete(game.id()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.delete(game.id()), Err(StoreError::NotFound(game.id())));
    }
}
