use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sweeper_core::{
    BoardGenerator, Cell, Coord, Coord2, Game, GameConfig, GameId, GeometryPolicy, MoveKind,
    MoveReport, RandomBoardGenerator,
};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ServiceConfig {
    /// Limits applied when creating games.
    pub policy: GeometryPolicy,
    /// Seed for the per-game seed sequence, random if unset.
    pub seed: Option<u64>,
}

/// Applies moves to stored games. Moves on the same game are serialized by a
/// per-game lock; each successful operation is committed to the store once,
/// failed ones commit nothing.
pub struct GameService<S, G = RandomBoardGenerator> {
    store: S,
    generator: G,
    seeds: Mutex<SmallRng>,
    locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S, config: ServiceConfig) -> Self {
        Self::with_generator(store, RandomBoardGenerator::new(config.policy), config.seed)
    }
}

impl<S: GameStore, G: BoardGenerator> GameService<S, G> {
    pub fn with_generator(store: S, generator: G, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("Game service seed: {}", seed);
        Self {
            store,
            generator,
            seeds: Mutex::new(SmallRng::seed_from_u64(seed)),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates the board and stores the game with all of its cells in one step.
    pub fn create_game(&self, owner: &str, name: &str, config: GameConfig) -> Result<Game> {
        let seed = self.seeds.lock().map_err(|_| StoreError::Poisoned)?.random();
        let board = self.generator.generate(config, seed)?;
        let game = Game::new(self.store.next_id(), name, owner, board, Utc::now());

        self.store.insert(game.clone())?;
        log::info!(
            "{} created game {} {:?} ({}x{}, {} mines)",
            owner,
            game.id(),
            game.name(),
            config.rows(),
            config.columns(),
            game.board().mine_count()
        );
        Ok(game)
    }

    pub fn game(&self, id: GameId) -> Result<Game> {
        self.store.fetch(id)
    }

    pub fn cell(&self, id: GameId, coords: Coord2) -> Result<Cell> {
        self.store.cell(id, coords)
    }

    pub fn list(&self, query: Option<&str>) -> Result<Vec<Game>> {
        self.store.list(query)
    }

    pub fn make_move(
        &self,
        owner: &str,
        id: GameId,
        row: Coord,
        column: Coord,
        kind: MoveKind,
    ) -> Result<(Game, MoveReport)> {
        self.transact(owner, id, |game| game.make_move(row, column, kind))
    }

    pub fn pause(&self, owner: &str, id: GameId) -> Result<Game> {
        self.transact(owner, id, Game::pause).map(|(game, ())| game)
    }

    pub fn resume(&self, owner: &str, id: GameId) -> Result<Game> {
        self.transact(owner, id, Game::resume).map(|(game, ())| game)
    }

    pub fn delete(&self, owner: &str, id: GameId) -> Result<()> {
        let lock = self.lock_for(id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;

        let game = self.store.fetch(id)?;
        check_owner(&game, owner)?;
        self.store.delete(id)?;
        self.locks
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .remove(&id);
        log::info!("{} deleted game {}", owner, id);
        Ok(())
    }

    /// Read-modify-write of one game under its lock.
    fn transact<R>(
        &self,
        owner: &str,
        id: GameId,
        apply: impl FnOnce(&mut Game) -> sweeper_core::Result<R>,
    ) -> Result<(Game, R)> {
        let lock = self.lock_for(id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;

        let mut game = self.store.fetch(id)?;
        check_owner(&game, owner)?;
        let output = apply(&mut game).inspect_err(|err| {
            log::debug!("Rejected operation on game {}: {}", id, err);
        })?;
        self.store.commit(&game)?;
        Ok((game, output))
    }

    /// Lock entries are only created for stored games, so lookups of
    /// unknown ids leave no trace behind.
    fn lock_for(&self, id: GameId) -> Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| StoreError::Poisoned)?;
        if let Some(lock) = locks.get(&id) {
            return Ok(lock.clone());
        }
        if !self.store.contains(id)? {
            return Err(StoreError::NotFound(id));
        }
        Ok(locks.entry(id).or_default().clone())
    }
}

fn check_owner(game: &Game, owner: &str) -> Result<()> {
    if game.owner() == owner {
        Ok(())
    } else {
        Err(StoreError::NotOwner)
    }
}
