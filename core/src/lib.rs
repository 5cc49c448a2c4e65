//! Rules engine for a turn-based Minesweeper game: board generation, cell
//! topology, the per-cell reveal/mark state machine, flood-fill reveal and
//! win/loss/timing derivation.
//!
//! The engine performs no I/O. A host loads a [`Game`], applies one move with
//! [`Game::make_move`] and persists the whole aggregate once on success.

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use reveal::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod game;
mod generator;
mod reveal;
mod types;
