use alloc::string::String;
use alloc::vec::Vec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Paused -> Playing
/// - Playing -> Lost
/// - Playing -> Won
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Paused,
    #[default]
    Playing,
    Lost,
    Won,
}

impl GameStatus {
    /// Game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        match self {
            Self::Paused => false,
            Self::Playing => false,
            Self::Lost => true,
            Self::Won => true,
        }
    }
}

/// What a move intends to do with the target cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Reveal,
    Flag,
    Question,
    Clear,
}

impl MoveKind {
    /// The mark a marking move applies, `None` for a reveal.
    pub const fn mark(self) -> Option<Mark> {
        match self {
            Self::Reveal => None,
            Self::Flag => Some(Mark::Flagged),
            Self::Question => Some(Mark::Questioned),
            Self::Clear => Some(Mark::None),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    NoChange,
    Marked,
    Revealed,
    HitMine,
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Marked => true,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    /// Cells that became visible during this move.
    pub revealed: Vec<Coord2>,
}

impl MoveReport {
    fn new(outcome: MoveOutcome, revealed: Vec<Coord2>) -> Self {
        Self { outcome, revealed }
    }
}

/// Represents a game from creation to its terminal status, with its cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    name: String,
    owner: String,
    board: Board,
    status: GameStatus,
    created_at: DateTime<Utc>,
    last_action: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    /// Active play time up to `last_action`, kept below second resolution
    /// so frequent moves still add up.
    elapsed_millis: u64,
}

impl Game {
    pub fn new(
        id: GameId,
        name: impl Into<String>,
        owner: impl Into<String>,
        board: Board,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            owner: owner.into(),
            board,
            status: GameStatus::Playing,
            created_at: now,
            last_action: now,
            finished_at: None,
            elapsed_millis: 0,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.game_config()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_action(&self) -> DateTime<Utc> {
        self.last_action
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_millis / 1000
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn remaining_mines(&self) -> i32 {
        i32::from(self.board.mine_count()) - i32::from(self.board.flagged_count())
    }

    /// Active play time, live while playing and frozen otherwise.
    pub fn played_time_at(&self, now: DateTime<Utc>) -> u64 {
        let millis = match self.status {
            GameStatus::Playing => self.elapsed_millis + millis_between(self.last_action, now),
            GameStatus::Paused | GameStatus::Lost | GameStatus::Won => self.elapsed_millis,
        };
        millis / 1000
    }

    pub fn played_time(&self) -> u64 {
        self.played_time_at(Utc::now())
    }

    pub fn make_move(&mut self, row: Coord, column: Coord, kind: MoveKind) -> Result<MoveReport> {
        self.make_move_at(row, column, kind, Utc::now())
    }

    /// Applies one move. On error the game is left untouched.
    pub fn make_move_at(
        &mut self,
        row: Coord,
        column: Coord,
        kind: MoveKind,
        now: DateTime<Utc>,
    ) -> Result<MoveReport> {
        self.check_playing()?;
        let coords = self.board.validate_coords((row, column))?;

        let report = match kind.mark() {
            None => self.reveal(coords, now),
            Some(mark) => self.mark(coords, mark, now)?,
        };
        log::debug!(
            "Game {} move {:?} at {:?}: {:?}",
            self.id,
            kind,
            coords,
            report.outcome
        );
        Ok(report)
    }

    pub fn pause(&mut self) -> Result<()> {
        self.pause_at(Utc::now())
    }

    pub fn pause_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        match self.status {
            GameStatus::Playing => {
                self.record_activity(now);
                self.status = GameStatus::Paused;
                log::debug!("Game {} paused after {}s", self.id, self.elapsed_seconds());
                Ok(())
            }
            GameStatus::Paused => Ok(()),
            GameStatus::Lost | GameStatus::Won => Err(GameError::GameAlreadyEnded),
        }
    }

    pub fn resume(&mut self) -> Result<()> {
        self.resume_at(Utc::now())
    }

    pub fn resume_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        match self.status {
            GameStatus::Paused => {
                self.last_action = now;
                self.status = GameStatus::Playing;
                log::debug!("Game {} resumed", self.id);
                Ok(())
            }
            GameStatus::Playing => Ok(()),
            GameStatus::Lost | GameStatus::Won => Err(GameError::GameAlreadyEnded),
        }
    }

    fn reveal(&mut self, coords: Coord2, now: DateTime<Utc>) -> MoveReport {
        let revealed = reveal_from(&mut self.board, coords);
        self.record_activity(now);

        if revealed.is_empty() {
            MoveReport::new(MoveOutcome::NoChange, revealed)
        } else if self.board[coords].is_mine() {
            self.finish(GameStatus::Lost, now);
            MoveReport::new(MoveOutcome::HitMine, revealed)
        } else if self.board.is_solved() {
            self.finish(GameStatus::Won, now);
            MoveReport::new(MoveOutcome::Won, revealed)
        } else {
            MoveReport::new(MoveOutcome::Revealed, revealed)
        }
    }

    fn mark(&mut self, coords: Coord2, mark: Mark, now: DateTime<Utc>) -> Result<MoveReport> {
        let changed = self.board.cell_mut(coords).set_mark(mark)?;
        self.record_activity(now);

        // flagging re-checks the win condition even though marks never affect it
        if mark == Mark::Flagged && self.board.is_solved() {
            self.finish(GameStatus::Won, now);
            return Ok(MoveReport::new(MoveOutcome::Won, Vec::new()));
        }

        let outcome = if changed.has_update() {
            MoveOutcome::Marked
        } else {
            MoveOutcome::NoChange
        };
        Ok(MoveReport::new(outcome, Vec::new()))
    }

    fn check_playing(&self) -> Result<()> {
        match self.status {
            GameStatus::Playing => Ok(()),
            GameStatus::Paused => Err(GameError::GamePaused),
            GameStatus::Lost | GameStatus::Won => Err(GameError::GameAlreadyEnded),
        }
    }

    /// Folds the time since the last action into the play time.
    fn record_activity(&mut self, now: DateTime<Utc>) {
        self.elapsed_millis += millis_between(self.last_action, now);
        self.last_action = now;
    }

    fn finish(&mut self, status: GameStatus, now: DateTime<Utc>) {
        debug_assert!(status.is_finished());
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        self.finished_at = Some(now);
        log::debug!(
            "Game {} ended {:?} at {} after {}s",
            self.id,
            status,
            now,
            self.elapsed_seconds()
        );
    }
}

fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_milliseconds().max(0) as u64
}
