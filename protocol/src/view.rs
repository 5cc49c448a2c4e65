use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sweeper_core::{
    Board, CellCount, Coord, Coord2, Game, GameId, GameStatus, Mark, MoveOutcome, MoveReport,
};

/// Serialized form of a game as clients see it. The board never exposes
/// hidden mines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub id: GameId,
    pub name: String,
    pub user: String,
    pub create_date: DateTime<Utc>,
    pub finish_date: Option<DateTime<Utc>>,
    pub last_action: DateTime<Utc>,
    pub elapsed_time: u64,
    pub status: GameStatus,
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
    pub remaining_mines: i32,
    pub board: Vec<String>,
}

impl GameView {
    pub fn new(game: &Game, now: DateTime<Utc>) -> Self {
        let config = game.config();
        Self {
            id: game.id(),
            name: game.name().to_owned(),
            user: game.owner().to_owned(),
            create_date: game.created_at(),
            finish_date: game.finished_at(),
            last_action: game.last_action(),
            elapsed_time: game.played_time_at(now),
            status: game.status(),
            rows: config.rows(),
            columns: config.columns(),
            mines: config.mines,
            remaining_mines: game.remaining_mines(),
            board: render_board(game.board()),
        }
    }
}

impl fmt::Display for GameView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game {}: {}", self.id, self.name)?;
        writeln!(f, "Mines: {}/{}", self.remaining_mines, self.mines)?;
        writeln!(f, "Status: {:?}", self.status)?;
        writeln!(f, "Time played (in seconds): {}", self.elapsed_time)?;
        for line in &self.board {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Answer to a move: the game after the move plus what the move did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub game: GameView,
    pub outcome: MoveOutcome,
    pub revealed: Vec<Coord2>,
}

impl MoveResponse {
    pub fn new(game: &Game, report: MoveReport, now: DateTime<Utc>) -> Self {
        Self {
            game: GameView::new(game, now),
            outcome: report.outcome,
            revealed: report.revealed,
        }
    }
}

/// Player-visible glyph of a cell: `#` hidden, `F` flagged, `?` questioned,
/// `.` revealed with no adjacent mines, a digit otherwise, `*` a revealed mine.
pub fn cell_glyph(board: &Board, coords: Coord2) -> char {
    let cell = board[coords];
    if cell.is_visible() {
        if cell.is_mine() {
            return '*';
        }
        return match board.adjacent_mines(coords) {
            0 => '.',
            count => char::from(b'0' + count),
        };
    }

    match cell.mark() {
        Mark::None => '#',
        Mark::Flagged => 'F',
        Mark::Questioned => '?',
    }
}

/// One string per row.
pub fn render_board(board: &Board) -> Vec<String> {
    let (rows, columns) = board.size();
    (0..rows)
        .map(|row| (0..columns).map(|column| cell_glyph(board, (row, column))).collect())
        .collect()
}
