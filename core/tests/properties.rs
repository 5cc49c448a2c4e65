use std::collections::HashSet;

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use sweeper_core::*;

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// `(rows, columns, mines, seed)` with at least one safe cell.
fn geometry() -> impl Strategy<Value = (Coord, Coord, CellCount, u64)> {
    (1..=30u8, 1..=30u8, any::<u64>()).prop_flat_map(|(rows, columns, seed)| {
        let total = mult(rows, columns);
        (Just(rows), Just(columns), 0..total, Just(seed))
    })
}

fn new_game(rows: Coord, columns: Coord, mines: CellCount, seed: u64) -> Game {
    let config = GameConfig::new(rows, columns, mines).unwrap();
    let board = RandomBoardGenerator::default().generate(config, seed).unwrap();
    Game::new(GameId(seed), "prop", "prop", board, t0())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_board_has_exact_mines_and_unique_cells((rows, columns, mines, seed) in geometry()) {
        let config = GameConfig::new(rows, columns, mines).unwrap();
        let board = RandomBoardGenerator::default().generate(config, seed).unwrap();

        let coords: HashSet<Coord2> = board.cells().map(|(coords, _)| coords).collect();
        prop_assert_eq!(coords.len(), usize::from(config.total_cells()));
        prop_assert_eq!(board.cells().count(), usize::from(config.total_cells()));
        prop_assert_eq!(
            board.cells().filter(|(_, cell)| cell.is_mine()).count(),
            usize::from(mines)
        );
        prop_assert_eq!(board.mine_count(), mines);
    }

    #[test]
    fn neighbor_counts_match_position(rows in 3..=30u8, columns in 3..=30u8) {
        for row in 0..rows {
            for column in 0..columns {
                let on_row_edge = row == 0 || row == rows - 1;
                let on_column_edge = column == 0 || column == columns - 1;
                let expected = match (on_row_edge, on_column_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                prop_assert_eq!(neighbors((rows, columns), (row, column)).count(), expected);
            }
        }
    }

    #[test]
    fn reveal_is_idempotent((rows, columns, mines, seed) in geometry(), pick in any::<prop::sample::Index>()) {
        let config = GameConfig::new(rows, columns, mines).unwrap();
        let mut once = RandomBoardGenerator::default().generate(config, seed).unwrap();
        let mut twice = once.clone();
        let start = pick.get(&once.cells().map(|(coords, _)| coords).collect::<Vec<_>>()).to_owned();

        reveal_from(&mut once, start);
        reveal_from(&mut twice, start);
        let second = reveal_from(&mut twice, start);

        prop_assert!(second.is_empty());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn safe_reveals_never_expose_mines(
        (rows, columns, mines, seed) in geometry(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..20),
    ) {
        let mut game = new_game(rows, columns, mines, seed);
        let safe: Vec<Coord2> = game
            .board()
            .cells()
            .filter(|(_, cell)| !cell.is_mine())
            .map(|(coords, _)| coords)
            .collect();

        for pick in picks {
            if game.is_finished() {
                break;
            }
            let (row, column) = *pick.get(&safe);
            game.make_move_at(row, column, MoveKind::Reveal, t0()).unwrap();
        }

        prop_assert!(game.board().cells().all(|(_, cell)| !(cell.is_visible() && cell.is_mine())));
        prop_assert_ne!(game.status(), GameStatus::Lost);
        prop_assert_eq!(
            game.status() == GameStatus::Won,
            game.board().cells().all(|(_, cell)| cell.is_visible() || cell.is_mine())
        );
    }

    #[test]
    fn revealing_every_safe_cell_wins((rows, columns, mines, seed) in geometry()) {
        let mut game = new_game(rows, columns, mines, seed);
        let safe: Vec<Coord2> = game
            .board()
            .cells()
            .filter(|(_, cell)| !cell.is_mine())
            .map(|(coords, _)| coords)
            .collect();

        for (row, column) in safe {
            if game.is_finished() {
                break;
            }
            game.make_move_at(row, column, MoveKind::Reveal, t0()).unwrap();
        }

        prop_assert_eq!(game.status(), GameStatus::Won);
        prop_assert_eq!(game.board().visible_count(), game.board().safe_cell_count());
    }

    #[test]
    fn revealing_a_mine_loses_and_changes_nothing_else(
        (rows, columns, mines, seed) in geometry(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(mines > 0);
        let mut game = new_game(rows, columns, mines, seed);
        let before = game.board().clone();
        let mine_cells: Vec<Coord2> = before
            .cells()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
            .collect();
        let target = *pick.get(&mine_cells);

        let report = game.make_move_at(target.0, target.1, MoveKind::Reveal, t0()).unwrap();

        prop_assert_eq!(report.outcome, MoveOutcome::HitMine);
        prop_assert_eq!(game.status(), GameStatus::Lost);
        for (coords, cell) in before.cells() {
            if coords == target {
                prop_assert!(game.board()[coords].is_visible());
            } else {
                prop_assert_eq!(game.board()[coords], cell);
            }
        }
    }

    #[test]
    fn rejected_moves_leave_game_unchanged(
        (rows, columns, mines, seed) in geometry(),
        row in any::<u8>(),
        column in any::<u8>(),
        pause in any::<bool>(),
    ) {
        let mut game = new_game(rows, columns, mines, seed);
        if pause {
            game.pause_at(t0()).unwrap();
        } else {
            let (first_safe, _) = game.board().cells().find(|(_, cell)| !cell.is_mine()).unwrap();
            let first_mine = game.board().cells().find(|(_, cell)| cell.is_mine()).map(|(coords, _)| coords);
            let target = first_mine.unwrap_or(first_safe);
            game.make_move_at(target.0, target.1, MoveKind::Reveal, t0()).unwrap();
            prop_assert!(game.is_finished());
        }
        let before = game.clone();

        for kind in [MoveKind::Reveal, MoveKind::Flag, MoveKind::Question, MoveKind::Clear] {
            prop_assert!(game.make_move_at(row, column, kind, t0()).is_err());
        }
        prop_assert_eq!(game, before);
    }
}
