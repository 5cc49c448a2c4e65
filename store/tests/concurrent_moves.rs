use std::thread;

use sweeper_core::{FixedBoardGenerator, GameConfig, GameStatus, MoveKind};
use sweeper_store::{GameService, MemoryStore};

#[test]
fn games_progress_independently_in_parallel() {
    // a single mine in the corner, everything else opens from the far corner
    let service = GameService::with_generator(
        MemoryStore::new(),
        FixedBoardGenerator::new(vec![(0, 0)]),
        Some(7),
    );
    let config = GameConfig::new(20, 20, 1).unwrap();
    let ids: Vec<_> = (0..8)
        .map(|i| {
            service
                .create_game("alice", &format!("game {i}"), config)
                .unwrap()
                .id()
        })
        .collect();

    thread::scope(|scope| {
        for &id in &ids {
            let service = &service;
            scope.spawn(move || {
                service
                    .make_move("alice", id, 19, 19, MoveKind::Reveal)
                    .unwrap();
            });
        }
    });

    for id in ids {
        let game = service.game(id).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.board().visible_count(), 399);
    }
}

#[test]
fn moves_on_one_game_are_serialized() {
    let service = GameService::with_generator(
        MemoryStore::new(),
        FixedBoardGenerator::new(vec![(0, 0), (0, 2), (2, 0), (2, 2)]),
        Some(7),
    );
    let game = service
        .create_game("alice", "shared", GameConfig::new(3, 5, 4).unwrap())
        .unwrap();
    let targets = [(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)];

    thread::scope(|scope| {
        for (row, column) in targets {
            let service = &service;
            let id = game.id();
            scope.spawn(move || {
                service
                    .make_move("alice", id, row, column, MoveKind::Reveal)
                    .unwrap();
            });
        }
    });

    let game = service.game(game.id()).unwrap();
    for coords in targets {
        assert!(game.board()[coords].is_visible(), "{coords:?} lost a write");
    }
    assert_eq!(game.status(), GameStatus::Playing);
}
