use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::*;

/// Reveals `start` and flood-fills outward from every revealed cell that has
/// no adjacent mines. Returns the newly visible coordinates in reveal order.
///
/// A mine at `start` is revealed and nothing else happens; the caller decides
/// what that means for the game. The cascade itself never reaches a mine,
/// since it only expands from cells whose neighbors are all safe. The
/// `visible` flag doubles as the visited set, so already visible cells are
/// never enqueued twice and the work-list is bounded by the board size.
pub fn reveal_from(board: &mut Board, start: Coord2) -> Vec<Coord2> {
    let mut revealed = Vec::new();

    if !board.cell_mut(start).reveal() {
        return revealed;
    }
    revealed.push(start);

    if board[start].is_mine() {
        return revealed;
    }

    let mut to_visit = VecDeque::from([start]);
    while let Some(coords) = to_visit.pop_front() {
        let count = board.adjacent_mines(coords);
        if count != 0 {
            continue;
        }

        for neighbor in board.iter_neighbors(coords) {
            let cell = board.cell_mut(neighbor);
            if cell.is_visible() {
                continue;
            }
            debug_assert!(!cell.is_mine(), "flood fill reached a mine at {neighbor:?}");
            cell.reveal();
            revealed.push(neighbor);
            to_visit.push_back(neighbor);
            log::trace!("Flood revealed cell at {:?}", neighbor);
        }
    }

    log::debug!(
        "Revealed {} cells starting from {:?}",
        revealed.len(),
        start
    );
    revealed
}
