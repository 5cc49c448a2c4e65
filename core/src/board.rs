use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The full cell grid of one game, created together with its mines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let cells = mine_mask.map(|&is_mine| Cell::new(is_mine));
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self { cells, mine_count }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoordinate);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        self.validate_coords(coords)
            .map(|coords| self.cells[coords.to_nd_index()])
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Every cell with its coordinates, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, column), &cell)| ((row as Coord, column as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        neighbors(self.size(), coords)
    }

    /// Number of mines among the neighbors of `coords`, in `0..=8`.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    /// All safe cells have been revealed; marks are irrelevant.
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(Cell::is_settled)
    }

    pub fn visible_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_visible()).count() as CellCount
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn from_mine_coords_places_exact_mines() {
        let board = Board::from_mine_coords((3, 4), &[(0, 0), (2, 3), (2, 3)]).unwrap();

        assert_eq!(board.size(), (3, 4));
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 10);
        assert!(board[(0, 0)].is_mine());
        assert!(board[(2, 3)].is_mine());
        assert!(!board[(1, 1)].is_mine());
    }

    #[test]
    fn from_mine_coords_rejects_out_of_range() {
        assert_eq!(
            Board::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoordinate)
        );
    }

    #[test]
    fn cells_are_row_major_and_unique() {
        let board = Board::from_mine_coords((2, 3), &[]).unwrap();
        let coords: Vec<Coord2> = board.cells().map(|(coords, _)| coords).collect();
        assert_eq!(coords, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn adjacent_mines_counts_clipped_neighborhood() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (0, 1), (2, 2)]).unwrap();

        assert_eq!(board.adjacent_mines((1, 1)), 3);
        assert_eq!(board.adjacent_mines((0, 2)), 1);
        assert_eq!(board.adjacent_mines((2, 0)), 0);
        assert_eq!(board.adjacent_mines((1, 0)), 2);
    }

    #[test]
    fn solved_ignores_hidden_mines() {
        let mut board = Board::from_mine_coords((1, 2), &[(0, 0)]).unwrap();
        assert!(!board.is_solved());

        board.cell_mut((0, 1)).reveal();
        assert!(board.is_solved());
    }

    #[test]
    fn cell_lookup_validates_coords() {
        let board = Board::from_mine_coords((2, 2), &[]).unwrap();
        assert!(board.cell((1, 1)).is_ok());
        assert_eq!(board.cell((2, 0)), Err(GameError::InvalidCoordinate));
    }
}
