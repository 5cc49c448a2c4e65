use alloc::vec::Vec;

use super::*;

/// Places mines at known coordinates regardless of the seed. Used to build
/// deterministic boards, e.g. when replaying a stored layout or in tests.
/// The layout must hold exactly `config.mines` distinct cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedBoardGenerator {
    mines: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&self, config: GameConfig, _seed: u64) -> Result<Board> {
        if config.rows() == 0 || config.columns() == 0 {
            return Err(GameError::InvalidGeometry("rows and columns must be positive"));
        }

        let board = Board::from_mine_coords(config.size, &self.mines)?;
        if board.mine_count() != config.mines {
            log::warn!(
                "Fixed layout has {} distinct mines, config asks for {}",
                board.mine_count(),
                config.mines
            );
            return Err(GameError::InvalidGeometry(
                "mine layout does not match the mine count",
            ));
        }
        if board.safe_cell_count() == 0 {
            return Err(GameError::InvalidGeometry(
                "mines must leave at least one safe cell",
            ));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_given_mines() {
        let generator = FixedBoardGenerator::new([(0, 0), (1, 1)]);
        let board = generator
            .generate(GameConfig::new_unchecked((3, 3), 2), 99)
            .unwrap();

        assert_eq!(board.mine_count(), 2);
        assert!(board[(1, 1)].is_mine());
    }

    #[test]
    fn rejects_full_board() {
        let generator = FixedBoardGenerator::new([(0, 0)]);
        assert!(matches!(
            generator.generate(GameConfig::new_unchecked((1, 1), 1), 0),
            Err(GameError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn rejects_layout_with_wrong_mine_count() {
        let generator = FixedBoardGenerator::new([(0, 0)]);
        assert_eq!(
            generator.generate(GameConfig::new(3, 3, 5).unwrap(), 0),
            Err(GameError::InvalidGeometry("mine layout does not match the mine count"))
        );
    }

    #[test]
    fn duplicate_coordinates_do_not_count_twice() {
        let generator = FixedBoardGenerator::new([(1, 2), (1, 2)]);
        assert!(matches!(
            generator.generate(GameConfig::new(3, 3, 2).unwrap(), 0),
            Err(GameError::InvalidGeometry(_))
        ));
    }
}
