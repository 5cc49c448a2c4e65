use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::SeedableRng;

use super::*;

/// Uniform mine placement: `mines` distinct cells sampled without replacement
/// from the whole grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RandomBoardGenerator {
    policy: GeometryPolicy,
}

impl RandomBoardGenerator {
    pub fn new(policy: GeometryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &GeometryPolicy {
        &self.policy
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&self, config: GameConfig, seed: u64) -> Result<Board> {
        if let Err(err) = self.policy.check(&config) {
            log::warn!("Rejected board geometry {:?}: {}", config, err);
            return Err(err);
        }

        let total_cells = usize::from(config.total_cells());
        let columns = usize::from(config.columns());
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());

        let mut rng = SmallRng::seed_from_u64(seed);
        for place in index::sample(&mut rng, total_cells, usize::from(config.mines)) {
            mines[[place / columns, place % columns]] = true;
        }

        let board = Board::from_mine_mask(&mines);
        log::debug!(
            "Generated {}x{} board with {} mines from seed {}",
            config.rows(),
            config.columns(),
            board.mine_count(),
            seed
        );
        Ok(board)
    }
}
