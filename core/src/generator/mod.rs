use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces a fully materialized board for a geometry. Implementations must be
/// a pure function of `(config, seed)`.
pub trait BoardGenerator {
    fn generate(&self, config: GameConfig, seed: u64) -> Result<Board>;
}
