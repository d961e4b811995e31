use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy producing a fully mine-populated field for a config.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField>;
}
