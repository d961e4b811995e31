use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

/// Uniform placement with no first-move guarantees, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut field = MineField::new(config.rows, config.columns);
        field.place_mines(config.mines, &mut rng)?;
        Ok(field)
    }
}
