use alloc::vec::Vec;

use super::*;

/// Places mines at predetermined positions.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Position>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: impl IntoIterator<Item = Position>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField> {
        config.validate()?;

        let field = MineField::with_mines(config.rows, config.columns, &self.mines)?;
        if field.mine_count() != config.mines {
            log::warn!(
                "Fixed layout has {} mines but config requested {}",
                field.mine_count(),
                config.mines
            );
            return Err(ConfigError::MineCountOutOfRange {
                mines: field.mine_count(),
                max: config.mines,
            }
            .into());
        }
        Ok(field)
    }
}
