use serde::{Deserialize, Serialize};

use crate::*;

/// Largest accepted row or column count.
pub const MAX_DIMENSION: Coord = 99;

/// Named board presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 10x10 with 10 mines
    Easy,
    /// 20x20 with 40 mines
    #[default]
    Normal,
    /// 20x20 with 100 mines
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(10, 10, 10),
            Self::Normal => GameConfig::new_unchecked(20, 20, 40),
            Self::Hard => GameConfig::new_unchecked(20, 20, 100),
        }
    }
}
