#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use config::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod config;
mod error;
mod field;
mod generator;
mod grid;
mod session;
mod types;

/// Board parameters: dimensions and how many mines to place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    /// Validates rows and columns against `1..=MAX_DIMENSION` and mines against
    /// `1..=rows*columns`.
    pub fn new(
        rows: u16,
        columns: u16,
        mines: CellCount,
    ) -> core::result::Result<Self, ConfigError> {
        let max = u16::from(MAX_DIMENSION);
        let rows = match Coord::try_from(rows) {
            Ok(rows) if (1..=MAX_DIMENSION).contains(&rows) => rows,
            _ => return Err(ConfigError::RowsOutOfRange { rows, max }),
        };
        let columns = match Coord::try_from(columns) {
            Ok(columns) if (1..=MAX_DIMENSION).contains(&columns) => columns,
            _ => return Err(ConfigError::ColumnsOutOfRange { columns, max }),
        };
        let config = Self::new_unchecked(rows, columns, mines);
        config.validate()?;
        Ok(config)
    }

    /// Re-checks a config built with [`GameConfig::new_unchecked`] or deserialized.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        let max = u16::from(MAX_DIMENSION);
        if !(1..=MAX_DIMENSION).contains(&self.rows) {
            return Err(ConfigError::RowsOutOfRange {
                rows: self.rows.into(),
                max,
            });
        }
        if !(1..=MAX_DIMENSION).contains(&self.columns) {
            return Err(ConfigError::ColumnsOutOfRange {
                columns: self.columns.into(),
                max,
            });
        }
        let total = self.total_cells();
        if self.mines == 0 || self.mines > total {
            return Err(ConfigError::MineCountOutOfRange {
                mines: self.mines,
                max: total,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Change to apply to the remaining-flags counter.
    pub const fn flag_delta(self) -> i32 {
        match self {
            Self::NoChange => 0,
            Self::Flagged => -1,
            Self::Unflagged => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Safe cells newly uncovered, the whole cascade included.
    Revealed(CellCount),
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn revealed(self) -> CellCount {
        match self {
            Self::Revealed(count) => count,
            Self::NoChange | Self::HitMine => 0,
        }
    }
}
