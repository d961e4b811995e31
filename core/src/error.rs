use thiserror::Error;

use crate::{CellCount, Position};

/// Rejected board parameters; no game is created.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Rows count must be between 1 and {max}, got {rows}")]
    RowsOutOfRange { rows: u16, max: u16 },
    #[error("Columns count must be between 1 and {max}, got {columns}")]
    ColumnsOutOfRange { columns: u16, max: u16 },
    #[error("Mine count must be between 1 and {max}, got {mines}")]
    MineCountOutOfRange { mines: CellCount, max: CellCount },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("Mines have not been placed yet")]
    MinesNotPlaced,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Board already has uncovered or flagged cells")]
    FieldAlreadyPlayed,
}

pub type Result<T> = core::result::Result<T, GameError>;
