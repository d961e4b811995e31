use serde::{Deserialize, Serialize};

/// What a cell holds, fixed once mine placement completes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Not classified yet; only seen while mines are being placed.
    #[default]
    Unknown,
    Mine,
    /// Safe cell with the number of adjacent mines (`0..=8`).
    Number(u8),
}

impl CellKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, `0` for mines and unclassified cells.
    pub const fn count(self) -> u8 {
        match self {
            Self::Number(count) => count,
            Self::Unknown | Self::Mine => 0,
        }
    }
}

/// Per-position state owned by the [`MineField`](crate::MineField).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) kind: CellKind,
    pub(crate) uncovered: bool,
    pub(crate) flagged: bool,
}

impl Cell {
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn is_uncovered(&self) -> bool {
        self.uncovered
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_mine(&self) -> bool {
        self.kind.is_mine()
    }

    /// Whether a primary activation can change this cell.
    pub const fn is_revealable(&self) -> bool {
        !self.uncovered && !self.flagged
    }

    /// Counts one more adjacent mine; mines are left untouched.
    pub(crate) fn add_adjacent_mine(&mut self) {
        self.kind = match self.kind {
            CellKind::Unknown => CellKind::Number(1),
            CellKind::Number(count) => CellKind::Number(count + 1),
            CellKind::Mine => CellKind::Mine,
        };
    }

    /// Turns the cell into a mine, returning `false` if it already was one.
    pub(crate) fn set_mine(&mut self) -> bool {
        if self.kind.is_mine() {
            false
        } else {
            self.kind = CellKind::Mine;
            true
        }
    }

    pub(crate) fn finalize(&mut self) {
        if matches!(self.kind, CellKind::Unknown) {
            self.kind = CellKind::Number(0);
        }
    }
}

/// Read-only view of one cell for the rendering layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub uncovered: bool,
    pub flagged: bool,
    pub kind: CellKind,
    pub count: u8,
}

impl From<Cell> for CellSnapshot {
    fn from(cell: Cell) -> Self {
        Self {
            uncovered: cell.uncovered,
            flagged: cell.flagged,
            kind: cell.kind,
            count: cell.kind.count(),
        }
    }
}
