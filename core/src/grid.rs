use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Neighbor list of a single position, never more than eight entries.
pub type Neighbors = SmallVec<[Position; 8]>;

/// Board dimensions together with the precomputed neighbor lists of every position.
///
/// Adjacency is built once at construction and never changes, cells refer to each other only
/// through these lists.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: Coord,
    columns: Coord,
    adjacency: Array2<Neighbors>,
}

impl Grid {
    pub fn new(rows: Coord, columns: Coord) -> Self {
        let shape = (usize::from(rows), usize::from(columns));
        let adjacency = Array2::from_shape_fn(shape, |(row, column)| {
            // both indices come from a shape bounded by `Coord`
            adjacent(Position::new(row as Coord, column as Coord), rows, columns)
        });
        Self {
            rows,
            columns,
            adjacency,
        }
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn columns(&self) -> Coord {
        self.columns
    }

    pub const fn len(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    pub fn validate(&self, pos: Position) -> Result<Position> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds(pos))
        }
    }

    /// In-bounds compass neighbors of `pos`, which must lie on the grid.
    pub fn neighbors(&self, pos: Position) -> &[Position] {
        &self.adjacency[pos.to_nd_index()]
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| Position::new(row, column)))
    }
}

/// Every position of the clipped 3x3 block around `center`, except `center` itself.
fn adjacent(center: Position, rows: Coord, columns: Coord) -> Neighbors {
    let last_row = center.row.saturating_add(1).min(rows - 1);
    let last_column = center.column.saturating_add(1).min(columns - 1);

    (center.row.saturating_sub(1)..=last_row)
        .flat_map(|row| {
            (center.column.saturating_sub(1)..=last_column)
                .map(move |column| Position::new(row, column))
        })
        .filter(|&pos| pos != center)
        .collect()
}
