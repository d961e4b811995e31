use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// The board: every cell plus the grid that relates them.
///
/// A field starts with all cells [`CellKind::Unknown`]. Mines are placed exactly once, either
/// at random with [`MineField::place_mines`] or from a layout with [`MineField::with_mines`],
/// after which cell kinds never change and only the uncovered/flagged state moves.
#[derive(Clone, Debug, PartialEq)]
pub struct MineField {
    grid: Grid,
    cells: Array2<Cell>,
    mine_count: CellCount,
    placed: bool,
}

impl MineField {
    /// Empty field awaiting mine placement.
    pub fn new(rows: Coord, columns: Coord) -> Self {
        let grid = Grid::new(rows, columns);
        Self {
            cells: Array2::default((usize::from(rows), usize::from(columns))),
            grid,
            mine_count: 0,
            placed: false,
        }
    }

    /// Field with mines at exactly the given positions, duplicates count once.
    pub fn with_mines(rows: Coord, columns: Coord, mines: &[Position]) -> Result<Self> {
        let mut field = Self::new(rows, columns);
        for &pos in mines {
            let pos = field.grid.validate(pos)?;
            field.plant_mine(pos);
        }

        if field.mine_count == 0 {
            return Err(ConfigError::MineCountOutOfRange {
                mines: 0,
                max: field.grid.len(),
            }
            .into());
        }

        field.finalize();
        Ok(field)
    }

    /// Places `count` mines uniformly at random by rejection sampling.
    pub fn place_mines<R: Rng>(&mut self, count: CellCount, rng: &mut R) -> Result<()> {
        if self.placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let max = self.grid.len();
        if count == 0 || count > max {
            return Err(ConfigError::MineCountOutOfRange { mines: count, max }.into());
        }

        let (rows, columns) = self.size();
        let mut draws = 0u32;
        while self.mine_count < count {
            let pos = Position::new(rng.random_range(0..rows), rng.random_range(0..columns));
            draws += 1;
            self.plant_mine(pos);
        }
        log::debug!(
            "Placed {} mines on {}x{} board in {} draws",
            count,
            rows,
            columns,
            draws
        );

        self.finalize();
        Ok(())
    }

    /// Turns `pos` into a mine and bumps the counts of its non-mine neighbors.
    fn plant_mine(&mut self, pos: Position) -> bool {
        if !self.cells[pos.to_nd_index()].set_mine() {
            return false;
        }
        self.mine_count += 1;

        for &neighbor in self.grid.neighbors(pos) {
            self.cells[neighbor.to_nd_index()].add_adjacent_mine();
        }
        true
    }

    fn finalize(&mut self) {
        self.cells.iter_mut().for_each(Cell::finalize);
        self.placed = true;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// `(rows, columns)`
    pub const fn size(&self) -> (Coord, Coord) {
        (self.grid.rows(), self.grid.columns())
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn total_cells(&self) -> CellCount {
        self.grid.len()
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.grid.len() - self.mine_count
    }

    pub const fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn cell(&self, pos: Position) -> Result<Cell> {
        let pos = self.grid.validate(pos)?;
        Ok(self.cells[pos.to_nd_index()])
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn neighbors(&self, pos: Position) -> Result<&[Position]> {
        let pos = self.grid.validate(pos)?;
        Ok(self.grid.neighbors(pos))
    }

    /// Uncovers `pos`, cascading through blank cells.
    ///
    /// Covered, unflagged cells are the only ones that change; anything else is a
    /// [`RevealOutcome::NoChange`]. A mine uncovers just itself.
    pub fn reveal(&mut self, pos: Position) -> Result<RevealOutcome> {
        let pos = self.grid.validate(pos)?;
        self.check_placed()?;

        let cell = self.cells[pos.to_nd_index()];
        if !cell.is_revealable() {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine() {
            self.cells[pos.to_nd_index()].uncovered = true;
            log::debug!("Mine uncovered at {}", pos);
            return Ok(RevealOutcome::HitMine);
        }

        Ok(RevealOutcome::Revealed(self.flood_uncover(pos)))
    }

    /// Iterative flood fill from a safe cell, the `uncovered` flag doubles as the visited set.
    fn flood_uncover(&mut self, start: Position) -> CellCount {
        self.cells[start.to_nd_index()].uncovered = true;
        let mut revealed: CellCount = 1;

        let mut to_expand = Vec::new();
        if self.cells[start.to_nd_index()].kind == CellKind::Number(0) {
            to_expand.push(start);
        }

        while let Some(pos) = to_expand.pop() {
            for &neighbor in self.grid.neighbors(pos) {
                let cell = &mut self.cells[neighbor.to_nd_index()];
                if !cell.is_revealable() {
                    continue;
                }
                debug_assert!(!cell.is_mine(), "blank cell {pos} borders mine {neighbor}");

                cell.uncovered = true;
                revealed += 1;
                log::trace!("Flood uncovered {}, kind: {:?}", neighbor, cell.kind);

                if cell.kind == CellKind::Number(0) {
                    to_expand.push(neighbor);
                }
            }
        }

        log::debug!("Uncovered {} cells starting from {}", revealed, start);
        revealed
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        let pos = self.grid.validate(pos)?;
        self.check_placed()?;

        let cell = &mut self.cells[pos.to_nd_index()];
        if cell.uncovered {
            return Ok(FlagOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        Ok(if cell.flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        })
    }

    /// Marks every mine uncovered without any cascade, returning how many changed.
    pub fn uncover_mines(&mut self) -> CellCount {
        let mut changed = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            if !cell.uncovered {
                cell.uncovered = true;
                changed += 1;
            }
        }
        changed
    }

    /// Flags every covered mine that is not flagged yet, returning how many changed.
    pub fn flag_mines(&mut self) -> CellCount {
        let mut changed = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            if !cell.uncovered && !cell.flagged {
                cell.flagged = true;
                changed += 1;
            }
        }
        changed
    }

    fn check_placed(&self) -> Result<()> {
        if self.placed {
            Ok(())
        } else {
            Err(GameError::MinesNotPlaced)
        }
    }
}

impl Index<Position> for MineField {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn pos(row: Coord, column: Coord) -> Position {
        Position::new(row, column)
    }

    fn field(size: (Coord, Coord), mines: &[(Coord, Coord)]) -> MineField {
        let mines: Vec<_> = mines.iter().copied().map(Position::from).collect();
        MineField::with_mines(size.0, size.1, &mines).unwrap()
    }

    fn uncovered_count(field: &MineField) -> usize {
        field.cells().iter().filter(|cell| cell.is_uncovered()).count()
    }

    #[test]
    fn counts_match_adjacent_mines() {
        let field = field((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(field[pos(0, 0)].kind(), CellKind::Mine);
        assert_eq!(field[pos(0, 1)].kind(), CellKind::Number(1));
        assert_eq!(field[pos(1, 1)].kind(), CellKind::Number(2));
        assert_eq!(field[pos(0, 2)].kind(), CellKind::Number(0));
        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.safe_cell_count(), 7);
    }

    #[test]
    fn duplicate_layout_positions_count_once() {
        let field = field((2, 2), &[(0, 0), (0, 0)]);

        assert_eq!(field.mine_count(), 1);
        assert_eq!(field[pos(1, 1)].kind(), CellKind::Number(1));
    }

    #[test]
    fn layout_rejects_out_of_bounds_and_empty_layouts() {
        assert_eq!(
            MineField::with_mines(2, 2, &[pos(2, 0)]),
            Err(GameError::OutOfBounds(pos(2, 0)))
        );
        assert_eq!(
            MineField::with_mines(2, 2, &[]),
            Err(ConfigError::MineCountOutOfRange { mines: 0, max: 4 }.into())
        );
    }

    #[test]
    fn place_mines_places_exact_count() {
        let mut field = MineField::new(9, 9);
        let mut rng = StdRng::seed_from_u64(42);

        field.place_mines(10, &mut rng).unwrap();

        assert!(field.is_placed());
        assert_eq!(field.mine_count(), 10);
        assert_eq!(field.cells().iter().filter(|cell| cell.is_mine()).count(), 10);
        assert!(field.cells().iter().all(|cell| cell.kind() != CellKind::Unknown));
    }

    #[test]
    fn place_mines_can_fill_the_whole_board() {
        let mut field = MineField::new(3, 3);
        let mut rng = StdRng::seed_from_u64(7);

        field.place_mines(9, &mut rng).unwrap();

        assert!(field.cells().iter().all(|cell| cell.is_mine()));
        assert_eq!(field.safe_cell_count(), 0);
    }

    #[test]
    fn place_mines_validates_count_and_runs_once() {
        let mut field = MineField::new(2, 2);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            field.place_mines(0, &mut rng),
            Err(ConfigError::MineCountOutOfRange { mines: 0, max: 4 }.into())
        );
        assert_eq!(
            field.place_mines(5, &mut rng),
            Err(ConfigError::MineCountOutOfRange { mines: 5, max: 4 }.into())
        );
        assert!(!field.is_placed());

        field.place_mines(1, &mut rng).unwrap();
        assert_eq!(field.place_mines(1, &mut rng), Err(GameError::MinesAlreadyPlaced));
        assert_eq!(field.mine_count(), 1);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let mut a = MineField::new(16, 16);
        let mut b = MineField::new(16, 16);

        a.place_mines(40, &mut StdRng::seed_from_u64(99)).unwrap();
        b.place_mines(40, &mut StdRng::seed_from_u64(99)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn operations_require_placed_mines() {
        let mut field = MineField::new(2, 2);

        assert_eq!(field.reveal(pos(0, 0)), Err(GameError::MinesNotPlaced));
        assert_eq!(field.toggle_flag(pos(0, 0)), Err(GameError::MinesNotPlaced));
    }

    #[test]
    fn reveal_number_does_not_cascade() {
        let mut field = field((3, 3), &[(0, 0)]);

        assert_eq!(field.reveal(pos(1, 1)), Ok(RevealOutcome::Revealed(1)));
        assert_eq!(uncovered_count(&field), 1);
    }

    #[test]
    fn reveal_blank_opens_region_and_frontier() {
        // column 2 is a wall of mines, columns 0..2 are safe
        let mut field = field((3, 4), &[(0, 2), (1, 2), (2, 2)]);

        let outcome = field.reveal(pos(1, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed(6));
        for row in 0..3 {
            assert!(field[pos(row, 0)].is_uncovered());
            assert!(field[pos(row, 1)].is_uncovered());
            assert!(!field[pos(row, 2)].is_uncovered());
            assert!(!field[pos(row, 3)].is_uncovered());
        }
    }

    #[test]
    fn reveal_skips_flagged_cells_in_cascade() {
        let mut field = field((1, 5), &[(0, 4)]);

        field.toggle_flag(pos(0, 1)).unwrap();
        let outcome = field.reveal(pos(0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed(1));
        assert!(!field[pos(0, 1)].is_uncovered());
        assert!(!field[pos(0, 2)].is_uncovered());
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut field = field((2, 2), &[(0, 0)]);

        assert_eq!(field.reveal(pos(1, 1)), Ok(RevealOutcome::Revealed(1)));
        assert_eq!(field.reveal(pos(1, 1)), Ok(RevealOutcome::NoChange));
    }

    #[test]
    fn reveal_mine_uncovers_only_that_cell() {
        let mut field = field((2, 2), &[(0, 0), (1, 1)]);

        assert_eq!(field.reveal(pos(0, 0)), Ok(RevealOutcome::HitMine));
        assert!(field[pos(0, 0)].is_uncovered());
        assert_eq!(uncovered_count(&field), 1);
    }

    #[test]
    fn reveal_rejects_out_of_bounds() {
        let mut field = field((2, 2), &[(0, 0)]);

        assert_eq!(field.reveal(pos(0, 2)), Err(GameError::OutOfBounds(pos(0, 2))));
        assert_eq!(field.toggle_flag(pos(9, 9)), Err(GameError::OutOfBounds(pos(9, 9))));
        assert_eq!(field.cell(pos(2, 2)), Err(GameError::OutOfBounds(pos(2, 2))));
    }

    #[test]
    fn flag_blocks_reveal_until_removed() {
        let mut field = field((2, 2), &[(0, 0)]);

        assert_eq!(field.toggle_flag(pos(1, 1)), Ok(FlagOutcome::Flagged));
        assert_eq!(field.reveal(pos(1, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(field.toggle_flag(pos(1, 1)), Ok(FlagOutcome::Unflagged));
        assert_eq!(field.reveal(pos(1, 1)), Ok(RevealOutcome::Revealed(1)));
        assert_eq!(field.toggle_flag(pos(1, 1)), Ok(FlagOutcome::NoChange));
    }

    #[test]
    fn uncover_and_flag_mines_touch_only_covered_mines() {
        let mut field = field((2, 3), &[(0, 0), (1, 2)]);

        field.toggle_flag(pos(0, 0)).unwrap();
        assert_eq!(field.flag_mines(), 1);
        assert!(field[pos(1, 2)].is_flagged());

        assert_eq!(field.uncover_mines(), 2);
        assert_eq!(field.uncover_mines(), 0);
        assert_eq!(
            field.cells().iter().filter(|cell| cell.is_uncovered()).count(),
            2
        );
        assert!(!field[pos(0, 1)].is_uncovered());
    }

    #[test]
    fn large_blank_board_reveals_without_recursion() {
        let mut field = field((99, 99), &[(98, 98)]);

        let outcome = field.reveal(pos(0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed(99 * 99 - 1));
        assert_eq!(field.reveal(pos(50, 50)), Ok(RevealOutcome::NoChange));
    }
}
