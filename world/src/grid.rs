//! Dense square storage addressed by cell coordinates.

use serde::Serialize;
use treasure_hunt_core::{CellCoord, Square};

use crate::{GridTooLarge, MAX_CELLS};

/// Row-major grid of squares sized once at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub(crate) struct SquareGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Square>,
}

impl SquareGrid {
    /// Creates a grid with every square set to [`Square::Empty`].
    ///
    /// Fails when the cell count exceeds [`MAX_CELLS`] or cannot be allocated.
    pub(crate) fn new(columns: u32, rows: u32) -> Result<Self, GridTooLarge> {
        let too_large = GridTooLarge { columns, rows };
        let cell_count = u64::from(columns) * u64::from(rows);
        if cell_count > MAX_CELLS {
            return Err(too_large);
        }
        let capacity = usize::try_from(cell_count).map_err(|_| too_large)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(capacity).map_err(|_| too_large)?;
        cells.resize(capacity, Square::Empty);
        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    pub(crate) fn get(&self, cell: CellCoord) -> Option<Square> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Overwrites the square at `cell`, returning `false` when it lies off the grid.
    pub(crate) fn set(&mut self, cell: CellCoord, square: Square) -> bool {
        let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) else {
            return false;
        };
        *slot = square;
        true
    }

    pub(crate) fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    /// Iterates squares in row-major order alongside their coordinates.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (CellCoord, Square)> + '_ {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(index, square)| {
            let index = u64::try_from(index).unwrap_or(u64::MAX);
            let columns = u64::from(columns.max(1));
            let column = u32::try_from(index % columns).unwrap_or(u32::MAX);
            let row = u32::try_from(index / columns).unwrap_or(u32::MAX);
            (CellCoord::new(column, row), *square)
        })
    }

    pub(crate) const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }
}
