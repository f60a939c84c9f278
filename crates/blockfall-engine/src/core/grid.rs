/// Number of columns in the playfield.
pub const GRID_WIDTH: usize = 10;
/// Number of rows in the playfield.
pub const GRID_HEIGHT: usize = 20;

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A single cell of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing has locked here.
    #[default]
    Empty,
    /// A locked block of the given color.
    Filled(Rgb),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<Rgb> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// A single row of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRow {
    cells: [Cell; GRID_WIDTH],
}

impl GridRow {
    pub const EMPTY: Self = Self {
        cells: [Cell::Empty; GRID_WIDTH],
    };

    #[must_use]
    pub fn cells(&self) -> &[Cell; GRID_WIDTH] {
        &self.cells
    }

    /// A row is full when every column holds a block.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }
}

/// The fixed 10×20 playfield.
///
/// Row 0 is the top of the field and column 0 is the left edge. The grid never
/// changes size: locking pieces fills cells and clearing rows shifts the
/// remaining rows down, refilling the top with empty rows.
///
/// Bounds checking is the caller's job. [`Grid::is_valid`] is the predicate
/// that keeps every accepted piece position inside the field.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Rgb};
///
/// let mut grid = Grid::EMPTY;
/// grid.occupy(19, 0, Rgb(255, 0, 0));
/// assert!(grid.is_occupied(19, 0));
/// assert_eq!(grid.clear_full_rows(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const WIDTH: usize = GRID_WIDTH;
    pub const HEIGHT: usize = GRID_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [GridRow::EMPTY; GRID_HEIGHT],
    };

    /// Returns an iterator over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &GridRow> {
        self.rows.iter()
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row].cells[col]
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        !self.rows[row].cells[col].is_empty()
    }

    pub fn occupy(&mut self, row: usize, col: usize, color: Rgb) {
        self.rows[row].cells[col] = Cell::Filled(color);
    }

    /// Returns the number of occupied cells in the whole grid.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|c| !c.is_empty())
            .count()
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are compacted from the bottom up: each row is examined exactly
    /// once, before anything is written over it, so several simultaneous
    /// clears are all judged against the grid as it was before the call.
    /// Surviving rows keep their relative order and the top is refilled with
    /// as many empty rows as were removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..GRID_HEIGHT).rev() {
            if self.rows[y].is_full() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(GridRow::EMPTY);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(255, 0, 0);
    const BLUE: Rgb = Rgb(0, 0, 255);

    fn fill_row(grid: &mut Grid, row: usize) {
        for col in 0..GRID_WIDTH {
            grid.occupy(row, col, RED);
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::EMPTY;
        assert_eq!(grid.rows().count(), GRID_HEIGHT);
        for row in grid.rows() {
            assert!(row.is_empty());
            assert!(!row.is_full());
        }
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_occupy_and_query() {
        let mut grid = Grid::EMPTY;
        assert!(!grid.is_occupied(5, 3));

        grid.occupy(5, 3, BLUE);
        assert!(grid.is_occupied(5, 3));
        assert_eq!(grid.cell(5, 3), Cell::Filled(BLUE));
        assert_eq!(grid.cell(5, 3).color(), Some(BLUE));
        assert!(!grid.is_occupied(3, 5));
    }

    #[test]
    fn test_clear_full_rows_none() {
        let mut grid = Grid::EMPTY;
        for col in 0..GRID_WIDTH - 1 {
            grid.occupy(19, col, RED);
        }
        let before = grid.clone();

        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_full_rows_single_bottom() {
        let mut grid = Grid::EMPTY;
        fill_row(&mut grid, 19);
        grid.occupy(18, 4, BLUE);

        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid.rows().count(), GRID_HEIGHT);
        assert!(grid.rows[0].is_empty());
        // The block above the cleared row falls by one.
        assert_eq!(grid.cell(19, 4), Cell::Filled(BLUE));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_clear_full_rows_adjacent() {
        let mut grid = Grid::EMPTY;
        fill_row(&mut grid, 18);
        fill_row(&mut grid, 19);

        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_clear_full_rows_non_adjacent_preserves_order() {
        let mut grid = Grid::EMPTY;
        // Markers in distinct columns identify each surviving row.
        grid.occupy(14, 0, BLUE);
        fill_row(&mut grid, 15);
        grid.occupy(16, 1, BLUE);
        fill_row(&mut grid, 17);
        grid.occupy(18, 2, BLUE);
        fill_row(&mut grid, 19);

        assert_eq!(grid.clear_full_rows(), 3);

        assert_eq!(grid.cell(17, 0), Cell::Filled(BLUE));
        assert_eq!(grid.cell(18, 1), Cell::Filled(BLUE));
        assert_eq!(grid.cell(19, 2), Cell::Filled(BLUE));
        assert_eq!(grid.occupied_count(), 3);
        for row in &grid.rows[..17] {
            assert!(row.is_empty());
        }
    }

    #[test]
    fn test_clear_full_rows_consecutive_at_top_of_stack() {
        // Two full rows directly above each other must both be removed in one call.
        let mut grid = Grid::EMPTY;
        fill_row(&mut grid, 10);
        fill_row(&mut grid, 11);
        grid.occupy(12, 9, BLUE);

        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(grid.cell(12, 9), Cell::Filled(BLUE));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_clear_full_rows_all() {
        let mut grid = Grid::EMPTY;
        for row in 0..GRID_HEIGHT {
            fill_row(&mut grid, row);
        }

        assert_eq!(grid.clear_full_rows(), GRID_HEIGHT);
        assert_eq!(grid, Grid::EMPTY);
    }
}
