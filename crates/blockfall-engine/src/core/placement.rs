use super::{
    grid::{GRID_HEIGHT, GRID_WIDTH, Grid},
    piece::Piece,
};

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const WIDTH: i32 = GRID_WIDTH as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const HEIGHT: i32 = GRID_HEIGHT as i32;

impl Grid {
    /// Checks whether `piece` fits with its top-left cell at `(x, y)`.
    ///
    /// A placement is rejected when any filled cell of the shape lands left of
    /// column 0, right of the last column, below the last row, or on an
    /// occupied cell. Cells above the top row (`row < 0`) are exempt from the
    /// occupancy check so pieces may sit partly above the field, but their
    /// columns are still checked.
    ///
    /// Every movement rule in the game goes through this predicate.
    #[must_use]
    pub fn is_valid(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece.occupied_positions_at(x, y).all(|(col, row)| {
            if !(0..WIDTH).contains(&col) || row >= HEIGHT {
                return false;
            }
            match (usize::try_from(row), usize::try_from(col)) {
                (Ok(row), Ok(col)) => !self.is_occupied(row, col),
                _ => true,
            }
        })
    }

    /// Checks whether `piece` fits at its own position.
    #[must_use]
    pub fn fits(&self, piece: &Piece) -> bool {
        self.is_valid(piece, piece.x(), piece.y())
    }

    /// Returns the row the piece would land on if it fell straight down.
    ///
    /// If the piece cannot move down at all, this is its current row.
    #[must_use]
    pub fn ghost_row(&self, piece: &Piece) -> i32 {
        let mut y = piece.y();
        while self.is_valid(piece, piece.x(), y + 1) {
            y += 1;
        }
        y
    }

    /// Returns the piece moved down to its landing row.
    #[must_use]
    pub fn ghost_piece(&self, piece: &Piece) -> Piece {
        piece.at(piece.x(), self.ghost_row(piece))
    }

    /// Moves `piece` down until the next row would be invalid.
    ///
    /// Leaves the piece on the same row [`Self::ghost_row`] reports.
    pub fn hard_drop(&self, piece: &mut Piece) {
        while self.is_valid(piece, piece.x(), piece.y() + 1) {
            *piece = piece.down();
        }
    }

    /// Writes the piece's cells into the grid with the piece's color.
    ///
    /// The caller must have checked the placement with [`Self::is_valid`].
    /// Cells above the top row are dropped.
    pub fn lock_in(&mut self, piece: &Piece) {
        for (col, row) in piece.occupied_positions() {
            if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) {
                self.occupy(row, col, piece.color());
            }
        }
    }
}
