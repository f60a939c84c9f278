use crate::{
    PieceCollisionError,
    core::{grid::Grid, piece::Piece},
};

use super::piece_generator::{PieceGenerator, PieceSeed};

/// The playfield and the one falling piece.
///
/// Every accepted falling-piece position satisfies [`Grid::fits`]; rejected
/// moves leave the piece untouched.
#[derive(Debug, Clone)]
pub struct GameField {
    grid: Grid,
    falling_piece: Piece,
    generator: PieceGenerator,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    #[must_use]
    pub fn with_generator(mut generator: PieceGenerator) -> Self {
        let falling_piece = generator.spawn();
        Self {
            grid: Grid::EMPTY,
            falling_piece,
            generator,
        }
    }

    /// Replaces the grid and the falling piece, keeping the generator.
    ///
    /// Used to set up specific positions; no validity check is done.
    #[cfg(test)]
    pub(crate) fn set_up(&mut self, grid: Grid, falling_piece: Piece) {
        self.grid = grid;
        self.falling_piece = falling_piece;
    }

    /// Clears the grid and spawns a fresh piece.
    pub fn reset(&mut self) {
        self.grid = Grid::EMPTY;
        self.falling_piece = self.generator.spawn();
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    /// Replaces the falling piece if the new one fits.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !self.grid.fits(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.right())
    }

    pub fn try_move_down(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.down())
    }

    /// Rotates clockwise in place; a rotation that does not fit is discarded.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.rotated())
    }

    /// Moves the falling piece to its landing row without locking it.
    pub fn hard_drop(&mut self) {
        self.grid.hard_drop(&mut self.falling_piece);
    }

    /// Returns where the falling piece would land.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.grid.ghost_piece(&self.falling_piece)
    }

    /// Locks the falling piece, clears full rows and spawns the next piece.
    ///
    /// Returns the number of cleared rows, and an error if the new piece does
    /// not fit at its spawn position (the game is over). The new piece is
    /// installed either way.
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), PieceCollisionError>) {
        self.grid.lock_in(&self.falling_piece);
        let cleared_rows = self.grid.clear_full_rows();

        self.falling_piece = self.generator.spawn();
        if !self.grid.fits(&self.falling_piece) {
            return (cleared_rows, Err(PieceCollisionError));
        }
        (cleared_rows, Ok(()))
    }
}
