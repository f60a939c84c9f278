use std::iter;

use blockfall_engine::{GRID_HEIGHT, GRID_WIDTH, Grid, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::{BlockDisplay, BoardBlock};

type Blocks = [[BoardBlock; GRID_WIDTH]; GRID_HEIGHT];

/// The playfield: locked cells, then the ghost, then the falling piece.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        GRID_WIDTH as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        GRID_HEIGHT as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn blocks(&self) -> Blocks {
        let mut blocks = [[BoardBlock::Empty; GRID_WIDTH]; GRID_HEIGHT];
        for (row, grid_row) in iter::zip(&mut blocks, self.grid.rows()) {
            for (block, cell) in iter::zip(row, grid_row.cells()) {
                *block = (*cell).into();
            }
        }
        if let Some(ghost) = &self.ghost {
            for (row, col) in visible_positions(ghost) {
                let block = &mut blocks[row][col];
                if *block == BoardBlock::Empty {
                    *block = BoardBlock::Ghost;
                }
            }
        }
        if let Some(piece) = &self.falling_piece {
            for (row, col) in visible_positions(piece) {
                blocks[row][col] = BoardBlock::Filled(piece.color());
            }
        }
        blocks
    }
}

/// Cells of `piece` inside the grid, as `(row, col)`. Rows above the top are
/// not drawn.
fn visible_positions(piece: &Piece) -> impl Iterator<Item = (usize, usize)> + '_ {
    piece.occupied_positions().filter_map(|(col, row)| {
        let row = usize::try_from(row).ok().filter(|&row| row < GRID_HEIGHT)?;
        let col = usize::try_from(col).ok().filter(|&col| col < GRID_WIDTH)?;
        Some((row, col))
    })
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..GRID_WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..GRID_HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<GRID_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<GRID_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.blocks()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(block, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{PieceKind, Rgb};

    use super::*;

    #[test]
    fn test_blocks_layering() {
        let mut grid = Grid::EMPTY;
        grid.occupy(19, 0, Rgb(1, 2, 3));
        let piece = Piece::new(PieceKind::O);
        let ghost = grid.ghost_piece(&piece);
        let blocks = BoardDisplay::new(&grid)
            .ghost(ghost)
            .falling_piece(piece)
            .blocks();

        assert_eq!(blocks[19][0], BoardBlock::Filled(Rgb(1, 2, 3)));
        assert_eq!(blocks[0][4], BoardBlock::Filled(PieceKind::O.color()));
        assert_eq!(blocks[18][5], BoardBlock::Ghost);
        assert_eq!(blocks[10][5], BoardBlock::Empty);
    }

    #[test]
    fn test_rows_above_top_are_not_drawn() {
        let piece = Piece::new(PieceKind::I).rotated().at(0, -2);
        let blocks = BoardDisplay::new(&Grid::EMPTY).falling_piece(piece).blocks();

        let filled = blocks
            .iter()
            .flatten()
            .filter(|block| **block != BoardBlock::Empty)
            .count();
        assert_eq!(filled, 2);
        assert_eq!(blocks[0][0], BoardBlock::Filled(PieceKind::I.color()));
        assert_eq!(blocks[1][0], BoardBlock::Filled(PieceKind::I.color()));
    }
}
