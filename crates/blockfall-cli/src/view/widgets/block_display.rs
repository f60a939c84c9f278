use blockfall_engine::{Cell, Rgb};
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

use super::style;

/// What one board position shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoardBlock {
    Empty,
    Ghost,
    Filled(Rgb),
}

impl From<Cell> for BoardBlock {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::Empty,
            Cell::Filled(color) => Self::Filled(color),
        }
    }
}

/// One grid cell, two terminal columns wide.
#[derive(Debug)]
pub(crate) struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_block(block: BoardBlock, show_dots: bool) -> Self {
        match block {
            BoardBlock::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            BoardBlock::Empty => Self::new(style::EMPTY, ""),
            BoardBlock::Ghost => Self::new(style::GHOST, "[]"),
            BoardBlock::Filled(Rgb(r, g, b)) => Self::new(style::bg_only(Color::Rgb(r, g, b)), ""),
        }
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
