use std::iter;

use blockfall_engine::GameLoop;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// Score, highscore, line counters and music state.
pub(crate) struct SessionStatsDisplay<'a> {
    game: &'a GameLoop,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(game: &'a GameLoop) -> Self {
        Self { game, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = &'static dyn Fn(&GameLoop) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(Value),
    LabelValue(&'static str, Value),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|game| game.session().score().to_string()),
    Row::FullLabel("HIGHSCORE:"),
    Row::FullValue(&|game| game.session().highscore().to_string()),
    Row::Empty,
    Row::LabelValue("LINES:", &|game| {
        game.session().stats().total_cleared_lines().to_string()
    }),
    Row::LabelValue("PIECES:", &|game| {
        game.session().stats().completed_pieces().to_string()
    }),
    Row::Empty,
    Row::LabelValue("SINGLES:", &|game| {
        game.session().stats().line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", &|game| {
        game.session().stats().line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", &|game| {
        game.session().stats().line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("QUADS:", &|game| {
        game.session().stats().line_cleared_counter()[4].to_string()
    }),
    Row::Empty,
    Row::LabelValue("MUSIC:", &|game| {
        let state = if game.audio().is_muted() { "MUTED" } else { "ON" };
        state.to_owned()
    }),
    Row::FullValue(&|game| game.audio().current_track().unwrap_or("-").to_owned()),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.game), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.game), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
