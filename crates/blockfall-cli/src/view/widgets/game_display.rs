use blockfall_engine::{GameLoop, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, KeyBinding, KeyBindingDisplay, SessionStatsDisplay, color, style};

/// The whole game screen: stats, board and controls, plus the game-over
/// overlay.
#[derive(Debug)]
pub(crate) struct GameDisplay<'a> {
    game: &'a GameLoop,
    bindings: &'a [KeyBinding<'a>],
    horizontal_padding: u16,
}

impl<'a> GameDisplay<'a> {
    pub fn new(game: &'a GameLoop, bindings: &'a [KeyBinding<'a>]) -> Self {
        Self {
            game,
            bindings,
            horizontal_padding: 1,
        }
    }

    fn panel(&self, title: &'a str, border_color: ratatui::style::Color) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::horizontal(self.horizontal_padding))
            .border_style(border_color)
            .style(style::DEFAULT)
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let session = self.game.session();
        let border_color = match session.session_state() {
            SessionState::Playing => color::WHITE,
            SessionState::GameOver => color::RED,
        };

        let board = BoardDisplay::new(session.grid())
            .ghost(session.ghost_piece())
            .falling_piece(*session.falling_piece())
            .block(Block::bordered().border_style(border_color).style(style::DEFAULT));
        let stats =
            SessionStatsDisplay::new(self.game).block(self.panel("BLOCKFALL", border_color));
        let controls =
            KeyBindingDisplay::new(self.bindings).block(self.panel("CONTROLS", border_color));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(controls.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [controls_area] =
            Layout::vertical([Constraint::Length(controls.height())]).areas(right_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        controls.render(controls_area, buf);

        if session.session_state().is_game_over() {
            let text = Text::from(vec![
                Line::from("GAME OVER"),
                Line::from("Press SPACE to restart"),
                Line::from(format!("Score: {}", session.score())),
                Line::from(format!("Highscore: {}", session.highscore())),
            ])
            .style(style::GAME_OVER)
            .centered();
            let block = Block::new().style(style::GAME_OVER);
            let area =
                board_area.centered(Constraint::Length(board_width), Constraint::Length(6));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(4)), buf);
        }
    }
}
