use std::time::Duration;

use blockfall_engine::{GameLoop, SessionState};
use blockfall_runtime::{App, Runtime};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::view::widgets::{GameDisplay, KeyBinding};

use super::input::{self, Input};

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "A"], "Left"),
    (&["→", "D"], "Right"),
    (&["↓", "S"], "Soft Drop"),
    (&["↑", "W"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Mute"),
    (&["O"], "Next Track"),
    (&["Esc"], "Quit"),
];

const GAME_OVER_BINDINGS: &[KeyBinding] = &[
    (&["Space"], "Restart"),
    (&["P"], "Mute"),
    (&["O"], "Next Track"),
    (&["Esc"], "Quit"),
];

#[derive(Debug)]
pub(super) struct PlayApp {
    game: GameLoop,
    fps: u16,
    is_exiting: bool,
}

impl PlayApp {
    pub(super) fn new(game: GameLoop, fps: u16) -> Self {
        Self {
            game,
            fps,
            is_exiting: false,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(f64::from(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.game.frame(elapsed);
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        match input::map_key(&event, self.game.session().session_state()) {
            Some(Input::Game(command)) => self.game.handle_command(command),
            Some(Input::Quit) => self.is_exiting = true,
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = match self.game.session().session_state() {
            SessionState::Playing => PLAYING_BINDINGS,
            SessionState::GameOver => GAME_OVER_BINDINGS,
        };
        let [main_area] = Layout::vertical([Constraint::Length(22)]).areas(frame.area());
        frame.render_widget(GameDisplay::new(&self.game, bindings), main_area);
    }
}
