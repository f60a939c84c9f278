use std::time::Duration;

use crate::audio::AudioPlayer;

use super::game_session::{GameSession, SessionEvent};

/// A player request, already decoded from whatever input device produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Command {
    #[display("move left")]
    MoveLeft,
    #[display("move right")]
    MoveRight,
    #[display("soft drop")]
    SoftDrop,
    #[display("rotate")]
    Rotate,
    #[display("hard drop")]
    HardDrop,
    #[display("restart")]
    Restart,
    #[display("toggle mute")]
    ToggleMute,
    #[display("next track")]
    NextTrack,
}

/// Glue between the session, the music player and the frame clock.
///
/// The frontend calls [`frame`](Self::frame) once per frame with the time
/// since the previous frame and [`handle_command`](Self::handle_command) for
/// every input it decodes in between. Commands that do not apply to the
/// current state are dropped.
#[derive(Debug)]
pub struct GameLoop {
    session: GameSession,
    audio: Box<dyn AudioPlayer>,
}

impl GameLoop {
    /// Wraps a session and starts the music.
    #[must_use]
    pub fn new(session: GameSession, mut audio: Box<dyn AudioPlayer>) -> Self {
        audio.start_playing();
        Self { session, audio }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn audio(&self) -> &dyn AudioPlayer {
        &*self.audio
    }

    /// Runs one frame: keeps the music going and applies gravity.
    pub fn frame(&mut self, elapsed: Duration) -> Option<SessionEvent> {
        if self.audio.poll_track_finished() {
            self.audio.play_next();
            tracing::debug!(track = ?self.audio.current_track(), "track finished, playing next");
        }
        self.session.advance(elapsed)
    }

    pub fn handle_command(&mut self, command: Command) {
        let session = &mut self.session;
        match command {
            Command::MoveLeft => _ = session.try_move_left(),
            Command::MoveRight => _ = session.try_move_right(),
            Command::SoftDrop => _ = session.try_soft_drop(),
            Command::Rotate => _ = session.try_rotate(),
            Command::HardDrop => _ = session.hard_drop(),
            Command::Restart => _ = session.restart(),
            Command::ToggleMute => {
                self.audio.toggle_mute();
                tracing::debug!(muted = self.audio.is_muted(), "toggled mute");
            }
            Command::NextTrack => {
                self.audio.play_next();
                tracing::debug!(track = ?self.audio.current_track(), "skipped to next track");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        GRAVITY_INTERVAL, Grid, Piece, PieceKind, PieceSeed, Rgb, core::grid::GRID_WIDTH,
        persistence::MemoryStore,
    };

    #[derive(Debug, Default)]
    struct Counters {
        started: Cell<usize>,
        next: Cell<usize>,
        finished_pending: Cell<bool>,
    }

    #[derive(Debug)]
    struct FakeAudio {
        counters: Rc<Counters>,
        muted: bool,
    }

    impl AudioPlayer for FakeAudio {
        fn start_playing(&mut self) {
            self.counters.started.set(self.counters.started.get() + 1);
        }

        fn play_next(&mut self) {
            self.counters.next.set(self.counters.next.get() + 1);
        }

        fn toggle_mute(&mut self) {
            self.muted = !self.muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn poll_track_finished(&mut self) -> bool {
            self.counters.finished_pending.replace(false)
        }

        fn current_track(&self) -> Option<&str> {
            Some("track.mp3")
        }
    }

    fn game_loop() -> (GameLoop, Rc<Counters>) {
        let counters = Rc::new(Counters::default());
        let audio = FakeAudio {
            counters: Rc::clone(&counters),
            muted: false,
        };
        let session = GameSession::with_seed(
            PieceSeed::from_bytes([3; 16]),
            Box::new(MemoryStore::new()),
        );
        (GameLoop::new(session, Box::new(audio)), counters)
    }

    fn game_over(game_loop: &mut GameLoop) {
        let mut grid = Grid::EMPTY;
        for row in 0..2 {
            for col in 0..GRID_WIDTH - 1 {
                grid.occupy(row, col, Rgb(127, 127, 127));
            }
        }
        let piece = Piece::new(PieceKind::I).rotated().at(9, 16);
        game_loop.session.field_mut().set_up(grid, piece);
        game_loop.frame(GRAVITY_INTERVAL);
        assert!(game_loop.session().session_state().is_game_over());
    }

    #[test]
    fn test_new_starts_music() {
        let (_game_loop, counters) = game_loop();
        assert_eq!(counters.started.get(), 1);
        assert_eq!(counters.next.get(), 0);
    }

    #[test]
    fn test_finished_track_advances_playlist() {
        let (mut game_loop, counters) = game_loop();
        game_loop.frame(Duration::from_millis(16));
        assert_eq!(counters.next.get(), 0);

        counters.finished_pending.set(true);
        game_loop.frame(Duration::from_millis(16));
        assert_eq!(counters.next.get(), 1);

        game_loop.frame(Duration::from_millis(16));
        assert_eq!(counters.next.get(), 1);
    }

    #[test]
    fn test_audio_commands() {
        let (mut game_loop, counters) = game_loop();
        game_loop.handle_command(Command::ToggleMute);
        assert!(game_loop.audio().is_muted());
        game_loop.handle_command(Command::ToggleMute);
        assert!(!game_loop.audio().is_muted());

        game_loop.handle_command(Command::NextTrack);
        assert_eq!(counters.next.get(), 1);
    }

    #[test]
    fn test_movement_commands() {
        let (mut game_loop, _) = game_loop();
        game_loop
            .session
            .field_mut()
            .set_up(Grid::EMPTY, Piece::new(PieceKind::O));

        game_loop.handle_command(Command::MoveLeft);
        assert_eq!(game_loop.session().falling_piece().x(), 3);
        game_loop.handle_command(Command::MoveRight);
        game_loop.handle_command(Command::MoveRight);
        assert_eq!(game_loop.session().falling_piece().x(), 5);
        game_loop.handle_command(Command::SoftDrop);
        assert_eq!(game_loop.session().falling_piece().y(), 1);
        game_loop.handle_command(Command::HardDrop);
        assert_eq!(game_loop.session().falling_piece().y(), 18);
        assert_eq!(game_loop.session().grid().occupied_count(), 0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let (mut game_loop, _) = game_loop();
        game_loop
            .session
            .field_mut()
            .set_up(Grid::EMPTY, Piece::new(PieceKind::O));
        game_loop.handle_command(Command::SoftDrop);

        game_loop.handle_command(Command::Restart);
        assert!(game_loop.session().session_state().is_playing());
        assert_eq!(game_loop.session().falling_piece().y(), 1);
    }

    #[test]
    fn test_game_over_only_accepts_restart() {
        let (mut game_loop, _) = game_loop();
        game_over(&mut game_loop);
        let stuck = *game_loop.session().falling_piece();

        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
            Command::HardDrop,
        ] {
            game_loop.handle_command(command);
            assert_eq!(game_loop.session().falling_piece(), &stuck, "{command}");
        }

        game_loop.handle_command(Command::Restart);
        assert!(game_loop.session().session_state().is_playing());
        assert_eq!(game_loop.session().grid(), &Grid::EMPTY);
    }

    #[test]
    fn test_music_keeps_playing_after_game_over() {
        let (mut game_loop, counters) = game_loop();
        game_over(&mut game_loop);

        counters.finished_pending.set(true);
        assert_eq!(game_loop.frame(GRAVITY_INTERVAL), None);
        assert_eq!(counters.next.get(), 1);
    }
}
