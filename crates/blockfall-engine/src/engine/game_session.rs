use std::time::Duration;

use crate::{
    MoveError, RestartError,
    core::{grid::Grid, piece::Piece},
    persistence::{HighscoreLoadError, HighscoreStore},
};

use super::{GameStats, game_field::GameField, piece_generator::PieceSeed};

/// Time between two gravity steps. Fall speed never changes.
pub const GRAVITY_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// What a gravity step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The piece moved down one row.
    PieceFell,
    /// The piece locked and a new piece spawned.
    PieceLocked { cleared_rows: usize },
    /// The piece locked and the new piece did not fit.
    GameOver { score: u64, new_highscore: bool },
}

/// One game from spawn to game over, plus restarts.
///
/// Owns the field, the score, the gravity timer and the highscore. Gravity is
/// driven by [`advance`](Self::advance) with the real time elapsed since the
/// previous frame; player moves are separate calls that never touch the
/// timer.
#[derive(Debug)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    gravity_timer: Duration,
    highscore: u64,
    store: Box<dyn HighscoreStore>,
}

impl GameSession {
    /// Starts a game with random pieces and loads the saved highscore.
    #[must_use]
    pub fn new(store: Box<dyn HighscoreStore>) -> Self {
        Self::with_field(GameField::new(), store)
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed, store: Box<dyn HighscoreStore>) -> Self {
        Self::with_field(GameField::with_seed(seed), store)
    }

    #[must_use]
    pub fn with_field(field: GameField, store: Box<dyn HighscoreStore>) -> Self {
        let highscore = load_highscore(&*store);
        Self {
            field,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            gravity_timer: Duration::ZERO,
            highscore,
            store,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut GameField {
        &mut self.field
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.field.grid()
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.field.ghost_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn highscore(&self) -> u64 {
        self.highscore
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[cfg(test)]
    pub(crate) fn gravity_timer(&self) -> Duration {
        self.gravity_timer
    }

    /// Adds `elapsed` to the gravity timer and runs a gravity step once the
    /// timer reaches [`GRAVITY_INTERVAL`].
    ///
    /// The timer restarts from zero after every step, whatever the step did.
    /// Does nothing after game over.
    pub fn advance(&mut self, elapsed: Duration) -> Option<SessionEvent> {
        if !self.session_state.is_playing() {
            return None;
        }
        self.gravity_timer += elapsed;
        if self.gravity_timer < GRAVITY_INTERVAL {
            return None;
        }
        self.gravity_timer = Duration::ZERO;
        Some(self.gravity_step())
    }

    fn gravity_step(&mut self) -> SessionEvent {
        if self.field.try_move_down().is_ok() {
            return SessionEvent::PieceFell;
        }
        self.complete_piece_drop()
    }

    fn complete_piece_drop(&mut self) -> SessionEvent {
        let kind = self.field.falling_piece().kind();
        let (cleared_rows, result) = self.field.complete_piece_drop();
        self.stats.complete_piece_drop(cleared_rows);
        tracing::debug!(
            piece = %kind,
            cleared_rows,
            score = self.stats.score(),
            next = %self.field.falling_piece().kind(),
            "piece locked"
        );
        if result.is_err() {
            return self.finish();
        }
        SessionEvent::PieceLocked { cleared_rows }
    }

    fn finish(&mut self) -> SessionEvent {
        self.session_state = SessionState::GameOver;
        let score = self.stats.score();
        let new_highscore = score > self.highscore;
        if new_highscore {
            self.highscore = score;
            if let Err(e) = self.store.save(score) {
                tracing::warn!(error = %e, "failed to save highscore");
            }
        }
        tracing::info!(score, highscore = self.highscore, new_highscore, "game over");
        SessionEvent::GameOver {
            score,
            new_highscore,
        }
    }

    fn ensure_playing(&self) -> Result<(), MoveError> {
        if self.session_state.is_playing() {
            Ok(())
        } else {
            Err(MoveError::NotPlaying)
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.field.try_move_left().map_err(MoveError::Collision)
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.field.try_move_right().map_err(MoveError::Collision)
    }

    pub fn try_soft_drop(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.field.try_move_down().map_err(MoveError::Collision)
    }

    pub fn try_rotate(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.field.try_rotate().map_err(MoveError::Collision)
    }

    /// Drops the piece onto its landing row. Locking is left to gravity.
    pub fn hard_drop(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.field.hard_drop();
        Ok(())
    }

    /// Starts a new game after game over. The highscore is kept.
    pub fn restart(&mut self) -> Result<(), RestartError> {
        if !self.session_state.is_game_over() {
            return Err(RestartError);
        }
        self.field.reset();
        self.stats = GameStats::new();
        self.gravity_timer = Duration::ZERO;
        self.session_state = SessionState::Playing;
        tracing::debug!(highscore = self.highscore, "game restarted");
        Ok(())
    }
}

fn load_highscore(store: &dyn HighscoreStore) -> u64 {
    match store.load() {
        Ok(highscore) => highscore,
        Err(HighscoreLoadError::NotFound) => {
            tracing::debug!("no saved highscore, starting from 0");
            0
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable highscore");
            0
        }
    }
}
