//! Game rules on top of the core data structures.
//!
//! - [`GameField`] - grid, falling piece and piece generator
//! - [`GameSession`] - gravity timer, score, game over and highscore
//! - [`GameStats`] - score and line counters for one game
//! - [`GameLoop`] - per-frame driver that also keeps the music going
//! - [`PieceGenerator`] - uniform random piece kinds, optionally seeded
//!
//! # Game Flow
//!
//! 1. A piece spawns at the top of the grid.
//! 2. The player moves and rotates it; gravity moves it down every
//!    [`GRAVITY_INTERVAL`].
//! 3. When gravity cannot move it further it locks, full rows are cleared
//!    and scored, and the next piece spawns.
//! 4. If the new piece does not fit, the game is over and the highscore is
//!    saved if it was beaten.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Command, GameLoop, GameSession, MemoryStore, NoAudio};
//!
//! let session = GameSession::new(Box::new(MemoryStore::new()));
//! let mut game = GameLoop::new(session, Box::new(NoAudio::default()));
//!
//! game.handle_command(Command::MoveLeft);
//! game.handle_command(Command::HardDrop);
//! game.frame(Duration::from_millis(500));
//!
//! assert_eq!(game.session().stats().completed_pieces(), 1);
//! ```

pub use self::{game_field::*, game_loop::*, game_session::*, game_stats::*, piece_generator::*};

mod game_field;
mod game_loop;
mod game_session;
mod game_stats;
mod piece_generator;
