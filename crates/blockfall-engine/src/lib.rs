//! Rules engine for a falling-block puzzle game.
//!
//! The crate has no terminal or audio backend of its own. A frontend feeds
//! it decoded [`Command`]s and frame times through [`GameLoop`], and reads
//! back the [`Grid`], the falling [`Piece`] and the [`GameStats`] to draw.
//!
//! - [`core`](crate::core) - grid, pieces and placement checks
//! - [`engine`] - field, session state machine and game loop
//! - [`audio`] - the music player interface the loop drives
//! - [`persistence`] - highscore storage

pub use self::{audio::*, core::*, engine::*, persistence::*};

pub mod audio;
pub mod core;
pub mod engine;
pub mod persistence;

#[cfg(test)]
mod test_util;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding at the requested position")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("piece colliding at the requested position")]
    Collision(PieceCollisionError),
    #[display("no game in progress")]
    NotPlaying,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("game still in progress")]
pub struct RestartError;
