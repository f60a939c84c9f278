//! Background music.
//!
//! Tracks come from a [`Playlist`] loaded from a directory. The default build
//! has no sound output and only keeps the playlist and mute state
//! ([`SilentPlayer`]); the `audio` feature adds real playback through rodio.

use std::path::Path;

use anyhow::Context as _;
use blockfall_engine::AudioPlayer;

pub(crate) use self::{playlist::Playlist, silent::SilentPlayer};

mod playlist;
#[cfg(feature = "audio")]
mod rodio_player;
mod silent;

/// Loads the playlist from `music_dir` and opens a player for it.
pub(crate) fn open_player(music_dir: &Path) -> anyhow::Result<Box<dyn AudioPlayer>> {
    let playlist = Playlist::load(music_dir)
        .with_context(|| format!("Failed to read music directory: {}", music_dir.display()))?;
    tracing::debug!(
        dir = %music_dir.display(),
        tracks = playlist.len(),
        "loaded playlist"
    );

    #[cfg(feature = "audio")]
    if !playlist.is_empty() {
        let player = rodio_player::RodioPlayer::new(playlist)
            .context("Failed to open audio output device")?;
        return Ok(Box::new(player));
    }

    Ok(Box::new(SilentPlayer::new(playlist)))
}
