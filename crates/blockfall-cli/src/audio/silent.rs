use blockfall_engine::AudioPlayer;

use super::Playlist;

/// Tracks the playlist position and mute state without producing sound.
///
/// Nothing is ever playing, so no track finishes on its own.
#[derive(Debug, Clone)]
pub(crate) struct SilentPlayer {
    playlist: Playlist,
    muted: bool,
}

impl SilentPlayer {
    pub(crate) fn new(playlist: Playlist) -> Self {
        Self {
            playlist,
            muted: false,
        }
    }
}

impl AudioPlayer for SilentPlayer {
    fn start_playing(&mut self) {
        self.playlist.start();
    }

    fn play_next(&mut self) {
        self.playlist.advance();
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn poll_track_finished(&mut self) -> bool {
        false
    }

    fn current_track(&self) -> Option<&str> {
        self.playlist.current_name()
    }
}
