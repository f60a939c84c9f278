use std::fmt;

/// Background music as seen by the game loop.
///
/// The loop never waits on audio. It sends the two player commands (next
/// track, toggle mute) and once per frame asks whether the current track has
/// finished, advancing to the next one when it has.
pub trait AudioPlayer: fmt::Debug {
    /// Starts the playlist from its first track.
    fn start_playing(&mut self);

    /// Advances to the next track, wrapping to the first after the last.
    fn play_next(&mut self);

    /// Mutes, or restores the nominal volume if already muted.
    fn toggle_mute(&mut self);

    fn is_muted(&self) -> bool;

    /// Returns `true` once for each track that has played to its end.
    fn poll_track_finished(&mut self) -> bool;

    /// Name of the selected track, if there is one.
    fn current_track(&self) -> Option<&str>;
}

/// A player with no tracks. Every command is accepted and nothing plays.
#[derive(Debug, Clone, Default)]
pub struct NoAudio {
    muted: bool,
}

impl AudioPlayer for NoAudio {
    fn start_playing(&mut self) {}

    fn play_next(&mut self) {}

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
        None
    }
}
