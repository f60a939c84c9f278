use std::{fmt, fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use blockfall_engine::AudioPlayer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::Playlist;

/// Playback volume when not muted.
const NOMINAL_VOLUME: f32 = 0.2;

fn volume(muted: bool) -> f32 {
    if muted { 0.0 } else { NOMINAL_VOLUME }
}

/// Plays the playlist through the default output device.
///
/// Each track gets a fresh sink. A track counts as finished when its sink has
/// drained; tracks that fail to open are logged and never report finishing.
pub(crate) struct RodioPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    playlist: Playlist,
    muted: bool,
}

impl fmt::Debug for RodioPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RodioPlayer")
            .field("playlist", &self.playlist)
            .field("muted", &self.muted)
            .field("playing", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl RodioPlayer {
    pub(crate) fn new(playlist: Playlist) -> anyhow::Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            playlist,
            muted: false,
        })
    }

    fn play(&mut self, path: Option<&Path>) {
        self.sink = None;
        let Some(path) = path else {
            return;
        };
        match self.open_sink(path) {
            Ok(sink) => {
                tracing::debug!(track = %path.display(), "playing track");
                self.sink = Some(sink);
            }
            Err(e) => tracing::warn!(track = %path.display(), error = %e, "failed to play track"),
        }
    }

    fn open_sink(&self, path: &Path) -> anyhow::Result<Sink> {
        let file = File::open(path).context("Failed to open track")?;
        let source = Decoder::new(BufReader::new(file)).context("Failed to decode track")?;
        let sink = Sink::try_new(&self.handle).context("Failed to create audio sink")?;
        sink.set_volume(volume(self.muted));
        sink.append(source);
        Ok(sink)
    }
}

impl AudioPlayer for RodioPlayer {
    fn start_playing(&mut self) {
        let path = self.playlist.start().map(Path::to_path_buf);
        self.play(path.as_deref());
    }

    fn play_next(&mut self) {
        let path = self.playlist.advance().map(Path::to_path_buf);
        self.play(path.as_deref());
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume(self.muted));
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn poll_track_finished(&mut self) -> bool {
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.sink = None;
            return true;
        }
        false
    }

    fn current_track(&self) -> Option<&str> {
        self.playlist.current_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume() {
        assert!((volume(false) - 0.2).abs() < f32::EPSILON);
        assert!(volume(true).abs() < f32::EPSILON);
    }
}
