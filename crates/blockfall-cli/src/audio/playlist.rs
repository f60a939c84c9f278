use std::{
    fs, io,
    path::{Path, PathBuf},
};

const TRACK_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// An ordered list of music files with a current position.
///
/// Advancing past the last track wraps to the first. Every operation on an
/// empty playlist is a no-op.
#[derive(Debug, Clone, Default)]
pub(crate) struct Playlist {
    tracks: Vec<PathBuf>,
    current: Option<usize>,
}

impl Playlist {
    /// Collects the `.mp3` and `.wav` files in `dir`, sorted by path.
    ///
    /// A missing directory gives an empty playlist.
    pub(crate) fn load(dir: &Path) -> io::Result<Self> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e),
        };
        let mut tracks = vec![];
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_track(&path) {
                tracks.push(path);
            }
        }
        tracks.sort();
        Ok(Self::from_tracks(tracks))
    }

    pub(crate) fn from_tracks(tracks: Vec<PathBuf>) -> Self {
        Self {
            tracks,
            current: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Selects the first track.
    pub(crate) fn start(&mut self) -> Option<&Path> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = Some(0);
        self.current()
    }

    /// Selects the track after the current one, wrapping around.
    pub(crate) fn advance(&mut self) -> Option<&Path> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = Some(self.current.map_or(0, |i| (i + 1) % self.tracks.len()));
        self.current()
    }

    pub(crate) fn current(&self) -> Option<&Path> {
        self.current.map(|i| self.tracks[i].as_path())
    }

    /// File name of the current track.
    pub(crate) fn current_name(&self) -> Option<&str> {
        self.current()?.file_name()?.to_str()
    }
}

fn is_track(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TRACK_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use std::{
        process,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(prefix: &str) -> Self {
            static COUNTER: AtomicUsize = AtomicUsize::new(0);
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!("{prefix}-{}-{n}", process::id()));
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn path(&self) -> &Path {
            &self.0
        }

        fn join(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn playlist(names: &[&str]) -> Playlist {
        Playlist::from_tracks(names.iter().map(PathBuf::from).collect())
    }

    #[test]
    fn test_load_filters_and_sorts() {
        let dir = TempDir::new("blockfall-playlist");
        for name in ["c.wav", "a.mp3", "notes.txt", "b.mp3", "cover.png"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        fs::create_dir(dir.join("d.mp3")).unwrap();

        let mut playlist = Playlist::load(dir.path()).unwrap();
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.start().unwrap(), dir.join("a.mp3"));
        assert_eq!(playlist.advance().unwrap(), dir.join("b.mp3"));
        assert_eq!(playlist.advance().unwrap(), dir.join("c.wav"));
    }

    #[test]
    fn test_load_missing_directory_is_empty() {
        let dir = TempDir::new("blockfall-playlist");
        let playlist = Playlist::load(&dir.join("missing")).unwrap();
        assert!(playlist.is_empty());
    }

    #[test]
    fn test_start_selects_first_track() {
        let mut playlist = playlist(&["one.mp3", "two.mp3"]);
        assert_eq!(playlist.current(), None);
        playlist.start();
        assert_eq!(playlist.current_name(), Some("one.mp3"));
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut playlist = playlist(&["one.mp3", "two.mp3", "three.wav"]);
        playlist.start();
        playlist.advance();
        playlist.advance();
        assert_eq!(playlist.current_name(), Some("three.wav"));
        playlist.advance();
        assert_eq!(playlist.current_name(), Some("one.mp3"));
    }

    #[test]
    fn test_advance_before_start_selects_first_track() {
        let mut playlist = playlist(&["one.mp3", "two.mp3"]);
        assert_eq!(playlist.advance(), Some(Path::new("one.mp3")));
    }

    #[test]
    fn test_empty_playlist_is_noop() {
        let mut playlist = Playlist::default();
        assert_eq!(playlist.start(), None);
        assert_eq!(playlist.advance(), None);
        assert_eq!(playlist.current_name(), None);
    }
}
