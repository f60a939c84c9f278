//! Highscore persistence.
//!
//! The engine only needs two things from storage: read the saved highscore at
//! startup and overwrite it when a game ends with a better score. Both go
//! through the [`HighscoreStore`] trait so the game loop can run against a
//! file ([`JsonFileStore`]) or purely in memory ([`MemoryStore`]).
//!
//! Load failures are typed so callers can tell "nothing saved yet" apart from
//! an unreadable or malformed file. The game treats all of them as a
//! highscore of 0.

use std::{
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

/// File name used when no explicit highscore path is configured.
pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.json";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum HighscoreLoadError {
    #[display("no highscore has been saved")]
    NotFound,
    #[display("failed to read highscore file {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed highscore file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("failed to write highscore file {}", path.display())]
pub struct HighscoreSaveError {
    path: PathBuf,
    source: io::Error,
}

/// Storage for a single non-negative highscore value.
pub trait HighscoreStore: fmt::Debug {
    /// Reads the saved highscore.
    fn load(&self) -> Result<u64, HighscoreLoadError>;

    /// Overwrites the saved highscore.
    fn save(&mut self, highscore: u64) -> Result<(), HighscoreSaveError>;
}

/// Stores the highscore as a bare JSON integer in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_FILE)
    }
}

impl JsonFileStore {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighscoreStore for JsonFileStore {
    fn load(&self) -> Result<u64, HighscoreLoadError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(HighscoreLoadError::NotFound);
            }
            Err(source) => {
                return Err(HighscoreLoadError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            if source.is_io() {
                HighscoreLoadError::Io {
                    path: self.path.clone(),
                    source: source.into(),
                }
            } else {
                HighscoreLoadError::Parse {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }

    fn save(&mut self, highscore: u64) -> Result<(), HighscoreSaveError> {
        let err = |source| HighscoreSaveError {
            path: self.path.clone(),
            source,
        };
        let file = File::create(&self.path).map_err(err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &highscore).map_err(|e| err(e.into()))?;
        writer.flush().map_err(err)?;
        Ok(())
    }
}

/// Keeps the highscore in memory only; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    highscore: Option<u64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_highscore(highscore: u64) -> Self {
        Self {
            highscore: Some(highscore),
        }
    }
}

impl HighscoreStore for MemoryStore {
    fn load(&self) -> Result<u64, HighscoreLoadError> {
        self.highscore.ok_or(HighscoreLoadError::NotFound)
    }

    fn save(&mut self, highscore: u64) -> Result<(), HighscoreSaveError> {
        self.highscore = Some(highscore);
        Ok(())
    }
}
