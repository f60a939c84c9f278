use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{
    DEFAULT_HIGHSCORE_FILE, GameLoop, GameSession, HighscoreStore, JsonFileStore, MemoryStore,
    PieceSeed,
};
use blockfall_runtime::Runtime;
use tracing::Level;

use crate::{audio, logging};

use self::app::PlayApp;

mod app;
mod input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path of the highscore file
    #[clap(long, default_value = DEFAULT_HIGHSCORE_FILE)]
    pub(super) highscore_file: PathBuf,
    /// Keep the highscore in memory only
    #[clap(long)]
    pub(super) no_save: bool,
    /// Directory to load background music from (.mp3 and .wav files)
    #[clap(long, default_value = "music")]
    pub(super) music_dir: PathBuf,
    /// Frames per second
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(1..=240))]
    pub(super) fps: u16,
    /// Seed for the piece sequence, as 32 hex digits
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
    /// Write logs to this file
    #[clap(long)]
    pub(super) log_file: Option<PathBuf>,
    /// Log level used with --log-file
    #[clap(long, default_value_t = Level::INFO)]
    pub(super) log_level: Level,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        highscore_file,
        no_save,
        music_dir,
        fps,
        seed,
        log_file,
        log_level,
    } = arg;

    if let Some(log_file) = log_file {
        logging::init(log_file, *log_level)?;
    }

    let store: Box<dyn HighscoreStore> = if *no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonFileStore::new(highscore_file))
    };
    let session = match seed {
        Some(seed) => GameSession::with_seed(*seed, store),
        None => GameSession::new(store),
    };
    tracing::info!(
        seed = ?seed.map(|seed| seed.to_string()),
        highscore = session.highscore(),
        "game started"
    );

    let player = audio::open_player(music_dir)?;
    let mut app = PlayApp::new(GameLoop::new(session, player), *fps);

    Runtime::new()
        .run(&mut app)
        .context("Failed to run terminal UI")?;

    tracing::info!("game closed");
    Ok(())
}
