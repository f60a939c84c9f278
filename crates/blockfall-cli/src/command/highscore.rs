use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{
    DEFAULT_HIGHSCORE_FILE, HighscoreLoadError, HighscoreStore as _, JsonFileStore,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HighscoreArg {
    /// Path of the highscore file
    #[clap(long, default_value = DEFAULT_HIGHSCORE_FILE)]
    pub(super) highscore_file: PathBuf,
    /// Reset the saved highscore to 0
    #[clap(long)]
    pub(super) reset: bool,
}

pub(crate) fn run(arg: &HighscoreArg) -> anyhow::Result<()> {
    let HighscoreArg {
        highscore_file,
        reset,
    } = arg;

    let mut store = JsonFileStore::new(highscore_file);
    if *reset {
        store.save(0).with_context(|| {
            format!("Failed to reset highscore file: {}", highscore_file.display())
        })?;
        println!("Highscore reset");
        return Ok(());
    }

    let highscore = match store.load() {
        Ok(highscore) => highscore,
        Err(HighscoreLoadError::NotFound) => 0,
        Err(e) => return Err(e).context("Failed to read highscore"),
    };
    println!("Highscore: {highscore}");
    Ok(())
}
