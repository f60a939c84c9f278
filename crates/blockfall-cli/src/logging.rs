use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Sends log events to `path`, truncating it.
///
/// The terminal belongs to the game screen, so nothing is logged unless a
/// file is given. `RUST_LOG` directives take precedence over `level`.
pub(crate) fn init(path: &Path, level: Level) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")?;
    Ok(())
}
