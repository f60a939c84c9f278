use clap::{Parser, Subcommand};

use self::{highscore::HighscoreArg, play::PlayArg};

mod highscore;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    #[clap(flatten)]
    play: PlayArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game (default)
    Play(#[clap(flatten)] PlayArg),
    /// Show or reset the saved highscore
    Highscore(#[clap(flatten)] HighscoreArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(args.play)) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Highscore(arg) => highscore::run(&arg)?,
    }
    Ok(())
}
