mod audio;
mod command;
mod logging;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
