mod app;
mod terminal;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use log::info;
use ratatui::DefaultTerminal;
use swirl_core::{ColorMode, Preset};
use swirl_engine::Engine;

use crate::app::App;
use crate::terminal::TerminalSession;

/// Real-time spirals, galaxies and supernovae in your terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Animation to play: vortex, spiral, golden, outward, milkyway,
    /// supernova, plasma, remnant or blackhole.
    #[arg(default_value_t = Preset::Vortex)]
    preset: Preset,

    /// Use the 256-color palette instead of truecolor.
    #[arg(long = "256")]
    palette: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging().wrap_err("failed to set up logging")?;

    let color_mode = if cli.palette {
        ColorMode::Palette
    } else {
        ColorMode::TrueColor
    };
    info!("starting {} in {} mode", cli.preset, color_mode.name());

    // Built before the terminal is taken over, so a bad setup leaves it untouched.
    let engine = Engine::new(cli.preset.config(color_mode))
        .wrap_err_with(|| format!("failed to set up the {} animation", cli.preset))?;

    let mut session = acquire_terminal(ratatui::try_init, ratatui::restore)?;
    let result = App::new(engine).run(&mut session);
    ratatui::restore();
    result
}

/// Take over the terminal. A half-done setup is undone before the error is
/// returned.
fn acquire_terminal(
    init: impl FnOnce() -> io::Result<DefaultTerminal>,
    restore: impl FnOnce(),
) -> color_eyre::Result<TerminalSession> {
    match init() {
        Ok(terminal) => Ok(TerminalSession::new(terminal)),
        Err(err) => {
            restore();
            Err(err).wrap_err("failed to acquire the terminal")
        }
    }
}

fn log_path() -> PathBuf {
    std::env::temp_dir().join("swirl.log")
}

/// Log to a file: the screen belongs to the animation.
fn init_logging() -> color_eyre::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path())?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .try_init()?;
    Ok(())
}
