//! # Tic-Tac-Toe with a Minimax Opponent
//!
//! Entry point for an interactive tic-tac-toe game played in the terminal.
//! The board dimension and the win-run length are configurable, so the same
//! engine also plays N-in-a-row variants on larger grids. The computer
//! opponent searches with a depth-limited minimax (see the `minimax` library
//! crate).
//!
//! The UI is built with Ratatui and supports the mouse: hover and click the
//! menu buttons, click cells to place a mark.
//!
//! Logs are written to a file (`--log-file`) so they never corrupt the
//! terminal UI; set `RUST_LOG=debug` to see the per-second frame/tick rate.

pub mod app;
pub mod state;
pub mod tui;

use crate::app::{App, Context};
use anyhow::Context as _;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Board side length in cells
    #[arg(long, default_value_t = 3)]
    dimension: usize,

    /// Consecutive symbols needed to win; defaults to the board dimension
    #[arg(long)]
    win_length: Option<usize>,

    /// Logical updates per second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Where the log file is written
    #[arg(long, default_value = "play.log")]
    log_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let win_length = args.win_length.unwrap_or(args.dimension);

    // Fail fast on an impossible configuration before touching the terminal.
    minimax::Board::new(args.dimension, win_length)
        .context("invalid board configuration")?;

    init_logging(&args.log_file)?;
    info!(
        dimension = args.dimension,
        win_length,
        tick_rate = args.tick_rate,
        "starting tic-tac-toe"
    );

    let mut app = App::new(Context::new(args.dimension, win_length, args.tick_rate));
    tui::run(&mut app)?;

    info!("normal quit");
    Ok(())
}

/// Routes tracing output to a file so it does not interfere with the TUI.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
