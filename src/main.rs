//! Match-three runner (default binary).
//!
//! Loads a game file, starts the game and reads commands from stdin.
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use match_three::cli::{parse_args, USAGE};
use match_three::config::GameFile;
use match_three::runner::Runner;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }
    let config = parse_args(&args)?;

    let file = GameFile::load(&config.game_file)
        .with_context(|| format!("loading {}", config.game_file.display()))?;
    let mut game = file.build()?;
    tracing::info!(
        width = game.board().width(),
        height = game.board().height(),
        "game loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut runner = Runner::new(stdout.lock(), config.json);
    runner.run(&mut game, stdin.lock())
}
