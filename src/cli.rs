use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const USAGE: &str = "usage: match-three <game.toml> [--json]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub game_file: PathBuf,
    /// Print JSON snapshots instead of text boards
    pub json: bool,
}

pub fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut game_file = None;
    let mut json = false;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            flag if flag.starts_with("--") => {
                return Err(anyhow!("unknown argument: {}", flag));
            }
            path => {
                if game_file.is_some() {
                    return Err(anyhow!("unexpected argument: {}", path));
                }
                game_file = Some(PathBuf::from(path));
            }
        }
    }

    let game_file = game_file.ok_or_else(|| anyhow!("missing game file\n{}", USAGE))?;
    Ok(RunConfig { game_file, json })
}
