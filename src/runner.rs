//! Text runner - drives a game from line commands
//!
//! Commands, one per line:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `rotate <x> <y> [cw\|ccw]` | rotate the 2x2 block at `(x, y)` (clockwise by default) |
//! | `hint` | list productive rotations |
//! | `show` | print the board |
//! | `score` | print the score |
//! | `quit` | stop |
//!
//! Blank lines and lines starting with `#` are ignored. A rejected move is
//! reported and the loop continues; the board is unchanged in that case.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};

use crate::core::{CascadeReport, GameSnapshot, MatchThreeGame, RotateSquare};
use crate::engine::find_productive_moves;
use crate::types::{Position, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rotate(RotateSquare),
    Hint,
    Show,
    Score,
    Quit,
}

/// Parse one input line; `Ok(None)` for blank and comment lines
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let command = match verb.to_lowercase().as_str() {
        "rotate" | "r" => {
            let mut coord = |name: &str| -> Result<i32> {
                let v = words
                    .next()
                    .ok_or_else(|| anyhow!("rotate: missing value for {}", name))?;
                v.parse::<i32>()
                    .map_err(|_| anyhow!("rotate: invalid {} value: {}", name, v))
            };
            let x = coord("x")?;
            let y = coord("y")?;
            let turn = match words.next() {
                Some(v) => Turn::from_str(v).ok_or_else(|| anyhow!("rotate: unknown turn: {}", v))?,
                None => Turn::Clockwise,
            };
            Command::Rotate(RotateSquare::new(Position::at(x, y), turn))
        }
        "hint" => Command::Hint,
        "show" => Command::Show,
        "score" => Command::Score,
        "quit" | "exit" => Command::Quit,
        other => return Err(anyhow!("unknown command: {}", other)),
    };

    if let Some(extra) = words.next() {
        return Err(anyhow!("unexpected argument: {}", extra));
    }
    Ok(Some(command))
}

/// Prints game state as plain text or JSON lines
pub struct Runner<W> {
    out: W,
    json: bool,
}

impl<W: Write> Runner<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Start `game` and execute every command from `input`
    pub fn run(&mut self, game: &mut MatchThreeGame, input: impl BufRead) -> Result<()> {
        let report = game.initialize_board_and_start()?;
        self.report(game, &report)?;

        for line in input.lines() {
            let line = line?;
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.out, "error: {}", e)?;
                    continue;
                }
            };

            match command {
                Command::Rotate(rotation) => match game.accept_move(&rotation) {
                    Ok(report) => self.report(game, &report)?,
                    Err(e) => {
                        tracing::warn!(error = %e, code = e.kind().code(), "move rejected");
                        writeln!(self.out, "error: {}", e)?;
                    }
                },
                Command::Hint => {
                    let hints =
                        find_productive_moves(game.board(), game.matcher(), game.config().min_match_size);
                    if hints.is_empty() {
                        writeln!(self.out, "no productive moves")?;
                    }
                    for hint in hints {
                        let origin = hint.rotation.origin;
                        writeln!(
                            self.out,
                            "rotate {} {} {}  # {} group(s), largest {}",
                            origin.x,
                            origin.y,
                            hint.rotation.turn.as_str(),
                            hint.groups,
                            hint.largest
                        )?;
                    }
                }
                Command::Show => self.show(game)?,
                Command::Score => writeln!(self.out, "score {}", game.score())?,
                Command::Quit => break,
            }
        }
        Ok(())
    }

    fn report(&mut self, game: &MatchThreeGame, report: &CascadeReport) -> Result<()> {
        if self.json {
            return self.show(game);
        }
        if report.reverted {
            writeln!(self.out, "no match, move reverted")?;
        }
        for round in &report.rounds {
            writeln!(
                self.out,
                "round {}: {} group(s), +{}",
                round.round,
                round.groups.len(),
                round.points
            )?;
        }
        self.show(game)
    }

    fn show(&mut self, game: &MatchThreeGame) -> Result<()> {
        if self.json {
            let snapshot = GameSnapshot::from(game);
            serde_json::to_writer(&mut self.out, &snapshot)?;
            writeln!(self.out)?;
            return Ok(());
        }
        for row in game.board().rows() {
            writeln!(self.out, "|{}|", row)?;
        }
        writeln!(self.out, "score {}", game.score())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rotate() {
        assert_eq!(
            parse_command("rotate 0 1 ccw").unwrap(),
            Some(Command::Rotate(RotateSquare::counter_clockwise(Position::at(0, 1))))
        );
        assert_eq!(
            parse_command("  r 2 3").unwrap(),
            Some(Command::Rotate(RotateSquare::clockwise(Position::at(2, 3))))
        );
    }

    #[test]
    fn test_parse_ignores_blank_and_comments() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   # note").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command("rotate 1").unwrap_err().to_string(),
            "rotate: missing value for y"
        );
        assert_eq!(
            parse_command("rotate a 1").unwrap_err().to_string(),
            "rotate: invalid x value: a"
        );
        assert_eq!(
            parse_command("rotate 1 1 up").unwrap_err().to_string(),
            "rotate: unknown turn: up"
        );
        assert_eq!(
            parse_command("show now").unwrap_err().to_string(),
            "unexpected argument: now"
        );
        assert_eq!(parse_command("jump").unwrap_err().to_string(), "unknown command: jump");
    }
}
