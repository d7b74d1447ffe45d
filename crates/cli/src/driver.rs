//! Line-oriented driver around a `Game`

use std::io::{BufRead, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use chess_rules_core::{Game, Message, MoveOutcome, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Redraw the board after every command, with a prompt when interactive.
    Board { prompt: bool },
    /// One JSON object per command.
    Json,
}

#[derive(Serialize)]
struct Record<'a> {
    ply: u32,
    command: &'a str,
    #[serde(flatten)]
    outcome: &'a MoveOutcome,
}

pub struct Driver {
    game: Game,
    mode: OutputMode,
    keep_playing: bool,
    ply: u32,
}

impl Driver {
    pub fn new(mode: OutputMode, keep_playing: bool) -> Self {
        Self {
            game: Game::start(),
            mode,
            keep_playing,
            ply: 0,
        }
    }

    #[cfg(test)]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Feeds every non-blank line of `input` to the game until input runs out
    /// or a resignation ends the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        self.show_board(&mut out)?;
        self.prompt(&mut out)?;

        for line in input.lines() {
            let line = line?;
            let command = line.trim();
            if command.is_empty() {
                self.prompt(&mut out)?;
                continue;
            }

            let outcome = self.game.play(command);
            if outcome.message.is_none() {
                self.ply += 1;
            }
            self.report(&mut out, command, &outcome)?;

            if matches!(
                outcome.message,
                Some(Message::WhiteWinsByResignation | Message::BlackWinsByResignation)
            ) {
                if !self.keep_playing {
                    break;
                }
                info!("starting a new game");
                self.game.restart();
                self.ply = 0;
                self.show_board(&mut out)?;
            }
            self.prompt(&mut out)?;
        }

        out.flush()?;
        Ok(())
    }

    fn report<W: Write>(&self, out: &mut W, command: &str, outcome: &MoveOutcome) -> Result<()> {
        match self.mode {
            OutputMode::Json => {
                let record = Record {
                    ply: self.ply,
                    command,
                    outcome,
                };
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            }
            OutputMode::Board { .. } => {
                if let Some(message) = outcome.message {
                    writeln!(out, "{message}")?;
                }
                if outcome.message != Some(Message::IllegalMove) {
                    self.show_board(out)?;
                }
            }
        }
        Ok(())
    }

    fn show_board<W: Write>(&self, out: &mut W) -> Result<()> {
        if let OutputMode::Board { .. } = self.mode {
            writeln!(out)?;
            write!(out, "{}", self.game.position())?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        if let OutputMode::Board { prompt: true } = self.mode {
            let side = match self.game.side_to_move() {
                Side::White => "White",
                Side::Black => "Black",
            };
            write!(out, "{side}'s move: ")?;
            out.flush()?;
        }
        Ok(())
    }
}
