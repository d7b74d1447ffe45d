//! Game session: turn order, resignation and the `play` entry point
//!
//! A [`Game`] owns its [`Position`] outright. Callers that share one across
//! threads must serialize `play` calls themselves (e.g. behind a `Mutex`), as a
//! call validates and mutates in one step.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Piece, Position, Side};
use crate::error::{IllegalMove, Result};
use crate::notation::{parse_move, ParsedMove};
use crate::rules::{self, MovePlan};

/// Result tag reported back to the caller alongside the board.
///
/// Absence of a message means the move was applied and play continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    IllegalMove,
    WhiteWinsByResignation,
    BlackWinsByResignation,
}

impl Message {
    fn resignation_win(winner: Side) -> Self {
        match winner {
            Side::White => Message::WhiteWinsByResignation,
            Side::Black => Message::BlackWinsByResignation,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Message::IllegalMove => "Illegal move, try again",
            Message::WhiteWinsByResignation => "Black resigns, White wins",
            Message::BlackWinsByResignation => "White resigns, Black wins",
        })
    }
}

/// What a `play` call hands back: the board after the call and its result tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub pieces: Vec<Piece>,
    pub message: Option<Message>,
}

impl MoveOutcome {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Resigned { winner: Side },
}

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    status: GameStatus,
}

impl Game {
    /// A new game from the standard setup, White to move.
    pub fn start() -> Self {
        Self::from_position(Position::standard())
    }

    /// A game continuing from an arbitrary position.
    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            status: GameStatus::InProgress,
        }
    }

    /// A game from the piece-placement field of a FEN string.
    pub fn from_placement(placement: &str, side_to_move: Side) -> Result<Self> {
        Ok(Self::from_position(Position::from_placement(placement, side_to_move)?))
    }

    /// Resets to the standard setup and clears every castling flag.
    pub fn restart(&mut self) {
        *self = Self::start();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Side {
        self.position.side_to_move()
    }

    /// Whether `side`'s king is currently attacked. Never consulted by `play`.
    pub fn in_check(&self, side: Side) -> bool {
        rules::in_check(&self.position, side)
    }

    /// Plays one command and reports the board plus a result tag.
    ///
    /// Any rejection, syntactic or semantic, leaves the position untouched and
    /// is reported as [`Message::IllegalMove`].
    pub fn play(&mut self, command: &str) -> MoveOutcome {
        let message = match self.try_play(command) {
            Ok(message) => message,
            Err(reason) => {
                debug!(command, %reason, side = %self.side_to_move(), "illegal move");
                Some(Message::IllegalMove)
            }
        };
        MoveOutcome {
            pieces: self.position.pieces().to_vec(),
            message,
        }
    }

    /// Like [`Game::play`], but keeps the precise rejection reason.
    pub fn try_play(&mut self, command: &str) -> std::result::Result<Option<Message>, IllegalMove> {
        if let GameStatus::Resigned { .. } = self.status {
            return Err(IllegalMove::GameOver);
        }

        let request = match parse_move(command)? {
            ParsedMove::Resign => {
                let winner = self.side_to_move().opponent();
                info!(loser = %self.side_to_move(), %winner, "resignation");
                self.status = GameStatus::Resigned { winner };
                return Ok(Some(Message::resignation_win(winner)));
            }
            ParsedMove::Move(request) => request,
        };

        let plan = rules::validate(&self.position, &request)?;
        if request.draw_offer {
            info!(side = %self.side_to_move(), "draw offered");
        }
        if let MovePlan::Castle { wing, .. } = plan {
            info!(side = %self.side_to_move(), ?wing, "castling");
        }

        rules::apply(&mut self.position, &plan);
        self.position.pass_turn();
        Ok(None)
    }

    /// Plays a sequence of commands, stopping at the first one that does not
    /// apply cleanly.
    pub fn replay<'a, I>(&mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for command in commands {
            self.try_play(command)?;
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::start()
    }
}
