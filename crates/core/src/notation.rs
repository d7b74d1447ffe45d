//! Coordinate-notation command parsing
//!
//! Grammar, after trimming surrounding whitespace:
//!
//! ```text
//! resign
//! <from> <to> [Q|R|B|N] [draw?]
//! ```
//!
//! Squares are a file letter (either case) followed by a rank digit.

use serde::{Deserialize, Serialize};

use crate::board::{Promotion, Square};
use crate::error::ParseError;

const RESIGN: &str = "resign";
const DRAW_OFFER: &str = "draw?";

/// A move between two squares, as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Only consulted when a pawn reaches the far rank; `None` means queen.
    pub promotion: Option<Promotion>,
    pub draw_offer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParsedMove {
    Resign,
    Move(MoveRequest),
}

pub fn parse_move(raw: &str) -> Result<ParsedMove, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    if trimmed == RESIGN {
        return Ok(ParsedMove::Resign);
    }

    let mut tokens = trimmed.split_whitespace().peekable();
    if tokens.peek() == Some(&RESIGN) {
        return Err(ParseError::ResignWithArguments);
    }

    let (Some(from), Some(to)) = (tokens.next(), tokens.next()) else {
        return Err(ParseError::TooFewTokens);
    };
    let from: Square = from.parse()?;
    let to: Square = to.parse()?;

    let promotion = tokens.peek().and_then(|t| Promotion::from_token(t));
    if promotion.is_some() {
        tokens.next();
    }
    let draw_offer = tokens.next_if_eq(&DRAW_OFFER).is_some();

    if let Some(extra) = tokens.next() {
        return Err(ParseError::UnexpectedToken(extra.to_string()));
    }

    Ok(ParsedMove::Move(MoveRequest {
        from,
        to,
        promotion,
        draw_offer,
    }))
}
