//! Error types for chess-rules-core

use thiserror::Error;

use crate::board::{PieceKind, Square};

/// Why a command string could not be read as a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("expected a source and a destination square")]
    TooFewTokens,

    #[error("malformed square '{0}'")]
    BadSquare(String),

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("'resign' takes no arguments")]
    ResignWithArguments,

    #[error("bad piece placement: {0}")]
    BadPlacement(String),
}

/// A failed castling precondition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingFailure {
    #[error("the king has already moved")]
    KingMoved,

    #[error("the king's destination is occupied")]
    DestinationOccupied,

    #[error("no unmoved rook of the king's colour in the corner")]
    RookMissing,

    #[error("the rook has already moved")]
    RookMoved,

    #[error("pieces stand between king and rook")]
    PathBlocked,

    #[error("the king is in check")]
    KingInCheck,

    #[error("the king would cross or land on attacked square {0}")]
    PassesThroughAttack(Square),
}

/// Every reason a `play` call can be rejected.
///
/// All of these surface to callers as the single `Message::IllegalMove` tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("syntax: {0}")]
    Syntax(#[from] ParseError),

    #[error("no piece on {0}")]
    EmptySource(Square),

    #[error("the piece on {0} belongs to the opponent")]
    NotYourPiece(Square),

    #[error("cannot capture own piece on {0}")]
    OwnPieceOnTarget(Square),

    #[error("source and destination are the same square")]
    NullMove,

    #[error("a {kind} cannot move from {from} to {to}")]
    Geometry {
        kind: PieceKind,
        from: Square,
        to: Square,
    },

    #[error("path from {from} to {to} is blocked")]
    Blocked { from: Square, to: Square },

    #[error("castling: {0}")]
    Castling(#[from] CastlingFailure),

    #[error("the game is over")]
    GameOver,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Illegal move: {0}")]
    Illegal(#[from] IllegalMove),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
