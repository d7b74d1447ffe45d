//! Chess Rules Core Library
//!
//! Validates coordinate-notation moves ("e2 e4", "e7 e8 Q", "resign") against
//! the piece-movement, obstruction, capture, castling and promotion rules and
//! applies the accepted ones to an owned [`Position`].
//!
//! Check, checkmate and stalemate are not enforced: a move that leaves one's own
//! king attacked is accepted, and only castling consults square attacks.

pub mod board;
pub mod error;
pub mod game;
pub mod notation;
pub mod rules;

pub use board::{Piece, PieceKind, Position, Promotion, Side, Square};
pub use error::{Error, IllegalMove, ParseError, Result};
pub use game::{Game, GameStatus, Message, MoveOutcome};
pub use notation::{parse_move, MoveRequest, ParsedMove};
