//! Board data model

mod piece;
mod position;
mod rights;
mod square;

pub use piece::{Piece, PieceKind, Promotion, Side};
pub use position::{Position, STARTING_PLACEMENT};
pub use rights::{CastlingRights, Wing};
pub use square::{File, Rank, Square};
