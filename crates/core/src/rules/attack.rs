//! Square attack detection
//!
//! An attack is judged purely by the attacker's capture geometry: pawns hit one
//! square diagonally forward whether or not anything stands there, knights and
//! kings use fixed offsets, sliders need a clear line.

use crate::board::{Piece, PieceKind, Position, Side, Square};

use super::ray::path_clear;

/// Whether `attacker` could capture on `target` by its own movement rules.
pub fn attacks(position: &Position, attacker: &Piece, target: Square) -> bool {
    let (df, dr) = attacker.square.delta(target);
    let (file_dist, rank_dist) = (df.unsigned_abs(), dr.unsigned_abs());

    match attacker.kind {
        PieceKind::Pawn => file_dist == 1 && dr == attacker.side.pawn_direction(),
        PieceKind::Knight => matches!((file_dist, rank_dist), (1, 2) | (2, 1)),
        PieceKind::King => file_dist <= 1 && rank_dist <= 1 && (file_dist, rank_dist) != (0, 0),
        PieceKind::Bishop => file_dist == rank_dist && path_clear(position, attacker.square, target),
        PieceKind::Rook => (df == 0 || dr == 0) && path_clear(position, attacker.square, target),
        PieceKind::Queen => path_clear(position, attacker.square, target),
    }
}

/// Squares holding pieces of `by` that attack `target`.
pub fn attackers(position: &Position, target: Square, by: Side) -> Vec<Square> {
    position
        .pieces_of(by)
        .filter(|p| attacks(position, p, target))
        .map(|p| p.square)
        .collect()
}

/// True iff any piece of `defender`'s opponent attacks `target`.
pub fn is_attacked(position: &Position, target: Square, defender: Side) -> bool {
    position
        .pieces_of(defender.opponent())
        .any(|p| attacks(position, p, target))
}

/// Whether `side`'s king stands on an attacked square.
///
/// Informational only: move legality never consults it outside castling.
pub fn in_check(position: &Position, side: Side) -> bool {
    position
        .king_square(side)
        .is_some_and(|king| is_attacked(position, king, side))
}
