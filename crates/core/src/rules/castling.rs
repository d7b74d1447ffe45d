//! Castling preconditions

use crate::board::{Piece, PieceKind, Position, Square, Wing};
use crate::error::CastlingFailure;

use super::attack::is_attacked;
use super::legality::MovePlan;
use super::ray::path_clear;

/// Checks a two-file king move against every castling precondition.
///
/// `king` is the piece being moved and `to` its requested destination, on the
/// king's own rank.
pub(crate) fn plan_castle(
    position: &Position,
    king: &Piece,
    to: Square,
) -> Result<MovePlan, CastlingFailure> {
    let side = king.side;
    let rights = position.rights();

    if rights.king_moved(side) {
        return Err(CastlingFailure::KingMoved);
    }
    if position.is_occupied(to) {
        return Err(CastlingFailure::DestinationOccupied);
    }

    let wing = if to.file > king.square.file {
        Wing::Kingside
    } else {
        Wing::Queenside
    };

    let rook_from = king.square.with_file(wing.rook_file());
    match position.piece_at(rook_from) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.side == side => {}
        _ => return Err(CastlingFailure::RookMissing),
    }
    if rights.rook_moved(side, wing) {
        return Err(CastlingFailure::RookMoved);
    }

    if !path_clear(position, king.square, rook_from) {
        return Err(CastlingFailure::PathBlocked);
    }

    if is_attacked(position, king.square, side) {
        return Err(CastlingFailure::KingInCheck);
    }

    let transit = king.square.with_file(wing.transit_file());
    for square in [transit, to] {
        if is_attacked(position, square, side) {
            return Err(CastlingFailure::PassesThroughAttack(square));
        }
    }

    Ok(MovePlan::Castle {
        wing,
        king_from: king.square,
        king_to: to,
        rook_from,
        rook_to: transit,
    })
}
