//! Per-piece move legality and board mutation
//!
//! Validation is pure and produces a [`MovePlan`]; only [`apply`] touches the
//! position, so a rejected move can never leave a half-applied board behind.

use tracing::trace;

use crate::board::{Piece, PieceKind, Position, Square, Wing};
use crate::error::IllegalMove;
use crate::notation::MoveRequest;

use super::castling::plan_castle;
use super::ray::path_clear;

/// A validated move, ready to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePlan {
    Normal {
        from: Square,
        to: Square,
        capture: Option<Piece>,
        promotion: Option<PieceKind>,
    },
    Castle {
        wing: Wing,
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
}

/// Checks `request` against the position and the side to move.
pub fn validate(position: &Position, request: &MoveRequest) -> Result<MovePlan, IllegalMove> {
    let (from, to) = (request.from, request.to);

    let piece = *position.piece_at(from).ok_or(IllegalMove::EmptySource(from))?;
    if piece.side != position.side_to_move() {
        return Err(IllegalMove::NotYourPiece(from));
    }
    if from == to {
        return Err(IllegalMove::NullMove);
    }

    let target = position.piece_at(to).copied();
    if target.is_some_and(|t| t.side == piece.side) {
        return Err(IllegalMove::OwnPieceOnTarget(to));
    }

    let geometry = IllegalMove::Geometry {
        kind: piece.kind,
        from,
        to,
    };
    let (df, dr) = from.delta(to);
    let (file_dist, rank_dist) = (df.unsigned_abs(), dr.unsigned_abs());
    let normal = |promotion| MovePlan::Normal {
        from,
        to,
        capture: target,
        promotion,
    };

    match piece.kind {
        PieceKind::Pawn => pawn_move(position, &piece, request, target.is_some()).map(normal),
        PieceKind::Knight => match (file_dist, rank_dist) {
            (1, 2) | (2, 1) => Ok(normal(None)),
            _ => Err(geometry),
        },
        PieceKind::Bishop => {
            if file_dist != rank_dist {
                return Err(geometry);
            }
            slide(position, from, to).map(|_| normal(None))
        }
        PieceKind::Rook => {
            if df != 0 && dr != 0 {
                return Err(geometry);
            }
            slide(position, from, to).map(|_| normal(None))
        }
        PieceKind::Queen => {
            let straight = df == 0 || dr == 0;
            if !straight && file_dist != rank_dist {
                return Err(geometry);
            }
            slide(position, from, to).map(|_| normal(None))
        }
        PieceKind::King => {
            if rank_dist == 0 && file_dist == 2 {
                return plan_castle(position, &piece, to).map_err(IllegalMove::from);
            }
            if file_dist > 1 || rank_dist > 1 {
                return Err(geometry);
            }
            Ok(normal(None))
        }
    }
}

fn slide(position: &Position, from: Square, to: Square) -> Result<(), IllegalMove> {
    if path_clear(position, from, to) {
        Ok(())
    } else {
        Err(IllegalMove::Blocked { from, to })
    }
}

/// Returns the kind the pawn becomes on arrival, if it promotes.
fn pawn_move(
    position: &Position,
    pawn: &Piece,
    request: &MoveRequest,
    capturing: bool,
) -> Result<Option<PieceKind>, IllegalMove> {
    let (from, to) = (request.from, request.to);
    let forward = pawn.side.pawn_direction();
    let (df, dr) = from.delta(to);
    let geometry = IllegalMove::Geometry {
        kind: PieceKind::Pawn,
        from,
        to,
    };

    if capturing {
        if df.abs() != 1 || dr != forward {
            return Err(geometry);
        }
    } else if df != 0 {
        return Err(geometry);
    } else if dr == 2 * forward {
        if from.rank != pawn.side.pawn_start_rank() {
            return Err(geometry);
        }
        slide(position, from, to)?;
    } else if dr != forward {
        return Err(geometry);
    }

    let promotes = to.rank == pawn.side.promotion_rank();
    Ok(promotes.then(|| request.promotion.unwrap_or_default().kind()))
}

/// Applies a validated plan: capture, relocation, promotion and rights
/// bookkeeping. Does not pass the turn.
pub fn apply(position: &mut Position, plan: &MovePlan) {
    match *plan {
        MovePlan::Normal {
            from,
            to,
            capture,
            promotion,
        } => {
            if let Some(captured) = capture {
                position.remove_at(captured.square);
            }
            position.relocate(from, to);
            if let Some(kind) = promotion {
                position.promote(to, kind);
            }
            trace!(%from, %to, captured = ?capture.map(|p| p.kind), ?promotion, "move applied");
        }
        MovePlan::Castle {
            wing,
            king_from,
            king_to,
            rook_from,
            rook_to,
        } => {
            position.relocate(king_from, king_to);
            position.relocate(rook_from, rook_to);
            trace!(?wing, %king_from, %king_to, "castled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Promotion, Side};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn req(from: &str, to: &str) -> MoveRequest {
        MoveRequest {
            from: sq(from),
            to: sq(to),
            promotion: None,
            draw_offer: false,
        }
    }

    fn pos(placement: &str, side: Side) -> Position {
        Position::from_placement(placement, side).unwrap()
    }

    fn check(position: &Position, from: &str, to: &str) -> Result<MovePlan, IllegalMove> {
        validate(position, &req(from, to))
    }

    #[test]
    fn test_ownership_guards() {
        let p = Position::standard();
        assert_eq!(check(&p, "e4", "e5"), Err(IllegalMove::EmptySource(sq("e4"))));
        assert_eq!(check(&p, "e7", "e5"), Err(IllegalMove::NotYourPiece(sq("e7"))));
        assert_eq!(check(&p, "a1", "a2"), Err(IllegalMove::OwnPieceOnTarget(sq("a2"))));
        assert_eq!(check(&p, "e2", "e2"), Err(IllegalMove::NullMove));
    }

    #[test]
    fn test_pawn_pushes() {
        let p = Position::standard();
        assert!(check(&p, "e2", "e3").is_ok());
        assert!(check(&p, "e2", "e4").is_ok());
        assert!(matches!(check(&p, "e2", "e5"), Err(IllegalMove::Geometry { .. })));
        assert!(matches!(check(&p, "e2", "d3"), Err(IllegalMove::Geometry { .. })));

        let p = pos("4k3/8/8/8/8/4P3/8/4K3", Side::White);
        assert!(matches!(check(&p, "e3", "e5"), Err(IllegalMove::Geometry { .. })));
        assert!(matches!(check(&p, "e3", "e2"), Err(IllegalMove::Geometry { .. })));
        assert!(matches!(check(&p, "e3", "f3"), Err(IllegalMove::Geometry { .. })));
    }

    #[test]
    fn test_pawn_blocked() {
        let p = pos("4k3/8/8/8/8/4n3/4P3/4K3", Side::White);
        assert_eq!(
            check(&p, "e2", "e4"),
            Err(IllegalMove::Blocked { from: sq("e2"), to: sq("e4") })
        );
        // A pawn never captures straight ahead.
        assert!(matches!(check(&p, "e2", "e3"), Err(IllegalMove::Geometry { .. })));
    }

    #[test]
    fn test_pawn_captures() {
        let p = pos("4k3/8/8/8/8/3p1p2/4P3/4K3", Side::White);
        let plan = check(&p, "e2", "d3").unwrap();
        assert!(matches!(plan, MovePlan::Normal { capture: Some(c), .. } if c.square == sq("d3")));
        assert!(check(&p, "e2", "f3").is_ok());

        let p = pos("4k3/4p3/3P4/8/8/8/8/4K3", Side::Black);
        assert!(check(&p, "e7", "d6").is_ok());
        assert!(check(&p, "e7", "e5").is_ok());
    }

    #[test]
    fn test_promotion_choice() {
        let p = pos("4k3/P7/8/8/8/8/8/4K3", Side::White);
        let plan = check(&p, "a7", "a8").unwrap();
        assert!(matches!(plan, MovePlan::Normal { promotion: Some(PieceKind::Queen), .. }));

        let mut under = req("a7", "a8");
        under.promotion = Some(Promotion::Knight);
        let plan = validate(&p, &under).unwrap();
        assert!(matches!(plan, MovePlan::Normal { promotion: Some(PieceKind::Knight), .. }));

        // A promotion letter on an ordinary push is ignored.
        let p = pos("4k3/8/8/8/8/8/P7/4K3", Side::White);
        let mut early = req("a2", "a3");
        early.promotion = Some(Promotion::Rook);
        let plan = validate(&p, &early).unwrap();
        assert!(matches!(plan, MovePlan::Normal { promotion: None, .. }));
    }

    #[test]
    fn test_knight_jumps() {
        let p = Position::standard();
        assert!(check(&p, "g1", "f3").is_ok());
        assert!(check(&p, "b1", "c3").is_ok());
        assert!(matches!(check(&p, "g1", "g3"), Err(IllegalMove::Geometry { .. })));
        assert!(matches!(check(&p, "b1", "d3"), Err(IllegalMove::Geometry { .. })));
    }

    #[test]
    fn test_bishop_lines() {
        let p = pos("4k3/8/8/3p4/8/8/8/2B1K3", Side::White);
        assert!(check(&p, "c1", "h6").is_ok());
        assert!(check(&p, "c1", "a3").is_ok());
        assert!(matches!(check(&p, "c1", "c4"), Err(IllegalMove::Geometry { .. })));
        assert!(matches!(check(&p, "c1", "e4"), Err(IllegalMove::Geometry { .. })));
    }

    #[test]
    fn test_bishop_blocked_in_every_direction() {
        let p = pos("4k3/1p3p2/8/3B4/8/1P3P2/8/4K3", Side::White);
        for to in ["a8", "h1"] {
            assert!(matches!(check(&p, "d5", to), Err(IllegalMove::Blocked { .. })), "{to}");
        }
        assert!(matches!(check(&p, "d5", "a2"), Err(IllegalMove::Blocked { .. })));
        assert!(matches!(check(&p, "d5", "g8"), Err(IllegalMove::Blocked { .. })));
        assert!(check(&p, "d5", "b7").is_ok());
        assert!(matches!(check(&p, "d5", "b3"), Err(IllegalMove::OwnPieceOnTarget(_))));
    }

    #[test]
    fn test_rook_lines() {
        let p = pos("4k3/8/8/8/r7/8/8/R3K3", Side::White);
        assert!(check(&p, "a1", "a4").is_ok());
        assert!(check(&p, "a1", "d1").is_ok());
        assert!(matches!(check(&p, "a1", "a5"), Err(IllegalMove::Blocked { .. })));
        assert!(matches!(check(&p, "a1", "f1"), Err(IllegalMove::Blocked { .. })));
        assert!(matches!(check(&p, "a1", "b2"), Err(IllegalMove::Geometry { .. })));
    }

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        let p = pos("4k3/8/8/8/3Q4/8/5p2/4K3", Side::White);
        assert!(check(&p, "d4", "d8").is_ok());
        assert!(check(&p, "d4", "a4").is_ok());
        assert!(check(&p, "d4", "a7").is_ok());
        assert!(check(&p, "d4", "f2").is_ok());
        assert!(matches!(check(&p, "d4", "e6"), Err(IllegalMove::Geometry { .. })));
        assert!(matches!(check(&p, "d4", "g1"), Err(IllegalMove::Blocked { .. })));
    }

    #[test]
    fn test_king_steps() {
        let p = pos("4k3/8/8/8/8/8/8/4K3", Side::White);
        for to in ["d1", "d2", "e2", "f2", "f1"] {
            assert!(check(&p, "e1", to).is_ok(), "{to}");
        }
        assert!(matches!(check(&p, "e1", "e3"), Err(IllegalMove::Geometry { .. })));
        assert!(matches!(check(&p, "e1", "g1"), Err(IllegalMove::Castling(_))));
    }

    #[test]
    fn test_apply_capture_and_promotion() {
        let mut p = pos("1n2k3/P7/8/8/8/8/8/4K3", Side::White);
        let mut request = req("a7", "b8");
        request.promotion = Some(Promotion::Rook);
        let plan = validate(&p, &request).unwrap();
        apply(&mut p, &plan);

        let promoted = p.piece_at(sq("b8")).unwrap();
        assert_eq!((promoted.kind, promoted.side), (PieceKind::Rook, Side::White));
        assert_eq!(p.pieces().len(), 3);
        assert!(p.piece_at(sq("a7")).is_none());
    }

    #[test]
    fn test_apply_castle_moves_both_pieces() {
        let mut p = pos("4k3/8/8/8/8/8/8/R3K3", Side::White);
        let plan = check(&p, "e1", "c1").unwrap();
        apply(&mut p, &plan);
        assert_eq!(p.board_fen(), "4k3/8/8/8/8/8/8/2KR4");
        assert!(p.rights().king_moved(Side::White));
        assert!(p.rights().rook_moved(Side::White, Wing::Queenside));
    }
}
