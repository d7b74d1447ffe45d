//! Castling rights bookkeeping
//!
//! The flags record whether a king or corner rook has ever left its home square.
//! They only ever go from `false` to `true`; whether castling is actually possible
//! also depends on the path and attack state, which is checked at castling time.

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind, Side};
use super::square::File;

/// Which side of the board a castle goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wing {
    Kingside,
    Queenside,
}

impl Wing {
    /// File of the rook that castles on this wing.
    pub fn rook_file(self) -> File {
        match self {
            Wing::Kingside => File::H,
            Wing::Queenside => File::A,
        }
    }

    /// File the king crosses, where the rook lands.
    pub fn transit_file(self) -> File {
        match self {
            Wing::Kingside => File::F,
            Wing::Queenside => File::D,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SideFlags {
    king_moved: bool,
    kingside_rook_moved: bool,
    queenside_rook_moved: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    white: SideFlags,
    black: SideFlags,
}

impl CastlingRights {
    fn flags(&self, side: Side) -> &SideFlags {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    fn flags_mut(&mut self, side: Side) -> &mut SideFlags {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    pub fn king_moved(&self, side: Side) -> bool {
        self.flags(side).king_moved
    }

    pub fn rook_moved(&self, side: Side, wing: Wing) -> bool {
        let flags = self.flags(side);
        match wing {
            Wing::Kingside => flags.kingside_rook_moved,
            Wing::Queenside => flags.queenside_rook_moved,
        }
    }

    /// Records that `piece` is leaving its current square.
    ///
    /// Must be called with the piece as it stands *before* relocation, since a
    /// rook only forfeits a right when it departs from its corner.
    pub fn record_departure(&mut self, piece: &Piece) {
        let flags = self.flags_mut(piece.side);
        match piece.kind {
            PieceKind::King => flags.king_moved = true,
            PieceKind::Rook if piece.square.rank == piece.side.back_rank() => {
                match piece.square.file {
                    File::A => flags.queenside_rook_moved = true,
                    File::H => flags.kingside_rook_moved = true,
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Marks every right of `side` as spent, for positions set up mid-game.
    pub fn forfeit_all(&mut self, side: Side) {
        *self.flags_mut(side) = SideFlags {
            king_moved: true,
            kingside_rook_moved: true,
            queenside_rook_moved: true,
        };
    }
}
