//! The piece registry: pieces on the board, side to move and castling rights

use std::fmt;

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind, Side};
use super::rights::CastlingRights;
use super::square::{File, Rank, Square};
use crate::error::ParseError;

/// Piece placement of the standard starting position, in FEN.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// At most one piece stands on any square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pieces: Vec<Piece>,
    side_to_move: Side,
    rights: CastlingRights,
}

impl Position {
    /// The standard 32-piece setup, White to move, no rights spent.
    pub fn standard() -> Self {
        let mut pieces = Vec::with_capacity(32);

        for file in File::ALL {
            pieces.push(Piece::new(PieceKind::Pawn, Side::White, Square::new(file, Rank::SECOND)));
            pieces.push(Piece::new(PieceKind::Pawn, Side::Black, Square::new(file, Rank::SEVENTH)));
        }
        for side in [Side::White, Side::Black] {
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
                pieces.push(Piece::new(kind, side, Square::new(file, side.back_rank())));
            }
        }

        Self {
            pieces,
            side_to_move: Side::White,
            rights: CastlingRights::default(),
        }
    }

    /// Builds a position from the piece-placement field of a FEN string.
    ///
    /// Castling rights are derived from the placement: a side keeps a right only
    /// while its king and the matching rook stand on their home squares.
    pub fn from_placement(placement: &str, side_to_move: Side) -> Result<Self, ParseError> {
        let bad = |why: &str| ParseError::BadPlacement(format!("{why} in '{placement}'"));

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(bad("expected 8 ranks"));
        }

        let mut pieces = Vec::new();
        for (row, rank) in rows.iter().zip(Rank::all().rev()) {
            let mut file_index: u8 = 0;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) || file_index + skip as u8 > 8 {
                        return Err(bad("bad empty-square count"));
                    }
                    file_index += skip as u8;
                    continue;
                }
                let kind = PieceKind::from_letter(c).ok_or_else(|| bad("unknown piece letter"))?;
                let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
                let file = File::from_index(file_index).ok_or_else(|| bad("rank too long"))?;
                pieces.push(Piece::new(kind, side, Square::new(file, rank)));
                file_index += 1;
            }
            if file_index != 8 {
                return Err(bad("rank does not cover 8 files"));
            }
        }

        let mut position = Self {
            pieces,
            side_to_move,
            rights: CastlingRights::default(),
        };
        for side in [Side::White, Side::Black] {
            position.derive_rights(side);
        }
        Ok(position)
    }

    fn derive_rights(&mut self, side: Side) {
        let home = |file: File| Square::new(file, side.back_rank());
        let stands = |kind: PieceKind, file: File| {
            self.piece_at(home(file))
                .is_some_and(|p| p.kind == kind && p.side == side)
        };
        let king_home = stands(PieceKind::King, File::E);
        let kingside_rook = stands(PieceKind::Rook, File::H);
        let queenside_rook = stands(PieceKind::Rook, File::A);

        if !king_home {
            self.rights.forfeit_all(side);
            return;
        }
        if !kingside_rook {
            self.rights
                .record_departure(&Piece::new(PieceKind::Rook, side, home(File::H)));
        }
        if !queenside_rook {
            self.rights
                .record_departure(&Piece::new(PieceKind::Rook, side, home(File::A)));
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.side == side)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces
            .iter()
            .find(|p| p.side == side && p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn rights(&self) -> &CastlingRights {
        &self.rights
    }

    pub(crate) fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    pub(crate) fn remove_at(&mut self, square: Square) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.square == square)?;
        Some(self.pieces.remove(index))
    }

    /// Moves the piece on `from` to `to` and records the departure for
    /// castling rights. `to` must already be empty.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        debug_assert!(!self.is_occupied(to), "relocating onto occupied {to}");
        if let Some(piece) = self.pieces.iter_mut().find(|p| p.square == from) {
            self.rights.record_departure(piece);
            piece.square = to;
        }
    }

    pub(crate) fn promote(&mut self, square: Square, kind: PieceKind) {
        if let Some(piece) = self.pieces.iter_mut().find(|p| p.square == square) {
            piece.kind = kind;
        }
    }

    /// The piece-placement field of FEN for this position.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(64);
        for rank in Rank::all().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank != Rank::FIRST {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

/// Plain-text diagram, rank 8 at the top.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::all().rev() {
            write!(f, "{rank} ")?;
            for file in File::ALL {
                let c = match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => piece.fen_char(),
                    None if (file.index() + rank.get()) % 2 == 1 => '.',
                    None => ' ',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in File::ALL {
            write!(f, " {}", file.to_char())?;
        }
        writeln!(f)
    }
}
