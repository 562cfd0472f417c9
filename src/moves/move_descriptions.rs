//! Move value type.
//!
//! A `Move` fully describes one ply: both endpoints, the piece that moves,
//! what it captures, and the special-rule flags needed to apply and undo it
//! without consulting the board again.

use std::fmt;

use crate::game_state::chess_types::*;
use crate::utils::algebraic::file_letter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece_moved: Piece,
    /// For en passant this is the captured pawn, which does not sit on `to`.
    pub piece_captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// A quiet move or ordinary capture.
    #[inline]
    pub fn new(from: Square, to: Square, piece_moved: Piece, piece_captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece_moved,
            piece_captured,
            is_en_passant: false,
            is_castle: false,
            promotion: None,
        }
    }

    #[inline]
    pub fn promoting(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }

    #[inline]
    pub fn en_passant(from: Square, to: Square, pawn: Piece) -> Self {
        Self {
            is_en_passant: true,
            ..Self::new(
                from,
                to,
                pawn,
                Some(Piece::new(pawn.color.opposite(), PieceKind::Pawn)),
            )
        }
    }

    #[inline]
    pub fn castle(from: Square, to: Square, king: Piece) -> Self {
        Self {
            is_castle: true,
            ..Self::new(from, to, king, None)
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    #[inline]
    pub fn is_king_move(&self) -> bool {
        self.piece_moved.kind == PieceKind::King
    }

    /// Is this a two-square pawn advance?
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece_moved.kind == PieceKind::Pawn && self.from.row.abs_diff(self.to.row) == 2
    }

    /// Square the captured piece actually stands on. For en passant this is one
    /// row behind the destination, on the capturing pawn's origin row.
    #[inline]
    pub fn capture_square(&self) -> Option<Square> {
        if self.is_en_passant {
            Some(Square::new(self.from.row, self.to.col))
        } else if self.piece_captured.is_some() {
            Some(self.to)
        } else {
            None
        }
    }

    /// Castling wing, if this is a castle.
    pub fn castle_wing(&self) -> Option<CastleWing> {
        if !self.is_castle {
            return None;
        }
        if self.to.col > self.from.col {
            Some(CastleWing::Kingside)
        } else {
            Some(CastleWing::Queenside)
        }
    }

    /// Long coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn coordinate_notation(&self) -> String {
        let mut out = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            out.push(kind.letter().to_ascii_lowercase());
        }
        out
    }
}

/// Best-effort short display: piece letter, capture marker and destination.
/// No disambiguation and no check or mate suffixes.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.castle_wing() {
            Some(CastleWing::Kingside) => return f.write_str("O-O"),
            Some(CastleWing::Queenside) => return f.write_str("O-O-O"),
            None => {}
        }

        if self.piece_moved.kind == PieceKind::Pawn {
            if self.is_capture() {
                write!(f, "{}x", file_letter(self.from))?;
            }
            write!(f, "{}", self.to)?;
        } else {
            write!(f, "{}", self.piece_moved.kind.letter())?;
            if self.is_capture() {
                f.write_str("x")?;
            }
            write!(f, "{}", self.to)?;
        }

        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.letter())?;
        }
        Ok(())
    }
}
