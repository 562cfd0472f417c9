//! Core value types shared by the board, the move generator and the detector.
//!
//! Squares are addressed as `(row, col)` with row 0 holding Dark's back rank
//! (rank 8) and col 0 being the a-file, so `e2` is `(6, 4)`.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn advance for this color.
    #[inline]
    pub const fn pawn_forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// Row holding this color's king and rooks at the start of a game.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Row holding this color's pawns at the start of a game.
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    /// Row on which this color's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.opposite().back_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => write!(f, "light"),
            Color::Dark => write!(f, "dark"),
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Pieces a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Upper-case letter used in placement text and move strings.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Placement letter: upper case for Light, lower case for Dark.
    pub fn letter(self) -> char {
        match self.color {
            Color::Light => self.kind.letter(),
            Color::Dark => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_letter(letter: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(letter)?;
        let color = if letter.is_ascii_uppercase() {
            Color::Light
        } else {
            Color::Dark
        };
        Some(Piece::new(color, kind))
    }
}

/// Step between two squares, used for rays, knight jumps and check directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub d_row: i8,
    pub d_col: i8,
}

impl Offset {
    #[inline]
    pub const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        (self.d_row == 0) != (self.d_col == 0)
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.d_row != 0 && self.d_row.abs() == self.d_col.abs()
    }

    #[inline]
    pub const fn reversed(self) -> Self {
        Self::new(-self.d_row, -self.d_col)
    }
}

/// A board square, `row` 0..8 from Dark's back rank, `col` 0..8 from the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Construct a square; both coordinates must be below 8.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    /// The square `offset` away, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, offset: Offset) -> Option<Square> {
        self.offset_by(offset.d_row, offset.d_col)
    }

    #[inline]
    pub fn offset_by(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Row-major index `0..64`, a8 being 0.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::new(row, col)))
    }
}

/// One side of the board for castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleWing {
    Kingside,
    Queenside,
}

impl CastleWing {
    pub const BOTH: [CastleWing; 2] = [CastleWing::Kingside, CastleWing::Queenside];

    /// Column of this wing's rook at the start of a game.
    #[inline]
    pub const fn rook_origin_col(self) -> u8 {
        match self {
            CastleWing::Kingside => 7,
            CastleWing::Queenside => 0,
        }
    }

    /// Column step the king takes toward this wing's rook.
    #[inline]
    pub const fn king_step(self) -> i8 {
        match self {
            CastleWing::Kingside => 1,
            CastleWing::Queenside => -1,
        }
    }
}

pub const CASTLE_LIGHT_KINGSIDE: u8 = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: u8 = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: u8 = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: u8 = 1 << 3;

/// Compact castling rights bitmask.
///
/// Rights can only be removed once the game is running; the only way to grant
/// a right is at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(
        CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    );

    #[inline]
    const fn bit(color: Color, wing: CastleWing) -> u8 {
        match (color, wing) {
            (Color::Light, CastleWing::Kingside) => CASTLE_LIGHT_KINGSIDE,
            (Color::Light, CastleWing::Queenside) => CASTLE_LIGHT_QUEENSIDE,
            (Color::Dark, CastleWing::Kingside) => CASTLE_DARK_KINGSIDE,
            (Color::Dark, CastleWing::Queenside) => CASTLE_DARK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn has(self, color: Color, wing: CastleWing) -> bool {
        self.0 & Self::bit(color, wing) != 0
    }

    #[inline]
    pub fn clear(&mut self, color: Color, wing: CastleWing) {
        self.0 &= !Self::bit(color, wing);
    }

    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastleWing::Kingside);
        self.clear(color, CastleWing::Queenside);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parse rights text such as `KQkq`, `Kq` or `-`.
    pub fn parse(text: &str) -> Option<CastlingRights> {
        if text == "-" {
            return Some(CastlingRights::NONE);
        }
        if text.is_empty() {
            return None;
        }
        let mut bits = 0u8;
        for ch in text.chars() {
            let bit = match ch {
                'K' => CASTLE_LIGHT_KINGSIDE,
                'Q' => CASTLE_LIGHT_QUEENSIDE,
                'k' => CASTLE_DARK_KINGSIDE,
                'q' => CASTLE_DARK_QUEENSIDE,
                _ => return None,
            };
            if bits & bit != 0 {
                return None;
            }
            bits |= bit;
        }
        Some(CastlingRights(bits))
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (bit, ch) in [
            (CASTLE_LIGHT_KINGSIDE, 'K'),
            (CASTLE_LIGHT_QUEENSIDE, 'Q'),
            (CASTLE_DARK_KINGSIDE, 'k'),
            (CASTLE_DARK_QUEENSIDE, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
