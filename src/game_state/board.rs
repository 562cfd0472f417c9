//! 8×8 mailbox board.
//!
//! Cells are stored row-major with row 0 holding Dark's back rank. The board is
//! a plain value; bookkeeping that cannot be recovered from piece placement
//! (side to move, rights, en-passant target, history) lives on `GameState`.

use crate::chess_errors::{RulesError, RulesResult};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
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

        let mut board = Self::empty();
        for color in [Color::Light, Color::Dark] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.cells[color.back_row() as usize][col] = Some(Piece::new(color, *kind));
                board.cells[color.pawn_start_row() as usize][col] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, content: Option<Piece>) {
        self.cells[square.row as usize][square.col as usize] = content;
    }

    /// Store `content` on `square` and hand back what was there.
    #[inline]
    pub fn replace(&mut self, square: Square, content: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.cells[square.row as usize][square.col as usize],
            content,
        )
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Rows of the board, row 0 first.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }

    /// Every occupied square with its piece, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn find_kings(&self, color: Color) -> Vec<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces()
            .filter(|(_, piece)| *piece == king)
            .map(|(square, _)| square)
            .collect()
    }

    /// Build a board from placement text: rank 8 first, ranks separated by `/`,
    /// digits for runs of empty squares, `KQRBNP` for Light and lower case for
    /// Dark.
    pub fn from_placement(placement: &str) -> RulesResult<Board> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(RulesError::placement(format!(
                "placement must contain 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (row, rank_text) in ranks.iter().enumerate() {
            let mut col = 0usize;

            for ch in rank_text.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(RulesError::placement(format!(
                            "invalid empty-square count '{ch}'"
                        )));
                    }
                    col += run as usize;
                    continue;
                }

                let piece = Piece::from_letter(ch).ok_or_else(|| {
                    RulesError::placement(format!("invalid piece character '{ch}'"))
                })?;
                if col >= 8 {
                    return Err(RulesError::placement(format!(
                        "rank {} has too many files",
                        8 - row
                    )));
                }
                board.cells[row][col] = Some(piece);
                col += 1;
            }

            if col != 8 {
                return Err(RulesError::placement(format!(
                    "rank {} does not sum to 8 files",
                    8 - row
                )));
            }
        }

        Ok(board)
    }

    /// Inverse of [`Board::from_placement`].
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.cells.iter().enumerate() {
            let mut run = 0u8;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if run > 0 {
                            out.push(char::from(b'0' + run));
                            run = 0;
                        }
                        out.push(piece.letter());
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                out.push(char::from(b'0' + run));
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}
