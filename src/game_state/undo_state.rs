use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Single undo record for `apply_move` / `undo_move`.
///
/// Castling rights and the en-passant target cannot be recovered from the
/// board, so the values in force before the move are stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub captured_piece: Option<Piece>,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_target: Option<Square>,
}
