//! Castling legality, rook relocation and rights bookkeeping.
//!
//! A wing is offered when its right is held, the king is not in check, the two
//! squares the king crosses are empty and unattacked, and (queenside) the
//! square next to the rook is empty. Rights are only ever cleared.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_safe_on;
use crate::moves::move_descriptions::Move;

/// Append castle moves for `side`. The caller guarantees the king on `king` is
/// not in check.
pub fn generate_castle_moves(
    game_state: &mut GameState,
    side: Color,
    king: Square,
    out: &mut Vec<Move>,
) {
    for wing in CastleWing::BOTH {
        if !game_state.castling_rights.has(side, wing) {
            continue;
        }
        if let Some(mv) = castle_candidate(game_state, side, king, wing) {
            out.push(mv);
        }
    }
}

fn castle_candidate(
    game_state: &mut GameState,
    side: Color,
    king: Square,
    wing: CastleWing,
) -> Option<Move> {
    let row = side.back_row();
    if king != Square::new(row, 4) {
        return None;
    }
    let rook_origin = Square::new(row, wing.rook_origin_col());
    if game_state.board.get(rook_origin) != Some(Piece::new(side, PieceKind::Rook)) {
        return None;
    }

    let step = wing.king_step();
    let crossed = [king.offset_by(0, step)?, king.offset_by(0, 2 * step)?];
    for square in crossed {
        if !game_state.board.is_empty(square)
            || !is_king_safe_on(&mut game_state.board, side, king, square)
        {
            return None;
        }
    }

    // Queenside the rook also passes b1/b8, which may be attacked.
    if wing == CastleWing::Queenside && !game_state.board.is_empty(king.offset_by(0, -3)?) {
        return None;
    }

    Some(Move::castle(king, crossed[1], Piece::new(side, PieceKind::King)))
}

/// Rook origin and destination for a castle move.
pub fn castle_rook_squares(mv: &Move) -> Option<(Square, Square)> {
    let wing = mv.castle_wing()?;
    let row = mv.from.row;
    let rook_to = match wing {
        CastleWing::Kingside => 5,
        CastleWing::Queenside => 3,
    };
    Some((
        Square::new(row, wing.rook_origin_col()),
        Square::new(row, rook_to),
    ))
}

/// Which wing, if any, has its rook starting on `square` for `color`.
fn rook_origin_wing(color: Color, square: Square) -> Option<CastleWing> {
    if square.row != color.back_row() {
        return None;
    }
    CastleWing::BOTH
        .into_iter()
        .find(|wing| wing.rook_origin_col() == square.col)
}

/// Clear every right the move forfeits: a king move clears both wings, a rook
/// leaving or being captured on its origin square clears that wing.
pub fn update_castling_rights(rights: &mut CastlingRights, mv: &Move) {
    let mover = mv.piece_moved.color;

    match mv.piece_moved.kind {
        PieceKind::King => rights.clear_color(mover),
        PieceKind::Rook => {
            if let Some(wing) = rook_origin_wing(mover, mv.from) {
                rights.clear(mover, wing);
            }
        }
        _ => {}
    }

    if let Some(captured) = mv.piece_captured {
        if captured.kind == PieceKind::Rook {
            if let Some(wing) = rook_origin_wing(captured.color, mv.to) {
                rights.clear(captured.color, wing);
            }
        }
    }
}
