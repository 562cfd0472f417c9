//! In-place make/unmake.
//!
//! `make_move` trusts its input: legality is the caller's business (see
//! `GameState::apply_move`). Every mutation it performs is reversed exactly by
//! `unmake_move` from the pushed `UndoState`.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::castling::{castle_rook_squares, update_castling_rights};
use crate::moves::move_descriptions::Move;

pub fn make_move(game_state: &mut GameState, mv: Move) {
    let moving_color = mv.piece_moved.color;
    let board = &mut game_state.board;

    board.set(mv.from, None);

    // En passant captures off the destination square.
    let captured_piece = mv.capture_square().and_then(|square| board.replace(square, None));

    let placed = match mv.promotion {
        Some(kind) => Piece::new(moving_color, kind),
        None => mv.piece_moved,
    };
    board.set(mv.to, Some(placed));

    if let Some((rook_from, rook_to)) = castle_rook_squares(&mv) {
        let rook = board.replace(rook_from, None);
        board.set(rook_to, rook);
    }

    if mv.is_king_move() {
        game_state.king_squares[moving_color.index()] = mv.to;
    }

    let record = UndoState {
        mv,
        captured_piece,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_target: game_state.en_passant_target,
    };

    game_state.en_passant_target = if mv.is_double_pawn_push() {
        Some(Square::new((mv.from.row + mv.to.row) / 2, mv.from.col))
    } else {
        None
    };
    update_castling_rights(&mut game_state.castling_rights, &mv);

    game_state.side_to_move = moving_color.opposite();
    game_state.history.push(record);

    game_state.legal_cache = None;
    game_state.checkmate = false;
    game_state.stalemate = false;
}

/// Reverse the most recent move. Returns `None` when there is nothing to undo.
pub fn unmake_move(game_state: &mut GameState) -> Option<UndoState> {
    let record = game_state.history.pop()?;
    let mv = record.mv;
    let board = &mut game_state.board;

    if let Some((rook_from, rook_to)) = castle_rook_squares(&mv) {
        let rook = board.replace(rook_to, None);
        board.set(rook_from, rook);
    }

    board.set(mv.to, None);
    if let Some(square) = mv.capture_square() {
        board.set(square, record.captured_piece);
    }
    board.set(mv.from, Some(mv.piece_moved));

    if mv.is_king_move() {
        game_state.king_squares[mv.piece_moved.color.index()] = mv.from;
    }

    game_state.castling_rights = record.prev_castling_rights;
    game_state.en_passant_target = record.prev_en_passant_target;
    game_state.side_to_move = mv.piece_moved.color;

    game_state.legal_cache = None;
    game_state.checkmate = false;
    game_state.stalemate = false;

    Some(record)
}
