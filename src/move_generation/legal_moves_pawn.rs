//! Pawn move generation.
//!
//! Single and double advances, diagonal captures, promotions (one move per
//! promotion piece) and en passant. En passant is checked by trial: both pawns
//! are lifted, the capturer is set down on the target square and the detector
//! is rerun from the king. This catches the rank pin where the two pawns are
//! the only pieces between the king and a rook or queen, on either side, as
//! well as a diagonal line that only the captured pawn was blocking.

use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::scan_checks_and_pins;
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::pawn_capture_offsets;

pub fn generate_pawn_moves(
    game_state: &mut GameState,
    ctx: &GenerationContext<'_>,
    from: Square,
    out: &mut Vec<Move>,
) {
    let side = ctx.side;
    let pawn = Piece::new(side, PieceKind::Pawn);
    let forward = side.pawn_forward();

    if let Some(one_step) = from.offset_by(forward, 0) {
        if game_state.board.is_empty(one_step) && ctx.pin_allows(from, one_step) {
            push_with_promotions(Move::new(from, one_step, pawn, None), side, out);

            if from.row == side.pawn_start_row() {
                if let Some(two_step) = one_step.offset_by(forward, 0) {
                    if game_state.board.is_empty(two_step) {
                        out.push(Move::new(from, two_step, pawn, None));
                    }
                }
            }
        }
    }

    for offset in pawn_capture_offsets(side) {
        let Some(to) = from.offset(offset) else {
            continue;
        };
        if !ctx.pin_allows(from, to) {
            continue;
        }

        match game_state.board.get(to) {
            Some(target) if target.color != side => {
                push_with_promotions(Move::new(from, to, pawn, Some(target)), side, out);
            }
            Some(_) => {}
            None if game_state.en_passant_target == Some(to) => {
                let mv = Move::en_passant(from, to, pawn);
                if en_passant_is_safe(&mut game_state.board, ctx.king, side, &mv) {
                    out.push(mv);
                }
            }
            None => {}
        }
    }
}

fn push_with_promotions(mv: Move, side: Color, out: &mut Vec<Move>) {
    if mv.to.row == side.promotion_row() {
        out.extend(PieceKind::PROMOTIONS.iter().map(|kind| mv.promoting(*kind)));
    } else {
        out.push(mv);
    }
}

fn en_passant_is_safe(board: &mut Board, king: Square, side: Color, mv: &Move) -> bool {
    let Some(captured_at) = mv.capture_square() else {
        return false;
    };

    let capturer = board.replace(mv.from, None);
    let captured = board.replace(captured_at, None);
    board.set(mv.to, capturer);

    let safe = !scan_checks_and_pins(board, king, side).in_check();

    board.set(mv.to, None);
    board.set(captured_at, captured);
    board.set(mv.from, capturer);
    safe
}
