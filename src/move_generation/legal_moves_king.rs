//! King step generation.
//!
//! Every step is validated on the spot by trial placement, so king moves
//! never need the relief-square filter applied to other pieces.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_safe_on;
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::KING_OFFSETS;

pub fn generate_king_moves(
    game_state: &mut GameState,
    ctx: &GenerationContext<'_>,
    from: Square,
    out: &mut Vec<Move>,
) {
    let king = Piece::new(ctx.side, PieceKind::King);

    for offset in KING_OFFSETS {
        let Some(to) = from.offset(offset) else {
            continue;
        };
        let target = game_state.board.get(to);
        if target.is_some_and(|occupant| occupant.color == ctx.side) {
            continue;
        }
        if is_king_safe_on(&mut game_state.board, ctx.side, from, to) {
            out.push(Move::new(from, to, king, target));
        }
    }
}
