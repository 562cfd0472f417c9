use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::KNIGHT_OFFSETS;

/// A pinned knight can never stay on its pin axis, so it has no moves.
pub fn generate_knight_moves(
    game_state: &GameState,
    ctx: &GenerationContext<'_>,
    from: Square,
    out: &mut Vec<Move>,
) {
    if ctx.is_pinned(from) {
        return;
    }
    let knight = Piece::new(ctx.side, PieceKind::Knight);

    for offset in KNIGHT_OFFSETS {
        let Some(to) = from.offset(offset) else {
            continue;
        };
        match game_state.board.get(to) {
            Some(occupant) if occupant.color == ctx.side => {}
            target => out.push(Move::new(from, to, knight, target)),
        }
    }
}
