use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_sliding_moves, GenerationContext};
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::QUEEN_DIRECTIONS;

pub fn generate_queen_moves(
    game_state: &GameState,
    ctx: &GenerationContext<'_>,
    from: Square,
    out: &mut Vec<Move>,
) {
    push_sliding_moves(game_state, ctx, from, &QUEEN_DIRECTIONS, out);
}
