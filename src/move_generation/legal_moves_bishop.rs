use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_sliding_moves, GenerationContext};
use crate::moves::move_descriptions::Move;
use crate::moves::piece_offsets::BISHOP_DIRECTIONS;

pub fn generate_bishop_moves(
    game_state: &GameState,
    ctx: &GenerationContext<'_>,
    from: Square,
    out: &mut Vec<Move>,
) {
    push_sliding_moves(game_state, ctx, from, &BISHOP_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::scan_checks_and_pins;
    use crate::move_generation::legal_move_shared::GenerationContext;
    use crate::utils::position_setup::PositionSetup;

    fn bishop_targets(placement: &str, from: &str) -> Vec<String> {
        let game = GameState::from_setup(&PositionSetup::new(placement, Color::Light))
            .expect("test position should be valid");
        let king = game.king_square(Color::Light);
        let scan = scan_checks_and_pins(game.board(), king, Color::Light);
        let ctx = GenerationContext {
            side: Color::Light,
            king,
            scan: &scan,
        };
        let mut out = Vec::new();
        generate_bishop_moves(&game, &ctx, from.parse().expect("square should parse"), &mut out);
        let mut targets: Vec<String> = out.iter().map(|mv| mv.to.to_string()).collect();
        targets.sort();
        targets
    }

    #[test]
    fn bishop_on_d4_covers_thirteen_squares() {
        assert_eq!(bishop_targets("k7/8/8/8/3B4/8/8/7K", "d4").len(), 13);
    }

    #[test]
    fn diagonally_pinned_bishop_may_capture_its_pinner() {
        assert_eq!(
            bishop_targets("7k/8/8/8/8/2b5/3B4/4K3", "d2"),
            ["c3"]
        );
    }
}
