use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;

/// Leaf statistics for a perft run. Everything except `nodes` describes the
/// move that reached the leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count the leaves `depth` plies below the current position. The state is
/// walked in place and left exactly as it was found.
pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    perft_recurse(game_state, depth, &mut total);
    total
}

/// Node count below each root move, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = generate_legal_moves(game_state).moves;
    let mut divided = Vec::with_capacity(moves.len());
    for mv in moves {
        make_move(game_state, mv);
        divided.push((mv, perft(game_state, depth - 1).nodes));
        unmake_move(game_state);
    }
    divided
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    let moves = generate_legal_moves(game_state).moves;

    if depth == 1 {
        for mv in moves {
            counts.merge(leaf_counts(game_state, mv));
        }
        return;
    }

    for mv in moves {
        make_move(game_state, mv);
        perft_recurse(game_state, depth - 1, counts);
        unmake_move(game_state);
    }
}

fn leaf_counts(game_state: &mut GameState, mv: Move) -> PerftCounts {
    let mut leaf = PerftCounts {
        nodes: 1,
        captures: mv.is_capture() as u64,
        en_passant: mv.is_en_passant as u64,
        castles: mv.is_castle as u64,
        promotions: mv.promotion.is_some() as u64,
        ..PerftCounts::default()
    };

    make_move(game_state, mv);
    if game_state.is_in_check() {
        leaf.checks = 1;
        if generate_legal_moves(game_state).moves.is_empty() {
            leaf.checkmates = 1;
        }
    }
    unmake_move(game_state);

    leaf
}
