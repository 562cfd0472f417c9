//! Full legal move generation pipeline.
//!
//! Runs the check/pin detector for the side to move, generates pin-aware
//! candidates for every piece, then filters by check relief: under double check
//! only self-validated moves survive, under single check every other move must
//! land on a relief square (capture the checker or block its ray).

use tracing::trace;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::castling::generate_castle_moves;
use crate::move_generation::legal_move_checks::{scan_checks_and_pins, CheckInfo};
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoveSet {
    pub moves: Vec<Move>,
    pub in_check: bool,
}

/// Generate the legal moves for the side to move.
///
/// The board is touched only by trial placements, each reverted before the
/// generator returns.
pub fn generate_legal_moves(game_state: &mut GameState) -> LegalMoveSet {
    let snapshot = (game_state.en_passant_target, game_state.castling_rights);

    let side = game_state.side_to_move;
    let king = game_state.king_square(side);
    let scan = scan_checks_and_pins(&game_state.board, king, side);
    let ctx = GenerationContext {
        side,
        king,
        scan: &scan,
    };

    let own_pieces: Vec<(Square, PieceKind)> = game_state
        .board
        .pieces()
        .filter(|(_, piece)| piece.color == side)
        .map(|(square, piece)| (square, piece.kind))
        .collect();

    let mut moves = Vec::<Move>::with_capacity(64);
    for (from, kind) in own_pieces {
        match kind {
            PieceKind::Pawn => generate_pawn_moves(game_state, &ctx, from, &mut moves),
            PieceKind::Knight => generate_knight_moves(game_state, &ctx, from, &mut moves),
            PieceKind::Bishop => generate_bishop_moves(game_state, &ctx, from, &mut moves),
            PieceKind::Rook => generate_rook_moves(game_state, &ctx, from, &mut moves),
            PieceKind::Queen => generate_queen_moves(game_state, &ctx, from, &mut moves),
            PieceKind::King => generate_king_moves(game_state, &ctx, from, &mut moves),
        }
    }
    if !scan.in_check() {
        generate_castle_moves(game_state, side, king, &mut moves);
    }

    match scan.checks.as_slice() {
        [] => {}
        [check] => {
            let relief = relief_squares(king, check);
            moves.retain(|mv| is_self_validated(mv) || relief.contains(&mv.to));
        }
        _ => moves.retain(is_self_validated),
    }

    debug_assert_eq!(
        snapshot,
        (game_state.en_passant_target, game_state.castling_rights)
    );
    trace!(
        side = %side,
        checks = scan.checks.len(),
        pins = scan.pins.len(),
        count = moves.len(),
        "generated legal moves"
    );

    LegalMoveSet {
        moves,
        in_check: scan.in_check(),
    }
}

/// King moves and en passant captures were already proven safe by trial
/// placement.
#[inline]
fn is_self_validated(mv: &Move) -> bool {
    mv.is_king_move() || mv.is_en_passant
}

/// Squares a non-king move may land on to answer a single check.
pub fn relief_squares(king: Square, check: &CheckInfo) -> Vec<Square> {
    let Some(direction) = check.direction else {
        return vec![check.square];
    };

    let mut squares = Vec::with_capacity(7);
    let mut cursor = king;
    while let Some(next) = cursor.offset(direction) {
        squares.push(next);
        if next == check.square {
            break;
        }
        cursor = next;
    }
    squares
}
