//! Fixed step tables for every piece kind.

use crate::game_state::chess_types::{Color, Offset};

/// Rook rays.
pub const ROOK_DIRECTIONS: [Offset; 4] = [
    Offset::new(-1, 0),
    Offset::new(0, -1),
    Offset::new(1, 0),
    Offset::new(0, 1),
];

pub const BISHOP_DIRECTIONS: [Offset; 4] = [
    Offset::new(-1, -1),
    Offset::new(-1, 1),
    Offset::new(1, -1),
    Offset::new(1, 1),
];

/// Queen rays; also the eight king steps.
pub const QUEEN_DIRECTIONS: [Offset; 8] = [
    ROOK_DIRECTIONS[0],
    ROOK_DIRECTIONS[1],
    ROOK_DIRECTIONS[2],
    ROOK_DIRECTIONS[3],
    BISHOP_DIRECTIONS[0],
    BISHOP_DIRECTIONS[1],
    BISHOP_DIRECTIONS[2],
    BISHOP_DIRECTIONS[3],
];

pub const KING_OFFSETS: [Offset; 8] = QUEEN_DIRECTIONS;

pub const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(-1, -2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(1, 2),
    Offset::new(2, -1),
    Offset::new(2, 1),
];

/// The two diagonal steps a pawn of `color` captures along.
#[inline]
pub const fn pawn_capture_offsets(color: Color) -> [Offset; 2] {
    let forward = color.pawn_forward();
    [Offset::new(forward, -1), Offset::new(forward, 1)]
}
