//! Crate root module declarations for the chess rules engine.
//!
//! Exposes board state, move descriptions, legal move generation and the
//! setup/notation helpers so the command-line driver, benchmarks and external
//! callers can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod piece_offsets;
}

pub mod move_generation {
    pub mod castling;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod playout;
    pub mod position_setup;
    pub mod render_game_state;
}

pub use chess_errors::{RulesError, RulesResult};
pub use game_state::chess_types::{CastlingRights, Color, Piece, PieceKind, Square};
pub use game_state::game_state::GameState;
pub use moves::move_descriptions::Move;
pub use utils::position_setup::PositionSetup;
