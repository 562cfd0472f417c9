//! Terminal-oriented Unicode board renderer.
//!
//! Rank 8 is drawn at the top, matching the board's row order.

use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board plus a status line for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = render_board(game_state.board());
    out.push('\n');
    out.push_str(&format!(
        "{} to move, castling {}, en passant {}",
        game_state.side_to_move(),
        game_state.castling_rights(),
        game_state
            .en_passant_target()
            .map_or_else(|| "-".to_owned(), |square| square.to_string())
    ));
    out
}

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for (row, cells) in board.rows().iter().enumerate() {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');

        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Some(piece) => out.push(piece_to_unicode(*piece)),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::{render_board, render_game_state};
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_renders_rank_eight_first() {
        let game = GameState::new_game();
        let text = render_board(game.board());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[4], "5 · · · · · · · · 5");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }

    #[test]
    fn status_line_follows_the_game() {
        let mut game = GameState::new_game();
        game.play("e2e4").expect("e2e4 should be legal");
        let text = render_game_state(&game);
        assert!(text.ends_with("dark to move, castling KQkq, en passant e3"));
        assert_eq!(game.board().to_string(), render_board(game.board()));
    }
}
