use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::CheckScan;
use crate::moves::move_descriptions::Move;

/// Per-query data shared by the piece generators.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub side: Color,
    pub king: Square,
    pub scan: &'a CheckScan,
}

impl GenerationContext<'_> {
    #[inline]
    pub fn is_pinned(&self, square: Square) -> bool {
        self.scan.pin_direction(square).is_some()
    }

    /// May the piece on `from` move to `to` without leaving its pin axis?
    #[inline]
    pub fn pin_allows(&self, from: Square, to: Square) -> bool {
        match self.scan.pin_direction(from) {
            Some(direction) => on_pin_axis(self.king, direction, to),
            None => true,
        }
    }
}

/// Is `target` on the line through `king` along `direction` (either way)?
#[inline]
pub fn on_pin_axis(king: Square, direction: Offset, target: Square) -> bool {
    let d_row = target.row as i8 - king.row as i8;
    let d_col = target.col as i8 - king.col as i8;
    d_row * direction.d_col == d_col * direction.d_row
}

/// Walk each ray from `from`: quiet moves until the first occupied square,
/// which is captured if it holds an enemy piece.
pub fn push_sliding_moves(
    game_state: &GameState,
    ctx: &GenerationContext<'_>,
    from: Square,
    directions: &[Offset],
    out: &mut Vec<Move>,
) {
    let Some(piece) = game_state.board.get(from) else {
        return;
    };

    for direction in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(*direction) {
            cursor = to;
            let target = game_state.board.get(to);
            if let Some(occupant) = target {
                if occupant.color == ctx.side {
                    break;
                }
            }
            if ctx.pin_allows(from, to) {
                out.push(Move::new(from, to, piece, target));
            }
            if target.is_some() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::on_pin_axis;
    use crate::game_state::chess_types::{Offset, Square};

    #[test]
    fn pin_axis_includes_both_directions_only() {
        let king = Square::new(7, 4);
        let up = Offset::new(-1, 0);
        assert!(on_pin_axis(king, up, Square::new(0, 4)));
        assert!(on_pin_axis(king, up, Square::new(5, 4)));
        assert!(!on_pin_axis(king, up, Square::new(5, 3)));

        let diagonal = Offset::new(-1, -1);
        assert!(on_pin_axis(king, diagonal, Square::new(4, 1)));
        assert!(!on_pin_axis(king, diagonal, Square::new(4, 7)));
    }
}
