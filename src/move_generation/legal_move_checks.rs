//! Check and pin detection.
//!
//! Casts the eight queen rays and the eight knight jumps outward from a king
//! square. The first piece met on a ray decides it: an enemy that attacks
//! along that ray gives check, a friendly piece may be pinned if the next piece
//! beyond it is an enemy slider of the matching orientation.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::piece_offsets::{KNIGHT_OFFSETS, QUEEN_DIRECTIONS};

/// A friendly piece that may only move along `direction` (or its reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinInfo {
    pub square: Square,
    /// Ray direction from the king through the pinned piece.
    pub direction: Offset,
}

/// An enemy piece giving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInfo {
    pub square: Square,
    /// Ray direction from the king to the checker; `None` for knight checks.
    pub direction: Option<Offset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckScan {
    pub pins: Vec<PinInfo>,
    pub checks: Vec<CheckInfo>,
}

impl CheckScan {
    #[inline]
    pub fn in_check(&self) -> bool {
        !self.checks.is_empty()
    }

    #[inline]
    pub fn pin_direction(&self, square: Square) -> Option<Offset> {
        self.pins
            .iter()
            .find(|pin| pin.square == square)
            .map(|pin| pin.direction)
    }
}

/// Does a piece of `kind` and `color`, found `distance` squares from the king
/// along `direction`, attack the king?
fn attacks_along_ray(kind: PieceKind, color: Color, direction: Offset, distance: u8) -> bool {
    match kind {
        PieceKind::Rook => direction.is_orthogonal(),
        PieceKind::Bishop => direction.is_diagonal(),
        PieceKind::Queen => true,
        // The pawn sits one step from the king, opposite to its own advance.
        PieceKind::Pawn => {
            distance == 1 && direction.is_diagonal() && direction.d_row == -color.pawn_forward()
        }
        // Adjacency only; keeps kings from stepping next to each other.
        PieceKind::King => distance == 1,
        PieceKind::Knight => false,
    }
}

/// Scan for checks against, and pins of, the `color` king standing on `king`.
///
/// `king` need not hold the king: trial placements scan from a destination
/// square. A friendly king met on a ray is looked through.
pub fn scan_checks_and_pins(board: &Board, king: Square, color: Color) -> CheckScan {
    let mut scan = CheckScan::default();

    for direction in QUEEN_DIRECTIONS {
        let mut possible_pin: Option<Square> = None;
        let mut cursor = king;
        let mut distance = 0u8;

        while let Some(next) = cursor.offset(direction) {
            cursor = next;
            distance += 1;

            let Some(piece) = board.get(cursor) else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if possible_pin.is_some() {
                    break;
                }
                possible_pin = Some(cursor);
                continue;
            }

            if attacks_along_ray(piece.kind, piece.color, direction, distance) {
                match possible_pin {
                    None => scan.checks.push(CheckInfo {
                        square: cursor,
                        direction: Some(direction),
                    }),
                    Some(pinned) => scan.pins.push(PinInfo {
                        square: pinned,
                        direction,
                    }),
                }
            }
            break;
        }
    }

    let enemy_knight = Piece::new(color.opposite(), PieceKind::Knight);
    for offset in KNIGHT_OFFSETS {
        if let Some(square) = king.offset(offset) {
            if board.get(square) == Some(enemy_knight) {
                scan.checks.push(CheckInfo {
                    square,
                    direction: None,
                });
            }
        }
    }

    scan
}

/// Could a piece of `by` capture on `square`?
///
/// Every piece on a ray blocks it, kings included.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    for direction in QUEEN_DIRECTIONS {
        let mut cursor = square;
        let mut distance = 0u8;

        while let Some(next) = cursor.offset(direction) {
            cursor = next;
            distance += 1;

            if let Some(piece) = board.get(cursor) {
                if piece.color == by && attacks_along_ray(piece.kind, by, direction, distance) {
                    return true;
                }
                break;
            }
        }
    }

    let knight = Piece::new(by, PieceKind::Knight);
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(|offset| square.offset(offset))
        .any(|from| board.get(from) == Some(knight))
}

/// Trial-place the `color` king from `from` onto `to`, check whether it is
/// attacked there, and revert the board.
pub fn is_king_safe_on(board: &mut Board, color: Color, from: Square, to: Square) -> bool {
    let king = board.replace(from, None);
    let displaced = board.replace(to, king);

    let safe = !scan_checks_and_pins(board, to, color).in_check();

    board.set(to, displaced);
    board.set(from, king);
    safe
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(placement: &str) -> Board {
        Board::from_placement(placement).expect("test placement should parse")
    }

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn start_position_has_no_checks_or_pins() {
        let scan = scan_checks_and_pins(&Board::standard(), sq("e1"), Color::Light);
        assert_eq!(scan, CheckScan::default());
    }

    #[test]
    fn rook_behind_friendly_piece_records_a_pin() {
        let b = board("4r2k/8/8/8/8/8/4N3/4K3");
        let scan = scan_checks_and_pins(&b, sq("e1"), Color::Light);
        assert!(!scan.in_check());
        assert_eq!(
            scan.pins,
            vec![PinInfo {
                square: sq("e2"),
                direction: Offset::new(-1, 0)
            }]
        );
    }

    #[test]
    fn bishop_on_a_file_pins_nothing() {
        let b = board("4b2k/8/8/8/8/8/4N3/4K3");
        let scan = scan_checks_and_pins(&b, sq("e1"), Color::Light);
        assert!(scan.pins.is_empty());
        assert!(!scan.in_check());
    }

    #[test]
    fn double_check_reports_both_checkers() {
        let b = board("4r2k/8/8/8/8/8/2n5/4K3");
        let scan = scan_checks_and_pins(&b, sq("e1"), Color::Light);
        assert_eq!(scan.checks.len(), 2);
        assert!(scan
            .checks
            .contains(&CheckInfo { square: sq("c2"), direction: None }));
    }

    #[test]
    fn pawns_only_check_toward_their_capture_direction() {
        // d5 attacks e4, d3 only attacks rank 2.
        let b = board("7k/8/8/3p4/4K3/3p4/8/8");
        let scan = scan_checks_and_pins(&b, sq("e4"), Color::Light);
        assert_eq!(
            scan.checks,
            vec![CheckInfo {
                square: sq("d5"),
                direction: Some(Offset::new(-1, -1))
            }]
        );
    }

    #[test]
    fn enemy_king_adjacency_counts_as_attack() {
        let b = board("8/8/8/8/8/8/4k3/K7");
        assert!(is_square_attacked(&b, sq("e1"), Color::Dark));
        assert!(!is_square_attacked(&b, sq("e4"), Color::Dark));
    }

    #[test]
    fn defending_king_screens_the_squares_behind_it() {
        let b = board("7k/8/8/8/8/8/8/r3K3");
        assert!(is_square_attacked(&b, sq("d1"), Color::Dark));
        assert!(is_square_attacked(&b, sq("e1"), Color::Dark));
        assert!(!is_square_attacked(&b, sq("f1"), Color::Dark));
        assert!(!is_square_attacked(&b, sq("g1"), Color::Dark));
        assert!(!is_square_attacked(&b, sq("h1"), Color::Dark));
    }

    #[test]
    fn attack_query_sees_knights_and_pawns() {
        let b = board("7k/8/8/3p4/8/5n2/8/K7");
        assert!(is_square_attacked(&b, sq("e4"), Color::Dark));
        assert!(is_square_attacked(&b, sq("c4"), Color::Dark));
        assert!(!is_square_attacked(&b, sq("d3"), Color::Dark));
        assert!(is_square_attacked(&b, sq("g1"), Color::Dark));
        assert!(is_square_attacked(&b, sq("d2"), Color::Dark));
        assert!(!is_square_attacked(&b, sq("d6"), Color::Light));
    }

    #[test]
    fn king_trial_sees_through_its_origin_square() {
        let mut b = board("7k/8/8/8/r2K4/8/8/8");
        // Stepping away along the rook's line is still attacked.
        assert!(!is_king_safe_on(&mut b, Color::Light, sq("d4"), sq("e4")));
        assert!(is_king_safe_on(&mut b, Color::Light, sq("d4"), sq("d5")));
        assert_eq!(b, board("7k/8/8/8/r2K4/8/8/8"));
    }
}
