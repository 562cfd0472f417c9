//! Constructed-position setup.
//!
//! A `PositionSetup` is the text-level description of a position (placement,
//! side to move, castling rights, en-passant target). Turning it into a
//! `GameState` rejects anything the move generator could not handle: a missing
//! or duplicated king, pawns on a back rank, rights without their king and rook,
//! an en-passant target that no double push could have produced, or the side
//! not to move standing in check.

use crate::chess_errors::{RulesError, RulesResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::NamedPosition;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::scan_checks_and_pins;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSetup {
    pub placement: String,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

impl PositionSetup {
    /// A setup with no castling rights and no en-passant target.
    pub fn new(placement: impl Into<String>, side_to_move: Color) -> Self {
        Self {
            placement: placement.into(),
            side_to_move,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
        }
    }

    /// Set castling rights from `KQkq` text, or `-` for none.
    pub fn with_castling(mut self, castling: &str) -> RulesResult<Self> {
        self.castling_rights = CastlingRights::parse(castling).ok_or_else(|| {
            RulesError::placement(format!("invalid castling rights {castling:?}"))
        })?;
        Ok(self)
    }

    /// Set the en-passant target square, or clear it with `-`.
    pub fn with_en_passant(mut self, square: &str) -> RulesResult<Self> {
        self.en_passant_target = match square {
            "-" => None,
            text => Some(algebraic_to_square(text)?),
        };
        Ok(self)
    }

    pub fn from_named(position: &NamedPosition) -> RulesResult<Self> {
        let side = match position.side_to_move {
            'w' => Color::Light,
            'b' => Color::Dark,
            other => {
                return Err(RulesError::placement(format!(
                    "invalid side to move '{other}'"
                )))
            }
        };
        let setup = Self::new(position.placement, side).with_castling(position.castling)?;
        match position.en_passant {
            Some(square) => setup.with_en_passant(square),
            None => Ok(setup),
        }
    }
}

pub(crate) fn build_game_state(setup: &PositionSetup) -> RulesResult<GameState> {
    let board = Board::from_placement(&setup.placement)?;
    let king_squares = [
        single_king(&board, Color::Light)?,
        single_king(&board, Color::Dark)?,
    ];

    check_back_rank_pawns(&board)?;
    check_castling_rights(&board, setup.castling_rights)?;
    if let Some(target) = setup.en_passant_target {
        check_en_passant_target(&board, setup.side_to_move, target)?;
    }

    let waiting = setup.side_to_move.opposite();
    if scan_checks_and_pins(&board, king_squares[waiting.index()], waiting).in_check() {
        return Err(RulesError::placement(format!(
            "{waiting} is in check but it is {} to move",
            setup.side_to_move
        )));
    }

    Ok(GameState::from_parts(
        board,
        setup.side_to_move,
        king_squares,
        setup.castling_rights,
        setup.en_passant_target,
    ))
}

fn single_king(board: &Board, color: Color) -> RulesResult<Square> {
    match board.find_kings(color).as_slice() {
        [square] => Ok(*square),
        kings => Err(RulesError::placement(format!(
            "{color} must have exactly one king, found {}",
            kings.len()
        ))),
    }
}

fn check_back_rank_pawns(board: &Board) -> RulesResult<()> {
    let stray = board
        .pieces()
        .find(|(square, piece)| piece.kind == PieceKind::Pawn && (square.row == 0 || square.row == 7));
    match stray {
        Some((square, _)) => Err(RulesError::placement(format!("pawn on back rank at {square}"))),
        None => Ok(()),
    }
}

fn check_castling_rights(board: &Board, rights: CastlingRights) -> RulesResult<()> {
    for color in [Color::Light, Color::Dark] {
        let row = color.back_row();
        for wing in CastleWing::BOTH {
            if !rights.has(color, wing) {
                continue;
            }
            let king_home = board.get(Square::new(row, 4)) == Some(Piece::new(color, PieceKind::King));
            let rook_home = board.get(Square::new(row, wing.rook_origin_col()))
                == Some(Piece::new(color, PieceKind::Rook));
            if !king_home || !rook_home {
                return Err(RulesError::placement(format!(
                    "castling right {rights} needs the {color} king and rook on their home squares"
                )));
            }
        }
    }
    Ok(())
}

/// The target must sit directly behind an enemy pawn that just made a double
/// push, with both squares it passed over empty.
fn check_en_passant_target(board: &Board, side: Color, target: Square) -> RulesResult<()> {
    let pusher = side.opposite();
    let expected_row = pusher.pawn_start_row() as i8 + pusher.pawn_forward();
    let plausible = target.row as i8 == expected_row
        && board.is_empty(target)
        && target
            .offset_by(-pusher.pawn_forward(), 0)
            .is_some_and(|origin| board.is_empty(origin))
        && target
            .offset_by(pusher.pawn_forward(), 0)
            .is_some_and(|landing| board.get(landing) == Some(Piece::new(pusher, PieceKind::Pawn)));

    if plausible {
        Ok(())
    } else {
        Err(RulesError::placement(format!(
            "en passant target {target} does not follow a {pusher} double push"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::PositionSetup;
    use crate::chess_errors::RulesError;
    use crate::game_state::chess_rules::{KIWIPETE, NAMED_POSITIONS};
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;

    fn build(setup: PositionSetup) -> Result<GameState, RulesError> {
        GameState::from_setup(&setup)
    }

    fn is_placement_error(result: Result<GameState, RulesError>) -> bool {
        matches!(result, Err(RulesError::InvalidPlacement { .. }))
    }

    #[test]
    fn every_named_position_builds() {
        for position in NAMED_POSITIONS {
            let setup = PositionSetup::from_named(&position).expect("named position should parse");
            let game = build(setup).expect("named position should be valid");
            assert_eq!(game.board().placement(), position.placement, "{}", position.name);
        }
    }

    #[test]
    fn named_setup_carries_side_and_rights() {
        let setup = PositionSetup::from_named(&KIWIPETE).expect("kiwipete should parse");
        assert_eq!(setup.side_to_move, Color::Light);
        assert_eq!(setup.castling_rights, CastlingRights::ALL);
        assert_eq!(setup.en_passant_target, None);
    }

    #[test]
    fn kings_are_counted_per_color() {
        assert!(is_placement_error(build(PositionSetup::new("8/8/8/8/8/8/8/4K3", Color::Light))));
        assert!(is_placement_error(build(PositionSetup::new(
            "4k3/8/8/8/8/8/8/3KK3",
            Color::Light
        ))));
    }

    #[test]
    fn pawns_on_back_ranks_are_rejected() {
        assert!(is_placement_error(build(PositionSetup::new("P3k3/8/8/8/8/8/8/4K3", Color::Light))));
        assert!(is_placement_error(build(PositionSetup::new("4k3/8/8/8/8/8/8/p3K3", Color::Light))));
    }

    #[test]
    fn castling_rights_need_king_and_rook_at_home() {
        let setup = PositionSetup::new("4k3/8/8/8/8/8/8/4K2R", Color::Light);
        assert!(build(setup.clone().with_castling("K").expect("K should parse")).is_ok());
        assert!(is_placement_error(build(setup.clone().with_castling("Q").expect("Q should parse"))));
        assert!(is_placement_error(build(setup.with_castling("k").expect("k should parse"))));
    }

    #[test]
    fn malformed_castling_text_is_rejected() {
        let setup = PositionSetup::new("4k3/8/8/8/8/8/8/4K3", Color::Light);
        assert!(setup.clone().with_castling("KX").is_err());
        assert!(setup.with_castling("KK").is_err());
    }

    #[test]
    fn en_passant_target_must_follow_a_double_push() {
        let base = PositionSetup::new("4k3/8/8/3Pp3/8/8/8/4K3", Color::Light);
        let ok = base.clone().with_en_passant("e6").expect("e6 should parse");
        assert!(build(ok).is_ok());

        // Wrong row for the side to move.
        let wrong_row = base.clone().with_en_passant("e3").expect("e3 should parse");
        assert!(is_placement_error(build(wrong_row)));

        // No pawn in front of the target.
        let no_pawn = base.with_en_passant("d6").expect("d6 should parse");
        assert!(is_placement_error(build(no_pawn)));
    }

    #[test]
    fn waiting_side_in_check_is_rejected() {
        // Light rook gives check to the Dark king but Light is to move.
        let setup = PositionSetup::new("4k3/8/8/8/8/8/8/4RK2", Color::Light);
        assert!(is_placement_error(build(setup)));
        let setup = PositionSetup::new("4k3/8/8/8/8/8/8/4RK2", Color::Dark);
        assert!(build(setup).is_ok());
    }

    #[test]
    fn bad_square_text_is_an_invalid_square() {
        let result = PositionSetup::new("4k3/8/8/8/8/8/8/4K3", Color::Light).with_en_passant("z9");
        assert!(matches!(result, Err(RulesError::InvalidSquare { .. })));
    }
}
