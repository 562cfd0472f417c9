//! Authoritative game state.
//!
//! `GameState` owns the board plus every piece of bookkeeping that cannot be
//! recovered from piece placement: side to move, cached king squares, castling
//! rights, the en-passant target and the undo history. It is mutated in place
//! by `apply_move` / `undo_move` for the lifetime of a game.

use tracing::{debug, warn};

use crate::chess_errors::{RulesError, RulesResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::{is_square_attacked, scan_checks_and_pins};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::position_setup::{build_game_state, PositionSetup};

#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) king_squares: [Square; 2],
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) history: Vec<UndoState>,

    // --- Terminal classification from the last legal move query ---
    pub(crate) checkmate: bool,
    pub(crate) stalemate: bool,

    /// Legal moves computed for the current position, dropped on every
    /// apply/undo.
    pub(crate) legal_cache: Option<Vec<Move>>,
}

/// Everything apply/undo must restore exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub board: Board,
    pub side_to_move: Color,
    pub king_squares: [Square; 2],
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard starting position, Light to move, all castling rights held.
    pub fn new_game() -> Self {
        Self::from_parts(
            Board::standard(),
            Color::Light,
            [Square::new(7, 4), Square::new(0, 4)],
            CastlingRights::ALL,
            None,
        )
    }

    /// Build a constructed position. See [`PositionSetup`] for what is validated.
    pub fn from_setup(setup: &PositionSetup) -> RulesResult<Self> {
        build_game_state(setup)
    }

    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        king_squares: [Square; 2],
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> Self {
        Self {
            board,
            side_to_move,
            king_squares,
            castling_rights,
            en_passant_target,
            history: Vec::new(),
            checkmate: false,
            stalemate: false,
            legal_cache: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// True when the last legal move query found no moves while in check.
    #[inline]
    pub fn checkmate(&self) -> bool {
        self.checkmate
    }

    /// True when the last legal move query found no moves while not in check.
    #[inline]
    pub fn stalemate(&self) -> bool {
        self.stalemate
    }

    /// Number of applied moves since the game started.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Applied moves, oldest first.
    pub fn move_log(&self) -> impl Iterator<Item = &Move> + '_ {
        self.history.iter().map(|record| &record.mv)
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            board: self.board,
            side_to_move: self.side_to_move,
            king_squares: self.king_squares,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
        }
    }

    /// Is the side to move currently in check?
    pub fn is_in_check(&self) -> bool {
        let side = self.side_to_move;
        scan_checks_and_pins(&self.board, self.king_square(side), side).in_check()
    }

    /// Could a piece of `by` capture on `square` if it held an enemy piece?
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        is_square_attacked(&self.board, square, by)
    }

    /// Compute the legal moves for the side to move and classify the position
    /// as checkmate or stalemate when there are none.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let legal = generate_legal_moves(self);

        let no_moves = legal.moves.is_empty();
        self.checkmate = no_moves && legal.in_check;
        self.stalemate = no_moves && !legal.in_check;
        if self.checkmate {
            debug!(side = %self.side_to_move, "checkmate");
        } else if self.stalemate {
            debug!(side = %self.side_to_move, "stalemate");
        }

        self.legal_cache = Some(legal.moves.clone());
        legal.moves
    }

    /// Apply a move from the current legal move set.
    ///
    /// Moves that are not in that set are rejected without touching the state.
    pub fn apply_move(&mut self, mv: Move) -> RulesResult<()> {
        if self.legal_cache.is_none() {
            self.legal_moves();
        }
        let offered = self
            .legal_cache
            .as_ref()
            .is_some_and(|moves| moves.contains(&mv));
        if !offered {
            warn!(mv = %mv.coordinate_notation(), "rejected move outside the legal move set");
            return Err(RulesError::IllegalMove {
                notation: mv.coordinate_notation(),
            });
        }

        make_move(self, mv);
        debug!(mv = %mv, ply = self.history.len(), "applied move");
        Ok(())
    }

    /// Undo the most recent move and return it.
    pub fn undo_move(&mut self) -> RulesResult<Move> {
        match unmake_move(self) {
            Some(record) => {
                debug!(mv = %record.mv, ply = self.history.len(), "undid move");
                Ok(record.mv)
            }
            None => {
                warn!("undo requested with empty history");
                Err(RulesError::NothingToUndo)
            }
        }
    }

    /// Find the legal move with the given endpoints. `promotion` must be given
    /// exactly when the move promotes.
    pub fn find_move(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<PieceKind>,
    ) -> RulesResult<Move> {
        let from_sq = algebraic_to_square(from)?;
        let to_sq = algebraic_to_square(to)?;

        let moves = match &self.legal_cache {
            Some(moves) => moves.clone(),
            None => self.legal_moves(),
        };
        moves
            .into_iter()
            .find(|mv| mv.from == from_sq && mv.to == to_sq && mv.promotion == promotion)
            .ok_or_else(|| {
                let mut notation = format!("{from}{to}");
                if let Some(kind) = promotion {
                    notation.push(kind.letter().to_ascii_lowercase());
                }
                RulesError::NoSuchMove { notation }
            })
    }

    /// Find a legal move from coordinate notation such as `e2e4` or `e7e8q`.
    pub fn find_move_by_notation(&mut self, notation: &str) -> RulesResult<Move> {
        let no_such_move = || RulesError::NoSuchMove {
            notation: notation.to_owned(),
        };
        if !notation.is_ascii() || !(4..=5).contains(&notation.len()) {
            return Err(no_such_move());
        }

        let promotion = match notation[4..].chars().next() {
            Some(letter) => match PieceKind::from_letter(letter) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(no_such_move()),
            },
            None => None,
        };
        self.find_move(&notation[0..2], &notation[2..4], promotion)
    }

    /// Convenience for scripted games: look up and apply `notation`.
    pub fn play(&mut self, notation: &str) -> RulesResult<Move> {
        let mv = self.find_move_by_notation(notation)?;
        self.apply_move(mv)?;
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::GameState;
    use crate::chess_errors::RulesError;
    use crate::game_state::chess_types::*;
    use crate::moves::move_descriptions::Move;
    use crate::utils::position_setup::PositionSetup;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    fn setup(placement: &str, side: Color, castling: &str) -> GameState {
        let setup = PositionSetup::new(placement, side)
            .with_castling(castling)
            .expect("castling text should parse");
        GameState::from_setup(&setup).expect("test position should be valid")
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let mut game = GameState::new_game();
        assert_eq!(game.legal_moves().len(), 20);
        assert!(!game.checkmate());
        assert!(!game.stalemate());
    }

    #[test]
    fn apply_then_undo_restores_every_field() {
        let mut game = GameState::new_game();
        let before = game.snapshot();
        for mv in game.legal_moves() {
            game.apply_move(mv).expect("offered move should apply");
            game.undo_move().expect("undo should succeed");
            assert_eq!(game.snapshot(), before, "{mv} was not undone exactly");
        }
    }

    #[test]
    fn undo_with_empty_history_is_rejected() {
        let mut game = GameState::new_game();
        assert_eq!(game.undo_move(), Err(RulesError::NothingToUndo));
        assert_eq!(game.snapshot(), GameState::new_game().snapshot());
    }

    #[test]
    fn moves_outside_the_legal_set_are_rejected() {
        let mut game = GameState::new_game();
        let bogus = Move::new(
            sq("e2"),
            sq("e5"),
            Piece::new(Color::Light, PieceKind::Pawn),
            None,
        );
        let before = game.snapshot();
        assert!(matches!(
            game.apply_move(bogus),
            Err(RulesError::IllegalMove { .. })
        ));
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn stale_moves_from_a_previous_position_are_rejected() {
        let mut game = GameState::new_game();
        let e4 = game.find_move("e2", "e4", None).expect("e2e4 should be legal");
        game.apply_move(e4).expect("e2e4 should apply");
        assert!(game.apply_move(e4).is_err());
    }

    #[test]
    fn fools_mate_ends_in_checkmate() {
        let mut game = GameState::new_game();
        for notation in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play(notation).expect("scripted move should be legal");
        }
        assert!(game.legal_moves().is_empty());
        assert!(game.checkmate());
        assert!(!game.stalemate());
        assert!(game.is_in_check());
    }

    #[test]
    fn undo_clears_terminal_classification() {
        let mut game = GameState::new_game();
        for notation in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play(notation).expect("scripted move should be legal");
        }
        game.legal_moves();
        assert!(game.checkmate());
        game.undo_move().expect("undo should succeed");
        assert!(!game.checkmate());
        assert!(!game.stalemate());
    }

    #[test]
    fn own_king_blocks_attacks_on_the_squares_behind_it() {
        let game = setup("7k/8/8/8/8/8/8/r3K3", Color::Light, "-");
        assert!(game.is_in_check());
        assert!(game.is_square_attacked(sq("d1"), Color::Dark));
        assert!(!game.is_square_attacked(sq("g1"), Color::Dark));
        assert!(!game.is_square_attacked(sq("h1"), Color::Dark));
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let mut game = setup("7k/5Q2/6K1/8/8/8/8/8", Color::Dark, "-");
        assert!(game.legal_moves().is_empty());
        assert!(game.stalemate());
        assert!(!game.checkmate());
    }

    #[test]
    fn en_passant_is_offered_for_one_ply_only() {
        let mut game = GameState::new_game();
        for notation in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            game.play(notation).expect("scripted move should be legal");
        }
        assert_eq!(game.en_passant_target(), Some(sq("d6")));
        let capture = game.find_move("e5", "d6", None).expect("en passant should be offered");
        assert!(capture.is_en_passant);

        game.play("g1f3").expect("quiet move should be legal");
        game.play("a6a5").expect("quiet move should be legal");
        assert_eq!(game.en_passant_target(), None);
        assert!(game.find_move("e5", "d6", None).is_err());
    }

    #[test]
    fn en_passant_removes_the_passed_pawn_and_undo_restores_it() {
        let mut game = GameState::new_game();
        for notation in ["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"] {
            game.play(notation).expect("scripted move should be legal");
        }
        assert_eq!(game.board().get(sq("d5")), None);
        assert_eq!(
            game.board().get(sq("d6")),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
        game.undo_move().expect("undo should succeed");
        assert_eq!(
            game.board().get(sq("d5")),
            Some(Piece::new(Color::Dark, PieceKind::Pawn))
        );
        assert_eq!(game.board().get(sq("d6")), None);
        assert_eq!(game.en_passant_target(), Some(sq("d6")));
    }

    #[test]
    fn castling_rights_stay_cleared_after_king_returns() {
        let mut game = setup("r3k2r/8/8/8/8/8/8/R3K2R", Color::Light, "KQkq");
        for notation in ["e1e2", "e8e7", "e2e1", "e7e8"] {
            game.play(notation).expect("scripted move should be legal");
        }
        let rights = game.castling_rights();
        assert!(!rights.has(Color::Light, CastleWing::Kingside));
        assert!(!rights.has(Color::Light, CastleWing::Queenside));
        assert!(!rights.has(Color::Dark, CastleWing::Kingside));
        assert!(game.legal_moves().iter().all(|mv| !mv.is_castle));
    }

    #[test]
    fn castling_moves_the_rook_and_undo_puts_it_back() {
        let mut game = setup("r3k2r/8/8/8/8/8/8/R3K2R", Color::Light, "KQkq");
        let before = game.snapshot();
        let castle = game.play("e1g1").expect("kingside castle should be legal");
        assert!(castle.is_castle);
        assert_eq!(game.king_square(Color::Light), sq("g1"));
        assert_eq!(
            game.board().get(sq("f1")),
            Some(Piece::new(Color::Light, PieceKind::Rook))
        );
        assert_eq!(game.board().get(sq("h1")), None);

        game.play("e8c8").expect("queenside castle should be legal");
        assert_eq!(
            game.board().get(sq("d8")),
            Some(Piece::new(Color::Dark, PieceKind::Rook))
        );
        assert_eq!(game.board().get(sq("a8")), None);

        game.undo_move().expect("undo should succeed");
        game.undo_move().expect("undo should succeed");
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn promotion_offers_four_pieces_and_applies_the_choice() {
        let mut game = setup("8/P6k/8/8/8/8/8/K7", Color::Light, "-");
        let promotions: Vec<Move> = game
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.promotion.is_some())
            .collect();
        assert_eq!(promotions.len(), 4);

        game.play("a7a8n").expect("under-promotion should be legal");
        assert_eq!(
            game.board().get(sq("a8")),
            Some(Piece::new(Color::Light, PieceKind::Knight))
        );
        game.undo_move().expect("undo should succeed");
        assert_eq!(
            game.board().get(sq("a7")),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
    }

    #[test]
    fn capturing_a_rook_on_its_origin_clears_that_right() {
        let mut game = setup("r3k2r/8/8/8/8/8/8/R3K2R", Color::Light, "KQkq");
        game.play("a1a8").expect("rook capture should be legal");
        let rights = game.castling_rights();
        assert!(!rights.has(Color::Dark, CastleWing::Queenside));
        assert!(rights.has(Color::Dark, CastleWing::Kingside));
        assert!(!rights.has(Color::Light, CastleWing::Queenside));
        assert!(rights.has(Color::Light, CastleWing::Kingside));
    }

    #[test]
    fn move_log_records_applied_moves_in_order() {
        let mut game = GameState::new_game();
        game.play("e2e4").expect("e2e4 should be legal");
        game.play("e7e5").expect("e7e5 should be legal");
        let log: Vec<String> = game.move_log().map(|mv| mv.coordinate_notation()).collect();
        assert_eq!(log, ["e2e4", "e7e5"]);
        assert_eq!(game.history_len(), 2);
    }

    #[test]
    fn malformed_notation_is_rejected() {
        let mut game = GameState::new_game();
        assert!(matches!(
            game.find_move_by_notation("e2e4k"),
            Err(RulesError::NoSuchMove { .. })
        ));
        assert!(matches!(
            game.find_move_by_notation("e2"),
            Err(RulesError::NoSuchMove { .. })
        ));
        assert!(matches!(
            game.find_move_by_notation("z2e4"),
            Err(RulesError::InvalidSquare { .. })
        ));
    }

    #[test]
    fn seeded_random_games_never_expose_the_movers_king() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..8 {
            let mut game = GameState::new_game();
            for _ in 0..120 {
                let moves = game.legal_moves();
                let before = game.snapshot();
                for mv in &moves {
                    let mover = game.side_to_move();
                    game.apply_move(*mv).expect("offered move should apply");
                    assert!(
                        !game.is_square_attacked(game.king_square(mover), mover.opposite()),
                        "{mv} left the king attacked"
                    );
                    game.undo_move().expect("undo should succeed");
                    assert_eq!(game.snapshot(), before);
                    game.legal_moves();
                }
                let Some(choice) = moves.choose(&mut rng) else {
                    break;
                };
                game.apply_move(*choice).expect("chosen move should apply");
            }
        }
    }
}
