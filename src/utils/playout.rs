//! Seeded random-game checker.
//!
//! Plays uniformly random legal games from the starting position. At every
//! visited position each legal move is made and unmade once to confirm the
//! state comes back bit-for-bit and that the mover's king is never left
//! attacked; one move is then drawn and applied through the public API.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, warn};

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayoutOutcome {
    LightWinCheckmate,
    DarkWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutConfig {
    pub max_plies: u16,
    pub seed: u64,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayoutResult {
    pub outcome: PlayoutOutcome,
    pub final_state: GameState,
    pub played_moves: Vec<String>,
    /// One line per broken invariant; empty for a clean game.
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: PlayoutConfig,
}

impl Default for PlayoutSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: PlayoutConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayoutSeriesStats {
    pub games: u16,
    pub light_wins: u16,
    pub dark_wins: u16,
    pub draws: u16,
    pub total_plies: u64,
    pub violations: Vec<String>,
}

impl PlayoutSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} light_wins={} dark_wins={} draws={} plies={} violations={}",
            self.games,
            self.light_wins,
            self.dark_wins,
            self.draws,
            self.total_plies,
            self.violations.len()
        )
    }
}

pub fn play_random_game(config: PlayoutConfig) -> PlayoutResult {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut game = GameState::new_game();
    let mut played_moves = Vec::new();
    let mut violations = Vec::new();

    let outcome = loop {
        let moves = game.legal_moves();
        if moves.is_empty() {
            break match (game.checkmate(), game.side_to_move()) {
                (true, Color::Dark) => PlayoutOutcome::LightWinCheckmate,
                (true, Color::Light) => PlayoutOutcome::DarkWinCheckmate,
                (false, _) => PlayoutOutcome::DrawStalemate,
            };
        }
        if played_moves.len() >= usize::from(config.max_plies) {
            break PlayoutOutcome::DrawMaxPlies;
        }

        audit_moves(&mut game, &moves, &mut violations);

        let mv = moves[rng.random_range(0..moves.len())];
        if let Err(err) = game.apply_move(mv) {
            violations.push(format!("ply {}: offered move refused: {err}", played_moves.len()));
            break PlayoutOutcome::DrawMaxPlies;
        }
        played_moves.push(mv.coordinate_notation());
    };

    for violation in &violations {
        warn!(seed = config.seed, "{violation}");
    }
    debug!(
        seed = config.seed,
        plies = played_moves.len(),
        ?outcome,
        "playout finished"
    );

    PlayoutResult {
        outcome,
        final_state: game,
        played_moves,
        violations,
    }
}

/// Make and unmake every legal move of the current position, recording any
/// move that leaves its own king attacked or fails to restore the state.
fn audit_moves(game: &mut GameState, moves: &[Move], violations: &mut Vec<String>) {
    let ply = game.history_len();
    let mover = game.side_to_move();
    let before = game.snapshot();

    for &mv in moves {
        make_move(game, mv);
        if game.is_square_attacked(game.king_square(mover), mover.opposite()) {
            violations.push(format!("ply {ply}: {} leaves the {mover} king attacked", mv.coordinate_notation()));
        }
        unmake_move(game);
        if game.snapshot() != before {
            violations.push(format!("ply {ply}: undoing {} did not restore the position", mv.coordinate_notation()));
        }
    }
}

pub fn run_playout_series(config: PlayoutSeriesConfig) -> PlayoutSeriesStats {
    let mut stats = PlayoutSeriesStats::default();

    for game_idx in 0..config.games {
        let per_game = PlayoutConfig {
            seed: config.base_seed.wrapping_add(u64::from(game_idx)),
            ..config.per_game
        };
        let result = play_random_game(per_game);

        stats.games += 1;
        stats.total_plies += result.played_moves.len() as u64;
        match result.outcome {
            PlayoutOutcome::LightWinCheckmate => stats.light_wins += 1,
            PlayoutOutcome::DarkWinCheckmate => stats.dark_wins += 1,
            PlayoutOutcome::DrawStalemate | PlayoutOutcome::DrawMaxPlies => stats.draws += 1,
        }
        stats.violations.extend(
            result
                .violations
                .into_iter()
                .map(|violation| format!("seed {}: {violation}", per_game.seed)),
        );
    }

    stats
}
