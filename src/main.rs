use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chess_rules::game_state::chess_rules::{named_position, NAMED_POSITIONS};
use chess_rules::move_generation::perft::{perft, perft_divide};
use chess_rules::utils::playout::{run_playout_series, PlayoutConfig, PlayoutSeriesConfig};
use chess_rules::utils::render_game_state::render_game_state;
use chess_rules::{GameState, PositionSetup, RulesError, RulesResult};

#[derive(Parser, Debug)]
#[command(about = "Chess rules engine driver", author, version)]
struct CmdArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes below a named position
    Perft {
        #[arg(long, default_value = "start")]
        position: String,
        #[arg(long, default_value_t = 3)]
        depth: u8,
        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Play seeded random games and check apply/undo and king safety
    Playout {
        #[arg(long, default_value_t = 10)]
        games: u16,
        #[arg(long, default_value_t = 300)]
        max_plies: u16,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Render a named position, optionally after a list of coordinate moves
    Show {
        #[arg(long, default_value = "start")]
        position: String,
        #[arg(long, value_delimiter = ',')]
        moves: Vec<String>,
    },
}

fn load_position(name: &str) -> RulesResult<GameState> {
    let position = named_position(name).ok_or_else(|| {
        let known: Vec<&str> = NAMED_POSITIONS.iter().map(|position| position.name).collect();
        RulesError::InvalidPlacement {
            reason: format!("unknown position {name:?}, expected one of {}", known.join(", ")),
        }
    })?;
    GameState::from_setup(&PositionSetup::from_named(&position)?)
}

fn run(command: Command) -> RulesResult<bool> {
    match command {
        Command::Perft {
            position,
            depth,
            divide,
        } => {
            let mut game = load_position(&position)?;
            let started = Instant::now();

            if divide {
                let mut total = 0u64;
                for (mv, nodes) in perft_divide(&mut game, depth) {
                    println!("{}: {nodes}", mv.coordinate_notation());
                    total += nodes;
                }
                println!("\nnodes: {total}");
            } else {
                let counts = perft(&mut game, depth);
                println!("{counts:#?}");
            }

            info!(
                position = %position,
                depth,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "perft finished"
            );
            Ok(true)
        }
        Command::Playout {
            games,
            max_plies,
            seed,
        } => {
            let stats = run_playout_series(PlayoutSeriesConfig {
                games,
                base_seed: seed,
                per_game: PlayoutConfig { max_plies, seed },
            });
            println!("{}", stats.report());
            for violation in &stats.violations {
                error!("{violation}");
            }
            Ok(stats.violations.is_empty())
        }
        Command::Show { position, moves } => {
            let mut game = load_position(&position)?;
            for notation in &moves {
                game.play(notation)?;
            }
            println!("{}", render_game_state(&game));

            let legal = game.legal_moves();
            let listed: Vec<String> = legal.iter().map(|mv| mv.to_string()).collect();
            println!("{} legal: {}", legal.len(), listed.join(" "));
            if game.checkmate() {
                println!("checkmate");
            } else if game.stalemate() {
                println!("stalemate");
            }
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cmd_args = CmdArgs::parse();
    match run(cmd_args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
