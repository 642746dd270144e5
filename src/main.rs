//! Quantum Games - terminal entry point.
//!
//! Plays quantum tic-tac-toe in a terminal UI, or headlessly from a move list.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use quantum_games::{App, Cli, Command, RULES, ScriptMove, Settings, parse_bits, run_script, run_tui};
use quantum_tictactoe::{CollapseSource, QuantumGame, ScriptedCollapse, SeededCollapse};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,quantum_games=debug";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command_or_default() {
        Command::Play {
            seed,
            config,
            tutorial,
        } => run_play(seed, config, tutorial),
        Command::Script { moves, seed, bits } => run_scripted(moves, seed, bits),
        Command::Rules => {
            initialize_stderr_tracing();
            println!("{}", RULES);
            Ok(())
        }
    }
}

/// Run the interactive terminal game
fn run_play(seed: Option<u64>, config: PathBuf, force_tutorial: bool) -> Result<()> {
    let settings = Settings::load_or_default(&config)?;
    initialize_tui_tracing(settings.log_file())?;

    let collapse = match seed.or(*settings.seed()) {
        Some(seed) => SeededCollapse::new(seed),
        None => SeededCollapse::from_entropy(),
    };
    info!(seed = collapse.seed(), config = %config.display(), "Starting game");

    let source: Box<dyn CollapseSource> = Box::new(collapse);
    let app = App::new(QuantumGame::new(source), settings, Some(config), force_tutorial);
    run_tui(app)
}

/// Play a move list and print one JSON line per move
fn run_scripted(moves: Vec<String>, seed: Option<u64>, bits: Option<String>) -> Result<()> {
    initialize_stderr_tracing();

    let moves = moves
        .iter()
        .map(|token| token.parse::<ScriptMove>())
        .collect::<Result<Vec<_>, _>>()?;

    let source: Box<dyn CollapseSource> = match (bits, seed) {
        (Some(bits), _) => Box::new(ScriptedCollapse::new(parse_bits(&bits)?)),
        (None, Some(seed)) => Box::new(SeededCollapse::new(seed)),
        (None, None) => Box::new(SeededCollapse::from_entropy()),
    };
    let mut game = QuantumGame::new(source);

    for record in run_script(&mut game, &moves) {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

/// Log to a file so output does not garble the terminal UI
#[instrument]
fn initialize_tui_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false),
        )
        .init();

    info!("TUI tracing initialized");
    Ok(())
}

/// Log to stderr, leaving stdout for program output
#[instrument]
fn initialize_stderr_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
