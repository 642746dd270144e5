//! Command-line interface for quantum_games.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::DEFAULT_SETTINGS_FILE;

/// Quantum Tic-Tac-Toe - superposed boxes, entanglement, and collapse
#[derive(Parser, Debug)]
#[command(name = "quantum_games")]
#[command(about = "Quantum tic-tac-toe for two players at one terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Seed for the collapse source (overrides the settings file)
        #[arg(long)]
        seed: Option<u64>,

        /// Path to the settings file
        #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
        config: PathBuf,

        /// Show the tutorial even if it was completed before
        #[arg(long)]
        tutorial: bool,
    },

    /// Play a list of moves headlessly and print one JSON record per move
    Script {
        /// Moves such as `c5` (measure box 5) or `q1:5` (entangle box 5 with control box 1)
        #[arg(required = true)]
        moves: Vec<String>,

        /// Seed for the collapse source
        #[arg(long)]
        seed: Option<u64>,

        /// Fixed collapse results as a string of 0/1 (1 = X, 0 = O); overrides --seed
        #[arg(long)]
        bits: Option<String>,
    },

    /// Print the rules
    Rules,
}

impl Cli {
    /// The chosen command, falling back to `play` with defaults.
    pub fn command_or_default(self) -> Command {
        self.command.unwrap_or(Command::Play {
            seed: None,
            config: PathBuf::from(DEFAULT_SETTINGS_FILE),
            tutorial: false,
        })
    }
}
