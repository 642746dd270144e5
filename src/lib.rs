//! Quantum Tic-Tac-Toe in the terminal.
//!
//! The rules engine lives in the `quantum_tictactoe` crate. This crate adds
//! the front-end around it: move selection, the onboarding tutorial, player
//! settings, headless script mode, and the ratatui interface.
//!
//! # Architecture
//!
//! - **Selection**: turns key presses into complete engine moves
//! - **Tutorial**: onboarding pages and rules text
//! - **Settings**: TOML-persisted player preferences
//! - **Script**: headless play that reports JSON snapshots
//! - **TUI**: crossterm event loop and ratatui rendering
//!
//! # Example
//!
//! ```
//! use quantum_games::{run_script, ScriptMove};
//! use quantum_tictactoe::{Bit, QuantumGame, ScriptedCollapse};
//!
//! let mut game = QuantumGame::new(ScriptedCollapse::new([Bit::One]));
//! let moves: Vec<ScriptMove> = vec!["c5".parse().unwrap()];
//! let records = run_script(&mut game, &moves);
//! assert!(records[0].accepted);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod script;
mod selection;
mod settings;
mod tui;
mod tutorial;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Script mode
pub use script::{ScriptError, ScriptMove, ScriptRecord, parse_bits, run_script};

// Crate-level exports - Move selection
pub use selection::{
    CHOOSE_MOVE_PROMPT, CLASSICAL_PROMPT, CONTROL_NOT_QUANTUM, CONTROL_PROMPT, Command as MoveCommand,
    Selection, SelectionStep, TARGET_PROMPT,
};

// Crate-level exports - Settings
pub use settings::{ConfigError, DEFAULT_SETTINGS_FILE, Settings};

// Crate-level exports - Terminal UI
pub use tui::{App, FLASH_DURATION, GAME_OVER_HINT, Game, digit_position, move_cursor, run_tui};

// Crate-level exports - Tutorial
pub use tutorial::{Focus, RULES, TUTORIAL_STEPS, Tutorial, TutorialStep};
