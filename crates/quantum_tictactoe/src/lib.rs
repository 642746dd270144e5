//! Pure game logic for quantum tic-tac-toe.
//!
//! Cells start in superposition. A *classical move* measures a quantum cell,
//! collapsing it to X or O at random. A *quantum move* entangles a classical
//! cell with a quantum control cell, so that measuring the control later may
//! reverse the classical cell's mark.
//!
//! # Example
//!
//! ```
//! use quantum_tictactoe::{Bit, Player, QuantumGame, ScriptedCollapse};
//!
//! let mut game = QuantumGame::new(ScriptedCollapse::new([Bit::Zero, Bit::One]));
//!
//! // X measures box 2 and it collapses to O.
//! game.apply_classical_move(1).unwrap();
//! // O entangles box 2 with quantum box 1.
//! game.apply_quantum_move(0, 1).unwrap();
//! // X measures box 1; the One favors X, so box 2 flips to X.
//! let outcome = game.apply_classical_move(0).unwrap();
//!
//! assert_eq!(outcome.reversed().count(), 1);
//! assert_eq!(game.snapshot().board().cells()[1].value(), Some(Player::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod collapse;
mod error;
mod game;
mod position;
mod snapshot;
mod types;

pub mod rules;

pub use action::{ClassicalOutcome, QuantumOutcome, Resolution};
pub use collapse::{CollapseSource, ScriptedCollapse, SeededCollapse};
pub use error::MoveRejection;
pub use game::{COLLAPSED_MESSAGE, QuantumGame, WELCOME_MESSAGE};
pub use position::Position;
pub use rules::Outcome;
pub use snapshot::Snapshot;
pub use types::{Bit, Board, Cell, CellState, CellView, GameStatus, Player};
