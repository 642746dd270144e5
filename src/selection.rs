//! Two-step move selection on the client side.
//!
//! The engine only accepts complete moves. Picking a move kind and then one
//! or two boxes is tracked here, and a finished selection is handed to the
//! engine as a single [`Command`].

use quantum_tictactoe::{Board, Position};
use tracing::{debug, instrument};

/// Prompt shown when waiting for a classical move target.
pub const CLASSICAL_PROMPT: &str = "Select a box to perform Classical Move.";
/// Prompt shown when waiting for a quantum move control.
pub const CONTROL_PROMPT: &str = "Select Control Box for Quantum Move.";
/// Prompt shown when waiting for a quantum move target.
pub const TARGET_PROMPT: &str = "Select Target Box for Quantum Move.";
/// Shown when the picked control box is not quantum.
pub const CONTROL_NOT_QUANTUM: &str = "Control box must be in a quantum state.";
/// Shown when a box is picked before choosing a move kind.
pub const CHOOSE_MOVE_PROMPT: &str = "Choose a move first: 'c' for Classical, 'e' for Quantum.";

/// Where the player is in building a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// No move kind chosen.
    #[default]
    Idle,
    /// Classical move chosen, waiting for the box to measure.
    AwaitingCell,
    /// Quantum move chosen, waiting for the control box.
    AwaitingControl,
    /// Control picked, waiting for the target box.
    AwaitingTarget(Position),
}

/// A complete move ready for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Measure one box.
    Classical(Position),
    /// Entangle `target` with `control`.
    Quantum {
        /// Quantum control box.
        control: Position,
        /// Classical target box.
        target: Position,
    },
}

/// What the front-end should do after a pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStep {
    /// Show this prompt and keep waiting.
    Prompt(String),
    /// Send this command to the engine.
    Submit(Command),
}

impl Selection {
    /// Starts a classical move.
    #[instrument]
    pub fn begin_classical(&mut self) -> &'static str {
        *self = Selection::AwaitingCell;
        CLASSICAL_PROMPT
    }

    /// Starts a quantum move.
    #[instrument]
    pub fn begin_quantum(&mut self) -> &'static str {
        *self = Selection::AwaitingControl;
        CONTROL_PROMPT
    }

    /// Abandons the current selection.
    #[instrument]
    pub fn cancel(&mut self) {
        *self = Selection::Idle;
    }

    /// The control box picked so far, if any.
    pub fn pending_control(&self) -> Option<Position> {
        match self {
            Selection::AwaitingTarget(control) => Some(*control),
            _ => None,
        }
    }

    /// Handles a box pick.
    ///
    /// The control box is checked against `board` so the player can retry
    /// without spending the move. Everything else is left to the engine.
    #[instrument(skip(board))]
    pub fn pick(&mut self, pos: Position, board: &Board) -> SelectionStep {
        match *self {
            Selection::Idle => SelectionStep::Prompt(CHOOSE_MOVE_PROMPT.to_string()),
            Selection::AwaitingCell => {
                *self = Selection::Idle;
                SelectionStep::Submit(Command::Classical(pos))
            }
            Selection::AwaitingControl => {
                if !board.get(pos).is_quantum() {
                    debug!(control = pos.number(), "Control pick rejected");
                    return SelectionStep::Prompt(CONTROL_NOT_QUANTUM.to_string());
                }
                *self = Selection::AwaitingTarget(pos);
                SelectionStep::Prompt(TARGET_PROMPT.to_string())
            }
            Selection::AwaitingTarget(control) => {
                *self = Selection::Idle;
                SelectionStep::Submit(Command::Quantum {
                    control,
                    target: pos,
                })
            }
        }
    }
}
