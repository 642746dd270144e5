//! Onboarding tutorial and rules text.

use tracing::{debug, instrument};

/// One page of the onboarding tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorialStep {
    /// Part of the screen the page talks about.
    pub focus: Focus,
    /// Page text.
    pub message: &'static str,
}

/// Screen areas the tutorial can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Focus {
    /// The 3x3 grid.
    #[strum(to_string = "Game grid")]
    Board,
    /// The classical move key.
    #[strum(to_string = "Classical move")]
    ClassicalMove,
    /// The quantum move key.
    #[strum(to_string = "Quantum move")]
    QuantumMove,
    /// The reset key.
    Reset,
    /// The message line.
    #[strum(to_string = "Message area")]
    Message,
    /// The rules key.
    Rules,
}

/// Tutorial pages in display order.
pub const TUTORIAL_STEPS: [TutorialStep; 6] = [
    TutorialStep {
        focus: Focus::Board,
        message: "This is the game grid where you place your moves. It consists of 9 boxes arranged in a 3x3 grid.\n\nThe boxes are neither X nor O. They are in a superposition state of both X and O.\n\nIt is a NEW STATE!",
    },
    TutorialStep {
        focus: Focus::ClassicalMove,
        message: "Press 'c' for a Classical Move: collapse a quantum box into either X or O at random.\n\nJust like with quantum particles, you are making a measurement here, and by doing so you COLLAPSE the box from superposition to a classical state.",
    },
    TutorialStep {
        focus: Focus::QuantumMove,
        message: "Press 'e' for a Quantum Move: entangle a quantum box with a classical box. Measuring the quantum box later can spookily influence the classical one, no matter the distance.\n\nIn the real quantum world only quantum particles entangle, but this game makes an exception.",
    },
    TutorialStep {
        focus: Focus::Reset,
        message: "Press 'r' to put every box back into its quantum state, the superposition of X and O.",
    },
    TutorialStep {
        focus: Focus::Message,
        message: "The message area shows game updates, prompts, and notifications.",
    },
    TutorialStep {
        focus: Focus::Rules,
        message: "Press '?' at any time to read the detailed rules of Quantum Tic-Tac-Toe.",
    },
];

/// Rules overlay text.
pub const RULES: &str = "\
QUANTUM TIC-TAC-TOE

Every box starts in superposition: it is both X and O until measured.
Players take turns, X first. On your turn make exactly one move:

Classical Move ('c', then pick a box)
  Measure a quantum box. It collapses to X or O with equal chance,
  whoever measured it.

Quantum Move ('e', then pick a control box, then a target box)
  Entangle a classical target box with a quantum control box.
  A classical box holds at most one entanglement; a new one replaces it.

Measuring an entangled control box
  If the collapse favors the player who measured (X for X, O for O),
  every classical box entangled with it flips its mark. Otherwise the
  boxes keep their marks. Either way the entanglement is used up.

Three classical boxes with the same mark in a row, column, or diagonal
win. If every box is classical and nobody has a line, it is a draw.";

/// Progress through the tutorial pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tutorial {
    step: usize,
}

impl Tutorial {
    /// Starts at the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// The page being shown.
    pub fn current(&self) -> &'static TutorialStep {
        &TUTORIAL_STEPS[self.step.min(TUTORIAL_STEPS.len() - 1)]
    }

    /// One-based page number.
    pub fn page(&self) -> usize {
        self.step + 1
    }

    /// Total number of pages.
    pub fn pages(&self) -> usize {
        TUTORIAL_STEPS.len()
    }

    /// Whether the current page is the last one.
    pub fn is_last(&self) -> bool {
        self.step + 1 >= TUTORIAL_STEPS.len()
    }

    /// Moves to the next page. Returns `false` when the tutorial is finished.
    #[instrument]
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            debug!("Tutorial finished");
            return false;
        }
        self.step += 1;
        true
    }
}
