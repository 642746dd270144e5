//! Move rejection reasons.

use crate::position::Position;

/// Why the engine refused a move.
///
/// A rejected move never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The index does not name a board cell.
    #[display("Box index {} is out of range (must be 0-8)", _0)]
    IndexOutOfRange(usize),

    /// A classical move targeted a cell that was already measured.
    #[display("Classical move can only be applied to a quantum state box (box {})", _0.number())]
    NotQuantum(Position),

    /// The control of a quantum move was not quantum.
    #[display("Control box must be in a quantum state (box {})", _0.number())]
    ControlNotQuantum(Position),

    /// The target of a quantum move was not classical.
    #[display("Target box must be in a classical state (box {})", _0.number())]
    TargetNotClassical(Position),

    /// A quantum move named the same box twice.
    #[display("Control and target boxes must be different (box {})", _0.number())]
    SameCell(Position),
}

impl MoveRejection {
    /// Short stable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            MoveRejection::GameOver => "game already over",
            MoveRejection::IndexOutOfRange(_) => "index out of range",
            MoveRejection::NotQuantum(_) => "not quantum",
            MoveRejection::ControlNotQuantum(_) => "control must be quantum",
            MoveRejection::TargetNotClassical(_) => "target must be classical",
            MoveRejection::SameCell(_) => "control and target must differ",
        }
    }
}

impl std::error::Error for MoveRejection {}
