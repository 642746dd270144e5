//! Game rules for quantum tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are separated from board storage
//! so the engine and tests can evaluate any position directly.

pub mod draw;
pub mod win;

pub use draw::is_fully_classical;
pub use win::{LINES, check_winner};

use crate::types::{Board, GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins!", player),
            Outcome::Draw => write!(f, "The game is a draw!"),
        }
    }
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(player) => GameStatus::Won(player),
            Outcome::Draw => GameStatus::Draw,
        }
    }
}

/// Evaluates the board: a winner, a draw, or `None` while play continues.
///
/// A completed line takes precedence over a full board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(player) = check_winner(board) {
        return Some(Outcome::Winner(player));
    }
    if is_fully_classical(board) {
        return Some(Outcome::Draw);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Position};

    #[test]
    fn test_evaluate_fresh_board() {
        assert_eq!(evaluate(&Board::new()), None);
    }

    #[test]
    fn test_win_beats_full_board() {
        use Player::{O, X};
        let marks = [X, X, X, O, O, X, X, O, O];
        let board = Board::from_cells(marks.map(Cell::classical));
        assert_eq!(evaluate(&board), Some(Outcome::Winner(X)));
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Outcome::Winner(Player::O).to_string(), "Player O wins!");
        assert_eq!(Outcome::Draw.to_string(), "The game is a draw!");
        assert_eq!(GameStatus::from(Outcome::Draw), GameStatus::Draw);
    }

    #[test]
    fn test_quantum_cell_keeps_game_open() {
        use Player::{O, X};
        let marks = [X, O, X, X, O, O, O, X, X];
        let mut board = Board::from_cells(marks.map(Cell::classical));
        board.set(Position::Center, Cell::Quantum);
        assert_eq!(evaluate(&board), None);
    }
}
