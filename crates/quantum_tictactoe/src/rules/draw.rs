//! Draw detection logic for quantum tic-tac-toe.

use crate::types::Board;
use tracing::instrument;

/// Checks if every cell has been measured.
///
/// A fully classical board with no winner is a draw.
#[instrument(skip(board))]
pub fn is_fully_classical(board: &Board) -> bool {
    board.cells().iter().all(|cell| cell.is_classical())
}
