//! Read-only view of a match for front-ends.

use crate::types::{Board, GameStatus, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Everything a front-end needs to render the current match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// All nine cells.
    board: Board,
    /// Player to move (the winner's turn is not switched).
    current_player: Player,
    /// In progress, won, or drawn.
    status: GameStatus,
    /// Convenience flag mirroring `status`.
    game_over: bool,
    /// Latest engine message.
    last_message: String,
}

impl Snapshot {
    pub(crate) fn new(
        board: Board,
        current_player: Player,
        status: GameStatus,
        last_message: String,
    ) -> Self {
        Self {
            board,
            current_player,
            status,
            game_over: status.is_over(),
            last_message,
        }
    }
}
