//! Game engine for quantum tic-tac-toe.
//!
//! One [`QuantumGame`] owns the board and match state. Front-ends drive it
//! through two move operations and read it back through [`QuantumGame::snapshot`].
//! Every operation is synchronous and either fully applies or leaves the game
//! untouched.

use crate::action::{ClassicalOutcome, QuantumOutcome, Resolution};
use crate::collapse::{CollapseSource, SeededCollapse};
use crate::error::MoveRejection;
use crate::position::Position;
use crate::rules::{self, Outcome};
use crate::snapshot::Snapshot;
use crate::types::{Bit, Board, Cell, GameStatus, Player};
use tracing::{debug, info, instrument};

/// Message shown on a fresh or reset board.
pub const WELCOME_MESSAGE: &str = "Welcome to the game!";

/// Message shown when a measured cell had no entangled partners.
pub const COLLAPSED_MESSAGE: &str =
    "You measured a quantum particle in a superposition state. It has now collapsed into a classical state.";

/// Quantum tic-tac-toe engine.
///
/// Measurement outcomes come from the injected [`CollapseSource`]; the source
/// survives [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct QuantumGame<C = SeededCollapse> {
    board: Board,
    current_player: Player,
    status: GameStatus,
    last_message: String,
    collapse: C,
}

impl<C: CollapseSource> QuantumGame<C> {
    /// Creates a new game with X to move and every cell quantum.
    #[instrument(skip(collapse))]
    pub fn new(collapse: C) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            last_message: WELCOME_MESSAGE.to_string(),
            collapse,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns the latest status message.
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Returns the collapse source.
    pub fn collapse(&self) -> &C {
        &self.collapse
    }

    /// Returns the collapse source mutably, e.g. to extend a script.
    pub fn collapse_mut(&mut self) -> &mut C {
        &mut self.collapse
    }

    /// Copies the current state for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.board.clone(),
            self.current_player,
            self.status,
            self.last_message.clone(),
        )
    }

    /// Measures the quantum cell at `index`, collapsing it to X or O.
    ///
    /// Every classical cell entangled with `index` is then resolved: its mark
    /// flips when the drawn bit favors the mover, and its link is consumed
    /// either way. The turn passes unless the move ended the game.
    ///
    /// # Errors
    ///
    /// Rejects the move, leaving the game unchanged, if the game is over,
    /// `index` is off the board, or the cell is already classical.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_classical_move(&mut self, index: usize) -> Result<ClassicalOutcome, MoveRejection> {
        let position = self.check_classical(index).inspect_err(|rejection| {
            debug!(%rejection, "Classical move rejected");
        })?;

        let mover = self.current_player;
        let bit = self.collapse.measure();
        let mark = bit.mark();
        self.board.set(position, Cell::classical(mark));
        debug!(?bit, %mark, "Cell collapsed");

        let resolutions = self.resolve_entanglements(position, bit, mover);
        self.last_message = match resolutions.last() {
            Some(resolution) => resolution.message(),
            None => COLLAPSED_MESSAGE.to_string(),
        };

        let verdict = self.finish_turn();
        info!(
            position = position.number(),
            %mark,
            resolved = resolutions.len(),
            ?verdict,
            "Classical move applied"
        );

        Ok(ClassicalOutcome {
            mover,
            position,
            bit,
            mark,
            resolutions,
            verdict,
        })
    }

    /// Entangles the classical cell at `target_index` with the quantum cell at
    /// `control_index`.
    ///
    /// Any link the target already held is discarded. Nothing collapses, so
    /// the turn always passes.
    ///
    /// # Errors
    ///
    /// Checked in order, first failure wins: game over, control off the board
    /// or not quantum, target off the board or not classical, control equal to
    /// target. The game is unchanged on rejection.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_quantum_move(
        &mut self,
        control_index: usize,
        target_index: usize,
    ) -> Result<QuantumOutcome, MoveRejection> {
        let (control, target) = self
            .check_quantum(control_index, target_index)
            .inspect_err(|rejection| {
                debug!(%rejection, "Quantum move rejected");
            })?;

        let mover = self.current_player;
        let replaced = self.board.entangle(target, control);
        let outcome = QuantumOutcome {
            mover,
            control,
            target,
            replaced,
        };
        self.last_message = outcome.message();
        self.current_player = mover.opponent();
        debug_assert!(self.board.links_consistent(), "Entanglement invariant violated");

        info!(
            control = control.number(),
            target = target.number(),
            ?replaced,
            "Quantum move applied"
        );
        Ok(outcome)
    }

    /// Starts a new match: all cells quantum, X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.last_message = WELCOME_MESSAGE.to_string();
        info!("Game reset");
    }

    fn check_classical(&self, index: usize) -> Result<Position, MoveRejection> {
        if self.is_over() {
            return Err(MoveRejection::GameOver);
        }
        let position = Position::from_index(index).ok_or(MoveRejection::IndexOutOfRange(index))?;
        if !self.board.get(position).is_quantum() {
            return Err(MoveRejection::NotQuantum(position));
        }
        Ok(position)
    }

    fn check_quantum(
        &self,
        control_index: usize,
        target_index: usize,
    ) -> Result<(Position, Position), MoveRejection> {
        if self.is_over() {
            return Err(MoveRejection::GameOver);
        }
        let control = Position::from_index(control_index)
            .ok_or(MoveRejection::IndexOutOfRange(control_index))?;
        if !self.board.get(control).is_quantum() {
            return Err(MoveRejection::ControlNotQuantum(control));
        }
        let target = Position::from_index(target_index)
            .ok_or(MoveRejection::IndexOutOfRange(target_index))?;
        if !self.board.get(target).is_classical() {
            return Err(MoveRejection::TargetNotClassical(target));
        }
        if control == target {
            return Err(MoveRejection::SameCell(control));
        }
        Ok((control, target))
    }

    /// Resolves cells that directly reference `control`. No chaining.
    fn resolve_entanglements(&mut self, control: Position, bit: Bit, mover: Player) -> Vec<Resolution> {
        let reverse = bit.favors(mover);
        self.board
            .entangled_targets(control)
            .into_iter()
            .filter_map(|affected| {
                let mark = self.board.get(affected).value()?;
                let mark = if reverse { mark.opponent() } else { mark };
                self.board.set(affected, Cell::classical(mark));
                debug!(cell = affected.number(), reversed = reverse, %mark, "Entanglement resolved");
                Some(Resolution::new(affected, reverse, mark))
            })
            .collect()
    }

    /// Runs the win/draw check; on a result ends the game, otherwise passes the turn.
    fn finish_turn(&mut self) -> Option<Outcome> {
        debug_assert!(self.board.links_consistent(), "Entanglement invariant violated");
        let verdict = rules::evaluate(&self.board);
        match verdict {
            Some(outcome) => {
                self.status = outcome.into();
                self.last_message = outcome.to_string();
            }
            None => self.current_player = self.current_player.opponent(),
        }
        verdict
    }
}

impl Default for QuantumGame<SeededCollapse> {
    fn default() -> Self {
        Self::new(SeededCollapse::from_entropy())
    }
}
