//! Core domain types for quantum tic-tac-toe.

use crate::position::Position;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{instrument, warn};

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// Result of measuring a quantum cell.
///
/// The mapping to marks is fixed: `Zero` collapses to O and `One` to X,
/// whoever performs the measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    /// Collapses to O.
    Zero,
    /// Collapses to X.
    One,
}

impl Bit {
    /// Mark a cell takes when it collapses on this bit.
    pub fn mark(self) -> Player {
        match self {
            Bit::Zero => Player::O,
            Bit::One => Player::X,
        }
    }

    /// Whether this collapse reverses cells entangled with the measured box.
    ///
    /// Depends on who measures, not on who owns the entangled cell:
    /// X is favored by `One`, O by `Zero`.
    pub fn favors(self, mover: Player) -> bool {
        matches!((mover, self), (Player::X, Bit::One) | (Player::O, Bit::Zero))
    }

    /// Parses `'0'` or `'1'`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

/// Whether a cell is still superposed or has been measured.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CellState {
    /// Superposition of X and O.
    Quantum,
    /// Collapsed to a fixed mark.
    Classical,
}

/// A single board cell.
///
/// Only classical cells carry a mark, and only classical cells hold an
/// entanglement link. The link points back at the quantum control cell whose
/// measurement may reverse this cell's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "CellView", try_from = "CellView")]
pub enum Cell {
    /// Superposed cell.
    #[default]
    Quantum,
    /// Measured cell.
    Classical {
        /// Mark the cell collapsed to (possibly reversed since).
        mark: Player,
        /// Quantum control cell this cell is entangled with.
        entangled_with: Option<Position>,
    },
}

impl Cell {
    /// A classical cell with no entanglement.
    pub fn classical(mark: Player) -> Self {
        Cell::Classical {
            mark,
            entangled_with: None,
        }
    }

    /// Whether the cell is still quantum.
    pub fn state(&self) -> CellState {
        match self {
            Cell::Quantum => CellState::Quantum,
            Cell::Classical { .. } => CellState::Classical,
        }
    }

    /// Returns the mark of a classical cell, `None` while quantum.
    pub fn value(&self) -> Option<Player> {
        match self {
            Cell::Quantum => None,
            Cell::Classical { mark, .. } => Some(*mark),
        }
    }

    /// Returns the control cell this cell is entangled with.
    pub fn entangled_with(&self) -> Option<Position> {
        match self {
            Cell::Quantum => None,
            Cell::Classical { entangled_with, .. } => *entangled_with,
        }
    }

    /// Checks if the cell is quantum.
    pub fn is_quantum(&self) -> bool {
        matches!(self, Cell::Quantum)
    }

    /// Checks if the cell is classical.
    pub fn is_classical(&self) -> bool {
        matches!(self, Cell::Classical { .. })
    }
}

/// Flat `{state, value, entangled_with}` form of a cell for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Quantum or classical.
    pub state: CellState,
    /// Mark, present only when classical.
    pub value: Option<Player>,
    /// Control cell, present only on entangled classical cells.
    pub entangled_with: Option<Position>,
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        Self {
            state: cell.state(),
            value: cell.value(),
            entangled_with: cell.entangled_with(),
        }
    }
}

impl TryFrom<CellView> for Cell {
    type Error = String;

    fn try_from(view: CellView) -> Result<Self, Self::Error> {
        match (view.state, view.value, view.entangled_with) {
            (CellState::Quantum, None, None) => Ok(Cell::Quantum),
            (CellState::Quantum, _, _) => {
                Err("quantum cell cannot hold a value or entanglement".to_string())
            }
            (CellState::Classical, Some(mark), entangled_with) => Ok(Cell::Classical {
                mark,
                entangled_with,
            }),
            (CellState::Classical, None, _) => Err("classical cell must hold a value".to_string()),
        }
    }
}

/// 3x3 quantum tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a board of nine quantum cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from explicit cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Iterates over positions and their cells.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Position::iter().map(|pos| (pos, self.get(pos)))
    }

    /// Positions still in superposition.
    pub fn quantum_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.is_quantum())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Positions already measured.
    pub fn classical_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.is_classical())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Classical cells entangled with `control`, in index order.
    pub fn entangled_targets(&self, control: Position) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.entangled_with() == Some(control))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// All entanglement links as `(target, control)` pairs, in target order.
    pub fn entanglements(&self) -> Vec<(Position, Position)> {
        self.iter()
            .filter_map(|(pos, cell)| cell.entangled_with().map(|control| (pos, control)))
            .collect()
    }

    /// Links `target` to `control`, returning the link it replaced.
    ///
    /// Does nothing on a quantum target.
    pub(crate) fn entangle(&mut self, target: Position, control: Position) -> Option<Position> {
        match &mut self.cells[target.to_index()] {
            Cell::Classical { entangled_with, .. } => entangled_with.replace(control),
            Cell::Quantum => None,
        }
    }

    /// Checks that every entanglement link points at a quantum cell.
    #[instrument(skip(self))]
    pub fn links_consistent(&self) -> bool {
        let dangling: Vec<_> = self
            .entanglements()
            .into_iter()
            .filter(|(_, control)| !self.get(*control).is_quantum())
            .collect();
        if !dangling.is_empty() {
            warn!(?dangling, "Entanglement links reference classical cells");
        }
        dangling.is_empty()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Quantum cells show their box number in brackets.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (pos, cell) in self.iter() {
            let symbol = match cell.value() {
                Some(mark) => format!(" {} ", mark),
                None => format!("[{}]", pos.number()),
            };
            result.push_str(&symbol);
            match pos.column() {
                2 if pos.row() < 2 => result.push_str("\n---+---+---\n"),
                2 => {}
                _ => result.push('|'),
            }
        }
        result
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has been decided.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}
