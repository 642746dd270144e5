//! Board positions for quantum tic-tac-toe.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A position on the board (index 0-8, row-major).
///
/// Row is `index / 3`, column is `index % 3`. Players see positions
/// numbered 1-9, see [`Position::number`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// Number of positions on the board.
    pub const COUNT: usize = 9;

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index, `None` if the index is off the board.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// One-based box number shown to players (1-9).
    pub fn number(self) -> usize {
        self.to_index() + 1
    }

    /// Parses a one-based box number ("1" to "9").
    #[instrument]
    pub fn from_number(s: &str) -> Option<Self> {
        match s.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Self::from_index(n - 1),
            _ => None,
        }
    }

    /// Grid row (0-2).
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Grid column (0-2).
    pub fn column(self) -> usize {
        self.to_index() % 3
    }

    /// Position at the given row and column, if both are on the grid.
    pub fn at(row: usize, column: usize) -> Option<Self> {
        if row < 3 && column < 3 {
            Self::from_index(row * 3 + column)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_covers_board() {
        for (index, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), index);
            assert_eq!(Position::from_index(index), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
        assert_eq!(Position::iter().count(), Position::COUNT);
    }

    #[test]
    fn test_row_and_column() {
        assert_eq!(Position::TopRight.row(), 0);
        assert_eq!(Position::TopRight.column(), 2);
        assert_eq!(Position::BottomLeft.row(), 2);
        assert_eq!(Position::BottomLeft.column(), 0);
        assert_eq!(Position::at(1, 1), Some(Position::Center));
        assert_eq!(Position::at(3, 0), None);
    }

    #[test]
    fn test_from_number_is_one_based() {
        assert_eq!(Position::from_number("1"), Some(Position::TopLeft));
        assert_eq!(Position::from_number(" 9 "), Some(Position::BottomRight));
        assert_eq!(Position::from_number("0"), None);
        assert_eq!(Position::from_number("10"), None);
        assert_eq!(Position::from_number("x"), None);
    }
}
