//! What accepted moves report back to the caller.
//!
//! Moves return first-class descriptions of what happened so a front-end can
//! animate reversals and announce results without diffing snapshots.

use crate::position::Position;
use crate::rules::Outcome;
use crate::types::{Bit, Player};
use serde::{Deserialize, Serialize};

/// How one entangled cell was resolved when its control collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Resolution {
    /// The entangled classical cell.
    pub affected: Position,
    /// Whether its mark was flipped.
    pub reversed: bool,
    /// Its mark after resolution.
    pub mark: Player,
}

impl Resolution {
    /// Status message for this resolution.
    pub fn message(&self) -> String {
        if self.reversed {
            format!(
                "You measured an entangled box. Something ~spooky~ happened to box {}. REVERSAL!",
                self.affected.number()
            )
        } else {
            format!(
                "Oh no, you measured an entangled box and something ~spooky~ happened to box {}. No reversal :(",
                self.affected.number()
            )
        }
    }
}

/// Result of an accepted classical move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalOutcome {
    /// Player who measured.
    pub mover: Player,
    /// The measured cell.
    pub position: Position,
    /// Bit drawn from the collapse source.
    pub bit: Bit,
    /// Mark the measured cell collapsed to.
    pub mark: Player,
    /// Every entangled cell resolved by this collapse, in index order.
    pub resolutions: Vec<Resolution>,
    /// Set when this move ended the game.
    pub verdict: Option<Outcome>,
}

impl ClassicalOutcome {
    /// Cells whose marks were flipped.
    pub fn reversed(&self) -> impl Iterator<Item = Position> + '_ {
        self.resolutions
            .iter()
            .filter(|r| r.reversed)
            .map(|r| r.affected)
    }
}

/// Result of an accepted quantum move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumOutcome {
    /// Player who entangled.
    pub mover: Player,
    /// Quantum control cell.
    pub control: Position,
    /// Classical target cell now holding the link.
    pub target: Position,
    /// Link the target held before, now discarded.
    pub replaced: Option<Position>,
}

impl QuantumOutcome {
    /// Status message announcing the link.
    pub fn message(&self) -> String {
        format!(
            "You successfully entangled box {} with box {}. Beware of your (and your opponents') actions now.",
            self.control.number(),
            self.target.number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_messages_name_the_cell() {
        let flipped = Resolution::new(Position::TopCenter, true, Player::X);
        assert!(flipped.message().contains("box 2"));
        assert!(flipped.message().contains("REVERSAL"));

        let kept = Resolution::new(Position::TopCenter, false, Player::O);
        assert!(kept.message().contains("No reversal"));
    }

    #[test]
    fn test_reversed_filters_resolutions() {
        let outcome = ClassicalOutcome {
            mover: Player::X,
            position: Position::TopLeft,
            bit: Bit::One,
            mark: Player::X,
            resolutions: vec![
                Resolution::new(Position::Center, true, Player::X),
                Resolution::new(Position::BottomRight, false, Player::O),
            ],
            verdict: None,
        };
        assert_eq!(outcome.reversed().collect::<Vec<_>>(), vec![Position::Center]);
    }
}
